//! Database façade
//!
//! Runs entity-generated SQL on a [`Connection`] and rehydrates select
//! results into fresh entity instances. Every operation logs one start and
//! one end (or end_error) event.

use crate::connection::{Connection, Cursor};
use crate::entity::Entity;
use crate::errors::RowbindError;
use crate::value::Value;
use crate::{log_op_end, log_op_error, log_op_start};
use std::time::Instant;

/// Thin execution layer over one live connection
pub struct Database<C: Connection> {
    connection: C,
}

impl<C: Connection> Database<C> {
    pub fn new(connection: C) -> Self {
        Self { connection }
    }

    pub fn connection(&self) -> &C {
        &self.connection
    }

    /// Release the underlying connection
    ///
    /// # Errors
    ///
    /// Whatever the store reports while closing.
    pub fn close(self) -> Result<(), C::Error> {
        log_op_start!("db_close");
        let start = Instant::now();
        self.connection
            .close()
            .inspect_err(|e| log_op_error!("db_close", e, duration_ms = elapsed_ms(start)))?;
        log_op_end!("db_close", duration_ms = elapsed_ms(start));
        Ok(())
    }

    /// Run raw SQL with no parameters
    ///
    /// # Errors
    ///
    /// Store errors, unmodified.
    pub fn execute(&self, sql: &str) -> Result<Cursor, C::Error> {
        self.connection.execute(sql, &[])
    }

    /// Run raw SQL with positional parameters
    ///
    /// # Errors
    ///
    /// Store errors, unmodified.
    pub fn execute_with(&self, sql: &str, params: &[Value]) -> Result<Cursor, C::Error> {
        self.connection.execute(sql, params)
    }

    /// Create the entity's table if it does not exist
    ///
    /// # Errors
    ///
    /// `NoColumnTypeDefined` before anything is sent to the store, or store
    /// errors.
    pub fn create<E: Entity>(&self, entity: &E) -> Result<(), C::Error> {
        let table = entity.table_name();
        log_op_start!("db_create", table = table);
        let start = Instant::now();

        let result = entity
            .create()
            .map_err(C::Error::from)
            .and_then(|sql| self.connection.execute(&sql, &[]));

        match result {
            Ok(_) => {
                log_op_end!("db_create", duration_ms = elapsed_ms(start), table = table);
                Ok(())
            }
            Err(e) => {
                log_op_error!("db_create", e, duration_ms = elapsed_ms(start), table = table);
                Err(e)
            }
        }
    }

    /// Insert the entity's current values as one row
    ///
    /// Values are bound as parameters, never interpolated into the SQL.
    ///
    /// # Errors
    ///
    /// `AttributeUnreadable` before anything is sent to the store, or store
    /// errors such as constraint violations.
    pub fn insert<E: Entity>(&self, entity: &E) -> Result<(), C::Error> {
        let table = entity.table_name();
        log_op_start!("db_insert", table = table);
        let start = Instant::now();

        let result = entity
            .insert()
            .map_err(C::Error::from)
            .and_then(|insert| self.connection.execute(&insert.sql, &insert.values));

        match result {
            Ok(_) => {
                log_op_end!("db_insert", duration_ms = elapsed_ms(start), table = table);
                Ok(())
            }
            Err(e) => {
                log_op_error!("db_insert", e, duration_ms = elapsed_ms(start), table = table);
                Err(e)
            }
        }
    }

    /// Select every row of `E`'s table
    ///
    /// # Errors
    ///
    /// See [`Database::select_with`].
    pub fn select<E: Entity + Default>(&self) -> Result<Vec<E>, C::Error> {
        self.select_with(E::default)
    }

    /// Select every row, building each instance with `factory`
    ///
    /// One extra instance is built up front as the template for the select
    /// statement. Each row's i-th value is written through the i-th column's
    /// setter. Rows come back in store order.
    ///
    /// # Errors
    ///
    /// Store errors, `RowWidthMismatch` if a row does not line up with the
    /// columns, or any setter error.
    pub fn select_with<E, F>(&self, mut factory: F) -> Result<Vec<E>, C::Error>
    where
        E: Entity,
        F: FnMut() -> E,
    {
        let template = factory();
        let table = template.table_name();
        log_op_start!("db_select", table = table);
        let start = Instant::now();

        let result = self
            .connection
            .execute(&template.select(), &[])
            .and_then(|cursor| {
                cursor
                    .map(|row| hydrate(&template, factory(), row.into_values()))
                    .collect::<Result<Vec<E>, RowbindError>>()
                    .map_err(C::Error::from)
            });

        match result {
            Ok(rows) => {
                log_op_end!(
                    "db_select",
                    duration_ms = elapsed_ms(start),
                    table = table,
                    row_count = rows.len()
                );
                Ok(rows)
            }
            Err(e) => {
                log_op_error!("db_select", e, duration_ms = elapsed_ms(start), table = table);
                Err(e)
            }
        }
    }
}

fn hydrate<E: Entity>(template: &E, mut entity: E, values: Vec<Value>) -> Result<E, RowbindError> {
    let columns = template.columns();
    if values.len() != columns.len() {
        return Err(RowbindError::RowWidthMismatch {
            table: template.table_name().to_string(),
            expected: columns.len(),
            actual: values.len(),
        });
    }
    for (column, value) in columns.iter().zip(values) {
        column.set(&mut entity, value)?;
    }
    Ok(entity)
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}
