//! SQLite implementation of `rowbind_core::Connection`

use crate::config::StoreConfig;
use crate::db;
use crate::errors::{Result, StoreError};
use rowbind_core::{Connection, Cursor, Row, Value};
use rusqlite::types::{ToSqlOutput, Type, Value as SqlValue, ValueRef};

/// A rowbind connection over one rusqlite connection
pub struct SqliteConnection {
    conn: rusqlite::Connection,
}

impl SqliteConnection {
    /// Open and configure a connection
    ///
    /// # Errors
    ///
    /// SQLite errors from opening or configuring the database.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let conn = db::open(config)?;
        tracing::debug!(
            path = ?config.path,
            "opened sqlite connection"
        );
        Ok(Self { conn })
    }

    /// # Errors
    ///
    /// SQLite errors from opening the database.
    pub fn open_in_memory() -> Result<Self> {
        Self::open(&StoreConfig::in_memory())
    }
}

impl Connection for SqliteConnection {
    type Error = StoreError;

    fn execute(&self, sql: &str, params: &[Value]) -> Result<Cursor> {
        let mut stmt = self.conn.prepare(sql)?;
        let width = stmt.column_count();

        let mut rows = stmt.query(rusqlite::params_from_iter(
            params.iter().map(value_to_param),
        ))?;

        let mut loaded = Vec::new();
        while let Some(row) = rows.next()? {
            let values = (0..width)
                .map(|index| row.get_ref(index).and_then(|value| load(index, value)))
                .collect::<rusqlite::Result<Vec<_>>>()?;
            loaded.push(Row::new(values));
        }

        Ok(Cursor::new(loaded))
    }

    fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, err)| StoreError::Sqlite(err))
    }
}

fn value_to_param(value: &Value) -> ToSqlOutput<'_> {
    match value {
        Value::Null => ToSqlOutput::Owned(SqlValue::Null),
        Value::Integer(v) => ToSqlOutput::Owned(SqlValue::Integer(*v)),
        Value::Real(v) => ToSqlOutput::Owned(SqlValue::Real(*v)),
        Value::Text(v) => ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes())),
        Value::Blob(v) => ToSqlOutput::Borrowed(ValueRef::Blob(v)),
    }
}

/// Copy a borrowed column value out of the row
///
/// TEXT that is not valid UTF-8 is a conversion failure, not a panic.
fn load(index: usize, value: ValueRef<'_>) -> rusqlite::Result<Value> {
    let value = match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(v) => Value::Integer(v),
        ValueRef::Real(v) => Value::Real(v),
        ValueRef::Text(bytes) => {
            let text = std::str::from_utf8(bytes).map_err(|err| {
                rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(err))
            })?;
            Value::Text(text.to_string())
        }
        ValueRef::Blob(v) => Value::Blob(v.to_vec()),
    };
    Ok(value)
}
