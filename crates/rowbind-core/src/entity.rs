//! Entity base and SQL generation
//!
//! An entity type declares its columns once, in a per-type static, and
//! embeds an [`EntityBase`] that binds the table name to that declaration
//! when an instance is constructed:
//!
//! ```
//! use std::sync::OnceLock;
//! use rowbind_core::{Column, Columns, Entity, EntityBase, Value};
//!
//! struct Tag {
//!     base: EntityBase<Tag>,
//!     label: String,
//! }
//!
//! impl Default for Tag {
//!     fn default() -> Self {
//!         Self { base: EntityBase::new("tags"), label: String::new() }
//!     }
//! }
//!
//! impl Entity for Tag {
//!     fn declared_columns() -> &'static Columns<Self> {
//!         static COLUMNS: OnceLock<Columns<Tag>> = OnceLock::new();
//!         COLUMNS.get_or_init(|| {
//!             Columns::new().declare(
//!                 Column::<Tag>::new("label")
//!                     .with_getter(|t| Value::from(t.label.as_str()))
//!                     .with_column_type(|_| "text"),
//!             )
//!         })
//!     }
//!
//!     fn base(&self) -> &EntityBase<Self> {
//!         &self.base
//!     }
//! }
//!
//! assert_eq!(Tag::default().select(), "select label from tags;");
//! ```

use crate::column::Column;
use crate::errors::{Result, RowbindError};
use crate::sql;
use crate::value::Value;
use indexmap::IndexMap;

/// Ordered name -> descriptor mapping for one entity type
///
/// Iteration order is declaration order. Declaring a name twice replaces the
/// earlier descriptor but keeps its position.
pub struct Columns<E> {
    by_name: IndexMap<&'static str, Column<E>>,
}

impl<E> Columns<E> {
    pub fn new() -> Self {
        Self {
            by_name: IndexMap::new(),
        }
    }

    /// Register `column` under its name
    pub fn declare(mut self, column: Column<E>) -> Self {
        if let Some(previous) = self.by_name.insert(column.name(), column) {
            tracing::warn!(
                column = previous.name(),
                "column declared twice; keeping the later declaration"
            );
        }
        self
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Column<E>> {
        self.by_name.get(name)
    }

    /// Position of `name` in registration order
    pub fn position(&self, name: &str) -> Option<usize> {
        self.by_name.get_index_of(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.by_name.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Column<E>> + '_ {
        self.by_name.values()
    }
}

impl<E> Default for Columns<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> FromIterator<Column<E>> for Columns<E> {
    fn from_iter<I: IntoIterator<Item = Column<E>>>(iter: I) -> Self {
        iter.into_iter().fold(Columns::new(), Columns::declare)
    }
}

impl<E> std::fmt::Debug for Columns<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.by_name.values()).finish()
    }
}

/// Per-instance binding of a table name to the type's declared columns
pub struct EntityBase<E: 'static> {
    table_name: String,
    columns: &'static Columns<E>,
}

impl<E: Entity> EntityBase<E> {
    /// Bind `table_name` to the columns declared on `E`
    pub fn new(table_name: impl Into<String>) -> Self {
        let table_name = table_name.into();
        let columns = E::declared_columns();
        tracing::debug!(
            table = table_name.as_str(),
            column_count = columns.len(),
            "bound declared columns"
        );
        Self {
            table_name,
            columns,
        }
    }
}

impl<E: 'static> EntityBase<E> {
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn columns(&self) -> &'static Columns<E> {
        self.columns
    }

    /// Look up a registered column by name
    ///
    /// # Errors
    ///
    /// `UnknownColumn` if `name` is not registered.
    pub fn column(&self, name: &str) -> Result<&'static Column<E>> {
        self.columns
            .get(name)
            .ok_or_else(|| RowbindError::UnknownColumn {
                table: self.table_name.clone(),
                column: name.to_string(),
            })
    }
}

impl<E: 'static> Clone for EntityBase<E> {
    fn clone(&self) -> Self {
        Self {
            table_name: self.table_name.clone(),
            columns: self.columns,
        }
    }
}

impl<E: 'static> std::fmt::Debug for EntityBase<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityBase")
            .field("table_name", &self.table_name)
            .field("columns", &self.columns.names().collect::<Vec<_>>())
            .finish()
    }
}

/// Generated insert statement with its positional parameters
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    pub sql: String,
    pub values: Vec<Value>,
}

/// A record type bound to exactly one table
pub trait Entity: Sized + 'static {
    /// The columns declared on this type, in declaration order
    ///
    /// Implementations build the list once per type, typically in a
    /// `static OnceLock`.
    fn declared_columns() -> &'static Columns<Self>;

    fn base(&self) -> &EntityBase<Self>;

    fn table_name(&self) -> &str {
        self.base().table_name()
    }

    fn columns(&self) -> &'static Columns<Self> {
        self.base().columns()
    }

    fn column_names(&self) -> Vec<&'static str> {
        self.columns().names().collect()
    }

    /// DDL creating this entity's table if it does not already exist
    ///
    /// # Errors
    ///
    /// `NoColumnTypeDefined` for the first column without a column type.
    /// No SQL is produced in that case.
    fn create(&self) -> Result<String> {
        let definitions = self
            .columns()
            .iter()
            .map(|column| -> Result<(&'static str, &'static str)> {
                Ok((column.name(), column.column_type(self)?))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(sql::create_table(self.table_name(), definitions))
    }

    /// Select of every registered column, in registration order
    fn select(&self) -> String {
        sql::select_all(self.table_name(), &self.column_names())
    }

    /// Insert of the instance's current values
    ///
    /// Values are read through each column's getter, in the same order as
    /// the column list in the SQL text.
    ///
    /// # Errors
    ///
    /// `AttributeUnreadable` for the first column without a getter.
    fn insert(&self) -> Result<InsertStatement> {
        let values = self
            .columns()
            .iter()
            .map(|column| column.get(self))
            .collect::<Result<Vec<_>>>()?;
        Ok(InsertStatement {
            sql: sql::insert_into(self.table_name(), &self.column_names()),
            values,
        })
    }

    /// Read a column by name
    ///
    /// # Errors
    ///
    /// `UnknownColumn`, or `AttributeUnreadable` from the descriptor.
    fn get(&self, name: &str) -> Result<Value> {
        self.base().column(name)?.get(self)
    }

    /// Write a column by name through its setter
    ///
    /// # Errors
    ///
    /// `UnknownColumn`, or whatever the descriptor's setter returns.
    fn set(&mut self, name: &str, value: Value) -> Result<()> {
        let column = self.base().column(name)?;
        column.set(self, value)
    }

    /// Clear a column by name through its deleter
    ///
    /// # Errors
    ///
    /// `UnknownColumn`, or `AttributeNotDeletable` from the descriptor.
    fn delete(&mut self, name: &str) -> Result<()> {
        let column = self.base().column(name)?;
        column.delete(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::OnceLock;

    struct Pair {
        base: EntityBase<Pair>,
        left: i64,
        right: i64,
    }

    impl Pair {
        fn new(left: i64, right: i64) -> Self {
            Self {
                base: EntityBase::new("pairs"),
                left,
                right,
            }
        }
    }

    impl Entity for Pair {
        fn declared_columns() -> &'static Columns<Self> {
            static COLUMNS: OnceLock<Columns<Pair>> = OnceLock::new();
            COLUMNS.get_or_init(|| {
                [
                    Column::<Pair>::new("right")
                        .with_getter(|p| Value::from(p.right))
                        .with_column_type(|_| "int"),
                    Column::<Pair>::new("left")
                        .with_getter(|p| Value::from(p.left))
                        .with_column_type(|_| "int"),
                ]
                .into_iter()
                .collect()
            })
        }

        fn base(&self) -> &EntityBase<Self> {
            &self.base
        }
    }

    #[test]
    fn test_declaration_order_is_kept() {
        let pair = Pair::new(1, 2);
        assert_eq!(pair.column_names(), vec!["right", "left"]);
        assert_eq!(pair.columns().position("left"), Some(1));
    }

    #[test]
    fn test_instances_share_the_type_declaration() {
        let a = Pair::new(1, 2);
        let b = Pair::new(3, 4);
        assert!(std::ptr::eq(a.columns(), b.columns()));
    }

    #[test]
    fn test_insert_values_follow_column_order() {
        let insert = Pair::new(1, 2).insert().unwrap();
        assert_eq!(insert.sql, "insert into pairs (right, left) values (?, ?);");
        assert_eq!(insert.values, vec![Value::Integer(2), Value::Integer(1)]);
    }

    #[test]
    fn test_set_without_setter() {
        let mut pair = Pair::new(1, 2);
        let err = pair.set("left", Value::Integer(5)).unwrap_err();
        assert!(matches!(err, RowbindError::AttributeNotWritable { .. }));
        assert_eq!(pair.left, 1);
    }

    #[test]
    fn test_unknown_column() {
        let pair = Pair::new(1, 2);
        let err = pair.get("middle").unwrap_err();
        assert_eq!(
            err,
            RowbindError::UnknownColumn {
                table: "pairs".to_string(),
                column: "middle".to_string(),
            }
        );
    }

    #[test]
    fn test_redeclaring_keeps_position() {
        let columns: Columns<Pair> = [
            Column::new("a"),
            Column::new("b"),
            Column::new("a").with_column_type(|_| "text"),
        ]
        .into_iter()
        .collect();

        assert_eq!(columns.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(columns.get("a").unwrap().has_column_type());
    }
}
