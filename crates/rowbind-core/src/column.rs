//! Column descriptors
//!
//! A [`Column`] binds a column name to the accessor functions that read and
//! write the matching backing field on an entity. Descriptors are plain
//! values: every `with_*` builder returns a new descriptor with one function
//! replaced, so a base declaration can be refined step by step.
//!
//! ```
//! use rowbind_core::{Column, Value};
//!
//! struct Person {
//!     name: String,
//! }
//!
//! let name = Column::<Person>::new("name")
//!     .with_getter(|p| Value::from(p.name.as_str()))
//!     .with_setter(|p, v| {
//!         p.name = v.decode()?;
//!         Ok(())
//!     })
//!     .with_column_type(|_| "text");
//!
//! let mut person = Person { name: "ada".to_string() };
//! name.set(&mut person, Value::from("grace")).unwrap();
//! assert_eq!(name.get(&person).unwrap(), Value::from("grace"));
//! assert_eq!(name.column_type(&person).unwrap(), "text");
//! ```

use crate::errors::{Result, RowbindError};
use crate::value::Value;

/// Reads the column's current value from an entity
pub type Getter<E> = fn(&E) -> Value;

/// Writes a value into the entity's backing field
pub type Setter<E> = fn(&mut E, Value) -> Result<()>;

/// Clears the entity's backing field
pub type Deleter<E> = fn(&mut E) -> Result<()>;

/// Produces the DDL type fragment, e.g. `"int primary key"`
pub type ColumnTypeFn<E> = fn(&E) -> &'static str;

/// Accessor bundle for one entity attribute mapped to one table column
pub struct Column<E> {
    name: &'static str,
    getter: Option<Getter<E>>,
    setter: Option<Setter<E>>,
    deleter: Option<Deleter<E>>,
    column_type: Option<ColumnTypeFn<E>>,
    doc: Option<&'static str>,
}

impl<E> Column<E> {
    /// A descriptor with no capabilities bound
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            getter: None,
            setter: None,
            deleter: None,
            column_type: None,
            doc: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn doc(&self) -> Option<&'static str> {
        self.doc
    }

    pub fn has_getter(&self) -> bool {
        self.getter.is_some()
    }

    pub fn has_setter(&self) -> bool {
        self.setter.is_some()
    }

    pub fn has_column_type(&self) -> bool {
        self.column_type.is_some()
    }

    /// Read the column from `entity`
    ///
    /// # Errors
    ///
    /// `AttributeUnreadable` if no getter is bound.
    pub fn get(&self, entity: &E) -> Result<Value> {
        let getter = self
            .getter
            .ok_or_else(|| RowbindError::AttributeUnreadable {
                column: self.name.to_string(),
            })?;
        Ok(getter(entity))
    }

    /// Write `value` into `entity`
    ///
    /// # Errors
    ///
    /// `AttributeNotWritable` if no setter is bound, or whatever the setter
    /// itself rejects the value with.
    pub fn set(&self, entity: &mut E, value: Value) -> Result<()> {
        let setter = self
            .setter
            .ok_or_else(|| RowbindError::AttributeNotWritable {
                column: self.name.to_string(),
            })?;
        setter(entity, value)
    }

    /// Clear the column on `entity`
    ///
    /// # Errors
    ///
    /// `AttributeNotDeletable` if no deleter is bound.
    pub fn delete(&self, entity: &mut E) -> Result<()> {
        let deleter = self
            .deleter
            .ok_or_else(|| RowbindError::AttributeNotDeletable {
                column: self.name.to_string(),
            })?;
        deleter(entity)
    }

    /// The DDL type fragment for this column
    ///
    /// # Errors
    ///
    /// `NoColumnTypeDefined` if no column type function is bound.
    pub fn column_type(&self, entity: &E) -> Result<&'static str> {
        let column_type = self
            .column_type
            .ok_or_else(|| RowbindError::NoColumnTypeDefined {
                column: self.name.to_string(),
            })?;
        Ok(column_type(entity))
    }

    pub fn with_getter(self, getter: Getter<E>) -> Self {
        Self {
            getter: Some(getter),
            ..self
        }
    }

    pub fn with_setter(self, setter: Setter<E>) -> Self {
        Self {
            setter: Some(setter),
            ..self
        }
    }

    pub fn with_deleter(self, deleter: Deleter<E>) -> Self {
        Self {
            deleter: Some(deleter),
            ..self
        }
    }

    pub fn with_column_type(self, column_type: ColumnTypeFn<E>) -> Self {
        Self {
            column_type: Some(column_type),
            ..self
        }
    }

    pub fn with_doc(self, doc: &'static str) -> Self {
        Self {
            doc: Some(doc),
            ..self
        }
    }
}

// Manual impls: deriving would require `E: Clone`/`E: Debug`, but the
// descriptor only holds function pointers over `E`.
impl<E> Clone for Column<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Column<E> {}

impl<E> std::fmt::Debug for Column<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("name", &self.name)
            .field("getter", &self.getter.is_some())
            .field("setter", &self.setter.is_some())
            .field("deleter", &self.deleter.is_some())
            .field("column_type", &self.column_type.is_some())
            .field("doc", &self.doc)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Classified;
    use crate::errors::ErrorKind;

    #[derive(Default)]
    struct Counter {
        hits: Option<i64>,
    }

    fn hits() -> Column<Counter> {
        Column::<Counter>::new("hits")
            .with_getter(|c| Value::from(c.hits))
            .with_setter(|c, v| {
                c.hits = v.decode()?;
                Ok(())
            })
    }

    #[test]
    fn test_unbound_capabilities_fail_with_their_kind() {
        let bare = Column::<Counter>::new("hits");
        let mut counter = Counter::default();

        let cases = [
            (bare.get(&counter).unwrap_err(), ErrorKind::AttributeUnreadable),
            (
                bare.set(&mut counter, Value::Integer(1)).unwrap_err(),
                ErrorKind::AttributeNotWritable,
            ),
            (bare.delete(&mut counter).unwrap_err(), ErrorKind::AttributeNotDeletable),
            (bare.column_type(&counter).unwrap_err(), ErrorKind::NoColumnTypeDefined),
        ];

        for (err, kind) in cases {
            assert_eq!(err.kind(), kind);
            assert_eq!(err.column(), Some("hits"));
        }
    }

    #[test]
    fn test_builder_replaces_one_field() {
        let base = hits().with_doc("number of hits");
        let typed = base.with_column_type(|_| "int");

        // The receiver is untouched
        assert!(!base.has_column_type());
        assert!(typed.has_column_type());

        // Everything else carries over, including the doc
        assert!(typed.has_getter());
        assert!(typed.has_setter());
        assert_eq!(typed.doc(), Some("number of hits"));
        assert_eq!(typed.name(), "hits");
    }

    #[test]
    fn test_setter_mutates_backing_field() {
        let column = hits();
        let mut counter = Counter::default();

        column.set(&mut counter, Value::Integer(3)).unwrap();

        assert_eq!(counter.hits, Some(3));
        assert_eq!(column.get(&counter).unwrap(), Value::Integer(3));
    }

    #[test]
    fn test_deleter_clears_backing_field() {
        let column = hits().with_deleter(|c| {
            c.hits = None;
            Ok(())
        });
        let mut counter = Counter { hits: Some(9) };

        column.delete(&mut counter).unwrap();

        assert_eq!(column.get(&counter).unwrap(), Value::Null);
    }

    #[test]
    fn test_setter_rejects_wrong_type() {
        let mut counter = Counter::default();
        let err = hits()
            .set(&mut counter, Value::Text("three".to_string()))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::UnexpectedValue);
        assert_eq!(counter.hits, None);
    }
}
