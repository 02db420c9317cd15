#![allow(dead_code)]

use rowbind_core::{
    Classified, Column, Columns, Connection, Cursor, Entity, EntityBase, ErrorKind, Row,
    RowbindError, Value,
};
use std::cell::RefCell;
use std::sync::OnceLock;

/// Entity with `id int primary key, name text, val int`
#[derive(Debug)]
pub struct Record {
    base: EntityBase<Record>,
    pub id: i64,
    pub name: String,
    pub val: i64,
}

impl Record {
    pub fn new(id: i64, name: &str, val: i64) -> Self {
        Self {
            id,
            name: name.to_string(),
            val,
            ..Self::default()
        }
    }
}

impl Default for Record {
    fn default() -> Self {
        Self {
            base: EntityBase::new("test_table"),
            id: 0,
            name: String::new(),
            val: 0,
        }
    }
}

impl Entity for Record {
    fn declared_columns() -> &'static Columns<Self> {
        static COLUMNS: OnceLock<Columns<Record>> = OnceLock::new();
        COLUMNS.get_or_init(|| {
            Columns::new()
                .declare(
                    Column::<Record>::new("id")
                        .with_getter(|r| Value::from(r.id))
                        .with_column_type(|_| "int primary key")
                        .with_setter(|r, v| {
                            r.id = v.decode()?;
                            Ok(())
                        }),
                )
                .declare(
                    Column::<Record>::new("name")
                        .with_getter(|r| Value::from(r.name.as_str()))
                        .with_column_type(|_| "text")
                        .with_setter(|r, v| {
                            r.name = v.decode()?;
                            Ok(())
                        }),
                )
                .declare(
                    Column::<Record>::new("val")
                        .with_getter(|r| Value::from(r.val))
                        .with_column_type(|_| "int")
                        .with_setter(|r, v| {
                            r.val = v.decode()?;
                            Ok(())
                        }),
                )
        })
    }

    fn base(&self) -> &EntityBase<Self> {
        &self.base
    }
}

/// Entity whose `note` column has no column type
pub struct Untyped {
    base: EntityBase<Untyped>,
    pub id: i64,
    pub note: String,
}

impl Default for Untyped {
    fn default() -> Self {
        Self {
            base: EntityBase::new("untyped"),
            id: 0,
            note: String::new(),
        }
    }
}

impl Entity for Untyped {
    fn declared_columns() -> &'static Columns<Self> {
        static COLUMNS: OnceLock<Columns<Untyped>> = OnceLock::new();
        COLUMNS.get_or_init(|| {
            Columns::new()
                .declare(
                    Column::<Untyped>::new("id")
                        .with_getter(|u| Value::from(u.id))
                        .with_column_type(|_| "int"),
                )
                .declare(
                    Column::<Untyped>::new("note").with_getter(|u| Value::from(u.note.as_str())),
                )
        })
    }

    fn base(&self) -> &EntityBase<Self> {
        &self.base
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FakeError {
    #[error("fake store rejected: {0}")]
    Rejected(String),
    #[error(transparent)]
    Mapping(#[from] RowbindError),
}

impl Classified for FakeError {
    fn kind(&self) -> ErrorKind {
        match self {
            FakeError::Rejected(_) => ErrorKind::Persistence,
            FakeError::Mapping(e) => e.kind(),
        }
    }
}

/// Single-table stand-in for a store
///
/// Inserts append their parameters as a row, selects return every row, and
/// every statement is recorded. `canned` rows replace the table contents on
/// select when set.
#[derive(Default)]
pub struct FakeConnection {
    pub statements: RefCell<Vec<(String, Vec<Value>)>>,
    pub rows: RefCell<Vec<Row>>,
    pub canned: Option<Vec<Row>>,
    pub reject: Option<String>,
}

impl FakeConnection {
    pub fn executed(&self) -> Vec<String> {
        self.statements
            .borrow()
            .iter()
            .map(|(sql, _)| sql.clone())
            .collect()
    }
}

impl Connection for FakeConnection {
    type Error = FakeError;

    fn execute(&self, sql: &str, params: &[Value]) -> Result<Cursor, FakeError> {
        self.statements
            .borrow_mut()
            .push((sql.to_string(), params.to_vec()));

        if let Some(reason) = &self.reject {
            return Err(FakeError::Rejected(reason.clone()));
        }

        if sql.starts_with("insert") {
            self.rows.borrow_mut().push(Row::new(params.to_vec()));
            Ok(Cursor::empty())
        } else if sql.starts_with("select") {
            let rows = match &self.canned {
                Some(rows) => rows.clone(),
                None => self.rows.borrow().clone(),
            };
            Ok(Cursor::new(rows))
        } else {
            Ok(Cursor::empty())
        }
    }

    fn close(self) -> Result<(), FakeError> {
        Ok(())
    }
}
