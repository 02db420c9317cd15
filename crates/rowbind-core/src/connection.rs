//! Store connection interface
//!
//! The façade only needs a connection that can run SQL text with positional
//! parameters and hand back rows. Opening, configuring and closing the
//! underlying resource is the implementation's business.

use crate::errors::{Classified, RowbindError};
use crate::value::Value;
use std::collections::VecDeque;

/// One result row, values in select-list order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values)
    }
}

impl std::ops::Index<usize> for Row {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        &self.values[index]
    }
}

impl IntoIterator for Row {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

/// Materialized result of one statement, rows in store order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cursor {
    rows: VecDeque<Row>,
}

impl Cursor {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows: rows.into() }
    }

    /// A cursor for statements that return no rows
    pub fn empty() -> Self {
        Self::default()
    }

    /// Rows not yet consumed
    pub fn remaining(&self) -> usize {
        self.rows.len()
    }

    pub fn fetch_one(&mut self) -> Option<Row> {
        self.rows.pop_front()
    }

    pub fn fetch_all(self) -> Vec<Row> {
        self.rows.into()
    }
}

impl Iterator for Cursor {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        self.fetch_one()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.rows.len(), Some(self.rows.len()))
    }
}

impl ExactSizeIterator for Cursor {}

/// A live connection to a relational store
///
/// Connections are used by one owner at a time and every call blocks until
/// the store responds.
pub trait Connection {
    /// The store's own error type
    ///
    /// Store failures surface through it untouched; mapping errors raised by
    /// column descriptors convert into it so façade calls have one error type.
    type Error: std::error::Error + Classified + From<RowbindError>;

    /// Run `sql` with `params` bound positionally
    ///
    /// # Errors
    ///
    /// Whatever the store reports for the statement.
    fn execute(&self, sql: &str, params: &[Value]) -> Result<Cursor, Self::Error>;

    /// Release the connection
    ///
    /// # Errors
    ///
    /// Whatever the store reports while closing.
    fn close(self) -> Result<(), Self::Error>;
}
