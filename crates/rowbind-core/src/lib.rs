//! rowbind core - column descriptors, entity mapping and the database façade
//!
//! This crate provides:
//! - [`Column`] descriptors: named getter/setter/deleter/column-type bundles
//! - [`Entity`] and [`EntityBase`]: per-type column declarations bound at
//!   construction, with `create`/`select`/`insert` SQL generation
//! - [`Database`]: executes entity SQL on any [`Connection`] and rehydrates
//!   rows into entity instances
//! - The error taxonomy and structured logging facility shared with store
//!   implementations
//!
//! Store implementations live in their own crates (see `rowbind-store`).

pub mod column;
pub mod connection;
pub mod database;
pub mod entity;
pub mod errors;
pub mod logging_facility;
pub mod sql;
pub mod value;

pub use rowbind_core_types as core_types;

// Re-export commonly used types
pub use column::Column;
pub use connection::{Connection, Cursor, Row};
pub use database::Database;
pub use entity::{Columns, Entity, EntityBase, InsertStatement};
pub use errors::{Classified, ErrorKind, Result, RowbindError};
pub use value::{FromValue, Value, ValueType};
