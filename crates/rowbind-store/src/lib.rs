//! rowbind store - SQLite backing for the rowbind façade
//!
//! Provides:
//! - `SqliteConnection`, the `rowbind_core::Connection` implementation over
//!   rusqlite
//! - `StoreConfig`, loadable from TOML, applied as connection PRAGMAs
//! - Store error type that passes SQLite errors through untouched

pub mod config;
pub mod db;
pub mod errors;
pub mod sqlite;

// Re-export key types
pub use config::{JournalMode, StoreConfig};
pub use db::connect;
pub use errors::{Result, StoreError};
pub use sqlite::SqliteConnection;
