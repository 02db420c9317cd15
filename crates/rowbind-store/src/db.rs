//! Database connection management
//!
//! Opens SQLite connections and applies `StoreConfig` to them.

use crate::config::StoreConfig;
use crate::errors::Result;
use crate::sqlite::SqliteConnection;
use rowbind_core::Database;
use rusqlite::Connection;
use std::time::Duration;

/// Open a raw SQLite connection as described by `config`
///
/// # Errors
///
/// SQLite errors from opening the file or applying PRAGMAs.
pub fn open(config: &StoreConfig) -> Result<Connection> {
    let conn = match &config.path {
        Some(path) => Connection::open(path)?,
        None => Connection::open_in_memory()?,
    };
    configure(&conn, config)?;
    Ok(conn)
}

/// Apply connection settings
///
/// # Errors
///
/// SQLite errors from the PRAGMAs.
pub fn configure(conn: &Connection, config: &StoreConfig) -> Result<()> {
    conn.pragma_update(None, "foreign_keys", config.foreign_keys)?;

    if let Some(mode) = config.journal_mode {
        // In-memory databases report "memory" regardless of the request
        let applied: String =
            conn.pragma_update_and_check(None, "journal_mode", mode.as_str(), |row| row.get(0))?;
        tracing::debug!(
            requested = mode.as_str(),
            applied = applied.as_str(),
            "journal mode set"
        );
    }

    if let Some(ms) = config.busy_timeout_ms {
        conn.busy_timeout(Duration::from_millis(ms))?;
    }

    Ok(())
}

/// Open a façade over a configured SQLite connection
///
/// # Errors
///
/// See [`open`].
pub fn connect(config: &StoreConfig) -> Result<Database<SqliteConnection>> {
    Ok(Database::new(SqliteConnection::open(config)?))
}
