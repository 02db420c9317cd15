//! Store configuration
//!
//! ```toml
//! path = "app.db"          # omit for an in-memory database
//! foreign_keys = true
//! journal_mode = "wal"
//! busy_timeout_ms = 5000
//! ```

use crate::errors::{io_error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// SQLite journal modes accepted by `PRAGMA journal_mode`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JournalMode {
    Delete,
    Truncate,
    Persist,
    Memory,
    Wal,
    Off,
}

impl JournalMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            JournalMode::Delete => "DELETE",
            JournalMode::Truncate => "TRUNCATE",
            JournalMode::Persist => "PERSIST",
            JournalMode::Memory => "MEMORY",
            JournalMode::Wal => "WAL",
            JournalMode::Off => "OFF",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Database file; `None` opens a private in-memory database
    pub path: Option<PathBuf>,
    pub foreign_keys: bool,
    /// Left to SQLite's default when unset
    pub journal_mode: Option<JournalMode>,
    pub busy_timeout_ms: Option<u64>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: None,
            foreign_keys: true,
            journal_mode: None,
            busy_timeout_ms: None,
        }
    }
}

impl StoreConfig {
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn with_journal_mode(mut self, mode: JournalMode) -> Self {
        self.journal_mode = Some(mode);
        self
    }

    pub fn is_in_memory(&self) -> bool {
        self.path.is_none()
    }

    /// Parse a TOML document
    ///
    /// # Errors
    ///
    /// `StoreError::Config` on malformed TOML or unknown keys.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a TOML file
    ///
    /// # Errors
    ///
    /// `StoreError::Io` if the file cannot be read, `StoreError::Config` if
    /// it does not parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| io_error(path, e))?;
        Self::from_toml_str(&source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert!(config.is_in_memory());
        assert!(config.foreign_keys);
        assert_eq!(config.journal_mode, None);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = StoreConfig::from_toml_str("journal_mode = \"wal\"").unwrap();
        assert_eq!(config.journal_mode, Some(JournalMode::Wal));
        assert!(config.foreign_keys);
        assert!(config.is_in_memory());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = StoreConfig::from_toml_str("pool_size = 4").unwrap_err();
        assert!(err.to_string().starts_with("invalid store configuration"));
    }

    #[test]
    fn test_journal_mode_pragma_values() {
        assert_eq!(JournalMode::Wal.as_str(), "WAL");
        assert_eq!(JournalMode::Off.as_str(), "OFF");
    }
}
