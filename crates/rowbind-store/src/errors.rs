//! Error handling for rowbind-store
//!
//! SQLite errors are carried unmodified; descriptor errors raised while
//! generating SQL are carried alongside them so façade calls have one error
//! type.

use rowbind_core::{Classified, ErrorKind, RowbindError};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error(transparent)]
    Mapping(#[from] RowbindError),

    #[error("invalid store configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Classified for StoreError {
    fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Sqlite(_) => ErrorKind::Persistence,
            StoreError::Mapping(e) => e.kind(),
            StoreError::Config(_) => ErrorKind::Configuration,
            StoreError::Io { .. } => ErrorKind::Io,
        }
    }
}

/// Create an IO error for `path`
pub fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_errors_display_verbatim() {
        let inner = rusqlite::Error::InvalidColumnIndex(7);
        let expected = inner.to_string();

        let err = StoreError::from(inner);

        assert_eq!(err.to_string(), expected);
        assert_eq!(err.code(), "ERR_PERSISTENCE");
    }

    #[test]
    fn test_mapping_errors_keep_their_kind() {
        let err = StoreError::from(RowbindError::AttributeNotWritable {
            column: "id".to_string(),
        });
        assert_eq!(err.kind(), ErrorKind::AttributeNotWritable);
        assert_eq!(err.to_string(), "can't set attribute: id");
    }
}
