use crate::value::ValueType;
use thiserror::Error;

/// Result type alias using RowbindError
pub type Result<T> = std::result::Result<T, RowbindError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every error surfaced by rowbind, including those raised by store
/// implementations, classifies into one of these kinds. Each kind maps to a
/// stable code used in structured logs and by callers that branch on errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    // Column descriptor capabilities
    AttributeUnreadable,
    AttributeNotWritable,
    AttributeNotDeletable,
    NoColumnTypeDefined,

    // Mapping
    UnknownColumn,
    UnexpectedValue,
    RowWidthMismatch,

    // Store
    Persistence,
    Configuration,
    Io,
}

impl ErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::AttributeUnreadable => "ERR_ATTRIBUTE_UNREADABLE",
            ErrorKind::AttributeNotWritable => "ERR_ATTRIBUTE_NOT_WRITABLE",
            ErrorKind::AttributeNotDeletable => "ERR_ATTRIBUTE_NOT_DELETABLE",
            ErrorKind::NoColumnTypeDefined => "ERR_NO_COLUMN_TYPE_DEFINED",
            ErrorKind::UnknownColumn => "ERR_UNKNOWN_COLUMN",
            ErrorKind::UnexpectedValue => "ERR_UNEXPECTED_VALUE",
            ErrorKind::RowWidthMismatch => "ERR_ROW_WIDTH_MISMATCH",
            ErrorKind::Persistence => "ERR_PERSISTENCE",
            ErrorKind::Configuration => "ERR_CONFIGURATION",
            ErrorKind::Io => "ERR_IO",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Errors that can be classified into an [`ErrorKind`]
///
/// The logging macros use this to attach `err.kind` and `err.code` fields.
pub trait Classified {
    fn kind(&self) -> ErrorKind;

    fn code(&self) -> &'static str {
        self.kind().code()
    }
}

// ========== End Error Facility ==========

/// Errors raised by column descriptors and entity mapping
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowbindError {
    /// The column has no getter bound
    #[error("unreadable attribute: {column}")]
    AttributeUnreadable { column: String },

    /// The column has no setter bound
    #[error("can't set attribute: {column}")]
    AttributeNotWritable { column: String },

    /// The column has no deleter bound
    #[error("can't delete attribute: {column}")]
    AttributeNotDeletable { column: String },

    /// The column has no column type and cannot appear in DDL
    #[error("no db type defined for column: {column}")]
    NoColumnTypeDefined { column: String },

    /// No column with this name is registered on the entity
    #[error("table {table} has no column named {column}")]
    UnknownColumn { table: String, column: String },

    /// A setter received a value of the wrong type
    #[error("expected {expected} value, found {found}")]
    UnexpectedValue {
        expected: ValueType,
        found: ValueType,
    },

    /// A result row does not line up with the entity's columns
    #[error("row has {actual} values but table {table} maps {expected} columns")]
    RowWidthMismatch {
        table: String,
        expected: usize,
        actual: usize,
    },
}

impl Classified for RowbindError {
    fn kind(&self) -> ErrorKind {
        match self {
            RowbindError::AttributeUnreadable { .. } => ErrorKind::AttributeUnreadable,
            RowbindError::AttributeNotWritable { .. } => ErrorKind::AttributeNotWritable,
            RowbindError::AttributeNotDeletable { .. } => ErrorKind::AttributeNotDeletable,
            RowbindError::NoColumnTypeDefined { .. } => ErrorKind::NoColumnTypeDefined,
            RowbindError::UnknownColumn { .. } => ErrorKind::UnknownColumn,
            RowbindError::UnexpectedValue { .. } => ErrorKind::UnexpectedValue,
            RowbindError::RowWidthMismatch { .. } => ErrorKind::RowWidthMismatch,
        }
    }
}

impl RowbindError {
    /// Name of the column the error refers to, if any
    pub fn column(&self) -> Option<&str> {
        match self {
            RowbindError::AttributeUnreadable { column }
            | RowbindError::AttributeNotWritable { column }
            | RowbindError::AttributeNotDeletable { column }
            | RowbindError::NoColumnTypeDefined { column }
            | RowbindError::UnknownColumn { column, .. } => Some(column.as_str()),
            RowbindError::UnexpectedValue { .. } | RowbindError::RowWidthMismatch { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_unique() {
        let kinds = [
            ErrorKind::AttributeUnreadable,
            ErrorKind::AttributeNotWritable,
            ErrorKind::AttributeNotDeletable,
            ErrorKind::NoColumnTypeDefined,
            ErrorKind::UnknownColumn,
            ErrorKind::UnexpectedValue,
            ErrorKind::RowWidthMismatch,
            ErrorKind::Persistence,
            ErrorKind::Configuration,
            ErrorKind::Io,
        ];
        let codes: std::collections::HashSet<_> = kinds.iter().map(|k| k.code()).collect();
        assert_eq!(codes.len(), kinds.len());
    }

    #[test]
    fn test_display_includes_column() {
        let err = RowbindError::NoColumnTypeDefined {
            column: "name".to_string(),
        };
        assert_eq!(err.to_string(), "no db type defined for column: name");
        assert_eq!(err.column(), Some("name"));
    }
}
