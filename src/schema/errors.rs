//! Schema error types
//!
//! `ValidationError` is the outcome of the gate that runs before every store
//! access. Its messages are part of the observable contract.
//!
//! `SchemaLoadError` covers installing schemas from disk.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for the validation gate
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Result type for schema loading
pub type SchemaLoadResult<T> = Result<T, SchemaLoadError>;

/// Reason a schema/key/value was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No schema source exists at all
    #[error("No schema source available!")]
    NoSchemaSource,

    /// Schema identifier not installed
    #[error("Schema is not installed!")]
    SchemaNotFound { schema_id: String },

    /// Schema does not declare the key
    #[error("Key does not exist!")]
    KeyNotFound { schema_id: String, key: String },

    /// Candidate value fails the key's declared constraints
    #[error("Invalid range or type!")]
    RangeViolation { key: String },
}

impl ValidationError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::NoSchemaSource => "SETTINGS_NO_SCHEMA_SOURCE",
            ValidationError::SchemaNotFound { .. } => "SETTINGS_SCHEMA_NOT_FOUND",
            ValidationError::KeyNotFound { .. } => "SETTINGS_KEY_NOT_FOUND",
            ValidationError::RangeViolation { .. } => "SETTINGS_RANGE_VIOLATION",
        }
    }
}

/// Failure installing schemas
#[derive(Debug, Error)]
pub enum SchemaLoadError {
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed schema file '{path}': {reason}")]
    Malformed { path: PathBuf, reason: String },

    #[error("Schema '{schema_id}' is already installed")]
    Duplicate { schema_id: String },
}

impl SchemaLoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SchemaLoadError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        SchemaLoadError::Malformed {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_exact() {
        assert_eq!(
            ValidationError::NoSchemaSource.to_string(),
            "No schema source available!"
        );
        assert_eq!(
            ValidationError::SchemaNotFound {
                schema_id: "x".into()
            }
            .to_string(),
            "Schema is not installed!"
        );
        assert_eq!(
            ValidationError::KeyNotFound {
                schema_id: "x".into(),
                key: "k".into()
            }
            .to_string(),
            "Key does not exist!"
        );
        assert_eq!(
            ValidationError::RangeViolation { key: "k".into() }.to_string(),
            "Invalid range or type!"
        );
    }

    #[test]
    fn test_codes() {
        assert_eq!(
            ValidationError::RangeViolation { key: "k".into() }.code(),
            "SETTINGS_RANGE_VIOLATION"
        );
    }
}
