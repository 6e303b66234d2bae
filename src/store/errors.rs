//! Store error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level failure, independent of the bridge's validation gate.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No schema source available!")]
    NoSchemaSource,

    #[error("Settings schema '{schema_id}' is not installed")]
    SchemaNotInstalled { schema_id: String },

    #[error("Settings schema '{schema_id}' does not contain a key named '{key}'")]
    UnknownKey { schema_id: String, key: String },

    #[error("Failed to access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed values file '{path}': {reason}")]
    MalformedValues { path: PathBuf, reason: String },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::NoSchemaSource => "SETTINGS_NO_SCHEMA_SOURCE",
            StoreError::SchemaNotInstalled { .. } => "SETTINGS_STORE_SCHEMA_NOT_INSTALLED",
            StoreError::UnknownKey { .. } => "SETTINGS_STORE_UNKNOWN_KEY",
            StoreError::Io { .. } => "SETTINGS_STORE_IO",
            StoreError::MalformedValues { .. } => "SETTINGS_STORE_MALFORMED_VALUES",
        }
    }
}
