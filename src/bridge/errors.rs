//! Bridge error type
//!
//! `Display` is exactly the message the host surfaces to callers. Callers
//! may match on these strings, so the leaf messages never change.

use std::fmt;

use thiserror::Error;

use crate::schema::ValidationError;
use crate::store::StoreError;
use crate::variant::CodecError;

/// Result type for bridge operations
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Failure classes surfaced to callers. All are terminal for the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeErrorKind {
    NoSchemaSource,
    SchemaNotFound,
    KeyNotFound,
    TypeMismatch,
    RangeViolation,
    /// Stored value has a type the codec cannot read
    UnsupportedType,
    /// Key type the codec cannot write
    UnimplementedType,
    WriteProtected,
    ArrayElementType,
    /// Store-level failure outside the validation gate
    Store,
}

impl BridgeErrorKind {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            BridgeErrorKind::NoSchemaSource => "SETTINGS_NO_SCHEMA_SOURCE",
            BridgeErrorKind::SchemaNotFound => "SETTINGS_SCHEMA_NOT_FOUND",
            BridgeErrorKind::KeyNotFound => "SETTINGS_KEY_NOT_FOUND",
            BridgeErrorKind::TypeMismatch => "SETTINGS_TYPE_MISMATCH",
            BridgeErrorKind::RangeViolation => "SETTINGS_RANGE_VIOLATION",
            BridgeErrorKind::UnsupportedType => "SETTINGS_UNSUPPORTED_TYPE",
            BridgeErrorKind::UnimplementedType => "SETTINGS_UNIMPLEMENTED_TYPE",
            BridgeErrorKind::WriteProtected => "SETTINGS_WRITE_PROTECTED",
            BridgeErrorKind::ArrayElementType => "SETTINGS_ARRAY_ELEMENT_TYPE",
            BridgeErrorKind::Store => "SETTINGS_STORE_FAILURE",
        }
    }
}

impl fmt::Display for BridgeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned by every bridge operation
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("Failed to set gsetting! Key is write protected.")]
    WriteProtected { schema_id: String, key: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl BridgeError {
    /// Classifies this error
    pub fn kind(&self) -> BridgeErrorKind {
        match self {
            BridgeError::Validation(e) => match e {
                ValidationError::NoSchemaSource => BridgeErrorKind::NoSchemaSource,
                ValidationError::SchemaNotFound { .. } => BridgeErrorKind::SchemaNotFound,
                ValidationError::KeyNotFound { .. } => BridgeErrorKind::KeyNotFound,
                ValidationError::RangeViolation { .. } => BridgeErrorKind::RangeViolation,
            },
            BridgeError::Codec(e) => match e {
                CodecError::UnsupportedType { .. } => BridgeErrorKind::UnsupportedType,
                CodecError::TypeMismatch { .. } => BridgeErrorKind::TypeMismatch,
                CodecError::ArrayElementType { .. } => BridgeErrorKind::ArrayElementType,
                CodecError::UnimplementedType { .. } => BridgeErrorKind::UnimplementedType,
            },
            BridgeError::WriteProtected { .. } => BridgeErrorKind::WriteProtected,
            BridgeError::Store(StoreError::NoSchemaSource) => BridgeErrorKind::NoSchemaSource,
            BridgeError::Store(_) => BridgeErrorKind::Store,
        }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// Returns the caller-visible message
    pub fn message(&self) -> String {
        self.to_string()
    }
}
