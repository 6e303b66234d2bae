//! Codec error types
//!
//! The display strings are part of the observable contract: callers match
//! on them, so they must not change.

use thiserror::Error;

use super::types::VariantType;

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Failure converting between variants and dynamic values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Read of a tag the codec cannot decode
    #[error("Need to implement reading that value type")]
    UnsupportedType { type_string: &'static str },

    /// Dynamic value does not match the key's variant type
    #[error("{message}")]
    TypeMismatch {
        expected: VariantType,
        message: &'static str,
    },

    /// Non-string element inside a string array
    #[error("Array item have to be strings!")]
    ArrayElementType { index: usize },

    /// Write to a tag the codec cannot encode
    #[error("We haven't implemented this type yet!")]
    UnimplementedType { type_string: &'static str },
}

impl CodecError {
    pub(crate) fn type_mismatch(expected: VariantType, message: &'static str) -> Self {
        CodecError::TypeMismatch { expected, message }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            CodecError::UnsupportedType { .. } => "SETTINGS_UNSUPPORTED_TYPE",
            CodecError::TypeMismatch { .. } => "SETTINGS_TYPE_MISMATCH",
            CodecError::ArrayElementType { .. } => "SETTINGS_ARRAY_ELEMENT_TYPE",
            CodecError::UnimplementedType { .. } => "SETTINGS_UNIMPLEMENTED_TYPE",
        }
    }
}
