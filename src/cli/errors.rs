//! CLI-specific error types
//!
//! All CLI errors are fatal for the process.

use std::fmt;
use std::io;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout)
    IoError,
    /// Schema directory could not be loaded
    SchemaLoadFailed,
    /// Values file could not be opened
    StoreOpenFailed,
    /// Argument is not a valid dynamic value
    InvalidValue,
    /// Protocol line is not a valid request
    BadRequest,
    /// Bridge operation rejected (already reported on stdout)
    OperationFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "SETTINGS_CLI_CONFIG_ERROR",
            Self::IoError => "SETTINGS_CLI_IO_ERROR",
            Self::SchemaLoadFailed => "SETTINGS_CLI_SCHEMA_LOAD_FAILED",
            Self::StoreOpenFailed => "SETTINGS_CLI_STORE_OPEN_FAILED",
            Self::InvalidValue => "SETTINGS_CLI_INVALID_VALUE",
            Self::BadRequest => "SETTINGS_BAD_REQUEST",
            Self::OperationFailed => "SETTINGS_CLI_OPERATION_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Schema load failure
    pub fn schema_load_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::SchemaLoadFailed, msg)
    }

    /// Store open failure
    pub fn store_open_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::StoreOpenFailed, msg)
    }

    /// Invalid value argument
    pub fn invalid_value(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidValue, msg)
    }

    /// Malformed protocol request
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::BadRequest, msg)
    }

    /// Bridge operation failed
    pub fn operation_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::OperationFailed, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
