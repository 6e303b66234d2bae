//! Observable events
//!
//! Events are explicit and typed; each maps to a fixed log name.

use std::fmt;

/// Observable events in the bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded
    ConfigLoaded,
    /// Schemas installed from disk
    SchemasLoaded,
    /// Schema directory absent; running without a schema source
    SchemaSourceMissing,

    // Validation
    /// Requested schema is not installed
    SchemaNotInstalled,
    /// Requested key is not declared
    KeyNotFound,
    /// Candidate value failed the key's constraints
    RangeViolation,

    // Codec
    /// Stored value has a type the codec cannot read
    UnsupportedReadType,

    // Writes
    /// Value written to the store
    SettingWritten,
    /// Store refused the write
    WriteProtected,
    /// Pending writes flushed
    StoreSynced,
    /// Flushing pending writes failed; they stay pending
    SyncFailed,

    // Host loop
    /// Request loop started
    ServeBegin,
    /// Request loop ended (stdin closed)
    ServeComplete,
    /// Request could not be parsed
    RequestRejected,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SchemasLoaded => "SCHEMAS_LOADED",
            Event::SchemaSourceMissing => "SCHEMA_SOURCE_MISSING",
            Event::SchemaNotInstalled => "SCHEMA_NOT_INSTALLED",
            Event::KeyNotFound => "KEY_NOT_FOUND",
            Event::RangeViolation => "RANGE_VIOLATION",
            Event::UnsupportedReadType => "UNSUPPORTED_READ_TYPE",
            Event::SettingWritten => "SETTING_WRITTEN",
            Event::WriteProtected => "WRITE_PROTECTED",
            Event::StoreSynced => "STORE_SYNCED",
            Event::SyncFailed => "SYNC_FAILED",
            Event::ServeBegin => "SERVE_BEGIN",
            Event::ServeComplete => "SERVE_COMPLETE",
            Event::RequestRejected => "REQUEST_REJECTED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
