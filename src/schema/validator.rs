//! Schema validation gate
//!
//! Runs before every store access, in a fixed order:
//!
//! 1. Default schema source must exist (NoSchemaSource)
//! 2. Schema must be installed (SchemaNotFound)
//! 3. Schema must declare the key (KeyNotFound)
//! 4. Resolve the schema-key handle
//!
//! Writes additionally range-check the encoded candidate value before the
//! store is mutated. The gate holds no state between calls.

use std::sync::Arc;

use super::errors::{ValidationError, ValidationResult};
use super::types::{Schema, SchemaKeyHandle};
use crate::observability::{Event, Logger};
use crate::store::{SchemaSource, SettingsStore};
use crate::variant::Variant;

/// Validation gate borrowing a store for the duration of one operation.
pub struct SchemaValidator<'a, S: SettingsStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: SettingsStore + ?Sized> SchemaValidator<'a, S> {
    /// Creates a validator over the given store.
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Step 1: obtain the default schema source.
    pub fn source(&self) -> ValidationResult<&'a dyn SchemaSource> {
        self.store
            .schema_source()
            .ok_or(ValidationError::NoSchemaSource)
    }

    /// Steps 1-2: resolve an installed schema.
    pub fn lookup_schema(&self, schema_id: &str) -> ValidationResult<Arc<Schema>> {
        let source = self.source()?;
        source.lookup(schema_id).ok_or_else(|| {
            Logger::warn(Event::SchemaNotInstalled, &[("schema", schema_id)]);
            ValidationError::SchemaNotFound {
                schema_id: schema_id.to_string(),
            }
        })
    }

    /// Full gate for get/set: schema, then key.
    ///
    /// # Errors
    ///
    /// - `NoSchemaSource` if no source exists; nothing else is consulted
    /// - `SchemaNotFound` if `schema_id` is not installed
    /// - `KeyNotFound` if the schema does not declare `key`
    pub fn validate(&self, schema_id: &str, key: &str) -> ValidationResult<SchemaKeyHandle> {
        let schema = self.lookup_schema(schema_id)?;

        if !schema.has_key(key) {
            Logger::warn(
                Event::KeyNotFound,
                &[("key", key), ("schema", schema_id)],
            );
            return Err(ValidationError::KeyNotFound {
                schema_id: schema_id.to_string(),
                key: key.to_string(),
            });
        }

        SchemaKeyHandle::resolve(&schema, key).ok_or_else(|| ValidationError::KeyNotFound {
            schema_id: schema_id.to_string(),
            key: key.to_string(),
        })
    }

    /// Reduced gate for schema-exists: absence is an answer, not an error.
    ///
    /// Only a missing schema source escalates to an error.
    pub fn schema_exists(&self, schema_id: &str) -> ValidationResult<bool> {
        let source = self.source()?;
        Ok(source.lookup(schema_id).is_some())
    }
}

/// Write-only check of an encoded candidate against the key's constraints.
pub fn range_check(handle: &SchemaKeyHandle, candidate: &Variant) -> ValidationResult<()> {
    if handle.key().range_check(candidate) {
        return Ok(());
    }

    Logger::warn(
        Event::RangeViolation,
        &[
            ("key", handle.name()),
            ("schema", handle.schema().schema_id.as_str()),
        ],
    );
    Err(ValidationError::RangeViolation {
        key: handle.name().to_string(),
    })
}
