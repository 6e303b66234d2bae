//! Settings store contract
//!
//! The bridge treats the store as an opaque collaborator with a fixed
//! query/mutate contract. Handles returned by the store are owned values:
//! they are released when dropped, on every exit path.
//!
//! # Contract
//!
//! - `schema_source` may be absent (no schemas installed at all)
//! - `write_value` returns `Ok(false)` when the key is write protected
//! - `sync` flushes pending writes

mod errors;
mod memory;

pub use errors::{StoreError, StoreResult};
pub use memory::MemoryStore;

use std::sync::Arc;

use crate::schema::Schema;
use crate::variant::Variant;

/// Resolves schema identifiers to schema definitions.
pub trait SchemaSource {
    /// Looks up an installed schema.
    fn lookup(&self, schema_id: &str) -> Option<Arc<Schema>>;

    /// Returns the identifiers of all installed schemas, sorted.
    fn list_schemas(&self) -> Vec<String>;
}

/// An open settings object bound to one schema.
#[derive(Debug, Clone)]
pub struct Settings {
    schema: Arc<Schema>,
}

impl Settings {
    pub fn new(schema: Arc<Schema>) -> Self {
        Self { schema }
    }

    pub fn schema_id(&self) -> &str {
        &self.schema.schema_id
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Declared keys in store order.
    pub fn list_keys(&self) -> Vec<String> {
        self.schema.list_keys()
    }
}

/// Query/mutate contract the bridge consumes.
pub trait SettingsStore {
    /// Returns the default schema source, if any.
    fn schema_source(&self) -> Option<&dyn SchemaSource>;

    /// Opens the settings object for an installed schema.
    fn open_settings(&self, schema_id: &str) -> StoreResult<Settings> {
        let source = self.schema_source().ok_or(StoreError::NoSchemaSource)?;
        let schema = source
            .lookup(schema_id)
            .ok_or_else(|| StoreError::SchemaNotInstalled {
                schema_id: schema_id.to_string(),
            })?;
        Ok(Settings::new(schema))
    }

    /// Reads the effective value of `key` (user value or default).
    fn read_value(&self, settings: &Settings, key: &str) -> StoreResult<Variant>;

    /// Writes `value`; `Ok(false)` means the key is write protected.
    fn write_value(&mut self, settings: &Settings, key: &str, value: Variant)
        -> StoreResult<bool>;

    /// Flushes pending writes.
    fn sync(&mut self) -> StoreResult<()>;
}
