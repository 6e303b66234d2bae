//! The four bridge entry points
//!
//! Each operation is a fixed pipeline:
//!
//! - list_keys: source check, open settings, enumerate declared keys
//! - get: validate schema+key, read variant, decode
//! - schema_exists: source check, schema lookup (absence is `false`)
//! - set: validate schema+key, read current value for its type, encode,
//!   range check, write, sync
//!
//! Every store handle is an owned value scoped to the operation, so it is
//! released on every exit path.

use super::errors::{BridgeError, BridgeResult};
use crate::observability::{Event, Logger, Severity};
use crate::schema::{range_check, SchemaValidator};
use crate::store::SettingsStore;
use crate::variant::{decode, encode, CodecError, DynamicValue, Variant};

/// Bridge between a settings store and dynamic caller values.
#[derive(Debug)]
pub struct SettingsBridge<S> {
    store: S,
}

impl<S: SettingsStore> SettingsBridge<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn validator(&self) -> SchemaValidator<'_, S> {
        SchemaValidator::new(&self.store)
    }

    fn flush(&mut self) {
        if let Err(e) = self.store.sync() {
            let reason = e.to_string();
            Logger::log(
                Severity::Error,
                Event::SyncFailed,
                &[("code", e.code()), ("reason", reason.as_str())],
            );
        }
    }

    /// Lists the keys declared by `schema_id`, in store order.
    ///
    /// Only source availability is checked up front; an uninstalled schema
    /// surfaces as a store-level failure from opening the settings.
    pub fn list_keys(&self, schema_id: &str) -> BridgeResult<Vec<String>> {
        self.validator().source()?;
        let settings = self.store.open_settings(schema_id)?;
        Ok(settings.list_keys())
    }

    /// Reads `key` from `schema_id` as a dynamic value.
    pub fn get(&self, schema_id: &str, key: &str) -> BridgeResult<DynamicValue> {
        self.validator().validate(schema_id, key)?;

        let settings = self.store.open_settings(schema_id)?;
        let variant = self.store.read_value(&settings, key)?;

        decode(&variant).map_err(|e| {
            log_unsupported(&e, key);
            BridgeError::from(e)
        })
    }

    /// Whether `schema_id` is installed.
    ///
    /// # Errors
    ///
    /// Only `NoSchemaSource`; a missing schema is `Ok(false)`.
    pub fn schema_exists(&self, schema_id: &str) -> BridgeResult<bool> {
        Ok(self.validator().schema_exists(schema_id)?)
    }

    /// Writes `value` to `key` of `schema_id`.
    ///
    /// The required variant type is taken from the key's current value.
    /// Nothing is written unless encoding and the range check both pass.
    /// The store is synced after every write attempt, including refused ones.
    /// A failed sync is logged, not returned: the write already took effect
    /// and stays pending for the next sync.
    pub fn set(&mut self, schema_id: &str, key: &str, value: &DynamicValue) -> BridgeResult<()> {
        let handle = self.validator().validate(schema_id, key)?;

        let settings = self.store.open_settings(schema_id)?;
        let required = self.store.read_value(&settings, key)?.value_type();

        let candidate: Variant = encode(value, required)?;
        range_check(&handle, &candidate)?;

        let written = self.store.write_value(&settings, key, candidate)?;
        self.flush();

        if !written {
            Logger::warn(
                Event::WriteProtected,
                &[("key", key), ("schema", schema_id)],
            );
            return Err(BridgeError::WriteProtected {
                schema_id: schema_id.to_string(),
                key: key.to_string(),
            });
        }

        Logger::info(
            Event::SettingWritten,
            &[("key", key), ("schema", schema_id)],
        );
        Ok(())
    }
}

fn log_unsupported(err: &CodecError, key: &str) {
    if let CodecError::UnsupportedType { type_string } = err {
        Logger::warn(
            Event::UnsupportedReadType,
            &[("key", key), ("type", *type_string)],
        );
    }
}
