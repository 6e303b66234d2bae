//! In-process settings store
//!
//! User values overlay schema defaults. When a values file is configured,
//! `sync` writes all user values to it (temp file + rename) and a later
//! `open` reads them back.
//!
//! Values file format:
//!
//! ```json
//! { "org.example.desktop": { "font-size": { "d": 12.0 } } }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::errors::{StoreError, StoreResult};
use super::{SchemaSource, Settings, SettingsStore};
use crate::observability::{Event, Logger};
use crate::schema::SchemaLoader;
use crate::variant::Variant;

type UserValues = BTreeMap<String, BTreeMap<String, Variant>>;

/// Settings store backed by a schema registry and a map of user values.
#[derive(Debug, Default)]
pub struct MemoryStore {
    source: Option<SchemaLoader>,
    values: UserValues,
    values_file: Option<PathBuf>,
    dirty: bool,
}

impl MemoryStore {
    /// Creates a store over installed schemas with no persistence.
    pub fn new(source: SchemaLoader) -> Self {
        Self {
            source: Some(source),
            ..Self::default()
        }
    }

    /// Creates a store with no schema source at all.
    pub fn without_schema_source() -> Self {
        Self::default()
    }

    /// Creates a store persisting to `values_file`, loading it if present.
    pub fn open(source: Option<SchemaLoader>, values_file: &Path) -> StoreResult<Self> {
        let values = if values_file.exists() {
            let content =
                fs::read_to_string(values_file).map_err(|e| StoreError::io(values_file, e))?;
            serde_json::from_str(&content).map_err(|e| StoreError::MalformedValues {
                path: values_file.to_path_buf(),
                reason: e.to_string(),
            })?
        } else {
            UserValues::new()
        };

        Ok(Self {
            source,
            values,
            values_file: Some(values_file.to_path_buf()),
            dirty: false,
        })
    }

    /// Returns the user value for a key, if one was written.
    pub fn user_value(&self, schema_id: &str, key: &str) -> Option<&Variant> {
        self.values.get(schema_id).and_then(|keys| keys.get(key))
    }

    /// Whether writes are pending a sync.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn persist(&self, path: &Path) -> StoreResult<()> {
        let content =
            serde_json::to_string_pretty(&self.values).map_err(|e| StoreError::MalformedValues {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
            }
        }

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, content).map_err(|e| StoreError::io(&tmp, e))?;
        fs::rename(&tmp, path).map_err(|e| StoreError::io(path, e))?;
        Ok(())
    }
}

impl SettingsStore for MemoryStore {
    fn schema_source(&self) -> Option<&dyn SchemaSource> {
        self.source.as_ref().map(|s| s as &dyn SchemaSource)
    }

    fn read_value(&self, settings: &Settings, key: &str) -> StoreResult<Variant> {
        let declared = settings
            .schema()
            .key(key)
            .ok_or_else(|| StoreError::UnknownKey {
                schema_id: settings.schema_id().to_string(),
                key: key.to_string(),
            })?;

        // A stored value of the wrong type (e.g. after a schema change) is ignored.
        match self.user_value(settings.schema_id(), key) {
            Some(value) if value.value_type() == declared.value_type => Ok(value.clone()),
            _ => Ok(declared.default.clone()),
        }
    }

    fn write_value(
        &mut self,
        settings: &Settings,
        key: &str,
        value: Variant,
    ) -> StoreResult<bool> {
        let declared = settings
            .schema()
            .key(key)
            .ok_or_else(|| StoreError::UnknownKey {
                schema_id: settings.schema_id().to_string(),
                key: key.to_string(),
            })?;

        if !declared.writable {
            return Ok(false);
        }

        self.values
            .entry(settings.schema_id().to_string())
            .or_default()
            .insert(key.to_string(), value);
        self.dirty = true;
        Ok(true)
    }

    fn sync(&mut self) -> StoreResult<()> {
        if !self.dirty {
            return Ok(());
        }
        if let Some(path) = &self.values_file {
            self.persist(path)?;
            let path = path.display().to_string();
            Logger::trace(Event::StoreSynced, &[("path", path.as_str())]);
        }
        self.dirty = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Schema, SchemaKey};
    use tempfile::TempDir;

    fn loader() -> SchemaLoader {
        let mut loader = SchemaLoader::new();
        loader
            .register(Schema::new(
                "org.example.app",
                vec![
                    SchemaKey::new("name", Variant::String("default".into())),
                    SchemaKey::new("locked", Variant::Boolean(true)).read_only(),
                ],
            ))
            .unwrap();
        loader
    }

    #[test]
    fn test_read_falls_back_to_default() {
        let store = MemoryStore::new(loader());
        let settings = store.open_settings("org.example.app").unwrap();
        assert_eq!(
            store.read_value(&settings, "name").unwrap(),
            Variant::String("default".into())
        );
    }

    #[test]
    fn test_write_then_read() {
        let mut store = MemoryStore::new(loader());
        let settings = store.open_settings("org.example.app").unwrap();

        assert!(store
            .write_value(&settings, "name", Variant::String("custom".into()))
            .unwrap());
        assert!(store.is_dirty());
        assert_eq!(
            store.read_value(&settings, "name").unwrap(),
            Variant::String("custom".into())
        );
    }

    #[test]
    fn test_read_only_key_reports_false() {
        let mut store = MemoryStore::new(loader());
        let settings = store.open_settings("org.example.app").unwrap();

        assert!(!store
            .write_value(&settings, "locked", Variant::Boolean(false))
            .unwrap());
        assert!(store.user_value("org.example.app", "locked").is_none());
    }

    #[test]
    fn test_open_settings_errors() {
        let store = MemoryStore::new(loader());
        assert!(matches!(
            store.open_settings("org.example.missing").unwrap_err(),
            StoreError::SchemaNotInstalled { .. }
        ));

        let store = MemoryStore::without_schema_source();
        assert!(matches!(
            store.open_settings("org.example.app").unwrap_err(),
            StoreError::NoSchemaSource
        ));
    }

    #[test]
    fn test_unknown_key_is_store_error() {
        let store = MemoryStore::new(loader());
        let settings = store.open_settings("org.example.app").unwrap();
        assert!(matches!(
            store.read_value(&settings, "missing").unwrap_err(),
            StoreError::UnknownKey { .. }
        ));
    }

    #[test]
    fn test_sync_persists_and_reopens() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("values.json");

        let mut store = MemoryStore::open(Some(loader()), &path).unwrap();
        let settings = store.open_settings("org.example.app").unwrap();
        store
            .write_value(&settings, "name", Variant::String("saved".into()))
            .unwrap();
        store.sync().unwrap();
        assert!(!store.is_dirty());
        assert!(path.exists());

        let reopened = MemoryStore::open(Some(loader()), &path).unwrap();
        assert_eq!(
            reopened.user_value("org.example.app", "name"),
            Some(&Variant::String("saved".into()))
        );
    }

    #[test]
    fn test_mistyped_user_value_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("values.json");
        fs::write(&path, r#"{"org.example.app": {"name": {"i": 3}}}"#).unwrap();

        let store = MemoryStore::open(Some(loader()), &path).unwrap();
        let settings = store.open_settings("org.example.app").unwrap();
        assert_eq!(
            store.read_value(&settings, "name").unwrap(),
            Variant::String("default".into())
        );
    }

    #[test]
    fn test_malformed_values_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("values.json");
        fs::write(&path, "[]").unwrap();

        let err = MemoryStore::open(Some(loader()), &path).unwrap_err();
        assert!(matches!(err, StoreError::MalformedValues { .. }));
    }
}
