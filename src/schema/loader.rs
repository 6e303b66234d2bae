//! Schema loader for installing schemas from disk
//!
//! - One schema per `*.json` file in the schema directory
//! - Files are read in name order so loading is deterministic
//! - Malformed or duplicate schemas abort the load

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::errors::{SchemaLoadError, SchemaLoadResult};
use super::types::Schema;
use crate::store::SchemaSource;

/// In-memory registry of installed schemas; also the store's schema source.
#[derive(Debug, Default)]
pub struct SchemaLoader {
    /// Directory the schemas were loaded from, if any
    schema_dir: Option<PathBuf>,
    /// Installed schemas indexed by schema id
    schemas: HashMap<String, Arc<Schema>>,
}

impl SchemaLoader {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every schema file in `schema_dir`.
    pub fn load_dir(schema_dir: &Path) -> SchemaLoadResult<Self> {
        let mut loader = Self {
            schema_dir: Some(schema_dir.to_path_buf()),
            schemas: HashMap::new(),
        };

        let entries =
            fs::read_dir(schema_dir).map_err(|e| SchemaLoadError::io(schema_dir, e))?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| SchemaLoadError::io(schema_dir, e))?;
            let path = entry.path();

            // Skip non-JSON files
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            paths.push(path);
        }
        paths.sort();

        for path in paths {
            loader.load_schema_file(&path)?;
        }

        Ok(loader)
    }

    /// Loads a single schema file.
    fn load_schema_file(&mut self, path: &Path) -> SchemaLoadResult<()> {
        let content = fs::read_to_string(path).map_err(|e| SchemaLoadError::io(path, e))?;

        let schema: Schema = serde_json::from_str(&content)
            .map_err(|e| SchemaLoadError::malformed(path, format!("Invalid JSON: {}", e)))?;

        schema
            .validate_structure()
            .map_err(|e| SchemaLoadError::malformed(path, e))?;

        self.insert(schema)
    }

    /// Registers a schema directly (for tests or programmatic installs).
    pub fn register(&mut self, schema: Schema) -> SchemaLoadResult<()> {
        schema
            .validate_structure()
            .map_err(|e| SchemaLoadError::malformed("<in-memory>", e))?;
        self.insert(schema)
    }

    fn insert(&mut self, schema: Schema) -> SchemaLoadResult<()> {
        if self.schemas.contains_key(&schema.schema_id) {
            return Err(SchemaLoadError::Duplicate {
                schema_id: schema.schema_id,
            });
        }
        self.schemas
            .insert(schema.schema_id.clone(), Arc::new(schema));
        Ok(())
    }

    /// Returns the directory schemas were loaded from.
    pub fn schema_dir(&self) -> Option<&Path> {
        self.schema_dir.as_deref()
    }

    /// Returns the number of installed schemas.
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

impl SchemaSource for SchemaLoader {
    fn lookup(&self, schema_id: &str) -> Option<Arc<Schema>> {
        self.schemas.get(schema_id).cloned()
    }

    fn list_schemas(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.schemas.keys().cloned().collect();
        ids.sort();
        ids
    }
}
