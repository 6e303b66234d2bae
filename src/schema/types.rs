//! Schema type definitions
//!
//! A schema declares a fixed, ordered set of keys. Each key has a variant
//! type, a default value and an optional constraint:
//!
//! - range: numeric bounds (inclusive), same type as the key
//! - choices: string enumeration
//! - flags: string array whose elements must all be declared choices

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use crate::variant::{Variant, VariantType};

/// Per-key constraint beyond the variant type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum KeyRange {
    /// Inclusive numeric bounds
    Range { min: Variant, max: Variant },
    /// Allowed string values
    Choices { choices: Vec<String> },
    /// Allowed string-array elements
    Flags { choices: Vec<String> },
}

impl KeyRange {
    /// Returns whether `value` satisfies this constraint.
    ///
    /// Values of a shape the constraint does not describe are rejected.
    pub fn contains(&self, value: &Variant) -> bool {
        match self {
            KeyRange::Range { min, max } => {
                matches!(
                    value.numeric_cmp(min),
                    Some(Ordering::Greater | Ordering::Equal)
                ) && matches!(
                    value.numeric_cmp(max),
                    Some(Ordering::Less | Ordering::Equal)
                )
            }
            KeyRange::Choices { choices } => match value {
                Variant::String(s) => choices.iter().any(|c| c == s),
                _ => false,
            },
            KeyRange::Flags { choices } => match value {
                Variant::StringArray(items) => {
                    items.iter().all(|item| choices.iter().any(|c| c == item))
                }
                _ => false,
            },
        }
    }
}

/// Key declaration inside a schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaKey {
    /// Key name, unique within the schema
    pub name: String,
    /// Declared variant type
    #[serde(rename = "type")]
    pub value_type: VariantType,
    /// Value returned when the user has not set one
    pub default: Variant,
    /// Optional constraint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<KeyRange>,
    /// Whether writes are accepted
    #[serde(default = "default_writable")]
    pub writable: bool,
    /// Short human description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

fn default_writable() -> bool {
    true
}

impl SchemaKey {
    /// Create a writable key with no constraint
    pub fn new(name: impl Into<String>, default: Variant) -> Self {
        Self {
            name: name.into(),
            value_type: default.value_type(),
            default,
            range: None,
            writable: true,
            summary: None,
        }
    }

    /// Attach a constraint
    pub fn with_range(mut self, range: KeyRange) -> Self {
        self.range = Some(range);
        self
    }

    /// Mark the key read-only
    pub fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }

    /// Checks a candidate value against the declared type and constraint.
    pub fn range_check(&self, value: &Variant) -> bool {
        if value.value_type() != self.value_type {
            return false;
        }
        match &self.range {
            Some(range) => range.contains(value),
            None => true,
        }
    }

    fn validate_structure(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("Key name must not be empty".into());
        }
        if self.default.value_type() != self.value_type {
            return Err(format!(
                "Key '{}' declares type '{}' but its default is '{}'",
                self.name,
                self.value_type,
                self.default.value_type()
            ));
        }
        match &self.range {
            None => {}
            Some(KeyRange::Range { min, max }) => {
                if !self.value_type.is_numeric() {
                    return Err(format!("Key '{}' has a range but is not numeric", self.name));
                }
                if min.value_type() != self.value_type || max.value_type() != self.value_type {
                    return Err(format!(
                        "Key '{}' range bounds must be of type '{}'",
                        self.name, self.value_type
                    ));
                }
                if !matches!(min.numeric_cmp(max), Some(Ordering::Less | Ordering::Equal)) {
                    return Err(format!("Key '{}' range min exceeds max", self.name));
                }
            }
            Some(KeyRange::Choices { .. }) => {
                if self.value_type != VariantType::String {
                    return Err(format!("Key '{}' has choices but is not a string", self.name));
                }
            }
            Some(KeyRange::Flags { .. }) => {
                if self.value_type != VariantType::StringArray {
                    return Err(format!(
                        "Key '{}' has flags but is not a string array",
                        self.name
                    ));
                }
            }
        }
        if !self.range_check(&self.default) {
            return Err(format!("Key '{}' default violates its range", self.name));
        }
        Ok(())
    }
}

/// Complete schema definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Unique schema identifier, e.g. `org.example.desktop.interface`
    pub schema_id: String,
    /// Optional store path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Keys in declaration order
    pub keys: Vec<SchemaKey>,
}

impl Schema {
    /// Create a new schema
    pub fn new(schema_id: impl Into<String>, keys: Vec<SchemaKey>) -> Self {
        Self {
            schema_id: schema_id.into(),
            path: None,
            keys,
        }
    }

    /// Whether the schema declares `key`.
    pub fn has_key(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k.name == key)
    }

    /// Returns the declaration of `key`.
    pub fn key(&self, key: &str) -> Option<&SchemaKey> {
        self.keys.iter().find(|k| k.name == key)
    }

    /// Returns all key names in declaration order.
    pub fn list_keys(&self) -> Vec<String> {
        self.keys.iter().map(|k| k.name.clone()).collect()
    }

    /// Validates the schema structure itself (not a value)
    pub fn validate_structure(&self) -> Result<(), String> {
        if self.schema_id.is_empty() {
            return Err("Schema must have a non-empty schema_id".into());
        }

        let mut seen = HashSet::new();
        for key in &self.keys {
            if !seen.insert(key.name.as_str()) {
                return Err(format!("Key '{}' declared more than once", key.name));
            }
            key.validate_structure()?;
        }

        Ok(())
    }
}

/// A resolved reference to one key of a shared schema.
///
/// Owns a reference count on the schema; dropping the handle releases it.
#[derive(Debug, Clone)]
pub struct SchemaKeyHandle {
    schema: Arc<Schema>,
    index: usize,
}

impl SchemaKeyHandle {
    /// Resolves `key` in `schema`, if declared.
    pub fn resolve(schema: &Arc<Schema>, key: &str) -> Option<Self> {
        schema
            .keys
            .iter()
            .position(|k| k.name == key)
            .map(|index| Self {
                schema: Arc::clone(schema),
                index,
            })
    }

    /// The schema this key belongs to
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The key declaration
    pub fn key(&self) -> &SchemaKey {
        &self.schema.keys[self.index]
    }

    pub fn name(&self) -> &str {
        &self.key().name
    }
}
