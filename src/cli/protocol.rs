//! Host request protocol
//!
//! Each request names one of the four entry points:
//!
//! ```json
//! {"op": "getKeys", "schema": "org.example.desktop"}
//! {"op": "get", "schema": "org.example.desktop", "key": "font"}
//! {"op": "set", "schema": "org.example.desktop", "key": "font", "value": "Sans 12"}
//! {"op": "schemaExists", "schema": "org.example.desktop"}
//! ```

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::errors::{CliError, CliResult};
use crate::bridge::{BridgeResult, SettingsBridge};
use crate::store::SettingsStore;
use crate::variant::DynamicValue;

/// A decoded host request
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op")]
pub enum Request {
    #[serde(rename = "getKeys")]
    GetKeys { schema: String },
    #[serde(rename = "get")]
    Get { schema: String, key: String },
    #[serde(rename = "set")]
    Set {
        schema: String,
        key: String,
        #[serde(default, deserialize_with = "present")]
        value: Option<Value>,
    },
    #[serde(rename = "schemaExists")]
    SchemaExists { schema: String },
}

impl Request {
    /// Decodes a request object.
    pub fn parse(value: Value) -> CliResult<Self> {
        serde_json::from_value(value)
            .map_err(|e| CliError::bad_request(format!("Invalid request: {}", e)))
    }

    /// The `set` payload as a dynamic value.
    ///
    /// A missing `value` is `Undefined`, an explicit `null` is `Null`. Other
    /// operations carry no payload and yield `Undefined`.
    pub fn payload(&self) -> CliResult<DynamicValue> {
        match self {
            Request::Set {
                value: Some(value), ..
            } => DynamicValue::from_json(value).ok_or_else(|| {
                CliError::bad_request("Invalid request: objects are not settings values")
            }),
            _ => Ok(DynamicValue::Undefined),
        }
    }
}

/// Keeps an explicit `null` distinct from an absent field.
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

/// Runs a decoded request against the bridge, returning the JSON result.
pub fn dispatch<S: SettingsStore>(
    bridge: &mut SettingsBridge<S>,
    request: &Request,
    payload: &DynamicValue,
) -> BridgeResult<Value> {
    match request {
        Request::GetKeys { schema } => Ok(Value::from(bridge.list_keys(schema)?)),
        Request::Get { schema, key } => Ok(bridge.get(schema, key)?.to_json()),
        Request::Set { schema, key, .. } => {
            bridge.set(schema, key, payload)?;
            Ok(Value::Null)
        }
        Request::SchemaExists { schema } => Ok(Value::Bool(bridge.schema_exists(schema)?)),
    }
}
