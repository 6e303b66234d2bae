//! settings-bridge - schema-validated access to a typed settings store
//!
//! Exposes four operations to a dynamically typed host: list the keys of a
//! schema, read a key, write a key, and check whether a schema is installed.
//! Every read and write passes the schema gate before the store is touched,
//! and values cross the boundary through a strict variant codec.

pub mod bridge;
pub mod cli;
pub mod observability;
pub mod schema;
pub mod store;
pub mod variant;

pub use bridge::{BridgeError, BridgeErrorKind, BridgeResult, SettingsBridge};
pub use store::{MemoryStore, SettingsStore};
pub use variant::{DynamicValue, Variant, VariantType};
