//! Schema subsystem
//!
//! Schemas declare which keys exist, their variant types and their
//! constraints. The validator is the gate every get/set passes before the
//! store is touched.
//!
//! # Design Principles
//!
//! - Schema and key existence are checked on every get/set
//! - Validation order is fixed: source, schema, key, then range (writes)
//! - No implicit type coercion
//! - Validation is deterministic and stateless

mod errors;
mod loader;
mod types;
mod validator;

pub use errors::{SchemaLoadError, SchemaLoadResult, ValidationError, ValidationResult};
pub use loader::SchemaLoader;
pub use types::{KeyRange, Schema, SchemaKey, SchemaKeyHandle};
pub use validator::{range_check, SchemaValidator};
