//! Operation façade
//!
//! Sequences the validation gate, the store and the codec for the four
//! entry points exposed to the host, and translates failures into one error
//! type whose message is the caller-visible contract.

mod errors;
mod operations;

pub use errors::{BridgeError, BridgeErrorKind, BridgeResult};
pub use operations::SettingsBridge;
