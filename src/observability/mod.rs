//! Observability subsystem
//!
//! Structured JSON logging of the diagnostics the bridge emits when it
//! rejects a request or touches the store.
//!
//! Logging never changes the outcome of an operation: write failures on
//! stderr are swallowed, and nothing is buffered across calls.
//!
//! # Usage
//!
//! ```ignore
//! use settings_bridge::observability::{Event, Logger};
//!
//! Logger::warn(Event::KeyNotFound, &[("key", "volume")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};
