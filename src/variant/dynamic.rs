//! Caller-side dynamic values
//!
//! The scripting host has a single number type (IEEE-754 double), so every
//! numeric variant decodes to `DynamicValue::Number`. Integer checks follow
//! the host's rules: a number is an int32/uint32 only if it is finite,
//! integral, in range and not negative zero.

use serde_json::{Number, Value};

/// Largest integer a double represents without gaps (2^53).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A value as seen by the embedding caller.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DynamicValue {
    /// Absent argument
    #[default]
    Undefined,
    /// Explicit null
    Null,
    /// Boolean
    Bool(bool),
    /// Any number
    Number(f64),
    /// UTF-8 text
    String(String),
    /// Ordered sequence (possibly nested)
    Array(Vec<DynamicValue>),
}

impl DynamicValue {
    /// Returns the number as an int32 if it is exactly one.
    pub fn as_int32(&self) -> Option<i32> {
        match self {
            DynamicValue::Number(n) if is_exact_integer(*n) => {
                if *n >= f64::from(i32::MIN) && *n <= f64::from(i32::MAX) {
                    Some(*n as i32)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Returns the number as a uint32 if it is exactly one.
    pub fn as_uint32(&self) -> Option<u32> {
        match self {
            DynamicValue::Number(n) if is_exact_integer(*n) => {
                if *n >= 0.0 && *n <= f64::from(u32::MAX) {
                    Some(*n as u32)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Converts a JSON value from the host protocol.
    ///
    /// Objects have no dynamic counterpart and yield `None`.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(DynamicValue::Null),
            Value::Bool(b) => Some(DynamicValue::Bool(*b)),
            Value::Number(n) => n.as_f64().map(DynamicValue::Number),
            Value::String(s) => Some(DynamicValue::String(s.clone())),
            Value::Array(items) => items
                .iter()
                .map(DynamicValue::from_json)
                .collect::<Option<Vec<_>>>()
                .map(DynamicValue::Array),
            Value::Object(_) => None,
        }
    }

    /// Converts to JSON for the host protocol.
    ///
    /// Integral numbers inside the safe range print without a fraction.
    /// Non-finite numbers become `null`, as the host's JSON encoder does.
    pub fn to_json(&self) -> Value {
        match self {
            DynamicValue::Undefined | DynamicValue::Null => Value::Null,
            DynamicValue::Bool(b) => Value::Bool(*b),
            DynamicValue::Number(n) => {
                if n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
                    Value::Number(Number::from(*n as i64))
                } else {
                    Number::from_f64(*n).map_or(Value::Null, Value::Number)
                }
            }
            DynamicValue::String(s) => Value::String(s.clone()),
            DynamicValue::Array(items) => {
                Value::Array(items.iter().map(DynamicValue::to_json).collect())
            }
        }
    }
}

impl From<bool> for DynamicValue {
    fn from(b: bool) -> Self {
        DynamicValue::Bool(b)
    }
}

impl From<f64> for DynamicValue {
    fn from(n: f64) -> Self {
        DynamicValue::Number(n)
    }
}

impl From<&str> for DynamicValue {
    fn from(s: &str) -> Self {
        DynamicValue::String(s.to_string())
    }
}

impl From<String> for DynamicValue {
    fn from(s: String) -> Self {
        DynamicValue::String(s)
    }
}

impl<T: Into<DynamicValue>> From<Vec<T>> for DynamicValue {
    fn from(items: Vec<T>) -> Self {
        DynamicValue::Array(items.into_iter().map(Into::into).collect())
    }
}

/// Finite, integral and not negative zero.
fn is_exact_integer(n: f64) -> bool {
    n.is_finite() && n.fract() == 0.0 && !(n == 0.0 && n.is_sign_negative())
}
