//! Store-side variant value types
//!
//! A `Variant` is a self-describing tagged value as produced and consumed by
//! the settings store. Type tags use the store's external type strings:
//!
//! - `b` boolean, `i` int32, `u` uint32, `d` double, `s` string
//! - `as` string array, `a(ss)` array of string pairs
//! - `y`, `n`, `q`, `x`, `t` other integer widths the store may hold
//!
//! Serialization uses the type string as the tag, e.g. `{"i": 5}`.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Type string of an array of (string, string) tuples.
pub const STRING_PAIR_ARRAY: &str = "a(ss)";

/// Variant type tags known to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariantType {
    #[serde(rename = "b")]
    Boolean,
    #[serde(rename = "y")]
    Byte,
    #[serde(rename = "n")]
    Int16,
    #[serde(rename = "q")]
    UInt16,
    #[serde(rename = "i")]
    Int32,
    #[serde(rename = "u")]
    UInt32,
    #[serde(rename = "x")]
    Int64,
    #[serde(rename = "t")]
    UInt64,
    #[serde(rename = "d")]
    Double,
    #[serde(rename = "s")]
    String,
    #[serde(rename = "as")]
    StringArray,
    #[serde(rename = "a(ss)")]
    StringPairArray,
}

impl VariantType {
    /// Every tag, in declaration order.
    pub const ALL: [VariantType; 12] = [
        VariantType::Boolean,
        VariantType::Byte,
        VariantType::Int16,
        VariantType::UInt16,
        VariantType::Int32,
        VariantType::UInt32,
        VariantType::Int64,
        VariantType::UInt64,
        VariantType::Double,
        VariantType::String,
        VariantType::StringArray,
        VariantType::StringPairArray,
    ];

    /// Returns the external type string (used in diagnostics and on disk).
    pub fn type_string(&self) -> &'static str {
        match self {
            VariantType::Boolean => "b",
            VariantType::Byte => "y",
            VariantType::Int16 => "n",
            VariantType::UInt16 => "q",
            VariantType::Int32 => "i",
            VariantType::UInt32 => "u",
            VariantType::Int64 => "x",
            VariantType::UInt64 => "t",
            VariantType::Double => "d",
            VariantType::String => "s",
            VariantType::StringArray => "as",
            VariantType::StringPairArray => STRING_PAIR_ARRAY,
        }
    }

    /// Parses an external type string.
    pub fn parse(type_string: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.type_string() == type_string)
    }

    /// Whether values of this type are ordered numbers (range constraints apply).
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            VariantType::Byte
                | VariantType::Int16
                | VariantType::UInt16
                | VariantType::Int32
                | VariantType::UInt32
                | VariantType::Int64
                | VariantType::UInt64
                | VariantType::Double
        )
    }
}

impl fmt::Display for VariantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_string())
    }
}

/// A tagged value carrying exactly one payload matching its tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Variant {
    #[serde(rename = "b")]
    Boolean(bool),
    #[serde(rename = "y")]
    Byte(u8),
    #[serde(rename = "n")]
    Int16(i16),
    #[serde(rename = "q")]
    UInt16(u16),
    #[serde(rename = "i")]
    Int32(i32),
    #[serde(rename = "u")]
    UInt32(u32),
    #[serde(rename = "x")]
    Int64(i64),
    #[serde(rename = "t")]
    UInt64(u64),
    #[serde(rename = "d")]
    Double(f64),
    #[serde(rename = "s")]
    String(String),
    #[serde(rename = "as")]
    StringArray(Vec<String>),
    #[serde(rename = "a(ss)")]
    StringPairArray(Vec<(String, String)>),
}

impl Variant {
    /// Returns the tag of this value.
    pub fn value_type(&self) -> VariantType {
        match self {
            Variant::Boolean(_) => VariantType::Boolean,
            Variant::Byte(_) => VariantType::Byte,
            Variant::Int16(_) => VariantType::Int16,
            Variant::UInt16(_) => VariantType::UInt16,
            Variant::Int32(_) => VariantType::Int32,
            Variant::UInt32(_) => VariantType::UInt32,
            Variant::Int64(_) => VariantType::Int64,
            Variant::UInt64(_) => VariantType::UInt64,
            Variant::Double(_) => VariantType::Double,
            Variant::String(_) => VariantType::String,
            Variant::StringArray(_) => VariantType::StringArray,
            Variant::StringPairArray(_) => VariantType::StringPairArray,
        }
    }

    /// Compares two numeric values of the same tag.
    ///
    /// Returns `None` when the tags differ, when either side is not numeric,
    /// or when a double comparison involves NaN.
    pub fn numeric_cmp(&self, other: &Variant) -> Option<Ordering> {
        match (self, other) {
            (Variant::Byte(a), Variant::Byte(b)) => Some(a.cmp(b)),
            (Variant::Int16(a), Variant::Int16(b)) => Some(a.cmp(b)),
            (Variant::UInt16(a), Variant::UInt16(b)) => Some(a.cmp(b)),
            (Variant::Int32(a), Variant::Int32(b)) => Some(a.cmp(b)),
            (Variant::UInt32(a), Variant::UInt32(b)) => Some(a.cmp(b)),
            (Variant::Int64(a), Variant::Int64(b)) => Some(a.cmp(b)),
            (Variant::UInt64(a), Variant::UInt64(b)) => Some(a.cmp(b)),
            (Variant::Double(a), Variant::Double(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}
