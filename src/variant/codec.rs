//! Bidirectional conversion between variants and dynamic values
//!
//! Decoding dispatches purely on the variant's tag. Encoding dispatches on
//! the target tag supplied by the caller (the key's type), never on the
//! shape of the dynamic value. Both directions match exhaustively so a new
//! tag cannot be added without deciding how each direction treats it.

use super::dynamic::DynamicValue;
use super::errors::{CodecError, CodecResult};
use super::types::{Variant, VariantType};

pub const BOOLEAN_REQUIRED: &str = "Key requires boolean value!";
pub const STRING_REQUIRED: &str = "Key requires string value!";
pub const NUMBER_REQUIRED: &str = "Key requires a number!";
pub const INT32_REQUIRED: &str = "Key requires a integer number!";
pub const UINT32_REQUIRED: &str = "Key requires a unsigned integer number!";
pub const STRING_ARRAY_REQUIRED: &str = "Key requires an array of strings!";

/// Converts a store variant into a dynamic value.
///
/// The variant is only borrowed; all payloads are copied out.
pub fn decode(variant: &Variant) -> CodecResult<DynamicValue> {
    match variant {
        Variant::Boolean(b) => Ok(DynamicValue::Bool(*b)),
        Variant::Int32(i) => Ok(DynamicValue::Number(f64::from(*i))),
        // Widened through f64, which holds the whole u32 range exactly.
        Variant::UInt32(u) => Ok(DynamicValue::Number(f64::from(*u))),
        Variant::Double(d) => Ok(DynamicValue::Number(*d)),
        Variant::String(s) => Ok(DynamicValue::String(s.clone())),
        Variant::StringArray(items) => Ok(DynamicValue::Array(
            items.iter().cloned().map(DynamicValue::String).collect(),
        )),
        Variant::StringPairArray(pairs) => Ok(DynamicValue::Array(
            pairs
                .iter()
                .map(|(first, second)| {
                    DynamicValue::Array(vec![
                        DynamicValue::String(first.clone()),
                        DynamicValue::String(second.clone()),
                    ])
                })
                .collect(),
        )),
        Variant::Byte(_)
        | Variant::Int16(_)
        | Variant::UInt16(_)
        | Variant::Int64(_)
        | Variant::UInt64(_) => Err(CodecError::UnsupportedType {
            type_string: variant.value_type().type_string(),
        }),
    }
}

/// Builds a variant of type `target` from a dynamic value.
pub fn encode(value: &DynamicValue, target: VariantType) -> CodecResult<Variant> {
    match target {
        VariantType::Boolean => match value {
            DynamicValue::Bool(b) => Ok(Variant::Boolean(*b)),
            _ => Err(CodecError::type_mismatch(target, BOOLEAN_REQUIRED)),
        },
        VariantType::String => match value {
            DynamicValue::String(s) => Ok(Variant::String(s.clone())),
            _ => Err(CodecError::type_mismatch(target, STRING_REQUIRED)),
        },
        VariantType::Double => match value {
            DynamicValue::Number(n) => Ok(Variant::Double(*n)),
            _ => Err(CodecError::type_mismatch(target, NUMBER_REQUIRED)),
        },
        VariantType::Int32 => value
            .as_int32()
            .map(Variant::Int32)
            .ok_or_else(|| CodecError::type_mismatch(target, INT32_REQUIRED)),
        VariantType::UInt32 => value
            .as_uint32()
            .map(Variant::UInt32)
            .ok_or_else(|| CodecError::type_mismatch(target, UINT32_REQUIRED)),
        VariantType::StringArray => match value {
            DynamicValue::Array(items) => encode_string_array(items),
            _ => Err(CodecError::type_mismatch(target, STRING_ARRAY_REQUIRED)),
        },
        VariantType::StringPairArray
        | VariantType::Byte
        | VariantType::Int16
        | VariantType::UInt16
        | VariantType::Int64
        | VariantType::UInt64 => Err(CodecError::UnimplementedType {
            type_string: target.type_string(),
        }),
    }
}

/// Stops at the first non-string element; the partial array is dropped.
fn encode_string_array(items: &[DynamicValue]) -> CodecResult<Variant> {
    let mut strings = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match item {
            DynamicValue::String(s) => strings.push(s.clone()),
            _ => return Err(CodecError::ArrayElementType { index }),
        }
    }
    Ok(Variant::StringArray(strings))
}
