//! Variant codec
//!
//! Converts between the store's tagged variant values and the caller's
//! dynamic values.
//!
//! # Rules
//!
//! - Decode dispatches on the variant tag only
//! - Encode dispatches on the key's declared tag only
//! - No implicit numeric widening or narrowing across tags
//! - Unsupported tags are hard errors, never defaults

mod codec;
mod dynamic;
mod errors;
mod types;

pub use codec::{
    decode, encode, BOOLEAN_REQUIRED, INT32_REQUIRED, NUMBER_REQUIRED, STRING_ARRAY_REQUIRED,
    STRING_REQUIRED, UINT32_REQUIRED,
};
pub use dynamic::DynamicValue;
pub use errors::{CodecError, CodecResult};
pub use types::{Variant, VariantType, STRING_PAIR_ARRAY};
