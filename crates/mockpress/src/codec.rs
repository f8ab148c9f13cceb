//! Opaque-Value Codec
//!
//! Lets scalar-typed store slots carry composite values. A value is encoded
//! when it is a sequence or record, or when it already *looks* encoded (so
//! decoding the stored form gives back exactly what was written). Everything
//! else passes through untouched.
//!
//! ## Wire form
//!
//! ```text
//! \u{1}<canonical JSON>
//! ```
//!
//! The leading tag byte makes [`is_encoded`] unambiguous: an encoded `false`
//! is still recognisably encoded, and plain strings never decode by accident.

use crate::canonical::canonical_json;
use crate::result::MockResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Discriminator prepended to every encoded payload
pub const ENCODING_TAG: char = '\u{1}';

/// Encode `value` if it is composite or already an encoding; otherwise clone it.
#[must_use]
pub fn encode(value: &Value) -> Value {
    if value.is_array() || value.is_object() || is_encoded(value) {
        Value::String(format!("{ENCODING_TAG}{}", canonical_json(value)))
    } else {
        value.clone()
    }
}

/// Decode `value` if it is a valid encoding; otherwise clone it.
#[must_use]
pub fn decode(value: &Value) -> Value {
    try_decode(value).unwrap_or_else(|| value.clone())
}

/// True iff `value` is a tagged string whose payload parses.
#[must_use]
pub fn is_encoded(value: &Value) -> bool {
    try_decode(value).is_some()
}

/// Decoded payload, or `None` when `value` is not an encoding.
#[must_use]
pub fn try_decode(value: &Value) -> Option<Value> {
    let payload = value.as_str()?.strip_prefix(ENCODING_TAG)?;
    serde_json::from_str(payload).ok()
}

/// Serialize a typed value and encode the result.
///
/// # Errors
///
/// Returns [`MockError::Json`](crate::MockError::Json) if `value` cannot be
/// represented as JSON.
pub fn encode_serializable<T: Serialize>(value: &T) -> MockResult<Value> {
    Ok(encode(&serde_json::to_value(value)?))
}

/// Decode a stored value into a typed one.
///
/// # Errors
///
/// Returns [`MockError::Json`](crate::MockError::Json) if the decoded value
/// does not have the shape of `T`.
pub fn decode_into<T: DeserializeOwned>(value: &Value) -> MockResult<T> {
    Ok(serde_json::from_value(decode(value))?)
}
