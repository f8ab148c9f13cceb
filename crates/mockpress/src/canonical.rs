//! Canonical value forms and content digests.
//!
//! Fixture keys built from structured values (query options, markup
//! fragments) must not depend on the order a caller happened to build a map
//! in. Every value is canonicalized (object keys sorted, recursively) before
//! it is serialized or hashed.

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

/// Copy of `value` with every object's keys in sorted order.
#[must_use]
pub fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let mut sorted = Map::new();
            for (key, item) in entries {
                sorted.insert(key.clone(), canonicalize(item));
            }
            Value::Object(sorted)
        }
        scalar => scalar.clone(),
    }
}

/// Compact JSON text of the canonical form.
#[must_use]
pub fn canonical_json(value: &Value) -> String {
    canonicalize(value).to_string()
}

/// Hex SHA-256 of the canonical JSON text.
#[must_use]
pub fn content_digest(value: &Value) -> String {
    text_digest(&canonical_json(value))
}

/// Hex SHA-256 of raw text.
#[must_use]
pub fn text_digest(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let result = hasher.finalize();
    format!("{result:x}")
}
