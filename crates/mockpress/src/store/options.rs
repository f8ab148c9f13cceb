//! Options slot: string keys to codec-encoded values.

use super::ExpectationStore;
use crate::codec;
use crate::result::MockResult;
use serde::de::DeserializeOwned;
use serde_json::Value;

impl ExpectationStore {
    /// Read an option, decoding composite values.
    ///
    /// Returns `None` when the key is absent.
    #[must_use]
    pub fn get_option(&self, key: &str) -> Option<Value> {
        self.options.get(key).map(codec::decode)
    }

    /// Read an option as a typed value.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::Json`](crate::MockError::Json) when the stored
    /// value does not have the shape of `T`.
    pub fn option_as<T: DeserializeOwned>(&self, key: &str) -> MockResult<Option<T>> {
        self.options
            .get(key)
            .map(codec::decode_into::<T>)
            .transpose()
    }

    /// Write an option.
    ///
    /// Returns whether the stored (encoded) value changed; writing a value
    /// equal to what is already stored is a no-op returning `false`.
    pub fn set_option(&mut self, key: &str, value: impl Into<Value>) -> bool {
        let encoded = codec::encode(&value.into());
        if self.options.get(key) == Some(&encoded) {
            tracing::debug!(key, "option unchanged");
            return false;
        }
        tracing::debug!(key, "option updated");
        self.options.insert(key.to_string(), encoded);
        true
    }

    /// Delete an option. Returns whether a key was removed.
    pub fn delete_option(&mut self, key: &str) -> bool {
        self.options.remove(key).is_some()
    }

    /// Raw stored (encoded) form of an option
    #[must_use]
    pub fn raw_option(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }
}
