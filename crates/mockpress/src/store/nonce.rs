//! Nonce slot: name to token.

use super::ExpectationStore;
use uuid::Uuid;

impl ExpectationStore {
    /// Fix the token for `name` so tests can predict it
    pub fn preset_nonce(&mut self, name: &str, token: impl Into<String>) {
        self.nonces.insert(name.to_string(), token.into());
    }

    /// Token for `name`, issuing a random one on first use
    pub fn issue_or_fetch_nonce(&mut self, name: &str) -> String {
        let length = self.nonce_length;
        self.nonces
            .entry(name.to_string())
            .or_insert_with(|| {
                tracing::debug!(name, "nonce issued");
                random_token(length)
            })
            .clone()
    }

    /// Whether `token` is the current token for `name`.
    ///
    /// Unknown names never verify.
    #[must_use]
    pub fn verify_nonce(&self, name: &str, token: &str) -> bool {
        self.nonces.get(name).is_some_and(|t| t == token)
    }

    /// Current token for `name` without issuing one
    #[must_use]
    pub fn nonce(&self, name: &str) -> Option<&str> {
        self.nonces.get(name).map(String::as_str)
    }

    /// Hidden form field carrying the token for `name`, issuing it if needed
    pub fn nonce_field(&mut self, name: &str) -> String {
        let token = self.issue_or_fetch_nonce(name);
        format!("<input type=\"hidden\" name=\"{name}\" value=\"{token}\" />")
    }
}

fn random_token(length: usize) -> String {
    Uuid::new_v4().simple().to_string().chars().take(length).collect()
}
