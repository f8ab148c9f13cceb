//! Harness Configuration
//!
//! Knobs that change how a [`MockPress`](crate::MockPress) context behaves
//! without changing what the store returns. Loadable from YAML or from the
//! environment so a CI job can turn diagnostics on without touching tests.

use crate::result::{MockError, MockResult};
use serde::{Deserialize, Serialize};

/// Default length of generated nonce tokens (hex characters)
pub const DEFAULT_NONCE_LENGTH: usize = 32;

/// Default `tracing` filter for [`setup_test_logging`](crate::logging::setup_test_logging)
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Environment variable overriding the log filter
pub const LOG_ENV: &str = "MOCKPRESS_LOG";

/// Environment variable enabling parse-failure listings
pub const SHOW_PARSE_ERRORS_ENV: &str = "MOCKPRESS_SHOW_PARSE_ERRORS";

/// Configuration for a MockPress harness
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Log a line-numbered listing of markup fragments that fail to parse
    pub show_parse_errors: bool,
    /// `tracing` env-filter directive used by test logging
    pub log_filter: String,
    /// Length of generated nonce tokens (1..=32)
    pub nonce_length: usize,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            show_parse_errors: false,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            nonce_length: DEFAULT_NONCE_LENGTH,
        }
    }
}

impl HarnessConfig {
    /// Create a new config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable parse-failure listings
    #[must_use]
    pub fn with_parse_errors(mut self, show: bool) -> Self {
        self.show_parse_errors = show;
        self
    }

    /// Set the log filter directive
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Set the nonce token length, clamped to 1..=32
    #[must_use]
    pub fn with_nonce_length(mut self, length: usize) -> Self {
        self.nonce_length = clamp_nonce_length(length);
        self
    }

    /// Effective nonce token length
    #[must_use]
    pub fn nonce_length(&self) -> usize {
        clamp_nonce_length(self.nonce_length)
    }

    /// Parse a config from a YAML document.
    ///
    /// Missing keys take their default values.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::Yaml`] if the document is not valid YAML or has
    /// fields of the wrong type.
    pub fn from_yaml(yaml: &str) -> MockResult<Self> {
        let config: Self =
            serde_yaml_ng::from_str(yaml).map_err(|e| MockError::Yaml(e.to_string()))?;
        let length = config.nonce_length;
        Ok(config.with_nonce_length(length))
    }

    /// Default config overridden by `MOCKPRESS_LOG` and
    /// `MOCKPRESS_SHOW_PARSE_ERRORS`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().overlay_env(|key| std::env::var(key).ok())
    }

    /// Apply environment overrides read through `lookup`.
    #[must_use]
    pub fn overlay_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(filter) = lookup(LOG_ENV).filter(|f| !f.trim().is_empty()) {
            self.log_filter = filter;
        }
        if let Some(flag) = lookup(SHOW_PARSE_ERRORS_ENV) {
            self.show_parse_errors = parse_flag(&flag);
        }
        self
    }
}

fn clamp_nonce_length(length: usize) -> usize {
    length.clamp(1, DEFAULT_NONCE_LENGTH)
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = HarnessConfig::new();
        assert!(!config.show_parse_errors);
        assert_eq!(config.log_filter, "warn");
        assert_eq!(config.nonce_length(), 32);
    }

    #[test]
    fn test_builder() {
        let config = HarnessConfig::new()
            .with_parse_errors(true)
            .with_log_filter("mockpress=debug")
            .with_nonce_length(10);
        assert!(config.show_parse_errors);
        assert_eq!(config.log_filter, "mockpress=debug");
        assert_eq!(config.nonce_length(), 10);
    }

    #[test]
    fn test_nonce_length_clamped() {
        assert_eq!(HarnessConfig::new().with_nonce_length(0).nonce_length(), 1);
        assert_eq!(HarnessConfig::new().with_nonce_length(99).nonce_length(), 32);
    }

    #[test]
    fn test_from_yaml_partial() {
        let config = HarnessConfig::from_yaml("show_parse_errors: true\n").unwrap();
        assert!(config.show_parse_errors);
        assert_eq!(config.log_filter, "warn");
        assert_eq!(config.nonce_length, 32);
    }

    #[test]
    fn test_from_yaml_keeps_nonce_length() {
        let config = HarnessConfig::from_yaml("nonce_length: 12\n").unwrap();
        assert_eq!(config.nonce_length, 12);
        assert_eq!(config.nonce_length(), 12);
    }

    #[test]
    fn test_from_yaml_clamps() {
        let config = HarnessConfig::from_yaml("nonce_length: 500\n").unwrap();
        assert_eq!(config.nonce_length, 32);
    }

    #[test]
    fn test_from_yaml_rejects_bad_types() {
        let err = HarnessConfig::from_yaml("show_parse_errors: [1, 2]\n").unwrap_err();
        assert!(matches!(err, MockError::Yaml(_)));
    }

    #[test]
    fn test_overlay_env() {
        let env: HashMap<&str, &str> = [
            (LOG_ENV, "mockpress=trace"),
            (SHOW_PARSE_ERRORS_ENV, "Yes"),
        ]
        .into_iter()
        .collect();
        let config = HarnessConfig::new().overlay_env(|k| env.get(k).map(|v| (*v).to_string()));
        assert_eq!(config.log_filter, "mockpress=trace");
        assert!(config.show_parse_errors);
    }

    #[test]
    fn test_overlay_env_ignores_blank_filter() {
        let config = HarnessConfig::new().overlay_env(|k| {
            (k == LOG_ENV).then(|| "   ".to_string())
        });
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("1"));
        assert!(parse_flag(" ON "));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("nope"));
    }
}
