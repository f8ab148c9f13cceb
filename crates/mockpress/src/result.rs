//! Result and error types for MockPress.
//!
//! Two kinds of failure live here and they are deliberately separate:
//!
//! - [`MockError`] is a Rust error. It is returned when a caller hands a
//!   structural mutator a wrong-shaped argument, or when fixtures and
//!   configuration cannot be loaded.
//! - [`WpError`] is a *value*: the mock of the host's error object. Lookups
//!   whose host contract is "the record, or an error object" return it in
//!   `Err` position. Nothing about it is exceptional.

use std::fmt::Display;
use thiserror::Error;

/// Result type for MockPress operations
pub type MockResult<T> = Result<T, MockError>;

/// Errors that can occur in MockPress
#[derive(Debug, Error)]
pub enum MockError {
    /// Wrong-shaped argument to a taxonomy mutator (non-numeric id, non-record body)
    #[error("Taxonomy violation: {message}")]
    TaxonomyViolation {
        /// Error message
        message: String,
    },

    /// Fixture set could not be applied
    #[error("Fixture error: {message}")]
    FixtureError {
        /// Error message
        message: String,
    },

    /// YAML document could not be parsed
    #[error("YAML error: {0}")]
    Yaml(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MockError {
    /// Create a taxonomy violation
    #[must_use]
    pub fn taxonomy(message: impl Into<String>) -> Self {
        Self::TaxonomyViolation {
            message: message.into(),
        }
    }

    /// Create a fixture error
    #[must_use]
    pub fn fixture(message: impl Into<String>) -> Self {
        Self::FixtureError {
            message: message.into(),
        }
    }

    /// Whether this error reports a structural violation
    #[must_use]
    pub const fn is_violation(&self) -> bool {
        matches!(self, Self::TaxonomyViolation { .. })
    }
}

/// Mock of the host platform's error object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct WpError {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable message
    pub message: String,
}

impl WpError {
    /// Create an error object
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Error object for a record that is not in the store
    #[must_use]
    pub fn not_found(what: &str, key: impl Display) -> Self {
        Self::new(
            format!("invalid_{what}"),
            format!("{what} {key} not found"),
        )
    }
}
