//! Pass/fail outcomes of markup checks.

use std::fmt;

/// Outcome of a structural check, with a failure message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionResult {
    /// Whether the check held
    pub passed: bool,
    /// Why it did not hold; empty on success
    pub message: String,
}

impl AssertionResult {
    /// A passing outcome
    #[must_use]
    pub const fn pass() -> Self {
        Self {
            passed: true,
            message: String::new(),
        }
    }

    /// A failing outcome
    #[must_use]
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: message.into(),
        }
    }

    /// Pass when `condition` holds, otherwise fail with `message()`
    #[must_use]
    pub fn check(condition: bool, message: impl FnOnce() -> String) -> Self {
        if condition {
            Self::pass()
        } else {
            Self::fail(message())
        }
    }

    /// Convert into a `Result` carrying the failure message
    ///
    /// # Errors
    ///
    /// Returns the message when the check failed.
    pub fn into_result(self) -> Result<(), String> {
        if self.passed {
            Ok(())
        } else {
            Err(self.message)
        }
    }

    /// Panic with the failure message when the check failed
    #[track_caller]
    pub fn assert_passed(&self) {
        assert!(self.passed, "markup assertion failed: {}", self.message);
    }
}

impl fmt::Display for AssertionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.passed {
            f.write_str("passed")
        } else {
            write!(f, "failed: {}", self.message)
        }
    }
}

impl From<AssertionResult> for bool {
    fn from(result: AssertionResult) -> Self {
        result.passed
    }
}
