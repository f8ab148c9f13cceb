//! Test logging setup.
//!
//! Store mutations log at `debug`, structural violations and (opt-in) markup
//! parse listings at `warn`. Nothing is printed unless a subscriber is
//! installed, so tests that care call [`setup_test_logging`] first.

use crate::config::HarnessConfig;
use tracing_subscriber::EnvFilter;

/// Install a test-writer `tracing` subscriber with the given filter.
///
/// Safe to call from every test: only the first call installs a subscriber.
///
/// # Example
///
/// ```rust
/// mockpress::logging::setup_test_logging("mockpress=debug");
/// ```
pub fn setup_test_logging(filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_test_writer()
        .try_init();
}

/// Install test logging using the filter from a harness config.
pub fn setup_test_logging_from(config: &HarnessConfig) {
    setup_test_logging(&config.log_filter);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_is_idempotent() {
        setup_test_logging("debug");
        setup_test_logging("warn");
        setup_test_logging_from(&HarnessConfig::new());
        tracing::debug!("logging still usable after repeated setup");
    }
}
