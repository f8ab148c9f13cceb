//! MockPress Test Context
//!
//! [`MockPress`] bundles everything one test needs: the harness config, an
//! [`ExpectationStore`], and a [`FragmentCache`] for markup checks.
//!
//! Resetting between tests clears the store but keeps the fragment cache:
//! parsed trees depend only on the fragment text, never on store state.

use crate::assertion::AssertionResult;
use crate::config::HarnessConfig;
use crate::fixtures::FixtureSet;
use crate::markup::{Expected, FragmentCache, ParsedFragment};
use crate::result::MockResult;
use crate::store::ExpectationStore;

/// One test's mock host
#[derive(Debug)]
pub struct MockPress {
    config: HarnessConfig,
    store: ExpectationStore,
    fragments: FragmentCache,
}

impl Default for MockPress {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPress {
    /// Create a context with the default config
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(HarnessConfig::default())
    }

    /// Create a context with an explicit config
    #[must_use]
    pub fn with_config(config: HarnessConfig) -> Self {
        let store = ExpectationStore::with_nonce_length(config.nonce_length());
        let fragments = FragmentCache::new().with_parse_errors(config.show_parse_errors);
        Self {
            config,
            store,
            fragments,
        }
    }

    /// The harness config
    #[must_use]
    pub const fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// The expectation store, read-only
    #[must_use]
    pub const fn store(&self) -> &ExpectationStore {
        &self.store
    }

    /// The expectation store, for setup and for code under test
    pub fn store_mut(&mut self) -> &mut ExpectationStore {
        &mut self.store
    }

    /// The fragment parse cache
    #[must_use]
    pub const fn fragment_cache(&self) -> &FragmentCache {
        &self.fragments
    }

    /// Return the store to its empty shape
    pub fn reset(&mut self) {
        self.store.reset();
    }

    /// Seed the store from a fixture set.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::TaxonomyViolation`](crate::MockError::TaxonomyViolation)
    /// for a malformed category; the store is then unchanged.
    pub fn seed(&mut self, fixtures: &FixtureSet) -> MockResult<()> {
        fixtures.apply(&mut self.store)
    }

    /// Parse a markup fragment through the cache
    pub fn parse_markup(&mut self, fragment: &str) -> ParsedFragment {
        self.fragments.parse(fragment)
    }

    /// Check `path` in `fragment` against `expected`, explaining a mismatch.
    ///
    /// An unparseable fragment fails every check.
    pub fn check_markup(
        &mut self,
        fragment: &str,
        path: &str,
        expected: impl Into<Expected>,
    ) -> AssertionResult {
        match self.parse_markup(fragment) {
            Ok(tree) => tree.check(path, expected),
            Err(failure) => AssertionResult::fail(failure.to_string()),
        }
    }

    /// Whether `path` in `fragment` matches `expected`
    pub fn assert_markup(
        &mut self,
        fragment: &str,
        path: &str,
        expected: impl Into<Expected>,
    ) -> bool {
        self.check_markup(fragment, path, expected).passed
    }
}
