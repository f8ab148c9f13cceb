//! Fragment parsing and the parse cache.

use crate::canonical::text_digest;
use sxd_document::dom::Document;
use sxd_document::Package;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Synthetic root element every fragment is wrapped in
pub const WRAPPER_ELEMENT: &str = "x";

/// HTML entities rewritten before parsing, with their replacements
const ENTITY_REWRITES: [(&str, &str); 2] = [("&mdash;", "--"), ("&nbsp;", " ")];

/// Why a fragment could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("fragment is not well-formed: {reason}")]
pub struct ParseFailure {
    /// Parser diagnostic
    pub reason: String,
}

/// Outcome of parsing a fragment
pub type ParsedFragment = Result<Fragment, ParseFailure>;

/// A parsed, wrapped markup fragment
#[derive(Clone)]
pub struct Fragment {
    package: Rc<Package>,
    digest: String,
}

impl Fragment {
    /// Digest of the source text this tree was parsed from
    #[must_use]
    pub fn digest(&self) -> &str {
        &self.digest
    }

    pub(super) fn document(&self) -> Document<'_> {
        self.package.as_document()
    }
}

impl fmt::Debug for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fragment")
            .field("digest", &self.digest)
            .finish_non_exhaustive()
    }
}

/// Rewrite the HTML entities XML does not know
#[must_use]
pub fn normalize_entities(fragment: &str) -> String {
    ENTITY_REWRITES
        .iter()
        .fold(fragment.to_string(), |text, (entity, replacement)| {
            text.replace(entity, replacement)
        })
}

/// Parse a fragment without caching
#[must_use]
pub fn parse_fragment(fragment: &str) -> ParsedFragment {
    let wrapped = format!(
        "<{WRAPPER_ELEMENT}>{}</{WRAPPER_ELEMENT}>",
        normalize_entities(fragment)
    );
    sxd_document::parser::parse(&wrapped)
        .map(|package| Fragment {
            package: Rc::new(package),
            digest: text_digest(fragment),
        })
        .map_err(|e| ParseFailure {
            reason: format!("{e:?}"),
        })
}

/// Line-numbered listing of a fragment, numbers right-aligned
#[must_use]
pub fn numbered_listing(fragment: &str) -> String {
    let lines: Vec<&str> = fragment.split('\n').collect();
    let width = lines.len().to_string().len();
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{:>width$}# {line}\n", i + 1))
        .collect()
}

/// Parse cache keyed by the digest of the fragment text.
///
/// Failures are cached too. Entries are never evicted.
#[derive(Debug, Default)]
pub struct FragmentCache {
    entries: HashMap<String, ParsedFragment>,
    show_parse_errors: bool,
}

impl FragmentCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Log a listing of each fragment that fails to parse
    #[must_use]
    pub const fn with_parse_errors(mut self, show: bool) -> Self {
        self.show_parse_errors = show;
        self
    }

    /// Parse `fragment`, or return the cached outcome for identical text
    pub fn parse(&mut self, fragment: &str) -> ParsedFragment {
        let key = text_digest(fragment);
        if let Some(parsed) = self.entries.get(&key) {
            return parsed.clone();
        }
        let parsed = parse_fragment(fragment);
        if let Err(failure) = &parsed {
            if self.show_parse_errors {
                tracing::warn!(
                    reason = %failure.reason,
                    "unparseable fragment\n{}",
                    numbered_listing(fragment)
                );
            }
        }
        self.entries.insert(key, parsed.clone());
        parsed
    }

    /// Whether identical text was parsed before
    #[must_use]
    pub fn contains(&self, fragment: &str) -> bool {
        self.entries.contains_key(&text_digest(fragment))
    }

    /// Number of distinct fragments parsed
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing was parsed yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
