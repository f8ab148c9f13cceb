//! XPath checks against parsed fragments.

use super::fragment::{Fragment, ParsedFragment};
use crate::assertion::AssertionResult;
use sxd_document::dom::{ChildOfElement, ChildOfRoot};
use sxd_xpath::nodeset::{Node, Nodeset};
use sxd_xpath::{Context, Factory, Value as XPathValue};

/// What a check expects at a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expected {
    /// At least one node matches
    Exists,
    /// No node matches
    Absent,
    /// The first match's trimmed text equals this
    Text(String),
}

impl From<bool> for Expected {
    fn from(exists: bool) -> Self {
        if exists {
            Self::Exists
        } else {
            Self::Absent
        }
    }
}

impl From<&str> for Expected {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Expected {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

macro_rules! expected_from_number {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Expected {
            fn from(n: $ty) -> Self {
                Self::Text(n.to_string())
            }
        })*
    };
}

expected_from_number!(i32, i64, u32, u64, f64);

impl Fragment {
    // Paths are evaluated with the wrapper element as context node, so
    // relative paths start inside the fragment. Malformed paths and
    // non-node results (numbers, strings, booleans) select nothing.
    fn select(
        &self,
        path: &str,
        visit: impl FnOnce(&Nodeset<'_>) -> Option<String>,
    ) -> Option<String> {
        let xpath = match Factory::new().build(path) {
            Ok(Some(xpath)) => xpath,
            Ok(None) => return None,
            Err(e) => {
                tracing::debug!(path, error = ?e, "xpath did not compile");
                return None;
            }
        };
        let document = self.document();
        let wrapper = document
            .root()
            .children()
            .into_iter()
            .find_map(|child| match child {
                ChildOfRoot::Element(element) => Some(element),
                _ => None,
            })?;
        let context = Context::new();
        match xpath.evaluate(&context, wrapper) {
            Ok(XPathValue::Nodeset(nodes)) => visit(&nodes),
            Ok(_) => None,
            Err(e) => {
                tracing::debug!(path, error = ?e, "xpath did not evaluate");
                None
            }
        }
    }

    /// Whether `path` selects at least one node
    #[must_use]
    pub fn exists(&self, path: &str) -> bool {
        self.select(path, |nodes| (nodes.size() > 0).then(String::new))
            .is_some()
    }

    /// Trimmed text of the first node `path` selects, in document order.
    ///
    /// Elements yield their own text children only, not descendants'.
    #[must_use]
    pub fn value_at(&self, path: &str) -> Option<String> {
        self.select(path, |nodes| {
            nodes
                .document_order_first()
                .map(|node| node_text(node).trim().to_string())
        })
    }

    /// Check `path` against `expected`, explaining a mismatch
    #[must_use]
    pub fn check(&self, path: &str, expected: impl Into<Expected>) -> AssertionResult {
        match expected.into() {
            Expected::Exists => AssertionResult::check(self.exists(path), || {
                format!("expected a node at {path}, found none")
            }),
            Expected::Absent => AssertionResult::check(!self.exists(path), || {
                format!("expected no node at {path}, found one")
            }),
            Expected::Text(text) => match self.value_at(path) {
                Some(actual) if actual == text => AssertionResult::pass(),
                Some(actual) => {
                    AssertionResult::fail(format!("expected {text:?} at {path}, got {actual:?}"))
                }
                None => {
                    AssertionResult::fail(format!("expected {text:?} at {path}, found no node"))
                }
            },
        }
    }

    /// Whether `path` matches `expected`
    #[must_use]
    pub fn matches(&self, path: &str, expected: impl Into<Expected>) -> bool {
        self.check(path, expected).passed
    }
}

fn node_text(node: Node<'_>) -> String {
    match node {
        Node::Element(element) => element
            .children()
            .into_iter()
            .filter_map(|child| match child {
                ChildOfElement::Text(text) => Some(text.text().to_string()),
                _ => None,
            })
            .collect(),
        other => other.string_value(),
    }
}

/// Whether `path` selects a node; `false` for an unparseable fragment
#[must_use]
pub fn exists(tree: &ParsedFragment, path: &str) -> bool {
    tree.as_ref().is_ok_and(|fragment| fragment.exists(path))
}

/// Trimmed text at `path`; `None` for an unparseable fragment
#[must_use]
pub fn value_at(tree: &ParsedFragment, path: &str) -> Option<String> {
    tree.as_ref().ok().and_then(|fragment| fragment.value_at(path))
}

/// Check `path` against `expected`.
///
/// `true` asserts existence, `false` absence, anything else text equality.
/// Text equality is strict: a path that selects nothing never equals any
/// text, not even `""` (a loose host comparison would treat a missing node
/// and the empty string as equal). An unparseable fragment matches nothing,
/// not even `false`.
#[must_use]
pub fn assert_xpath(tree: &ParsedFragment, path: &str, expected: impl Into<Expected>) -> bool {
    tree.as_ref()
        .is_ok_and(|fragment| fragment.matches(path, expected))
}
