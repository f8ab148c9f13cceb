//! Structural Assertion Helper
//!
//! Parses rendered markup fragments into navigable trees and checks them with
//! XPath queries.
//!
//! ## Pipeline
//!
//! ```text
//! fragment ──► normalize entities ──► wrap in <x>…</x> ──► parse
//!                                                            │
//!                       FragmentCache (digest ─► Ok/Err) ◄───┘
//!                                                            │
//!                   exists / value_at / check(path, expected)
//! ```
//!
//! Parsing never panics: a fragment that is not well-formed becomes a
//! [`ParseFailure`], and every query against a failure (or with a malformed
//! path) is a non-match.
//!
//! ```
//! use mockpress::markup::{parse_fragment, assert_xpath};
//!
//! let tree = parse_fragment(r#"<a href="/x">Hi</a>"#);
//! assert!(assert_xpath(&tree, "//a/@href", "/x"));
//! assert!(assert_xpath(&tree, "//b", false));
//! ```

mod fragment;
mod xpath;

pub use fragment::{
    normalize_entities, numbered_listing, parse_fragment, Fragment, FragmentCache, ParseFailure,
    ParsedFragment, WRAPPER_ELEMENT,
};
pub use xpath::{assert_xpath, exists, value_at, Expected};
