//! MockPress: an in-memory host for testing blog-platform plugins
//!
//! MockPress emulates the plugin API surface of a blog platform so plugin
//! code can be exercised without the platform running. Tests configure an
//! [`ExpectationStore`], run the code under test against it, then inspect the
//! store or the markup the code rendered.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                      MOCKPRESS Architecture                      │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  ┌────────────┐    ┌──────────────────┐    ┌──────────────────┐  │
//! │  │ Test Setup │    │ ExpectationStore │    │ Plugin Under     │  │
//! │  │ (fixtures) │───►│ options, posts,  │◄──►│ Test (accessors, │  │
//! │  │            │    │ terms, nonces, … │    │ LoopCursor)      │  │
//! │  └────────────┘    └────────┬─────────┘    └────────┬─────────┘  │
//! │                             │ codec                 │ markup     │
//! │                             ▼                       ▼            │
//! │                    ┌──────────────────┐    ┌──────────────────┐  │
//! │                    │ tagged canonical │    │ FragmentCache +  │  │
//! │                    │ JSON encoding    │    │ XPath checks     │  │
//! │                    └──────────────────┘    └──────────────────┘  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use mockpress::{json, MockPress, Post};
//!
//! let mut mock = MockPress::new();
//! let store = mock.store_mut();
//! store.set_option("comic_settings", json!({"per_page": 5}));
//! let id = store.insert_post(Post::new().with_title("Strip #1"));
//!
//! assert_eq!(id, 1);
//! assert_eq!(store.get_option("comic_settings"), Some(json!({"per_page": 5})));
//! assert!(mock.assert_markup(r#"<a href="/x">Hi</a>"#, "//a/@href", "/x"));
//! ```

#![warn(missing_docs)]

mod assertion;
pub mod canonical;
pub mod codec;
pub mod config;
#[allow(clippy::missing_const_for_fn)]
mod cursor;
pub mod fixtures;
mod harness;
pub mod logging;
pub mod markup;
mod record;
mod result;
pub mod shim;
#[allow(
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::missing_const_for_fn,
    clippy::doc_markdown
)]
mod store;

#[cfg(any(test, feature = "proptest"))]
pub mod strategies;

pub use assertion::AssertionResult;
pub use config::HarnessConfig;
pub use cursor::{escape_html, parse_post_date, LoopCursor};
pub use fixtures::FixtureSet;
pub use harness::MockPress;
pub use markup::{Expected, Fragment, FragmentCache, ParseFailure};
pub use record::{
    AdminPage, Callback, CallbackFn, Category, Post, SidebarWidget, Widget, WidgetControl,
    WidgetRegistration,
};
pub use result::{MockError, MockResult, WpError};
pub use store::{numeric_id, ExpectationStore, RequestContext, ThemeContext};

pub use serde_json::{json, Value};
