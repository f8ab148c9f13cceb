//! Expectation Store
//!
//! The single source of truth for mocked host state. Tests configure it
//! (set expectations), plugin code under test reads and writes it through
//! the host-shaped accessors, and tests inspect it afterwards.
//!
//! ## Shape
//!
//! The store is a set of named subsystem slots, each with its own layout:
//!
//! ```text
//! options          key      -> encoded value
//! posts            id       -> Post            (ids allocated max+1 from 1)
//! post_meta        id       -> field -> value
//! post_categories  id       -> [term]
//! post_tags        id       -> [term]
//! categories       id       -> Category
//! children         digest   -> [child]
//! nonces           name     -> token
//! actions/filters  hook     -> Callback        (last registration wins)
//! capabilities     name     -> granted
//! theme / current / bloginfo: ambient request and theme context
//! ```
//!
//! ## Sentinels
//!
//! Absence is never an error here. Missing options read as `None`, missing
//! lists as empty, missing meta as an empty string, unmatched post searches
//! as `0`. Only structural mutators given wrong-shaped input return
//! [`MockError`](crate::MockError).
//!
//! ## Lifecycle
//!
//! [`reset`](ExpectationStore::reset) puts every slot back to its empty
//! shape. Call it (or build a fresh store) before each test.

mod admin;
mod capabilities;
mod hooks;
mod nonce;
mod options;
mod posts;
mod taxonomy;
mod theme;

pub(crate) use taxonomy::category_from;
pub use taxonomy::numeric_id;

use crate::config::DEFAULT_NONCE_LENGTH;
use crate::record::{
    AdminPage, Callback, Category, Post, SidebarWidget, WidgetControl, WidgetRegistration,
};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

/// Active theme expectations and the loop's remaining posts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThemeContext {
    /// Posts the loop has not consumed yet, in order
    pub posts: VecDeque<Post>,
    /// Header markup
    pub header: Option<String>,
    /// Sidebar markup
    pub sidebar: Option<String>,
    /// Footer markup
    pub footer: Option<String>,
    /// Theme root directory
    pub template_directory: Option<String>,
    /// Whether a "next posts" page exists
    pub has_next_posts: bool,
    /// Other theme expectations
    pub extra: HashMap<String, Value>,
}

/// Ambient "current request" context
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestContext {
    /// Request is a feed
    pub is_feed: bool,
    /// Request is in the admin area
    pub is_admin: bool,
    /// Raw query string
    pub query_string: String,
    /// Other request flags
    pub extra: HashMap<String, Value>,
}

/// In-memory model of the host platform's state
#[derive(Debug)]
pub struct ExpectationStore {
    options: HashMap<String, Value>,
    posts: BTreeMap<u64, Post>,
    post_meta: HashMap<u64, HashMap<String, Value>>,
    post_categories: HashMap<u64, Vec<Value>>,
    post_tags: HashMap<u64, Vec<Value>>,
    all_tags: Vec<Value>,
    categories: BTreeMap<u64, Category>,
    get_posts: HashMap<String, Vec<Post>>,
    children: HashMap<String, Vec<Value>>,
    nonces: HashMap<String, String>,
    nonce_length: usize,
    actions: HashMap<String, Callback>,
    filters: HashMap<String, Callback>,
    capabilities: HashMap<String, bool>,
    pages: Vec<AdminPage>,
    user_can_richedit: bool,
    plugin_domains: Vec<String>,
    enqueued: HashSet<String>,
    plugin_data: HashMap<String, Value>,
    sidebar_widgets: Vec<SidebarWidget>,
    widget_controls: Vec<WidgetControl>,
    widgets: BTreeMap<String, WidgetRegistration>,
    themes: HashMap<String, Value>,
    current_theme: Option<String>,
    theme: ThemeContext,
    current: RequestContext,
    bloginfo: HashMap<String, String>,
}

impl Default for ExpectationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpectationStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::with_nonce_length(DEFAULT_NONCE_LENGTH)
    }

    /// Create an empty store generating nonce tokens of `length` hex chars
    #[must_use]
    pub fn with_nonce_length(length: usize) -> Self {
        Self {
            options: HashMap::new(),
            posts: BTreeMap::new(),
            post_meta: HashMap::new(),
            post_categories: HashMap::new(),
            post_tags: HashMap::new(),
            all_tags: Vec::new(),
            categories: BTreeMap::new(),
            get_posts: HashMap::new(),
            children: HashMap::new(),
            nonces: HashMap::new(),
            nonce_length: length.clamp(1, DEFAULT_NONCE_LENGTH),
            actions: HashMap::new(),
            filters: HashMap::new(),
            capabilities: HashMap::new(),
            pages: Vec::new(),
            user_can_richedit: false,
            plugin_domains: Vec::new(),
            enqueued: HashSet::new(),
            plugin_data: HashMap::new(),
            sidebar_widgets: Vec::new(),
            widget_controls: Vec::new(),
            widgets: BTreeMap::new(),
            themes: HashMap::new(),
            current_theme: None,
            theme: ThemeContext::default(),
            current: RequestContext::default(),
            bloginfo: HashMap::new(),
        }
    }

    /// Discard all state and return every slot to its empty shape.
    ///
    /// The configured nonce length survives; it is harness configuration,
    /// not an expectation.
    pub fn reset(&mut self) {
        *self = Self::with_nonce_length(self.nonce_length);
        tracing::debug!("expectation store reset");
    }

    /// True when no slot holds anything
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let defaults = Self::with_nonce_length(self.nonce_length);
        self.options.is_empty()
            && self.posts.is_empty()
            && self.post_meta.is_empty()
            && self.post_categories.is_empty()
            && self.post_tags.is_empty()
            && self.all_tags.is_empty()
            && self.categories.is_empty()
            && self.get_posts.is_empty()
            && self.children.is_empty()
            && self.nonces.is_empty()
            && self.actions.is_empty()
            && self.filters.is_empty()
            && self.capabilities.is_empty()
            && self.pages.is_empty()
            && self.user_can_richedit == defaults.user_can_richedit
            && self.plugin_domains.is_empty()
            && self.enqueued.is_empty()
            && self.plugin_data.is_empty()
            && self.sidebar_widgets.is_empty()
            && self.widget_controls.is_empty()
            && self.widgets.is_empty()
            && self.themes.is_empty()
            && self.current_theme.is_none()
            && self.theme == defaults.theme
            && self.current == defaults.current
            && self.bloginfo.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_store_is_empty() {
        let store = ExpectationStore::new();
        assert!(store.is_empty());
        assert!(!store.is_feed());
        assert!(!store.has_remaining_posts());
    }

    #[test]
    fn test_reset_restores_every_read_empty_case() {
        let mut store = ExpectationStore::new();
        store.set_option("x", "y");
        store.set_post_categories(1, json!([2, 3]));
        store.grant_capabilities(["edit"]);
        store.insert_post(Post::new().with_title("a"));
        store.add_theme_post(Post::new());
        store.set_current_option("is_feed", true);
        store.enqueue_script("jquery");
        assert!(!store.is_empty());

        store.reset();

        assert!(store.is_empty());
        assert_eq!(store.get_option("x"), None);
        assert!(store.post_categories(1).is_empty());
        assert!(!store.current_user_can(["edit"]));
        assert!(store.get_post(1).is_none());
        assert!(!store.has_remaining_posts());
        assert!(!store.is_feed());
    }

    #[test]
    fn test_reset_keeps_nonce_length() {
        let mut store = ExpectationStore::with_nonce_length(8);
        store.reset();
        assert_eq!(store.issue_or_fetch_nonce("n").len(), 8);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut store = ExpectationStore::new();
        store.reset();
        store.reset();
        assert!(store.is_empty());
    }
}
