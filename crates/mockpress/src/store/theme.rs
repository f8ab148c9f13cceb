//! Themes, theme expectations, the loop queue and request context.

use super::ExpectationStore;
use crate::record::Post;
use serde_json::Value;

impl ExpectationStore {
    /// Register a theme's data under `name`
    pub fn register_theme(&mut self, name: &str, data: impl Into<Value>) {
        self.themes.insert(name.to_string(), data.into());
    }

    /// A registered theme's data
    #[must_use]
    pub fn theme(&self, name: &str) -> Option<&Value> {
        self.themes.get(name)
    }

    /// Switch the active theme
    pub fn set_current_theme(&mut self, name: &str) {
        self.current_theme = Some(name.to_string());
    }

    /// Name of the active theme
    #[must_use]
    pub fn current_theme(&self) -> Option<&str> {
        self.current_theme.as_deref()
    }

    /// Set a theme expectation.
    ///
    /// `header`, `sidebar`, `footer` and `template_directory` take strings,
    /// `has_next_posts` takes a boolean. A value of the wrong type for one of
    /// those keys (or any other key) lands in the extension map.
    pub fn set_theme_expectation(&mut self, key: &str, value: impl Into<Value>) {
        let value = value.into();
        let theme = &mut self.theme;
        match (key, value) {
            ("header", Value::String(s)) => theme.header = Some(s),
            ("sidebar", Value::String(s)) => theme.sidebar = Some(s),
            ("footer", Value::String(s)) => theme.footer = Some(s),
            ("template_directory", Value::String(s)) => theme.template_directory = Some(s),
            ("has_next_posts", Value::Bool(b)) => theme.has_next_posts = b,
            (key, value) => {
                theme.extra.insert(key.to_string(), value);
            }
        }
    }

    /// A theme expectation from the extension map
    #[must_use]
    pub fn theme_expectation(&self, key: &str) -> Option<&Value> {
        self.theme.extra.get(key)
    }

    /// Set the theme root directory
    pub fn set_template_directory(&mut self, dir: &str) {
        self.theme.template_directory = Some(dir.to_string());
    }

    /// Theme root directory
    #[must_use]
    pub fn template_directory(&self) -> Option<&str> {
        self.theme.template_directory.as_deref()
    }

    /// Header markup
    #[must_use]
    pub fn header(&self) -> Option<&str> {
        self.theme.header.as_deref()
    }

    /// Sidebar markup
    #[must_use]
    pub fn sidebar(&self) -> Option<&str> {
        self.theme.sidebar.as_deref()
    }

    /// Footer markup
    #[must_use]
    pub fn footer(&self) -> Option<&str> {
        self.theme.footer.as_deref()
    }

    /// Whether a "next posts" page exists
    #[must_use]
    pub const fn has_next_posts(&self) -> bool {
        self.theme.has_next_posts
    }

    /// Queue a post for the loop
    pub fn add_theme_post(&mut self, post: Post) {
        self.theme.posts.push_back(post);
    }

    /// Whether the loop queue still holds posts
    #[must_use]
    pub fn has_remaining_posts(&self) -> bool {
        !self.theme.posts.is_empty()
    }

    /// Pop the head of the loop queue.
    ///
    /// The popped post is gone until the queue is reconfigured.
    pub fn advance_post(&mut self) -> Option<Post> {
        let post = self.theme.posts.pop_front();
        if let Some(post) = &post {
            tracing::debug!(id = ?post.id, remaining = self.theme.posts.len(), "loop advanced");
        }
        post
    }

    /// Set a current-request flag.
    ///
    /// `is_feed` and `is_admin` are read as booleans; other fields are kept
    /// verbatim.
    pub fn set_current_option(&mut self, field: &str, value: impl Into<Value>) {
        let value = value.into();
        match field {
            "is_feed" => self.current.is_feed = value.as_bool().unwrap_or(false),
            "is_admin" => self.current.is_admin = value.as_bool().unwrap_or(false),
            _ => {
                self.current.extra.insert(field.to_string(), value);
            }
        }
    }

    /// A current-request field
    #[must_use]
    pub fn current_option(&self, field: &str) -> Option<Value> {
        match field {
            "is_feed" => Some(Value::Bool(self.current.is_feed)),
            "is_admin" => Some(Value::Bool(self.current.is_admin)),
            _ => self.current.extra.get(field).cloned(),
        }
    }

    /// Request is a feed
    #[must_use]
    pub const fn is_feed(&self) -> bool {
        self.current.is_feed
    }

    /// Request is in the admin area
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.current.is_admin
    }

    /// Set a blog info field
    pub fn set_bloginfo(&mut self, field: &str, value: impl Into<String>) {
        self.bloginfo.insert(field.to_string(), value.into());
    }

    /// A blog info field, empty when unset
    #[must_use]
    pub fn bloginfo(&self, field: &str) -> String {
        self.bloginfo.get(field).cloned().unwrap_or_default()
    }

    /// Set the request query string
    pub fn setup_query(&mut self, query_string: &str) {
        self.current.query_string = query_string.to_string();
    }

    /// The request query string
    #[must_use]
    pub fn query_string(&self) -> &str {
        &self.current.query_string
    }

    /// The query string with `param=value` appended.
    ///
    /// Uses `?` when the query string has none yet, `&` otherwise. The value
    /// is form-urlencoded.
    #[must_use]
    pub fn add_query_arg(&self, param: &str, value: &str) -> String {
        let query = &self.current.query_string;
        let separator = if query.contains('?') { '&' } else { '?' };
        let encoded: String = url::form_urlencoded::byte_serialize(value.as_bytes()).collect();
        format!("{query}{separator}{param}={encoded}")
    }

    /// Raw value of the `s` parameter after the last `?`, or empty
    #[must_use]
    pub fn search_query(&self) -> String {
        let query = &self.current.query_string;
        let params = query.rfind('?').map_or(query.as_str(), |at| &query[at + 1..]);
        params
            .split('&')
            .filter_map(|part| part.split_once('='))
            .find(|(name, _)| *name == "s")
            .map(|(_, value)| value.to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    mod theme_tests {
        use super::*;

        #[test]
        fn test_registered_and_current_theme() {
            let mut store = ExpectationStore::new();
            store.register_theme("Default", json!({"Template": "default"}));
            store.set_current_theme("Default");
            assert_eq!(store.current_theme(), Some("Default"));
            assert_eq!(store.theme("Default").unwrap()["Template"], json!("default"));
            assert!(store.theme("Other").is_none());
        }

        #[test]
        fn test_known_expectations() {
            let mut store = ExpectationStore::new();
            store.set_theme_expectation("header", "<div id=\"header\"/>");
            store.set_theme_expectation("has_next_posts", true);
            store.set_template_directory("/themes/default");
            assert_eq!(store.header(), Some("<div id=\"header\"/>"));
            assert_eq!(store.sidebar(), None);
            assert!(store.has_next_posts());
            assert_eq!(store.template_directory(), Some("/themes/default"));
        }

        #[test]
        fn test_other_keys_go_to_extension_map() {
            let mut store = ExpectationStore::new();
            store.set_theme_expectation("comments", json!(3));
            store.set_theme_expectation("footer", json!(["not", "text"]));
            assert_eq!(store.theme_expectation("comments"), Some(&json!(3)));
            assert_eq!(store.theme_expectation("footer"), Some(&json!(["not", "text"])));
            assert_eq!(store.footer(), None);
        }
    }

    mod queue_tests {
        use super::*;

        #[test]
        fn test_advance_consumes_in_order() {
            let mut store = ExpectationStore::new();
            store.add_theme_post(Post::new().with_id(1));
            store.add_theme_post(Post::new().with_id(2));
            assert!(store.has_remaining_posts());
            assert_eq!(store.advance_post().unwrap().id, Some(1));
            assert_eq!(store.advance_post().unwrap().id, Some(2));
            assert!(!store.has_remaining_posts());
            assert!(store.advance_post().is_none());
        }
    }

    mod request_tests {
        use super::*;

        #[test]
        fn test_flags() {
            let mut store = ExpectationStore::new();
            assert!(!store.is_admin());
            store.set_current_option("is_admin", true);
            store.set_current_option("paged", 2);
            assert!(store.is_admin());
            assert_eq!(store.current_option("is_admin"), Some(json!(true)));
            assert_eq!(store.current_option("paged"), Some(json!(2)));
            assert_eq!(store.current_option("missing"), None);
        }

        #[test]
        fn test_bloginfo() {
            let mut store = ExpectationStore::new();
            store.set_bloginfo("name", "My Blog");
            assert_eq!(store.bloginfo("name"), "My Blog");
            assert_eq!(store.bloginfo("url"), "");
        }

        #[test]
        fn test_add_query_arg_separator() {
            let mut store = ExpectationStore::new();
            store.setup_query("/page");
            assert_eq!(store.add_query_arg("s", "a b&c"), "/page?s=a+b%26c");
            store.setup_query("/page?p=1");
            assert_eq!(store.add_query_arg("x", "y"), "/page?p=1&x=y");
            assert_eq!(store.query_string(), "/page?p=1");
        }

        #[test]
        fn test_search_query() {
            let mut store = ExpectationStore::new();
            assert_eq!(store.search_query(), "");
            store.setup_query("/index.php?cat=3&s=comic");
            assert_eq!(store.search_query(), "comic");
            store.setup_query("s=direct");
            assert_eq!(store.search_query(), "direct");
            store.setup_query("/x?y=1?p=2&s=last");
            assert_eq!(store.search_query(), "last");
            store.setup_query("/x?p=1&flag");
            assert_eq!(store.search_query(), "");
        }
    }
}
