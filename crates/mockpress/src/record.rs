//! Typed records held by the expectation store.
//!
//! Each record names the fields the store itself relies on (ids, titles,
//! dates, slugs) and keeps everything else in a flattened `extra` map, so
//! fixtures can carry arbitrary host fields without the store caring.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::rc::Rc;

/// A post (or page, or attachment) record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Post ID, assigned on insert when absent
    #[serde(rename = "ID", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Title
    #[serde(default)]
    pub post_title: String,
    /// Date, `YYYY-MM-DD HH:MM:SS` or a unix timestamp
    #[serde(default)]
    pub post_date: String,
    /// Body markup
    #[serde(default)]
    pub post_content: String,
    /// Author display name
    #[serde(default)]
    pub post_author: String,
    /// Permalink
    #[serde(default)]
    pub guid: String,
    /// Any other host fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Post {
    /// Create an empty post
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an explicit ID
    #[must_use]
    pub const fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.post_title = title.into();
        self
    }

    /// Set the date
    #[must_use]
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.post_date = date.into();
        self
    }

    /// Set the content
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.post_content = content.into();
        self
    }

    /// Set the author
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.post_author = author.into();
        self
    }

    /// Set the permalink
    #[must_use]
    pub fn with_guid(mut self, guid: impl Into<String>) -> Self {
        self.guid = guid.into();
        self
    }

    /// Set an extension field
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Read an extension field
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Permalink (the `guid`)
    #[must_use]
    pub fn permalink(&self) -> &str {
        &self.guid
    }
}

/// A category record.
///
/// `cat_ID` and `term_id` are identity fields: the store overwrites both
/// with the id the category is added under.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Category ID
    #[serde(rename = "cat_ID", default)]
    pub cat_id: u64,
    /// Term ID (same as `cat_ID`)
    #[serde(default)]
    pub term_id: u64,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// URL slug
    #[serde(default)]
    pub slug: String,
    /// Any other host fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Category {
    /// Create a named category
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the slug
    #[must_use]
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    pub(crate) fn assign_id(&mut self, id: u64) {
        self.cat_id = id;
        self.term_id = id;
    }
}

/// Closure signature for hooks and widget callbacks
pub type CallbackFn = dyn Fn(&[Value]) -> Value;

/// A registered hook or widget callback.
///
/// Plugin code often registers callbacks by name; tests only need to know
/// the name was recorded. Closures can actually be invoked.
#[derive(Clone)]
pub enum Callback {
    /// Callback referenced by name
    Named(String),
    /// Invocable closure
    Closure(Rc<CallbackFn>),
}

impl Callback {
    /// Callback referenced by name
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Invocable closure callback
    #[must_use]
    pub fn closure<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + 'static,
    {
        Self::Closure(Rc::new(f))
    }

    /// Name of a named callback
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            Self::Closure(_) => None,
        }
    }

    /// Run a closure callback; named callbacks return `None`
    #[must_use]
    pub fn invoke(&self, args: &[Value]) -> Option<Value> {
        match self {
            Self::Named(_) => None,
            Self::Closure(f) => Some(f(args)),
        }
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.debug_tuple("Named").field(name).finish(),
            Self::Closure(_) => f.write_str("Closure(..)"),
        }
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Named(a), Self::Named(b)) => a == b,
            (Self::Closure(a), Self::Closure(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<&str> for Callback {
    fn from(name: &str) -> Self {
        Self::named(name)
    }
}

impl From<String> for Callback {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

/// An admin menu or submenu page registration
#[derive(Debug, Clone, PartialEq)]
pub struct AdminPage {
    /// Parent menu file; empty for top-level pages
    pub parent: String,
    /// Page `<title>`
    pub page_title: String,
    /// Menu label
    pub menu_title: String,
    /// Required capability or level
    pub access_level: String,
    /// Menu slug / file
    pub file: String,
    /// Render callback
    pub function: Option<Callback>,
    /// Icon URL, top-level pages only
    pub icon: Option<String>,
}

/// A pre-widget-class sidebar widget registration
#[derive(Debug, Clone, PartialEq)]
pub struct SidebarWidget {
    /// Widget ID
    pub id: String,
    /// Display name
    pub name: String,
    /// Output callback
    pub output_callback: Callback,
    /// Widget options
    pub options: Value,
}

/// A sidebar widget control registration
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetControl {
    /// Widget name the control belongs to
    pub name: String,
    /// Control form callback
    pub control_callback: Callback,
    /// Control width
    pub width: Option<u32>,
    /// Control height
    pub height: Option<u32>,
    /// Extra callback parameters
    pub params: Vec<Value>,
}

/// A widget-class registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetRegistration {
    /// Widget base ID
    pub id: String,
    /// Display name
    pub name: String,
    /// Widget options
    pub widget_options: Value,
    /// Control options
    pub control_options: Value,
}

/// Handle returned by widget-class registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Widget {
    id: String,
}

impl Widget {
    pub(crate) fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Widget base ID
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Form field `id` attribute
    #[must_use]
    pub fn field_id(&self, field: &str) -> String {
        format!("{}-{field}", self.id)
    }

    /// Form field `name` attribute
    #[must_use]
    pub fn field_name(&self, field: &str) -> String {
        format!("{}[{field}]", self.id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    mod post_tests {
        use super::*;

        #[test]
        fn test_builder() {
            let post = Post::new()
                .with_title("Hello")
                .with_date("2009-01-01 10:00:00")
                .with_guid("/hello")
                .with_field("post_status", "publish");
            assert_eq!(post.id, None);
            assert_eq!(post.post_title, "Hello");
            assert_eq!(post.field("post_status"), Some(&json!("publish")));
        }

        #[test]
        fn test_deserialize_host_shape() {
            let post: Post = serde_json::from_value(json!({
                "ID": 4,
                "post_title": "Strip",
                "menu_order": 2
            }))
            .unwrap();
            assert_eq!(post.id, Some(4));
            assert_eq!(post.post_title, "Strip");
            assert_eq!(post.post_content, "");
            assert_eq!(post.field("menu_order"), Some(&json!(2)));
        }

        #[test]
        fn test_serialize_omits_missing_id() {
            let value = serde_json::to_value(Post::new().with_title("x")).unwrap();
            assert!(value.get("ID").is_none());
            assert_eq!(value["post_title"], json!("x"));
        }
    }

    mod category_tests {
        use super::*;

        #[test]
        fn test_assign_id_sets_both_identity_fields() {
            let mut category = Category::new("News").with_slug("news");
            category.assign_id(7);
            assert_eq!(category.cat_id, 7);
            assert_eq!(category.term_id, 7);
        }

        #[test]
        fn test_serialized_field_names() {
            let mut category = Category::new("News");
            category.assign_id(3);
            let value = serde_json::to_value(&category).unwrap();
            assert_eq!(value["cat_ID"], json!(3));
            assert_eq!(value["term_id"], json!(3));
        }
    }

    mod callback_tests {
        use super::*;

        #[test]
        fn test_named_callback() {
            let cb = Callback::from("my_plugin_init");
            assert_eq!(cb.name(), Some("my_plugin_init"));
            assert_eq!(cb.invoke(&[]), None);
            assert_eq!(format!("{cb:?}"), "Named(\"my_plugin_init\")");
        }

        #[test]
        fn test_closure_callback() {
            let cb = Callback::closure(|args| json!(args.len()));
            assert_eq!(cb.invoke(&[json!(1), json!(2)]), Some(json!(2)));
            assert_eq!(format!("{cb:?}"), "Closure(..)");
        }

        #[test]
        fn test_equality() {
            let cb = Callback::closure(|_| Value::Null);
            assert_eq!(cb, cb.clone());
            assert_ne!(cb, Callback::closure(|_| Value::Null));
            assert_eq!(Callback::named("a"), Callback::named("a"));
            assert_ne!(Callback::named("a"), cb);
        }
    }

    #[test]
    fn test_widget_field_names() {
        let widget = Widget::new("archive");
        assert_eq!(widget.id(), "archive");
        assert_eq!(widget.field_id("title"), "archive-title");
        assert_eq!(widget.field_name("title"), "archive[title]");
    }
}
