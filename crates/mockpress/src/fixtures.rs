//! Declarative fixture sets.
//!
//! A [`FixtureSet`] describes store contents in YAML so tests can share
//! seed data:
//!
//! ```yaml
//! options:
//!   blogname: Comics
//!   settings: { per_page: 10 }
//! posts:
//!   - ID: 1
//!     post_title: First
//!     post_date: "2009-01-01 10:00:00"
//! categories:
//!   - id: 7
//!     name: News
//!     slug: news
//! post_categories:
//!   1: [7]
//! capabilities: [edit_posts]
//! children:
//!   - query: { type: post, limit: 5 }
//!     children: [c1, c2]
//! ```

use crate::record::{Category, Post};
use crate::result::{MockError, MockResult};
use crate::store::{category_from, ExpectationStore};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

/// A category entry: a loosely-typed id plus the record fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryFixture {
    /// Category id, numeric or a numeric string
    pub id: Value,
    /// Record fields
    #[serde(flatten)]
    pub record: Map<String, Value>,
}

/// Children registered for one structured query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildrenFixture {
    /// Query options
    pub query: Value,
    /// Children returned for the query
    #[serde(default)]
    pub children: Vec<Value>,
}

/// Store contents to seed before a test
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FixtureSet {
    /// Options by key
    pub options: BTreeMap<String, Value>,
    /// Stored posts
    pub posts: Vec<Post>,
    /// Categories
    pub categories: Vec<CategoryFixture>,
    /// Category terms by post id
    pub post_categories: BTreeMap<u64, Value>,
    /// Tag terms by post id
    pub post_tags: BTreeMap<u64, Value>,
    /// Meta fields by post id
    pub post_meta: BTreeMap<u64, BTreeMap<String, Value>>,
    /// Preset nonce tokens by name
    pub nonces: BTreeMap<String, String>,
    /// Granted capabilities
    pub capabilities: Vec<String>,
    /// Blog info fields
    pub bloginfo: BTreeMap<String, String>,
    /// Posts queued for the loop
    pub theme_posts: Vec<Post>,
    /// Query-children fixtures
    pub children: Vec<ChildrenFixture>,
}

impl FixtureSet {
    /// Parse a fixture set from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::Yaml`] when the document is not a fixture set.
    pub fn from_yaml(yaml: &str) -> MockResult<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| MockError::Yaml(e.to_string()))
    }

    /// Read and parse a fixture file.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::Io`] when the file cannot be read and
    /// [`MockError::Yaml`] when it does not parse.
    pub fn load(path: impl AsRef<Path>) -> MockResult<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "fixture file loaded");
        Self::from_yaml(&yaml)
    }

    /// True when the set seeds nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Seed `store` with this set.
    ///
    /// Every category is validated before anything is written, so a bad
    /// category leaves the store as it was.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::TaxonomyViolation`] for a malformed category.
    pub fn apply(&self, store: &mut ExpectationStore) -> MockResult<()> {
        let categories: Vec<(u64, Category)> = self
            .categories
            .iter()
            .map(|fixture| category_from(fixture.id.clone(), Value::Object(fixture.record.clone())))
            .collect::<MockResult<_>>()?;

        for (key, value) in &self.options {
            store.set_option(key, value.clone());
        }
        for post in &self.posts {
            store.insert_post(post.clone());
        }
        for (id, category) in categories {
            store.insert_category(id, category);
        }
        for (post_id, terms) in &self.post_categories {
            store.set_post_categories(*post_id, terms.clone());
        }
        for (post_id, terms) in &self.post_tags {
            store.set_post_tags(*post_id, terms.clone());
        }
        for (post_id, fields) in &self.post_meta {
            for (field, value) in fields {
                store.set_post_meta(*post_id, field, value.clone());
            }
        }
        for (name, token) in &self.nonces {
            store.preset_nonce(name, token);
        }
        store.grant_capabilities(&self.capabilities);
        for (field, value) in &self.bloginfo {
            store.set_bloginfo(field, value.clone());
        }
        for post in &self.theme_posts {
            store.add_theme_post(post.clone());
        }
        for fixture in &self.children {
            store.register_children(&fixture.query, fixture.children.clone());
        }
        tracing::debug!(
            posts = self.posts.len(),
            categories = self.categories.len(),
            "fixture set applied"
        );
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    const SAMPLE: &str = r#"
options:
  blogname: Comics
  settings: { per_page: 10 }
posts:
  - ID: 1
    post_title: First
    post_date: "2009-01-01 10:00:00"
  - post_title: Second
categories:
  - id: 7
    name: News
    slug: news
  - id: "8"
    name: Art
post_categories:
  1: [7, 8]
post_tags:
  1: { slug: ink, name: Ink }
post_meta:
  1:
    color: red
nonces:
  save: abc123
capabilities: [edit_posts, publish_posts]
bloginfo:
  name: My Comics
theme_posts:
  - ID: 1
    post_title: First
children:
  - query: { type: post, limit: 5 }
    children: [c1, c2]
"#;

    mod parse_tests {
        use super::*;

        #[test]
        fn test_parse_sample() {
            let set = FixtureSet::from_yaml(SAMPLE).unwrap();
            assert_eq!(set.posts.len(), 2);
            assert_eq!(set.categories[1].id, json!("8"));
            assert_eq!(set.categories[0].record["name"], json!("News"));
            assert_eq!(set.options["settings"], json!({"per_page": 10}));
            assert!(!set.is_empty());
        }

        #[test]
        fn test_empty_document_is_empty_set() {
            assert!(FixtureSet::from_yaml("{}").unwrap().is_empty());
        }

        #[test]
        fn test_unknown_section_rejected() {
            let err = FixtureSet::from_yaml("widgets: []").unwrap_err();
            assert!(matches!(err, MockError::Yaml(_)));
        }
    }

    mod apply_tests {
        use super::*;

        #[test]
        fn test_apply_sample() {
            let set = FixtureSet::from_yaml(SAMPLE).unwrap();
            let mut store = ExpectationStore::new();
            set.apply(&mut store).unwrap();

            assert_eq!(store.get_option("blogname"), Some(json!("Comics")));
            assert_eq!(store.get_option("settings"), Some(json!({"per_page": 10})));
            assert_eq!(store.post_count(), 2);
            assert_eq!(store.get_post(2).unwrap().post_title, "Second");
            assert_eq!(store.get_category(8).unwrap().name, "Art");
            assert_eq!(store.post_categories(1), vec![json!(7), json!(8)]);
            assert_eq!(store.post_tags(1).len(), 1);
            assert_eq!(store.post_meta(1, "color", true), json!("red"));
            assert!(store.verify_nonce("save", "abc123"));
            assert!(store.current_user_can(["edit_posts", "publish_posts"]));
            assert_eq!(store.bloginfo("name"), "My Comics");
            assert!(store.has_remaining_posts());
            assert_eq!(
                store.query_children(&json!({"limit": 5, "type": "post"})),
                vec![json!("c1"), json!("c2")]
            );
        }

        #[test]
        fn test_bad_category_writes_nothing() {
            let set = FixtureSet::from_yaml(
                "options: { a: 1 }\n\
                 categories:\n  - id: 1\n    name: Ok\n  - id: x\n    name: Bad\n",
            )
            .unwrap();
            let mut store = ExpectationStore::new();
            let err = set.apply(&mut store).unwrap_err();
            assert!(err.is_violation());
            assert!(store.is_empty());
        }
    }

    mod load_tests {
        use super::*;

        #[test]
        fn test_load_from_file() {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            file.write_all(SAMPLE.as_bytes()).unwrap();
            let set = FixtureSet::load(file.path()).unwrap();
            assert_eq!(set.capabilities, vec!["edit_posts", "publish_posts"]);
        }

        #[test]
        fn test_missing_file_is_io_error() {
            let dir = tempfile::TempDir::new().unwrap();
            let err = FixtureSet::load(dir.path().join("missing.yaml")).unwrap_err();
            assert!(matches!(err, MockError::Io(_)));
        }
    }
}
