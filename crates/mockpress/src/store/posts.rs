//! Posts, post meta, query responses and child fixtures.

use super::ExpectationStore;
use crate::canonical::content_digest;
use crate::record::Post;
use serde_json::Value;

impl ExpectationStore {
    /// Insert (or overwrite) a post and return its id.
    ///
    /// Posts without an id get `max(existing) + 1`, starting at 1. Explicit
    /// ids are honoured verbatim and replace any post already stored there.
    pub fn insert_post(&mut self, mut post: Post) -> u64 {
        let id = post.id.unwrap_or_else(|| self.next_post_id());
        post.id = Some(id);
        tracing::debug!(id, title = %post.post_title, "post inserted");
        self.posts.insert(id, post);
        id
    }

    fn next_post_id(&self) -> u64 {
        self.posts
            .keys()
            .next_back()
            .map_or(1, |max| max.saturating_add(1))
    }

    /// A stored post, or `None`
    #[must_use]
    pub fn get_post(&self, id: u64) -> Option<&Post> {
        self.posts.get(&id)
    }

    /// Number of stored posts
    #[must_use]
    pub fn post_count(&self) -> usize {
        self.posts.len()
    }

    /// Set a meta field, creating the post's meta namespace on first write.
    pub fn set_post_meta(&mut self, post_id: u64, field: &str, value: impl Into<Value>) {
        self.post_meta
            .entry(post_id)
            .or_default()
            .insert(field.to_string(), value.into());
    }

    /// Read a meta field.
    ///
    /// `single` returns the raw value; otherwise a one-element list. An unset
    /// post or field reads as an empty string.
    #[must_use]
    pub fn post_meta(&self, post_id: u64, field: &str, single: bool) -> Value {
        match self.post_meta.get(&post_id).and_then(|meta| meta.get(field)) {
            Some(value) if single => value.clone(),
            Some(value) => Value::Array(vec![value.clone()]),
            None => Value::String(String::new()),
        }
    }

    /// Id of the first post (ascending id) with exactly this title and date,
    /// or `0`.
    ///
    /// `content` is accepted for signature compatibility and never compared.
    #[must_use]
    pub fn find_post_by_title_and_date(&self, title: &str, _content: &str, date: &str) -> u64 {
        self.posts
            .iter()
            .find(|(_, post)| post.post_title == title && post.post_date == date)
            .map_or(0, |(id, _)| *id)
    }

    /// Register the posts a listing query should return
    pub fn set_get_posts_response(&mut self, query: &str, posts: Vec<Post>) {
        self.get_posts.insert(query.to_string(), posts);
    }

    /// Posts registered for `query`, empty when none
    #[must_use]
    pub fn get_posts(&self, query: &str) -> Vec<Post> {
        self.get_posts.get(query).cloned().unwrap_or_default()
    }

    /// Register children for a structured query.
    ///
    /// The key is a digest of the canonical form of `options`, so a
    /// semantically equal value built in a different key order finds the
    /// same fixtures.
    pub fn register_children(&mut self, options: &Value, children: Vec<Value>) {
        let key = content_digest(options);
        tracing::debug!(%key, count = children.len(), "children registered");
        self.children.insert(key, children);
    }

    /// Children registered for a structured query, empty when none
    #[must_use]
    pub fn query_children(&self, options: &Value) -> Vec<Value> {
        let key = content_digest(options);
        tracing::debug!(%key, "children queried");
        self.children.get(&key).cloned().unwrap_or_default()
    }

    /// `<img />` tag for a stored attachment post
    #[must_use]
    pub fn attachment_image(&self, id: u64) -> Option<String> {
        self.posts
            .get(&id)
            .map(|post| format!("<img src=\"{}\" />", post.guid))
    }
}
