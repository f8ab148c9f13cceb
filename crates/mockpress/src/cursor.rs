//! Loop Cursor
//!
//! An explicit iteration cursor over the store's loop queue. Starting a loop
//! yields a [`LoopCursor`]; [`LoopCursor::the_post`] is the only operation
//! that advances the queue. Every template-tag renderer reads the cursor's
//! current post and never touches the queue.
//!
//! ```
//! use mockpress::{ExpectationStore, LoopCursor, Post};
//!
//! let mut store = ExpectationStore::new();
//! store.add_theme_post(Post::new().with_id(4).with_title("Strip"));
//!
//! let mut cursor = LoopCursor::start();
//! while cursor.the_post(&mut store) {
//!     assert_eq!(cursor.the_title(), "Strip");
//! }
//! ```

use crate::record::Post;
use crate::store::{numeric_id, ExpectationStore};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{Map, Value};
use std::fmt::Write;

/// Date layout of `post_date`
pub const POST_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Link printed by [`LoopCursor::next_posts_link`]
pub const NEXT_POSTS_HREF: &str = "#mockpress:next";

/// Iteration state over the loop queue
#[derive(Debug, Clone, Default)]
pub struct LoopCursor {
    current: Option<Post>,
}

impl LoopCursor {
    /// Start a loop with no current post
    #[must_use]
    pub const fn start() -> Self {
        Self { current: None }
    }

    /// Whether the store's loop queue still holds posts
    #[must_use]
    pub fn have_posts(&self, store: &ExpectationStore) -> bool {
        store.has_remaining_posts()
    }

    /// Advance to the next queued post.
    ///
    /// Returns `false` and keeps the current post when the queue is empty.
    pub fn the_post(&mut self, store: &mut ExpectationStore) -> bool {
        match store.advance_post() {
            Some(post) => {
                self.current = Some(post);
                true
            }
            None => false,
        }
    }

    /// The current post
    #[must_use]
    pub const fn current(&self) -> Option<&Post> {
        self.current.as_ref()
    }

    fn field(&self, read: impl FnOnce(&Post) -> String) -> String {
        self.current.as_ref().map(read).unwrap_or_default()
    }

    /// Current post id, empty when unset
    #[must_use]
    pub fn the_id(&self) -> String {
        self.field(|post| post.id.map(|id| id.to_string()).unwrap_or_default())
    }

    /// Current post permalink
    #[must_use]
    pub fn the_permalink(&self) -> String {
        self.field(|post| post.permalink().to_string())
    }

    /// Current post title
    #[must_use]
    pub fn the_title(&self) -> String {
        self.field(|post| post.post_title.clone())
    }

    /// Current post title, escaped for an attribute value
    #[must_use]
    pub fn the_title_attribute(&self) -> String {
        self.field(|post| escape_html(&post.post_title))
    }

    /// Current post author
    #[must_use]
    pub fn the_author(&self) -> String {
        self.field(|post| post.post_author.clone())
    }

    /// Current post date rendered with a strftime `format`.
    ///
    /// Empty when there is no current post, the date does not parse, or the
    /// format is invalid.
    #[must_use]
    pub fn the_time(&self, format: &str) -> String {
        self.field(|post| {
            let Some(date) = parse_post_date(&post.post_date) else {
                tracing::debug!(date = %post.post_date, "unparseable post date");
                return String::new();
            };
            let mut out = String::new();
            match write!(out, "{}", date.format(format)) {
                Ok(()) => out,
                Err(_) => String::new(),
            }
        })
    }

    /// Current post content, followed by `more_link_text` when the content
    /// holds a `<!--more` marker
    #[must_use]
    pub fn the_content(&self, more_link_text: &str) -> String {
        self.field(|post| {
            let mut out = post.post_content.clone();
            if post.post_content.contains("<!--more") {
                out.push_str(more_link_text);
            }
            out
        })
    }

    /// Links to the current post's tags, wrapped in `start` and `finish`
    #[must_use]
    pub fn the_tags(
        &self,
        store: &ExpectationStore,
        start: &str,
        separator: &str,
        finish: &str,
    ) -> String {
        let Some(id) = self.current.as_ref().and_then(|post| post.id) else {
            return String::new();
        };
        let links = term_links(store, &store.post_tags(id));
        format!("{start}{}{finish}", links.join(separator))
    }

    /// Links to the current post's categories
    #[must_use]
    pub fn the_category(&self, store: &ExpectationStore, separator: &str) -> String {
        let Some(id) = self.current.as_ref().and_then(|post| post.id) else {
            return String::new();
        };
        term_links(store, &store.post_categories(id)).join(separator)
    }

    /// Link to the next page of posts when one exists, else empty
    #[must_use]
    pub fn next_posts_link(&self, store: &ExpectationStore, text: &str) -> String {
        if store.has_next_posts() {
            format!("<a href=\"{NEXT_POSTS_HREF}\">{text}</a>")
        } else {
            String::new()
        }
    }
}

/// Parse a `post_date`: `YYYY-MM-DD HH:MM:SS` or a unix timestamp
#[must_use]
pub fn parse_post_date(date: &str) -> Option<NaiveDateTime> {
    let date = date.trim();
    NaiveDateTime::parse_from_str(date, POST_DATE_FORMAT)
        .ok()
        .or_else(|| {
            date.parse::<i64>()
                .ok()
                .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
                .map(|dt| dt.naive_utc())
        })
}

/// Escape `&`, `<`, `>` and double quotes
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

// Numeric terms resolve through stored categories; objects carry their own
// slug and name. Anything else renders nothing.
fn term_links(store: &ExpectationStore, terms: &[Value]) -> Vec<String> {
    terms
        .iter()
        .filter_map(|term| match term {
            Value::Object(fields) => Some(term_link(
                str_field(fields, "slug"),
                str_field(fields, "name"),
            )),
            other => numeric_id(other)
                .and_then(|id| store.get_category(id).ok())
                .map(|category| term_link(&category.slug, &category.name)),
        })
        .collect()
}

fn str_field<'a>(fields: &'a Map<String, Value>, key: &str) -> &'a str {
    fields.get(key).and_then(Value::as_str).unwrap_or_default()
}

fn term_link(slug: &str, name: &str) -> String {
    format!("<a href=\"{slug}\">{name}</a>")
}
