//! Categories, post categories and tags.

use super::ExpectationStore;
use crate::record::Category;
use crate::result::{MockError, MockResult, WpError};
use serde_json::Value;

/// Interpret a loosely-typed id the way the host does.
///
/// Accepts non-negative integers, non-negative finite floats (truncated) and
/// strings holding either. Anything else is not an id.
///
/// Ids are non-negative: categories and posts are keyed by `u64`, so `-1`
/// and `"-1"` are rejected even though the host's numeric check would
/// accept them.
#[must_use]
pub fn numeric_id(id: &Value) -> Option<u64> {
    match id {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(truncate_id)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(truncate_id))
        }
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn truncate_id(f: f64) -> Option<u64> {
    (f.is_finite() && f >= 0.0 && f < u64::MAX as f64).then(|| f.trunc() as u64)
}

/// Validate a loosely-typed category without storing it.
pub(crate) fn category_from(id: Value, record: Value) -> MockResult<(u64, Category)> {
    let Value::Object(mut fields) = record else {
        tracing::warn!("category provided must be an object");
        return Err(MockError::taxonomy("Category provided must be an object"));
    };
    let Some(canonical) = numeric_id(&id) else {
        tracing::warn!(%id, "category id must be numeric");
        return Err(MockError::taxonomy(format!("ID must be numeric, got {id}")));
    };
    fields.remove("cat_ID");
    fields.remove("term_id");
    let category: Category = serde_json::from_value(Value::Object(fields))
        .map_err(|e| MockError::taxonomy(format!("malformed category record: {e}")))?;
    Ok((canonical, category))
}

fn term_list(terms: Value) -> Vec<Value> {
    match terms {
        Value::Array(items) => items,
        scalar => vec![scalar],
    }
}

impl ExpectationStore {
    /// Add a category from a loosely-typed id and record.
    ///
    /// The record's `cat_ID` and `term_id` are overwritten with the
    /// canonical id. Returns that id.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::TaxonomyViolation`] when `record` is not an
    /// object, when `id` is not numeric, or when the record's fields have
    /// the wrong types. The store is untouched on error.
    pub fn add_category(
        &mut self,
        id: impl Into<Value>,
        record: impl Into<Value>,
    ) -> MockResult<u64> {
        let (id, category) = category_from(id.into(), record.into())?;
        self.insert_category(id, category);
        Ok(id)
    }

    /// Add a typed category under `id`, overwriting its identity fields.
    pub fn insert_category(&mut self, id: u64, mut category: Category) {
        category.assign_id(id);
        tracing::debug!(id, name = %category.name, "category added");
        self.categories.insert(id, category);
    }

    /// Look up a category.
    ///
    /// # Errors
    ///
    /// Returns a [`WpError`] when `id` is not numeric or not stored.
    pub fn get_category(&self, id: impl Into<Value>) -> Result<&Category, WpError> {
        let id = id.into();
        numeric_id(&id)
            .and_then(|key| self.categories.get(&key))
            .ok_or_else(|| WpError::not_found("category", &id))
    }

    /// All stored category ids, ascending
    #[must_use]
    pub fn all_category_ids(&self) -> Vec<u64> {
        self.categories.keys().copied().collect()
    }

    /// A category's name, or `None` if it is not stored
    #[must_use]
    pub fn category_name(&self, id: u64) -> Option<&str> {
        self.categories.get(&id).map(|c| c.name.as_str())
    }

    /// Permalink to a category: `/category/{id}`.
    ///
    /// # Errors
    ///
    /// Returns a [`WpError`] when the category is not stored.
    pub fn category_link(&self, id: u64) -> Result<String, WpError> {
        if self.categories.contains_key(&id) {
            Ok(format!("/category/{id}"))
        } else {
            Err(WpError::not_found("category", id))
        }
    }

    /// Set a post's categories; a scalar becomes a one-element list.
    pub fn set_post_categories(&mut self, post_id: u64, categories: impl Into<Value>) {
        self.post_categories
            .insert(post_id, term_list(categories.into()));
    }

    /// A post's categories, empty when unset
    #[must_use]
    pub fn post_categories(&self, post_id: u64) -> Vec<Value> {
        self.post_categories
            .get(&post_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Set a post's tags; a scalar becomes a one-element list.
    pub fn set_post_tags(&mut self, post_id: u64, tags: impl Into<Value>) {
        self.post_tags.insert(post_id, term_list(tags.into()));
    }

    /// A post's tags, empty when unset
    #[must_use]
    pub fn post_tags(&self, post_id: u64) -> Vec<Value> {
        self.post_tags.get(&post_id).cloned().unwrap_or_default()
    }

    /// Set the site-wide tag list
    pub fn set_all_tags(&mut self, tags: Vec<Value>) {
        self.all_tags = tags;
    }

    /// The site-wide tag list
    #[must_use]
    pub fn all_tags(&self) -> &[Value] {
        &self.all_tags
    }
}
