//! Action and filter slots: hook name to the last registered callback.

use super::ExpectationStore;
use crate::record::Callback;
use serde_json::Value;

impl ExpectationStore {
    /// Register an action; replaces any earlier registration for `name`
    pub fn add_action(&mut self, name: &str, callback: impl Into<Callback>) {
        self.actions.insert(name.to_string(), callback.into());
    }

    /// Register a filter; replaces any earlier registration for `name`
    pub fn add_filter(&mut self, name: &str, callback: impl Into<Callback>) {
        self.filters.insert(name.to_string(), callback.into());
    }

    /// Callback registered for an action
    #[must_use]
    pub fn action(&self, name: &str) -> Option<&Callback> {
        self.actions.get(name)
    }

    /// Callback registered for a filter
    #[must_use]
    pub fn filter(&self, name: &str) -> Option<&Callback> {
        self.filters.get(name)
    }

    /// Whether an action is registered
    #[must_use]
    pub fn has_action(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Whether a filter is registered
    #[must_use]
    pub fn has_filter(&self, name: &str) -> bool {
        self.filters.contains_key(name)
    }

    /// Run a closure action. Returns whether anything ran.
    pub fn do_action(&self, name: &str, args: &[Value]) -> bool {
        self.actions
            .get(name)
            .and_then(|cb| cb.invoke(args))
            .is_some()
    }

    /// Pass `value` through a closure filter; unchanged otherwise
    #[must_use]
    pub fn apply_filters(&self, name: &str, value: Value) -> Value {
        match self.filters.get(name) {
            Some(Callback::Closure(f)) => f(&[value]),
            _ => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_last_registration_wins() {
        let mut store = ExpectationStore::new();
        store.add_action("init", "first");
        store.add_action("init", "second");
        assert_eq!(store.action("init"), Some(&Callback::named("second")));
        assert!(store.has_action("init"));
        assert!(!store.has_action("wp_head"));
    }

    #[test]
    fn test_apply_filters() {
        let mut store = ExpectationStore::new();
        store.add_filter(
            "the_title",
            Callback::closure(|args| json!(format!("[{}]", args[0].as_str().unwrap_or("")))),
        );
        assert_eq!(store.apply_filters("the_title", json!("Hi")), json!("[Hi]"));
        assert_eq!(store.apply_filters("other", json!("Hi")), json!("Hi"));
        store.add_filter("named", "strtoupper");
        assert_eq!(store.apply_filters("named", json!("Hi")), json!("Hi"));
        assert!(store.has_filter("named"));
        assert!(store.filter("named").is_some());
    }

    #[test]
    fn test_do_action() {
        let mut store = ExpectationStore::new();
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        store.add_action(
            "save_post",
            Callback::closure(move |_| {
                seen.set(seen.get() + 1);
                Value::Null
            }),
        );
        assert!(store.do_action("save_post", &[json!(1)]));
        assert!(!store.do_action("missing", &[]));
        assert_eq!(calls.get(), 1);
    }
}
