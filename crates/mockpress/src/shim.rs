//! Passthrough helpers for i18n and string plumbing.
//!
//! These mirror host functions that do no work worth mocking: translations
//! return their input and date conversion is the identity.

/// Translation: returns `text` unchanged
#[must_use]
pub fn translate<'a>(text: &'a str, _domain: &str) -> &'a str {
    text
}

/// Plural form: `single` when `n == 1`, otherwise `plural`
#[must_use]
pub fn plural<'a>(single: &'a str, plural: &'a str, n: i64, _domain: &str) -> &'a str {
    if n == 1 {
        single
    } else {
        plural
    }
}

/// Drop one trailing slash
#[must_use]
pub fn untrailingslashit(text: &str) -> &str {
    text.strip_suffix('/').unwrap_or(text)
}

/// GMT form of a local date string (identity)
#[must_use]
pub fn gmt_from_date(date: &str) -> &str {
    date
}

/// Plugin basename of a plugin file (identity)
#[must_use]
pub fn plugin_basename(file: &str) -> &str {
    file
}
