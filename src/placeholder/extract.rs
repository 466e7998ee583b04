//! Placeholder name extraction

use indexmap::IndexSet;
use lazy_static::lazy_static;
use regex::Regex;

/// Placeholder names in order of first appearance
pub type PlaceholderNames = IndexSet<String>;

lazy_static! {
    /// `{{` + one or more non-`}` characters + `}}`, matched left to right
    static ref PLACEHOLDER_TOKEN: Regex = Regex::new(r"\{\{([^}]+)\}\}").unwrap();
}

/// Extract the placeholder names used in a template.
///
/// Names are returned in order of first appearance with duplicates collapsed.
/// Unterminated `{{` and empty `{{}}` tokens are ignored.
pub fn extract_placeholders(template: &str) -> PlaceholderNames {
    PLACEHOLDER_TOKEN
        .captures_iter(template)
        .filter_map(|caps| caps.get(1))
        .map(|name| name.as_str().to_string())
        .collect()
}
