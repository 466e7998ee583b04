//! Placeholder engine.
//!
//! This module provides:
//! - Extraction of `{{name}}` placeholder names from a template
//! - An insertion-ordered placeholder map with the template merge policy
//! - Single-pass substitution of placeholder values into a template
//!
//! # Example
//!
//! ```
//! use cover_letter_service::placeholder::{extract_placeholders, substitute, PlaceholderMap};
//!
//! let template = "Dear {{company}}, re {{position}}";
//!
//! let mut values = PlaceholderMap::new();
//! values.merge_extracted(extract_placeholders(template));
//! values.add_or_update("company", "Acme").unwrap();
//!
//! assert_eq!(substitute(template, &values), "Dear Acme, re ");
//! ```

mod extract;
mod map;
mod substitution;

pub use extract::{extract_placeholders, PlaceholderNames};
pub use map::{PlaceholderError, PlaceholderMap, PlaceholderResult, DEFAULT_PLACEHOLDER_NAME};
pub use substitution::substitute;

/// Opening delimiter of a placeholder token
pub const OPEN: &str = "{{";

/// Closing delimiter of a placeholder token
pub const CLOSE: &str = "}}";

/// Render `name` as a placeholder token, e.g. `{{name}}`
pub fn token(name: &str) -> String {
    format!("{OPEN}{name}{CLOSE}")
}
