//! Inline formatter.
//!
//! Converts the restricted markdown-like letter syntax to HTML:
//!
//! | Source | Markup |
//! |--------|--------|
//! | `[label](https://url)` | `<a href="https://url" target="_blank" rel="noopener noreferrer">label</a>` |
//! | `**text**` | `<strong>text</strong>` |
//! | `*text*` | `<em>text</em>` |
//! | `__text__` | `<u>text</u>` |
//! | `• item` lines | `<ul><li>item</li></ul>` |
//! | `1. item` lines | `<ol><li>item</li></ol>` |
//! | newline | `<br>` |
//!
//! Rules run in the order of the table. Each rule is a plain substitution with
//! no backtracking across rules, so malformed input renders literally or
//! partially formatted. The output is not meant to be fed back in.

mod rules;

use serde::Deserialize;

use rules::{
    bold, bullet_lists, escape_html, italic, join_blocks, lift_links, numbered_lists,
    restore_links, split_lines, underline,
};

/// Formatter options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct FormatOptions {
    /// Escape `&`, `<`, `>` and `"` in the source before generating markup.
    /// Off by default: source markup passes through verbatim.
    #[serde(default)]
    pub escape_html: bool,
}

/// Format text with the default options
pub fn format(text: &str) -> String {
    format_with(text, FormatOptions::default())
}

/// Format text into an HTML fragment
pub fn format_with(text: &str, options: FormatOptions) -> String {
    if text.is_empty() {
        return String::new();
    }

    let source = if options.escape_html {
        escape_html(text)
    } else {
        text.to_string()
    };

    let (text, links) = lift_links(&source);
    let text = bold(&text);
    let text = italic(&text);
    let text = underline(&text);

    let blocks = split_lines(&text);
    let blocks = bullet_lists(blocks);
    let blocks = numbered_lists(blocks);
    let html = join_blocks(&blocks);

    restore_links(&html, &links)
}
