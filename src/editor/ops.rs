//! Selection-aware text transforms

use serde::{Deserialize, Serialize};

use super::selection::{utf16_len, SelectionRange};
use crate::placeholder::{token, DEFAULT_PLACEHOLDER_NAME};

/// Code units added around a placeholder name: `{{` and `}}`
const PLACEHOLDER_DELIMITER_UNITS: usize = 4;

const BULLET_PREFIX: &str = "• ";

/// Result of an edit: the new buffer and the selection to restore in it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edit {
    pub text: String,
    pub selection: SelectionRange,
}

/// Editing operation requested by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditOp {
    Bold,
    Italic,
    Underline,
    /// Wrap the selection in arbitrary delimiters
    Wrap { prefix: String, suffix: String },
    InsertPlaceholder,
    BulletList,
    NumberedList,
}

impl EditOp {
    /// Apply the operation to `text` at `selection`
    pub fn apply(&self, text: &str, selection: SelectionRange) -> Edit {
        match self {
            EditOp::Bold => wrap_selection(text, selection, "**", "**"),
            EditOp::Italic => wrap_selection(text, selection, "*", "*"),
            EditOp::Underline => wrap_selection(text, selection, "__", "__"),
            EditOp::Wrap { prefix, suffix } => wrap_selection(text, selection, prefix, suffix),
            EditOp::InsertPlaceholder => insert_placeholder(text, selection),
            EditOp::BulletList => bullet_prefix(text, selection),
            EditOp::NumberedList => number_prefix(text, selection),
        }
    }

    /// Stable name for logs and metric labels
    pub fn as_str(&self) -> &'static str {
        match self {
            EditOp::Bold => "bold",
            EditOp::Italic => "italic",
            EditOp::Underline => "underline",
            EditOp::Wrap { .. } => "wrap",
            EditOp::InsertPlaceholder => "insert_placeholder",
            EditOp::BulletList => "bullet_list",
            EditOp::NumberedList => "numbered_list",
        }
    }
}

/// Insert `prefix` before and `suffix` after the selection.
///
/// The original text stays selected inside its new delimiters.
pub fn wrap_selection(text: &str, selection: SelectionRange, prefix: &str, suffix: &str) -> Edit {
    let selection = selection.clamp_to(text);
    let bytes = selection.byte_range(text);

    let mut result = String::with_capacity(text.len() + prefix.len() + suffix.len());
    result.push_str(&text[..bytes.start]);
    result.push_str(prefix);
    result.push_str(&text[bytes.clone()]);
    result.push_str(suffix);
    result.push_str(&text[bytes.end..]);

    let shift = utf16_len(prefix);
    Edit {
        text: result,
        selection: SelectionRange::new(selection.start + shift, selection.end + shift),
    }
}

/// Replace the selection with a `{{name}}` token.
///
/// The trimmed selection becomes the name; a blank selection falls back to
/// [`DEFAULT_PLACEHOLDER_NAME`]. The caret lands right after the token.
pub fn insert_placeholder(text: &str, selection: SelectionRange) -> Edit {
    let selection = selection.clamp_to(text);
    let bytes = selection.byte_range(text);

    let name = match text[bytes.clone()].trim() {
        "" => DEFAULT_PLACEHOLDER_NAME,
        trimmed => trimmed,
    };
    let caret = selection.start + utf16_len(name) + PLACEHOLDER_DELIMITER_UNITS;

    Edit {
        text: replace_range(text, bytes, &token(name)),
        selection: SelectionRange::caret(caret),
    }
}

/// Prefix every non-blank selected line with `• `
pub fn bullet_prefix(text: &str, selection: SelectionRange) -> Edit {
    prefix_lines(text, selection, |_| BULLET_PREFIX.to_string())
}

/// Prefix every non-blank selected line with its 1-based line number.
///
/// The number is the line's position within the selection, blank lines
/// included, and always starts at 1.
pub fn number_prefix(text: &str, selection: SelectionRange) -> Edit {
    prefix_lines(text, selection, |idx| format!("{}. ", idx + 1))
}

fn prefix_lines<F>(text: &str, selection: SelectionRange, prefix: F) -> Edit
where
    F: Fn(usize) -> String,
{
    let selection = selection.clamp_to(text);
    let bytes = selection.byte_range(text);

    let formatted = text[bytes.clone()]
        .split('\n')
        .enumerate()
        .map(|(idx, line)| {
            if line.trim().is_empty() {
                line.to_string()
            } else {
                format!("{}{}", prefix(idx), line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    let end = selection.start + utf16_len(&formatted);
    Edit {
        text: replace_range(text, bytes, &formatted),
        selection: SelectionRange::new(selection.start, end),
    }
}

fn replace_range(text: &str, bytes: std::ops::Range<usize>, replacement: &str) -> String {
    let mut result = String::with_capacity(text.len() + replacement.len());
    result.push_str(&text[..bytes.start]);
    result.push_str(replacement);
    result.push_str(&text[bytes.end..]);
    result
}
