//! Formatting rules, one function per rule

use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// Start of a lifted link marker (Unicode private use area)
const LINK_MARK_OPEN: char = '\u{E000}';
/// End of a lifted link marker
const LINK_MARK_CLOSE: char = '\u{E001}';

const BULLET_PREFIX: &str = "• ";

lazy_static! {
    /// A link, or a literal marker delimiter already present in the source
    static ref PROTECTED: Regex =
        Regex::new("\\[([^\\]]+)\\]\\((https?://[^\\s)]+)\\)|[\u{E000}\u{E001}]").unwrap();
    static ref LINK_MARK: Regex = Regex::new("\u{E000}([0-9]+)\u{E001}").unwrap();
    static ref BOLD: Regex = Regex::new(r"\*\*(.*?)\*\*").unwrap();
    static ref ITALIC: Regex = Regex::new(r"\*(.*?)\*").unwrap();
    static ref UNDERLINE: Regex = Regex::new(r"__(.*?)__").unwrap();
    static ref NUMBERED_ITEM: Regex = Regex::new(r"^[0-9]+\. (.*)$").unwrap();
}

/// A line of output, or a run of list items that absorbed their newlines
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Block {
    Line(String),
    List(ListKind, Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    fn tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "ul",
            ListKind::Ordered => "ol",
        }
    }
}

pub(super) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Replace every link with an opaque marker and return the fragments the
/// markers stand for.
///
/// The markers contain none of the characters the later rules look for, so
/// the anchors survive the emphasis and list rules untouched. Marker
/// delimiters that already occur in the source are lifted the same way, so
/// they come back verbatim instead of being read as markers.
pub(super) fn lift_links(text: &str) -> (String, Vec<String>) {
    let mut fragments = Vec::new();
    let lifted = PROTECTED.replace_all(text, |caps: &Captures| {
        let fragment = match (caps.get(1), caps.get(2)) {
            (Some(label), Some(url)) => format!(
                r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
                url.as_str(),
                label.as_str()
            ),
            _ => caps[0].to_string(),
        };
        fragments.push(fragment);
        format!("{}{}{}", LINK_MARK_OPEN, fragments.len() - 1, LINK_MARK_CLOSE)
    });
    (lifted.into_owned(), fragments)
}

pub(super) fn restore_links(html: &str, anchors: &[String]) -> String {
    if anchors.is_empty() {
        return html.to_string();
    }
    LINK_MARK
        .replace_all(html, |caps: &Captures| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|idx| anchors.get(idx))
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

pub(super) fn bold(text: &str) -> String {
    BOLD.replace_all(text, "<strong>$1</strong>").into_owned()
}

pub(super) fn italic(text: &str) -> String {
    ITALIC.replace_all(text, "<em>$1</em>").into_owned()
}

pub(super) fn underline(text: &str) -> String {
    UNDERLINE.replace_all(text, "<u>$1</u>").into_owned()
}

pub(super) fn split_lines(text: &str) -> Vec<Block> {
    text.split('\n').map(|line| Block::Line(line.to_string())).collect()
}

/// Group consecutive `• ` lines into one unordered list
pub(super) fn bullet_lists(blocks: Vec<Block>) -> Vec<Block> {
    group_items(blocks, ListKind::Unordered, |line| {
        line.strip_prefix(BULLET_PREFIX).map(str::to_string)
    })
}

/// Group consecutive `<digits>. ` lines into one ordered list
pub(super) fn numbered_lists(blocks: Vec<Block>) -> Vec<Block> {
    group_items(blocks, ListKind::Ordered, |line| {
        NUMBERED_ITEM
            .captures(line)
            .map(|caps| caps[1].to_string())
    })
}

fn group_items<F>(blocks: Vec<Block>, kind: ListKind, item: F) -> Vec<Block>
where
    F: Fn(&str) -> Option<String>,
{
    let mut grouped: Vec<Block> = Vec::with_capacity(blocks.len());

    for block in blocks {
        let line = match block {
            Block::Line(line) => line,
            list => {
                grouped.push(list);
                continue;
            }
        };

        match item(&line) {
            Some(content) => match grouped.last_mut() {
                Some(Block::List(last_kind, items)) if *last_kind == kind => items.push(content),
                _ => grouped.push(Block::List(kind, vec![content])),
            },
            None => grouped.push(Block::Line(line)),
        }
    }

    grouped
}

/// Render blocks, turning the remaining newlines into `<br>`.
///
/// A list absorbs the newlines between its items and the one that ends it.
pub(super) fn join_blocks(blocks: &[Block]) -> String {
    let mut html = String::new();

    for (idx, block) in blocks.iter().enumerate() {
        let after_list = idx > 0 && matches!(blocks[idx - 1], Block::List(..));
        if idx > 0 && !after_list {
            html.push_str("<br>");
        }

        match block {
            Block::Line(line) => html.push_str(line),
            Block::List(kind, items) => {
                html.push('<');
                html.push_str(kind.tag());
                html.push('>');
                for item in items {
                    html.push_str("<li>");
                    html.push_str(item);
                    html.push_str("</li>");
                }
                html.push_str("</");
                html.push_str(kind.tag());
                html.push('>');
            }
        }
    }

    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lift_and_restore_links() {
        let (lifted, anchors) = lift_links("a [x](https://x.io) b [y](http://y.io)");
        assert_eq!(lifted, "a \u{E000}0\u{E001} b \u{E000}1\u{E001}");
        assert_eq!(anchors.len(), 2);

        let restored = restore_links(&lifted, &anchors);
        assert!(restored.starts_with("a <a href=\"https://x.io\""));
        assert!(restored.ends_with(">y</a>"));
    }

    #[test]
    fn test_literal_marker_delimiters_round_trip() {
        let source = "code \u{E000}0\u{E001} then [x](https://a.io)";
        let (lifted, fragments) = lift_links(source);
        assert_eq!(fragments.len(), 3);
        assert!(!lifted.contains("https"));
        assert_eq!(
            restore_links(&lifted, &fragments),
            "code \u{E000}0\u{E001} then <a href=\"https://a.io\" target=\"_blank\" \
             rel=\"noopener noreferrer\">x</a>"
        );
    }

    #[test]
    fn test_restore_leaves_unknown_markers() {
        let anchors = vec!["<a>".to_string()];
        assert_eq!(restore_links("\u{E000}7\u{E001}", &anchors), "\u{E000}7\u{E001}");
    }

    #[test]
    fn test_bullet_grouping() {
        let blocks = bullet_lists(split_lines("• a\n• b\nc\n• d"));
        assert_eq!(
            blocks,
            vec![
                Block::List(ListKind::Unordered, vec!["a".into(), "b".into()]),
                Block::Line("c".into()),
                Block::List(ListKind::Unordered, vec!["d".into()]),
            ]
        );
    }

    #[test]
    fn test_bullet_requires_space() {
        let blocks = bullet_lists(split_lines("•a\n • b"));
        assert_eq!(
            blocks,
            vec![Block::Line("•a".into()), Block::Line(" • b".into())]
        );
    }

    #[test]
    fn test_numbered_skips_bullet_items() {
        let blocks = numbered_lists(bullet_lists(split_lines("• 1. a\n2. b")));
        assert_eq!(
            blocks,
            vec![
                Block::List(ListKind::Unordered, vec!["1. a".into()]),
                Block::List(ListKind::Ordered, vec!["b".into()]),
            ]
        );
    }

    #[test]
    fn test_numbered_requires_digits_dot_space() {
        let blocks = numbered_lists(split_lines("1.a\nx. b\n12. c\n1) d"));
        assert_eq!(
            blocks,
            vec![
                Block::Line("1.a".into()),
                Block::Line("x. b".into()),
                Block::List(ListKind::Ordered, vec!["c".into()]),
                Block::Line("1) d".into()),
            ]
        );
    }

    #[test]
    fn test_empty_list_item() {
        assert_eq!(join_blocks(&bullet_lists(split_lines("• "))), "<ul><li></li></ul>");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<a href=\"x\">&</a>"), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
    }
}
