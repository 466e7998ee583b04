//! Selection ranges over a text buffer

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// A selection or caret position in a text buffer.
///
/// Offsets count UTF-16 code units, the unit a browser text control reports
/// for `selectionStart`/`selectionEnd`. A range is only meaningful for the
/// buffer it was captured against; use [`SelectionRange::clamp_to`] before
/// applying it to any other buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectionRange {
    pub start: usize,
    pub end: usize,
}

impl SelectionRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// A collapsed selection at `offset`
    pub fn caret(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Order the endpoints, clamp both into `[0, utf16_len(text)]` and move
    /// them onto character boundaries.
    ///
    /// An offset that splits a surrogate pair moves to the start of that
    /// character, except the end of a non-empty range, which moves past it.
    pub fn clamp_to(self, text: &str) -> Self {
        let (start, end) = if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        };
        let (_, start_units) = boundary(text, start, false);
        let (_, end_units) = boundary(text, end, start != end);
        Self::new(start_units, end_units)
    }

    /// Byte range of the selection in `text`. The selection must already be
    /// clamped to `text`.
    pub(crate) fn byte_range(&self, text: &str) -> Range<usize> {
        boundary(text, self.start, false).0..boundary(text, self.end, false).0
    }
}

/// Length of `text` in UTF-16 code units
pub(crate) fn utf16_len(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}

/// Character boundary at or around a UTF-16 `offset`, as (byte offset, UTF-16
/// offset). Offsets past the end map to the end of `text`.
fn boundary(text: &str, offset: usize, round_up: bool) -> (usize, usize) {
    let mut units = 0;
    for (idx, c) in text.char_indices() {
        if offset <= units {
            return (idx, units);
        }
        let next = units + c.len_utf16();
        if offset < next {
            return if round_up {
                (idx + c.len_utf8(), next)
            } else {
                (idx, units)
            };
        }
        units = next;
    }
    (text.len(), units)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_out_of_range() {
        assert_eq!(
            SelectionRange::new(3, 99).clamp_to("hello"),
            SelectionRange::new(3, 5)
        );
        assert_eq!(
            SelectionRange::new(42, 99).clamp_to("hi"),
            SelectionRange::caret(2)
        );
        assert_eq!(SelectionRange::new(1, 4).clamp_to(""), SelectionRange::caret(0));
    }

    #[test]
    fn test_clamp_reorders_reversed_range() {
        assert_eq!(
            SelectionRange::new(4, 1).clamp_to("hello"),
            SelectionRange::new(1, 4)
        );
    }

    #[test]
    fn test_byte_range_counts_utf16_units() {
        let text = "é•ab";
        let range = SelectionRange::new(1, 3).byte_range(text);
        assert_eq!(&text[range], "•a");
        assert_eq!(SelectionRange::caret(4).byte_range(text), text.len()..text.len());
    }

    #[test]
    fn test_astral_char_takes_two_units() {
        let text = "😀 hi";
        assert_eq!(utf16_len(text), 5);

        let range = SelectionRange::new(3, 5).clamp_to(text);
        assert_eq!(range, SelectionRange::new(3, 5));
        assert_eq!(&text[range.byte_range(text)], "hi");
    }

    #[test]
    fn test_clamp_snaps_inside_surrogate_pair() {
        let text = "a😀b";
        assert_eq!(SelectionRange::new(2, 2).clamp_to(text), SelectionRange::caret(1));
        assert_eq!(SelectionRange::new(0, 2).clamp_to(text), SelectionRange::new(0, 3));
        assert_eq!(SelectionRange::new(2, 4).clamp_to(text), SelectionRange::new(1, 4));
        assert_eq!(SelectionRange::new(0, 99).clamp_to(text), SelectionRange::new(0, 4));
    }

    #[test]
    fn test_collapsed() {
        assert!(SelectionRange::caret(3).is_collapsed());
        assert!(!SelectionRange::new(1, 2).is_collapsed());
        assert_eq!(SelectionRange::new(1, 4).len(), 3);
    }
}
