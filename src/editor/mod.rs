//! Selection-aware text editor.
//!
//! Each transform takes the current buffer and the last-known selection and
//! returns the new buffer together with the selection to restore. Transforms
//! are pure; the caller applies the new buffer first and only then restores
//! the selection, since the returned offsets refer to the new buffer.
//!
//! Offsets count UTF-16 code units, matching browser text controls.
//! Out-of-range or reversed selections are clamped, never rejected.

mod ops;
mod selection;

pub use ops::{bullet_prefix, insert_placeholder, number_prefix, wrap_selection, Edit, EditOp};
pub use selection::SelectionRange;

pub(crate) use selection::utf16_len;
