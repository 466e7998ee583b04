//! Document session types and error definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::editor::{utf16_len, EditOp, SelectionRange};
use crate::format::{format_with, FormatOptions};
use crate::placeholder::{extract_placeholders, substitute, PlaceholderError, PlaceholderMap};

/// Document-specific error type
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    #[error("Document not found: {0}")]
    NotFound(Uuid),

    #[error("Document limit reached ({0} documents)")]
    CapacityExceeded(usize),

    #[error(transparent)]
    Placeholder(#[from] PlaceholderError),
}

/// Result type for document operations
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Editing state of one user session
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    /// Session identifier
    pub id: Uuid,

    /// Raw template text with {{placeholder}} tokens
    pub template: String,

    /// Placeholder values, in the order the names were discovered
    pub placeholders: PlaceholderMap,

    /// Last selection reported by the host's input control
    pub selection: SelectionRange,

    /// Selection computed by the last edit, waiting for the host to render
    /// the new template
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_selection: Option<SelectionRange>,

    /// Last generated letter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Outcome of an editor operation applied to a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedEdit {
    /// Template after the edit
    pub template: String,

    /// Selection to restore once the template has been rendered
    pub selection: SelectionRange,

    /// Placeholder names discovered by the edit
    pub added_placeholders: Vec<String>,
}

/// A customized letter and its rendered markup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedLetter {
    /// Plain letter text, suitable for the clipboard
    pub letter: String,

    /// HTML fragment for preview and printing
    pub html: String,
}

/// Request to create a new document
#[derive(Debug, Default, Deserialize)]
pub struct CreateDocumentRequest {
    /// Initial template (optional, defaults to empty)
    #[serde(default)]
    pub template: Option<String>,

    /// Initial placeholder values (optional)
    #[serde(default)]
    pub placeholders: Option<PlaceholderMap>,
}

/// Short listing entry for a document
#[derive(Debug, Clone, Serialize)]
pub struct DocumentSummary {
    pub id: Uuid,
    pub placeholder_count: usize,
    /// Template length in UTF-16 code units
    pub template_length: usize,
    pub updated_at: DateTime<Utc>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            template: String::new(),
            placeholders: PlaceholderMap::new(),
            selection: SelectionRange::default(),
            pending_selection: None,
            letter: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn from_request(request: CreateDocumentRequest) -> Self {
        let mut document = Self::new();
        if let Some(placeholders) = request.placeholders {
            document.placeholders = placeholders;
        }
        if let Some(template) = request.template {
            document.set_template(template);
        }
        document
    }

    /// Replace the template after a host edit.
    ///
    /// Newly referenced placeholder names are merged into the map and
    /// returned. Any pending selection is dropped since it refers to the
    /// previous template.
    pub fn set_template(&mut self, template: impl Into<String>) -> Vec<String> {
        self.pending_selection = None;
        self.replace_template(template.into())
    }

    /// Record a selection change reported by the host
    pub fn select(&mut self, selection: SelectionRange) -> SelectionRange {
        self.selection = selection.clamp_to(&self.template);
        self.touch();
        self.selection
    }

    /// Apply an editor operation at the last-known selection.
    ///
    /// The template is updated first; the resulting selection is held as
    /// pending until [`Document::restore_selection`] is called.
    pub fn apply(&mut self, op: &EditOp) -> AppliedEdit {
        let edit = op.apply(&self.template, self.selection);
        let added_placeholders = self.replace_template(edit.text);
        self.pending_selection = Some(edit.selection);

        AppliedEdit {
            template: self.template.clone(),
            selection: edit.selection,
            added_placeholders,
        }
    }

    /// Promote the pending selection, if any, and return the current one
    pub fn restore_selection(&mut self) -> SelectionRange {
        if let Some(pending) = self.pending_selection.take() {
            self.selection = pending.clamp_to(&self.template);
            self.touch();
        }
        self.selection
    }

    /// Add a placeholder or update its value
    pub fn add_or_update(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> DocumentResult<()> {
        self.placeholders.add_or_update(name, value)?;
        self.touch();
        Ok(())
    }

    /// Remove a placeholder, returning its last value
    pub fn remove(&mut self, name: &str) -> DocumentResult<String> {
        let value = self.placeholders.remove(name)?;
        self.touch();
        Ok(value)
    }

    /// Substitute the placeholder values and render the letter
    pub fn generate(&mut self, options: FormatOptions) -> GeneratedLetter {
        let letter = substitute(&self.template, &self.placeholders);
        let html = format_with(&letter, options);
        self.letter = Some(letter.clone());
        self.touch();

        GeneratedLetter { letter, html }
    }

    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary {
            id: self.id,
            placeholder_count: self.placeholders.len(),
            template_length: utf16_len(&self.template),
            updated_at: self.updated_at,
        }
    }

    fn replace_template(&mut self, template: String) -> Vec<String> {
        let added = self
            .placeholders
            .merge_extracted(extract_placeholders(&template));
        self.template = template;
        self.selection = self.selection.clamp_to(&self.template);
        self.touch();
        added
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_template_merges_placeholders() {
        let mut doc = Document::new();
        let added = doc.set_template("Dear {{company}}, re {{position}}");
        assert_eq!(added, vec!["company", "position"]);

        doc.add_or_update("company", "Acme").unwrap();
        let added = doc.set_template("Dear {{company}}, {{name}}");
        assert_eq!(added, vec!["name"]);
        assert_eq!(doc.placeholders.get("company"), Some("Acme"));
        assert!(doc.placeholders.contains("position"));
    }

    #[test]
    fn test_set_template_clamps_selection() {
        let mut doc = Document::new();
        doc.set_template("hello world");
        doc.select(SelectionRange::new(6, 11));

        doc.set_template("hi");
        assert_eq!(doc.selection, SelectionRange::caret(2));
    }

    #[test]
    fn test_apply_defers_selection() {
        let mut doc = Document::new();
        doc.set_template("Dear ,");
        doc.select(SelectionRange::caret(5));

        let edit = doc.apply(&EditOp::InsertPlaceholder);
        assert_eq!(edit.template, "Dear {{placeholder}},");
        assert_eq!(edit.added_placeholders, vec!["placeholder"]);
        assert_eq!(doc.template, edit.template);

        // Buffer is updated, selection not yet restored
        assert_eq!(doc.selection, SelectionRange::caret(5));
        assert_eq!(doc.pending_selection, Some(SelectionRange::caret(20)));

        assert_eq!(doc.restore_selection(), SelectionRange::caret(20));
        assert_eq!(doc.pending_selection, None);
    }

    #[test]
    fn test_host_edit_drops_pending_selection() {
        let mut doc = Document::new();
        doc.set_template("abc");
        doc.select(SelectionRange::new(0, 3));
        doc.apply(&EditOp::Bold);

        doc.set_template("typed over");
        assert_eq!(doc.pending_selection, None);
        assert_eq!(doc.restore_selection(), SelectionRange::new(0, 3));
    }

    #[test]
    fn test_remove_is_explicit() {
        let mut doc = Document::new();
        doc.set_template("{{a}} {{b}}");
        assert_eq!(doc.remove("a"), Ok(String::new()));
        assert!(!doc.placeholders.contains("a"));
        assert!(doc.template.contains("{{a}}"));

        assert_eq!(
            doc.remove("a"),
            Err(DocumentError::Placeholder(PlaceholderError::NotFound(
                "a".to_string()
            )))
        );
    }

    #[test]
    fn test_add_rejects_empty_name() {
        let mut doc = Document::new();
        assert_eq!(
            doc.add_or_update(" ", "x"),
            Err(DocumentError::Placeholder(PlaceholderError::EmptyName))
        );
    }

    #[test]
    fn test_generate() {
        let mut doc = Document::new();
        doc.set_template("Dear **{{company}}**,\n• {{skill}}\n{{missing}}");
        doc.add_or_update("company", "Acme").unwrap();
        doc.add_or_update("skill", "Rust").unwrap();
        doc.remove("missing").unwrap();

        let generated = doc.generate(FormatOptions::default());
        assert_eq!(generated.letter, "Dear **Acme**,\n• Rust\n{{missing}}");
        assert_eq!(
            generated.html,
            "Dear <strong>Acme</strong>,<br><ul><li>Rust</li></ul>{{missing}}"
        );
        assert_eq!(doc.letter.as_deref(), Some(generated.letter.as_str()));
    }

    #[test]
    fn test_from_request() {
        let request = CreateDocumentRequest {
            template: Some("{{a}} {{b}}".to_string()),
            placeholders: Some([("a", "1")].into_iter().collect()),
        };
        let doc = Document::from_request(request);
        assert_eq!(doc.placeholders.get("a"), Some("1"));
        assert_eq!(doc.placeholders.get("b"), Some(""));
    }
}
