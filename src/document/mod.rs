//! Document sessions.
//!
//! A [`Document`] holds everything the host UI edits for one letter: the
//! template, the placeholder values, the last-known selection and the
//! selection waiting to be restored after an edit. The [`DocumentStore`]
//! keeps documents in memory, keyed by session id; nothing is persisted.
//!
//! # Example
//!
//! ```
//! use cover_letter_service::document::{CreateDocumentRequest, DocumentStore};
//! use cover_letter_service::editor::{EditOp, SelectionRange};
//! use cover_letter_service::format::FormatOptions;
//!
//! let store = DocumentStore::new(100);
//! let doc = store.create(CreateDocumentRequest::default()).unwrap();
//!
//! store.update(doc.id, |doc| {
//!     doc.set_template("Dear ,");
//!     doc.select(SelectionRange::caret(5));
//!     doc.apply(&EditOp::InsertPlaceholder);
//!     doc.restore_selection();
//!     doc.add_or_update("placeholder", "Acme")
//! }).unwrap();
//!
//! let letter = store
//!     .update(doc.id, |doc| Ok(doc.generate(FormatOptions::default())))
//!     .unwrap();
//! assert_eq!(letter.letter, "Dear Acme,");
//! ```

mod store;
mod types;

pub use store::{create_document_store, DocumentStore, DocumentStoreStats};
pub use types::{
    AppliedEdit, CreateDocumentRequest, Document, DocumentError, DocumentResult, DocumentSummary,
    GeneratedLetter,
};
