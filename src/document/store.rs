//! In-memory document session storage

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{Duration, Utc};
use dashmap::DashMap;
use serde::Serialize;
use uuid::Uuid;

use super::types::{CreateDocumentRequest, Document, DocumentError, DocumentResult, DocumentSummary};
use crate::metrics::DocumentMetrics;

/// Document store statistics
#[derive(Debug, Clone, Serialize)]
pub struct DocumentStoreStats {
    pub active_documents: usize,
    pub total_created: u64,
    pub total_deleted: u64,
    pub total_evicted: u64,
}

/// In-memory document storage. Documents live only as long as the process.
pub struct DocumentStore {
    documents: DashMap<Uuid, Document>,
    max_documents: usize,
    /// Slots taken, reserved before insertion so concurrent creates respect
    /// `max_documents`
    reserved: AtomicUsize,
    total_created: AtomicU64,
    total_deleted: AtomicU64,
    total_evicted: AtomicU64,
}

impl DocumentStore {
    /// Create a store holding at most `max_documents` sessions
    pub fn new(max_documents: usize) -> Self {
        Self {
            documents: DashMap::new(),
            max_documents,
            reserved: AtomicUsize::new(0),
            total_created: AtomicU64::new(0),
            total_deleted: AtomicU64::new(0),
            total_evicted: AtomicU64::new(0),
        }
    }

    /// Create a new document
    pub fn create(&self, request: CreateDocumentRequest) -> DocumentResult<Document> {
        let reserved = self
            .reserved
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |taken| {
                (taken < self.max_documents).then_some(taken + 1)
            });
        if reserved.is_err() {
            tracing::warn!(
                max_documents = self.max_documents,
                "Document limit reached, rejecting new session"
            );
            return Err(DocumentError::CapacityExceeded(self.max_documents));
        }

        let document = Document::from_request(request);
        self.documents.insert(document.id, document.clone());
        self.total_created.fetch_add(1, Ordering::Relaxed);
        DocumentMetrics::record_created();

        tracing::debug!(document_id = %document.id, "Document created");

        Ok(document)
    }

    /// Get a snapshot of a document
    pub fn get(&self, id: Uuid) -> DocumentResult<Document> {
        self.documents
            .get(&id)
            .map(|doc| doc.clone())
            .ok_or(DocumentError::NotFound(id))
    }

    /// Run `f` against a document while holding its entry.
    ///
    /// `f` must not touch the store itself.
    pub fn update<F, T>(&self, id: Uuid, f: F) -> DocumentResult<T>
    where
        F: FnOnce(&mut Document) -> DocumentResult<T>,
    {
        let mut entry = self
            .documents
            .get_mut(&id)
            .ok_or(DocumentError::NotFound(id))?;
        f(entry.value_mut())
    }

    /// Delete a document
    pub fn delete(&self, id: Uuid) -> DocumentResult<()> {
        self.documents
            .remove(&id)
            .map(|_| {
                self.reserved.fetch_sub(1, Ordering::AcqRel);
                self.total_deleted.fetch_add(1, Ordering::Relaxed);
                DocumentMetrics::record_deleted();
                tracing::debug!(document_id = %id, "Document deleted");
            })
            .ok_or(DocumentError::NotFound(id))
    }

    /// List all documents
    pub fn list(&self) -> Vec<DocumentSummary> {
        self.documents
            .iter()
            .map(|entry| entry.value().summary())
            .collect()
    }

    /// Check if a document exists
    pub fn exists(&self, id: Uuid) -> bool {
        self.documents.contains_key(&id)
    }

    /// Get the number of documents
    pub fn count(&self) -> usize {
        self.documents.len()
    }

    /// Remove documents not updated within `max_idle`. Returns the number
    /// removed.
    pub fn evict_idle(&self, max_idle: Duration) -> usize {
        // A limit reaching before the earliest representable time keeps everything
        let Some(cutoff) = Utc::now().checked_sub_signed(max_idle) else {
            return 0;
        };
        let mut evicted = 0;
        self.documents.retain(|_, doc| {
            let keep = doc.updated_at >= cutoff;
            if !keep {
                evicted += 1;
            }
            keep
        });

        if evicted > 0 {
            self.reserved.fetch_sub(evicted, Ordering::AcqRel);
            self.total_evicted
                .fetch_add(evicted as u64, Ordering::Relaxed);
            DocumentMetrics::record_evicted(evicted as u64);
        }
        evicted
    }

    pub fn stats(&self) -> DocumentStoreStats {
        DocumentStoreStats {
            active_documents: self.documents.len(),
            total_created: self.total_created.load(Ordering::Relaxed),
            total_deleted: self.total_deleted.load(Ordering::Relaxed),
            total_evicted: self.total_evicted.load(Ordering::Relaxed),
        }
    }
}

/// Create an Arc-wrapped document store
pub fn create_document_store(max_documents: usize) -> Arc<DocumentStore> {
    Arc::new(DocumentStore::new(max_documents))
}
