use std::sync::Arc;
use std::time::Instant;

use crate::config::Settings;
use crate::document::{create_document_store, DocumentStore};

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub documents: Arc<DocumentStore>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let documents = create_document_store(settings.session.max_documents);

        Self {
            settings: Arc::new(settings),
            documents,
            start_time: Instant::now(),
        }
    }
}
