use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;

use crate::config::SessionConfig;
use crate::document::DocumentStore;
use crate::metrics::DocumentMetrics;

/// Background task evicting idle document sessions
pub struct SessionCleanupTask {
    config: SessionConfig,
    documents: Arc<DocumentStore>,
    shutdown: broadcast::Receiver<()>,
}

impl SessionCleanupTask {
    pub fn new(
        config: SessionConfig,
        documents: Arc<DocumentStore>,
        shutdown: broadcast::Receiver<()>,
    ) -> Self {
        Self {
            config,
            documents,
            shutdown,
        }
    }

    /// Run until a shutdown signal is received
    pub async fn run(mut self) {
        let cleanup_interval = Duration::from_secs(self.config.cleanup_interval.max(1));
        let mut cleanup_timer = tokio::time::interval(cleanup_interval);

        // Skip immediate first tick
        cleanup_timer.tick().await;

        tracing::info!(
            cleanup_interval_secs = self.config.cleanup_interval,
            idle_timeout_secs = self.config.idle_timeout,
            "Session cleanup task started"
        );

        loop {
            tokio::select! {
                _ = self.shutdown.recv() => {
                    tracing::info!("Session cleanup task received shutdown signal");
                    break;
                }
                _ = cleanup_timer.tick() => {
                    self.cleanup_idle_sessions();
                }
            }
        }

        tracing::info!("Session cleanup task stopped");
    }

    /// Evict sessions idle for longer than the configured timeout
    fn cleanup_idle_sessions(&self) -> usize {
        let Some(max_idle) = idle_limit(self.config.idle_timeout) else {
            tracing::warn!(
                idle_timeout_secs = self.config.idle_timeout,
                "Idle timeout out of range, skipping eviction"
            );
            return 0;
        };
        let evicted = self.documents.evict_idle(max_idle);
        DocumentMetrics::set_active(self.documents.count());

        if evicted > 0 {
            tracing::info!(
                evicted = evicted,
                remaining = self.documents.count(),
                "Evicted idle document sessions"
            );
        }
        evicted
    }
}

/// Idle timeout as a duration, `None` when it cannot be represented
fn idle_limit(idle_timeout_secs: u64) -> Option<chrono::Duration> {
    i64::try_from(idle_timeout_secs)
        .ok()
        .and_then(chrono::Duration::try_seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::CreateDocumentRequest;
    use chrono::Utc;

    fn config(idle_timeout: u64) -> SessionConfig {
        SessionConfig {
            idle_timeout,
            cleanup_interval: 1,
            max_documents: 10,
        }
    }

    #[test]
    fn test_cleanup_evicts_idle_sessions() {
        let documents = Arc::new(DocumentStore::new(10));
        let stale = documents.create(CreateDocumentRequest::default()).unwrap();
        documents.create(CreateDocumentRequest::default()).unwrap();
        documents
            .update(stale.id, |doc| {
                doc.updated_at = Utc::now() - chrono::Duration::seconds(120);
                Ok(())
            })
            .unwrap();

        let (_tx, rx) = broadcast::channel(1);
        let task = SessionCleanupTask::new(config(60), documents.clone(), rx);

        assert_eq!(task.cleanup_idle_sessions(), 1);
        assert_eq!(documents.count(), 1);
    }

    #[test]
    fn test_huge_idle_timeout_evicts_nothing() {
        let documents = Arc::new(DocumentStore::new(10));
        documents.create(CreateDocumentRequest::default()).unwrap();

        let (_tx, rx) = broadcast::channel(1);
        let task = SessionCleanupTask::new(config(u64::MAX), documents.clone(), rx);
        assert_eq!(task.cleanup_idle_sessions(), 0);

        let (_tx, rx) = broadcast::channel(1);
        let task = SessionCleanupTask::new(config(i64::MAX as u64), documents.clone(), rx);
        assert_eq!(task.cleanup_idle_sessions(), 0);
        assert_eq!(documents.count(), 1);
    }

    #[test]
    fn test_idle_limit_range() {
        assert_eq!(idle_limit(60), Some(chrono::Duration::seconds(60)));
        assert_eq!(idle_limit(u64::MAX), None);
        assert_eq!(idle_limit(i64::MAX as u64), None);
    }

    #[tokio::test]
    async fn test_task_stops_on_shutdown() {
        let documents = Arc::new(DocumentStore::new(10));
        let (tx, rx) = broadcast::channel(1);
        let task = SessionCleanupTask::new(config(60), documents, rx);

        let handle = tokio::spawn(task.run());
        tx.send(()).unwrap();

        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("task did not stop")
            .unwrap();
    }
}
