//! Metrics helper structs for convenient metric recording

use std::time::Duration;

use prometheus::{Encoder, TextEncoder};

use super::{
    DOCUMENTS_ACTIVE, DOCUMENTS_CREATED_TOTAL, DOCUMENTS_DELETED_TOTAL, DOCUMENTS_EVICTED_TOTAL,
    EDITOR_OPERATIONS_TOTAL, HTTP_REQUESTS_TOTAL, HTTP_REQUEST_LATENCY, LETTERS_GENERATED_TOTAL,
    PLACEHOLDERS_DISCOVERED_TOTAL, RENDER_LATENCY, RENDER_REQUESTS_TOTAL,
};

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer).unwrap_or_default())
}

/// Helper struct for recording document session metrics
pub struct DocumentMetrics;

impl DocumentMetrics {
    pub fn record_created() {
        DOCUMENTS_CREATED_TOTAL.inc();
    }

    pub fn record_deleted() {
        DOCUMENTS_DELETED_TOTAL.inc();
    }

    pub fn record_evicted(count: u64) {
        DOCUMENTS_EVICTED_TOTAL.inc_by(count);
    }

    /// Set the number of documents held in memory
    pub fn set_active(count: usize) {
        DOCUMENTS_ACTIVE.set(count as i64);
    }
}

/// Helper struct for recording editor metrics
pub struct EditorMetrics;

impl EditorMetrics {
    /// Record an applied editor operation
    pub fn record_operation(op: &str) {
        EDITOR_OPERATIONS_TOTAL.with_label_values(&[op]).inc();
    }

    /// Record placeholder names discovered by a template change
    pub fn record_discovered(count: usize) {
        if count > 0 {
            PLACEHOLDERS_DISCOVERED_TOTAL.inc_by(count as u64);
        }
    }
}

/// Helper struct for recording render metrics
pub struct RenderMetrics;

impl RenderMetrics {
    /// Record a letter generated from a document
    pub fn record_generated(elapsed: Duration) {
        LETTERS_GENERATED_TOTAL.inc();
        RENDER_LATENCY.observe(elapsed.as_secs_f64());
    }

    /// Record a render run by kind (`extract`, `substitute`, `format`)
    pub fn record_request(kind: &str) {
        RENDER_REQUESTS_TOTAL.with_label_values(&[kind]).inc();
    }

    /// Record a completed HTTP request
    pub fn record_http(method: &str, path: &str, status: u16, elapsed: Duration) {
        HTTP_REQUESTS_TOTAL
            .with_label_values(&[method, path, &status.to_string()])
            .inc();
        HTTP_REQUEST_LATENCY
            .with_label_values(&[method, path])
            .observe(elapsed.as_secs_f64());
    }
}
