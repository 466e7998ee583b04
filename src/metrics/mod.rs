//! Prometheus metrics for the cover letter service.
//!
//! This module provides metrics for monitoring the service:
//! - Document session metrics (active, created, deleted, evicted)
//! - Editor operation metrics (by operation kind)
//! - Rendering metrics (letters generated, formatter runs, render latency)
//! - HTTP API metrics

mod helpers;

pub use helpers::{encode_metrics, DocumentMetrics, EditorMetrics, RenderMetrics};

use lazy_static::lazy_static;
use prometheus::{
    register_histogram, register_histogram_vec, register_int_counter, register_int_counter_vec,
    register_int_gauge, Histogram, HistogramVec, IntCounter, IntCounterVec, IntGauge,
};

/// Prefix for all metrics
const METRIC_PREFIX: &str = "letter";

lazy_static! {
    // ============================================================================
    // Document Metrics
    // ============================================================================

    /// Number of documents currently held in memory
    pub static ref DOCUMENTS_ACTIVE: IntGauge = register_int_gauge!(
        format!("{}_documents_active", METRIC_PREFIX),
        "Number of document sessions held in memory"
    ).unwrap();

    /// Documents created
    pub static ref DOCUMENTS_CREATED_TOTAL: IntCounter = register_int_counter!(
        format!("{}_documents_created_total", METRIC_PREFIX),
        "Total document sessions created"
    ).unwrap();

    /// Documents deleted by the host
    pub static ref DOCUMENTS_DELETED_TOTAL: IntCounter = register_int_counter!(
        format!("{}_documents_deleted_total", METRIC_PREFIX),
        "Total document sessions deleted by the host"
    ).unwrap();

    /// Documents evicted after being idle
    pub static ref DOCUMENTS_EVICTED_TOTAL: IntCounter = register_int_counter!(
        format!("{}_documents_evicted_total", METRIC_PREFIX),
        "Total document sessions evicted after idling"
    ).unwrap();

    // ============================================================================
    // Editor Metrics
    // ============================================================================

    /// Editor operations by kind
    pub static ref EDITOR_OPERATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_editor_operations_total", METRIC_PREFIX),
        "Total editor operations applied",
        &["op"]
    ).unwrap();

    /// Placeholder names discovered in templates
    pub static ref PLACEHOLDERS_DISCOVERED_TOTAL: IntCounter = register_int_counter!(
        format!("{}_placeholders_discovered_total", METRIC_PREFIX),
        "Total placeholder names discovered in templates"
    ).unwrap();

    // ============================================================================
    // Render Metrics
    // ============================================================================

    /// Letters generated from documents
    pub static ref LETTERS_GENERATED_TOTAL: IntCounter = register_int_counter!(
        format!("{}_letters_generated_total", METRIC_PREFIX),
        "Total customized letters generated"
    ).unwrap();

    /// Render runs by kind
    pub static ref RENDER_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_render_requests_total", METRIC_PREFIX),
        "Total render runs by kind",
        &["kind"]
    ).unwrap();

    /// Time spent substituting and formatting a letter
    pub static ref RENDER_LATENCY: Histogram = register_histogram!(
        format!("{}_render_latency_seconds", METRIC_PREFIX),
        "Letter render latency in seconds",
        vec![0.00001, 0.00005, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05]
    ).unwrap();

    // ============================================================================
    // HTTP API Metrics
    // ============================================================================

    /// HTTP request counter by method and path
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_http_requests_total", METRIC_PREFIX),
        "Total HTTP requests",
        &["method", "path", "status"]
    ).unwrap();

    /// HTTP request latency
    pub static ref HTTP_REQUEST_LATENCY: HistogramVec = register_histogram_vec!(
        format!("{}_http_request_latency_seconds", METRIC_PREFIX),
        "HTTP request latency in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]
    ).unwrap();
}
