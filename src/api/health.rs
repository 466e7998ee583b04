//! Health check and statistics endpoints.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::document::DocumentStoreStats;
use crate::server::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub documents: usize,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub documents: DocumentStoreStats,
    pub max_documents: usize,
    pub idle_timeout_seconds: u64,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        documents: state.documents.count(),
    })
}

pub async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse {
        documents: state.documents.stats(),
        max_documents: state.settings.session.max_documents,
        idle_timeout_seconds: state.settings.session.idle_timeout,
    })
}
