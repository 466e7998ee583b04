//! Prometheus metrics endpoint.

use axum::{extract::State, http::header, response::IntoResponse};

use crate::error::AppError;
use crate::metrics::{self, DocumentMetrics};
use crate::server::AppState;

/// GET /metrics - Prometheus metrics endpoint
pub async fn prometheus_metrics(State(state): State<AppState>) -> impl IntoResponse {
    DocumentMetrics::set_active(state.documents.count());

    match metrics::encode_metrics() {
        Ok(output) => Ok((
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
            output,
        )),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode Prometheus metrics");
            Err(AppError::Internal(format!("Failed to encode metrics: {}", e)))
        }
    }
}
