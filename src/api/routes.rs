use axum::{
    routing::{get, post, put},
    Router,
};

use crate::server::AppState;

use super::document::{
    apply_edit, create_document, delete_document, generate_letter, get_document, list_documents,
    remove_placeholder, restore_selection, set_placeholder, update_selection, update_template,
};
use super::health::{health, stats};
use super::metrics::prometheus_metrics;
use super::render::{extract, render_format, render_substitute};

/// Routes served without authentication
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/stats", get(stats))
        .route("/metrics", get(prometheus_metrics))
}

/// Editing API, nested under `/api/v1`
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Stateless rendering
        .route("/placeholders/extract", post(extract))
        .route("/substitute", post(render_substitute))
        .route("/format", post(render_format))
        // Document sessions
        .route("/documents", post(create_document).get(list_documents))
        .route("/documents/{id}", get(get_document).delete(delete_document))
        .route("/documents/{id}/template", put(update_template))
        .route("/documents/{id}/selection", put(update_selection))
        .route("/documents/{id}/selection/restore", post(restore_selection))
        .route("/documents/{id}/edits", post(apply_edit))
        .route(
            "/documents/{id}/placeholders/{name}",
            put(set_placeholder).delete(remove_placeholder),
        )
        .route("/documents/{id}/generate", post(generate_letter))
}
