//! Stateless placeholder and formatting endpoints.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::format::{format_with, FormatOptions};
use crate::metrics::RenderMetrics;
use crate::placeholder::{extract_placeholders, substitute, PlaceholderMap};
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub template: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub placeholders: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SubstituteRequest {
    pub template: String,
    #[serde(default)]
    pub values: PlaceholderMap,
}

#[derive(Debug, Serialize)]
pub struct SubstituteResponse {
    pub letter: String,
}

#[derive(Debug, Deserialize)]
pub struct FormatRequest {
    pub text: String,
    /// Overrides the configured `formatter.escape_html`
    #[serde(default)]
    pub escape_html: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct FormatResponse {
    pub html: String,
}

/// POST /api/v1/placeholders/extract
#[tracing::instrument(name = "http.extract", skip_all)]
pub async fn extract(Json(request): Json<ExtractRequest>) -> Json<ExtractResponse> {
    RenderMetrics::record_request("extract");
    let placeholders = extract_placeholders(&request.template).into_iter().collect();

    Json(ExtractResponse { placeholders })
}

/// POST /api/v1/substitute
#[tracing::instrument(name = "http.substitute", skip_all)]
pub async fn render_substitute(Json(request): Json<SubstituteRequest>) -> Json<SubstituteResponse> {
    RenderMetrics::record_request("substitute");
    let letter = substitute(&request.template, &request.values);

    Json(SubstituteResponse { letter })
}

/// POST /api/v1/format
#[tracing::instrument(name = "http.format", skip_all)]
pub async fn render_format(
    State(state): State<AppState>,
    Json(request): Json<FormatRequest>,
) -> Json<FormatResponse> {
    RenderMetrics::record_request("format");
    let options = FormatOptions {
        escape_html: request
            .escape_html
            .unwrap_or(state.settings.formatter.escape_html),
    };

    Json(FormatResponse {
        html: format_with(&request.text, options),
    })
}
