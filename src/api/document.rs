//! Document session endpoints.

use std::time::Instant;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::document::{AppliedEdit, CreateDocumentRequest, Document, DocumentSummary, GeneratedLetter};
use crate::editor::{EditOp, SelectionRange};
use crate::error::Result;
use crate::metrics::{DocumentMetrics, EditorMetrics, RenderMetrics};
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateTemplateRequest {
    pub template: String,
}

#[derive(Debug, Serialize)]
pub struct UpdateTemplateResponse {
    /// Placeholder names first seen in this template
    pub added_placeholders: Vec<String>,
    pub document: Document,
}

#[derive(Debug, Deserialize)]
pub struct PlaceholderValueRequest {
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct SelectionResponse {
    pub selection: SelectionRange,
}

#[derive(Debug, Serialize)]
pub struct DocumentListResponse {
    pub documents: Vec<DocumentSummary>,
    pub total: usize,
}

/// POST /api/v1/documents - Create a document session
#[tracing::instrument(name = "http.create_document", skip(state, request))]
pub async fn create_document(
    State(state): State<AppState>,
    request: Option<Json<CreateDocumentRequest>>,
) -> Result<(StatusCode, Json<Document>)> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let document = state.documents.create(request)?;
    DocumentMetrics::set_active(state.documents.count());
    EditorMetrics::record_discovered(document.placeholders.len());

    tracing::info!(document_id = %document.id, "Document session created");
    Ok((StatusCode::CREATED, Json(document)))
}

/// GET /api/v1/documents - List document sessions
#[tracing::instrument(name = "http.list_documents", skip(state))]
pub async fn list_documents(State(state): State<AppState>) -> Json<DocumentListResponse> {
    let documents = state.documents.list();
    let total = documents.len();

    Json(DocumentListResponse { documents, total })
}

/// GET /api/v1/documents/{id} - Get a document snapshot
#[tracing::instrument(name = "http.get_document", skip(state))]
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Document>> {
    Ok(Json(state.documents.get(id)?))
}

/// DELETE /api/v1/documents/{id} - Discard a document session
#[tracing::instrument(name = "http.delete_document", skip(state))]
pub async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    state.documents.delete(id)?;
    DocumentMetrics::set_active(state.documents.count());
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/documents/{id}/template - Replace the template
#[tracing::instrument(
    name = "http.update_template",
    skip(state, request),
    fields(template_len = request.template.len())
)]
pub async fn update_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateTemplateRequest>,
) -> Result<Json<UpdateTemplateResponse>> {
    let (added_placeholders, document) = state.documents.update(id, |doc| {
        let added = doc.set_template(request.template);
        Ok((added, doc.clone()))
    })?;
    EditorMetrics::record_discovered(added_placeholders.len());

    Ok(Json(UpdateTemplateResponse {
        added_placeholders,
        document,
    }))
}

/// PUT /api/v1/documents/{id}/selection - Record a selection change
#[tracing::instrument(name = "http.select", skip(state))]
pub async fn update_selection(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(selection): Json<SelectionRange>,
) -> Result<Json<SelectionResponse>> {
    let selection = state
        .documents
        .update(id, |doc| Ok(doc.select(selection)))?;

    Ok(Json(SelectionResponse { selection }))
}

/// POST /api/v1/documents/{id}/selection/restore - Promote the pending selection
#[tracing::instrument(name = "http.restore_selection", skip(state))]
pub async fn restore_selection(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SelectionResponse>> {
    let selection = state
        .documents
        .update(id, |doc| Ok(doc.restore_selection()))?;

    Ok(Json(SelectionResponse { selection }))
}

/// POST /api/v1/documents/{id}/edits - Apply an editor operation
#[tracing::instrument(name = "http.apply_edit", skip(state, op), fields(op = op.as_str()))]
pub async fn apply_edit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(op): Json<EditOp>,
) -> Result<Json<AppliedEdit>> {
    let applied = state.documents.update(id, |doc| Ok(doc.apply(&op)))?;
    EditorMetrics::record_operation(op.as_str());
    EditorMetrics::record_discovered(applied.added_placeholders.len());

    tracing::debug!(
        document_id = %id,
        start = applied.selection.start,
        end = applied.selection.end,
        "Edit applied"
    );
    Ok(Json(applied))
}

/// PUT /api/v1/documents/{id}/placeholders/{name} - Add or update a value
#[tracing::instrument(name = "http.set_placeholder", skip(state, request))]
pub async fn set_placeholder(
    State(state): State<AppState>,
    Path((id, name)): Path<(Uuid, String)>,
    Json(request): Json<PlaceholderValueRequest>,
) -> Result<Json<Document>> {
    let document = state.documents.update(id, |doc| {
        doc.add_or_update(name, request.value)?;
        Ok(doc.clone())
    })?;

    Ok(Json(document))
}

/// DELETE /api/v1/documents/{id}/placeholders/{name} - Remove a placeholder
#[tracing::instrument(name = "http.remove_placeholder", skip(state))]
pub async fn remove_placeholder(
    State(state): State<AppState>,
    Path((id, name)): Path<(Uuid, String)>,
) -> Result<StatusCode> {
    state.documents.update(id, |doc| doc.remove(&name))?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/documents/{id}/generate - Produce the customized letter
#[tracing::instrument(name = "http.generate_letter", skip(state))]
pub async fn generate_letter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GeneratedLetter>> {
    let options = state.settings.formatter;
    let start = Instant::now();

    let generated = state.documents.update(id, |doc| Ok(doc.generate(options)))?;
    RenderMetrics::record_generated(start.elapsed());
    RenderMetrics::record_request("format");

    tracing::info!(
        document_id = %id,
        letter_len = generated.letter.len(),
        "Letter generated"
    );
    Ok(Json(generated))
}
