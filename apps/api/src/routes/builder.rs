//! Builder API handlers: preview, export, and draft load/save.
//!
//! Every request carries the raw form snapshot; the server runs the single
//! collection pass itself so a stale or hand-crafted client can never store
//! a document that collection would not have produced.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::{export_resume, ExportError};
use crate::model::{collect, RawFormSnapshot};
use crate::render::preview::render_preview;
use crate::state::AppState;

fn default_template() -> String {
    "modern".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreviewRequest {
    pub snapshot: RawFormSnapshot,
    pub template: String,
}

impl Default for PreviewRequest {
    fn default() -> Self {
        Self {
            snapshot: RawFormSnapshot::default(),
            template: default_template(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    pub markup: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportRequest {
    pub snapshot: RawFormSnapshot,
    pub template: String,
    pub user_id: Option<Uuid>,
}

impl Default for ExportRequest {
    fn default() -> Self {
        Self {
            snapshot: RawFormSnapshot::default(),
            template: default_template(),
            user_id: None,
        }
    }
}

/// POST /api/v1/preview
/// Collects the snapshot and returns the full preview markup.
pub async fn handle_preview(
    Json(req): Json<PreviewRequest>,
) -> Result<Json<PreviewResponse>, AppError> {
    let doc = collect(&req.snapshot);
    let markup = render_preview(&doc, &req.template);
    Ok(Json(PreviewResponse { markup }))
}

/// POST /api/v1/export
/// Collects the snapshot, renders the PDF, and streams it back as a download.
/// When `userId` is present the document is also saved as that user's draft,
/// without blocking the export.
pub async fn handle_export(
    State(state): State<AppState>,
    Json(req): Json<ExportRequest>,
) -> Result<Response, AppError> {
    let doc = collect(&req.snapshot);
    let save = req.user_id.map(|user_id| (state.store.clone(), user_id));

    let artifact = export_resume(doc, req.template, &state.export_gate, save)
        .await
        .map_err(|e| match e {
            ExportError::Busy => AppError::ExportInProgress,
            other => AppError::Export(other.to_string()),
        })?;

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", artifact.filename),
        ),
    ];
    Ok((headers, Bytes::from(artifact.bytes)).into_response())
}

/// GET /api/v1/drafts/:user_id
/// Returns the user's saved document, or 404 when none exists.
pub async fn handle_get_draft(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Response, AppError> {
    match state.store.get(user_id).await? {
        Some(doc) => Ok(Json(doc).into_response()),
        None => Err(AppError::NotFound(format!("no draft for user {user_id}"))),
    }
}

/// PUT /api/v1/drafts/:user_id
/// Collects the snapshot and stores the result as the user's draft.
pub async fn handle_put_draft(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(snapshot): Json<RawFormSnapshot>,
) -> Result<StatusCode, AppError> {
    let doc = collect(&snapshot);
    state.store.upsert(user_id, &doc).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
