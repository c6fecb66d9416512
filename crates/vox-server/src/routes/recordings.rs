//! Recordings CRUD over the injectable store.

use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use base64::Engine;
use metrics::counter;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::instrument;

use vox_storage::{StoredRecording, unique_pathname};

use crate::errors::ApiError;
use crate::metrics::{RECORDINGS_DELETED_TOTAL, RECORDINGS_SAVED_TOTAL};
use crate::state::AppState;

/// Request body for `POST /api/recordings`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    /// Base64 audio payload; a `data:` URI prefix is tolerated.
    pub audio_base64: String,
    /// MIME type of the decoded audio; defaults to `audio/webm`.
    #[serde(default)]
    pub content_type: Option<String>,
}

/// Response body for `GET /api/recordings`.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    /// Newest first.
    pub recordings: Vec<StoredRecording>,
}

/// POST /api/recordings
#[instrument(skip_all)]
pub async fn upload_handler(
    State(state): State<AppState>,
    Json(request): Json<UploadRequest>,
) -> Result<(StatusCode, Json<StoredRecording>), ApiError> {
    let encoded = request.audio_base64.trim();
    let encoded = encoded
        .split_once(',')
        .filter(|_| encoded.starts_with("data:"))
        .map_or(encoded, |(_, rest)| rest);
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| ApiError::BadRequest(format!("invalid base64 audio: {e}")))?;

    if bytes.is_empty() {
        return Err(ApiError::BadRequest("no audio data".into()));
    }
    if bytes.len() as u64 > state.max_upload_bytes {
        return Err(ApiError::PayloadTooLarge(state.max_upload_bytes));
    }

    let content_type = request.content_type.as_deref().unwrap_or("audio/webm");
    let pathname = unique_pathname(content_type);
    let record = state.store.save(&pathname, content_type, &bytes).await?;
    counter!(RECORDINGS_SAVED_TOTAL).increment(1);
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/recordings
pub async fn list_handler(
    State(state): State<AppState>,
) -> Result<Json<ListResponse>, ApiError> {
    let recordings = state.store.list().await?;
    Ok(Json(ListResponse { recordings }))
}

/// DELETE /api/recordings/{pathname}
#[instrument(skip(state))]
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(pathname): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.store.delete(&pathname).await?;
    counter!(RECORDINGS_DELETED_TOTAL).increment(1);
    Ok(Json(json!({ "deleted": pathname })))
}

/// GET /recordings/{pathname} — raw audio bytes.
pub async fn fetch_handler(
    State(state): State<AppState>,
    Path(pathname): Path<String>,
) -> Result<Response, ApiError> {
    let bytes = state.store.read(&pathname).await?;
    let content_type = vox_storage::store::content_type_for_pathname(&pathname);
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, content_type)],
        bytes,
    )
        .into_response())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
