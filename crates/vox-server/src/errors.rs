//! API error type and its HTTP rendering.
//!
//! Every error leaves the server as `{"error": "<single message>"}` — the
//! client renders the string and nothing else.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use vox_providers::ProviderError;
use vox_storage::StoreError;

/// Errors surfaced by API handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed request body or parameters.
    #[error("{0}")]
    BadRequest(String),
    /// Decoded audio exceeds the configured cap.
    #[error("audio exceeds the {0} byte upload limit")]
    PayloadTooLarge(u64),
    /// Provider-layer failure.
    #[error(transparent)]
    Provider(#[from] ProviderError),
    /// Storage-layer failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Provider(e) => match e {
                ProviderError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                ProviderError::MissingCredential { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                ProviderError::Api { .. } | ProviderError::Http(_) | ProviderError::Json(_) => {
                    StatusCode::BAD_GATEWAY
                }
            },
            Self::Store(e) => match e {
                StoreError::NotFound(_) => StatusCode::NOT_FOUND,
                StoreError::InvalidPathname(_) => StatusCode::BAD_REQUEST,
                StoreError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        if status.is_server_error() {
            error!(status = status.as_u16(), %message, "request failed");
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
