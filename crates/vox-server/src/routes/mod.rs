//! Route table and router assembly.

pub mod health;
pub mod recordings;
pub mod transcribe;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Request-body ceiling for the configured upload cap.
///
/// Uploads arrive base64-encoded inside a JSON envelope, so the wire body
/// runs 4/3 the decoded size; the extra megabyte absorbs the envelope.
fn body_limit_for(max_upload_bytes: u64) -> usize {
    (max_upload_bytes as usize / 3) * 4 + 1024 * 1024
}

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    let body_limit = body_limit_for(state.max_upload_bytes);
    Router::new()
        .route("/api/transcribe", post(transcribe::transcribe_handler))
        .route(
            "/api/recordings",
            get(recordings::list_handler).post(recordings::upload_handler),
        )
        .route(
            "/api/recordings/{pathname}",
            delete(recordings::delete_handler),
        )
        .route("/recordings/{pathname}", get(recordings::fetch_handler))
        .route("/health", get(health::health_handler))
        .route("/metrics", get(health::metrics_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
