//! # vox-server
//!
//! Axum HTTP API over the provider dispatcher and the recording store.
//!
//! Routes:
//! - `POST /api/transcribe` — base64 audio in, canonical transcription out
//! - `GET/POST /api/recordings`, `DELETE /api/recordings/{pathname}`
//! - `GET /recordings/{pathname}` — raw audio bytes
//! - `GET /health`, `GET /metrics`
//!
//! All state travels through [`AppState`]; nothing global except the
//! Prometheus recorder, which the `metrics` facade requires.

#![deny(unsafe_code)]

pub mod errors;
pub mod metrics;
pub mod routes;
pub mod state;

pub use errors::ApiError;
pub use routes::build_router;
pub use state::AppState;

use std::net::SocketAddr;

use tracing::info;

/// Bind and serve until ctrl-c.
pub async fn serve(state: AppState, addr: SocketAddr) -> std::io::Result<()> {
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "vox server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        return;
    }
    info!("shutdown signal received");
}
