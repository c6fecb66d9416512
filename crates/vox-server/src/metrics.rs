//! Prometheus metrics recorder and `/metrics` endpoint handler.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::info;

/// Install the Prometheus metrics recorder (global).
///
/// Returns the `PrometheusHandle` used to render the `/metrics` endpoint.
/// Must be called once at server startup before any metrics are recorded.
pub fn install_recorder() -> PrometheusHandle {
    let builder = PrometheusBuilder::new();
    let handle = builder
        .install_recorder()
        .expect("failed to install metrics recorder");
    info!("prometheus metrics recorder installed");
    handle
}

// Metric name constants to avoid typos across crates.

/// Recordings saved total (counter).
pub const RECORDINGS_SAVED_TOTAL: &str = "recordings_saved_total";
/// Recordings deleted total (counter).
pub const RECORDINGS_DELETED_TOTAL: &str = "recordings_deleted_total";
/// Uploaded audio bytes total (counter).
pub const UPLOAD_BYTES_TOTAL: &str = "upload_bytes_total";
/// Transcription request duration seconds (histogram, labels: provider).
pub const TRANSCRIBE_DURATION_SECONDS: &str = "transcribe_duration_seconds";
