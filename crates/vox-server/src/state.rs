//! Shared application state for Axum handlers.

use std::sync::Arc;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusHandle;
use tracing::warn;

use vox_providers::dispatch::DispatchConfig;
use vox_providers::deepgram::DeepgramConfig;
use vox_providers::gemini::GeminiConfig;
use vox_providers::openai::OpenAiConfig;
use vox_settings::{StorageBackend, VoxSettings};
use vox_storage::{FsStore, MemoryStore, RecordingStore};

/// Shared state accessible from Axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// Recording store; backend chosen at startup.
    pub store: Arc<dyn RecordingStore>,
    /// Provider credentials for the dispatcher.
    pub dispatch: DispatchConfig,
    /// Shared HTTP client; one connection pool for all providers.
    pub http: reqwest::Client,
    /// Decoded upload cap in bytes.
    pub max_upload_bytes: u64,
    /// Prometheus render handle; `None` until the recorder is installed.
    pub metrics: Option<PrometheusHandle>,
    /// When the server started.
    pub start_time: Instant,
}

impl AppState {
    /// Build state from loaded settings.
    ///
    /// A filesystem backend that cannot open its root directory degrades
    /// to the in-memory store with a warning instead of failing startup.
    #[must_use]
    pub fn from_settings(settings: &VoxSettings) -> Self {
        let store: Arc<dyn RecordingStore> = match settings.storage.backend {
            StorageBackend::Memory => Arc::new(MemoryStore::new()),
            StorageBackend::Filesystem => match FsStore::open(&settings.storage.root_dir) {
                Ok(fs) => Arc::new(fs),
                Err(e) => {
                    warn!(
                        error = %e,
                        root = %settings.storage.root_dir,
                        "recording directory unavailable, falling back to in-memory store"
                    );
                    Arc::new(MemoryStore::new())
                }
            },
        };

        Self {
            store,
            dispatch: dispatch_config(settings),
            http: reqwest::Client::new(),
            max_upload_bytes: settings.server.max_upload_bytes,
            metrics: None,
            start_time: Instant::now(),
        }
    }

    /// Attach the Prometheus render handle for `/metrics`.
    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Test/embedding constructor with an explicit store.
    #[must_use]
    pub fn with_store(store: Arc<dyn RecordingStore>, dispatch: DispatchConfig) -> Self {
        Self {
            store,
            dispatch,
            http: reqwest::Client::new(),
            max_upload_bytes: 50 * 1024 * 1024,
            metrics: None,
            start_time: Instant::now(),
        }
    }
}

fn dispatch_config(settings: &VoxSettings) -> DispatchConfig {
    DispatchConfig {
        deepgram: DeepgramConfig {
            api_key: settings.providers.deepgram.api_key.clone(),
            base_url: settings.providers.deepgram.base_url.clone(),
        },
        openai: OpenAiConfig {
            api_key: settings.providers.openai.api_key.clone(),
            base_url: settings.providers.openai.base_url.clone(),
        },
        gemini: GeminiConfig {
            api_key: settings.providers.gemini.api_key.clone(),
            base_url: settings.providers.gemini.base_url.clone(),
        },
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
