//! `POST /api/transcribe` — base64 audio in, canonical transcription out.

use std::time::Instant;

use axum::extract::State;
use axum::response::Json;
use base64::Engine;
use metrics::{counter, histogram};
use serde::Deserialize;
use tracing::{info, instrument};

use vox_audio::{estimate_duration_seconds, split_chunks};
use vox_core::{Transcription, TranscriptionOptions};
use vox_providers::dispatch;

use crate::errors::ApiError;
use crate::metrics::{TRANSCRIBE_DURATION_SECONDS, UPLOAD_BYTES_TOTAL};
use crate::state::AppState;

const DEFAULT_MIME: &str = "audio/webm";

/// Request body for `POST /api/transcribe`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscribeRequest {
    /// Base64 audio payload; a `data:` URI prefix is tolerated.
    pub audio_base64: String,
    /// MIME type of the decoded audio; defaults to `audio/webm`.
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Transcription options; defaults select Deepgram with every
    /// feature on.
    #[serde(default)]
    pub options: TranscriptionOptions,
}

/// Strip a `data:<mime>;base64,` prefix if present.
fn strip_data_uri(input: &str) -> &str {
    if input.starts_with("data:") {
        if let Some(idx) = input.find(',') {
            return &input[idx + 1..];
        }
    }
    input
}

/// POST /api/transcribe
#[instrument(skip_all, fields(provider = request.options.provider.as_str()))]
pub async fn transcribe_handler(
    State(state): State<AppState>,
    Json(request): Json<TranscribeRequest>,
) -> Result<Json<Transcription>, ApiError> {
    let started = Instant::now();

    let encoded = strip_data_uri(request.audio_base64.trim());
    let audio = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| ApiError::BadRequest(format!("invalid base64 audio: {e}")))?;

    if audio.is_empty() {
        return Err(ApiError::BadRequest("no audio data".into()));
    }
    if audio.len() as u64 > state.max_upload_bytes {
        return Err(ApiError::PayloadTooLarge(state.max_upload_bytes));
    }
    counter!(UPLOAD_BYTES_TOTAL).increment(audio.len() as u64);

    let mime_type = request.mime_type.as_deref().unwrap_or(DEFAULT_MIME);
    let mut options = request.options;
    options.normalize();

    let duration = estimate_duration_seconds(&audio);
    let chunks = split_chunks(&audio);
    info!(
        bytes = audio.len(),
        est_duration_secs = duration,
        chunks = chunks.len(),
        "transcription request accepted"
    );

    let result = dispatch::transcribe(
        &chunks,
        mime_type,
        &options,
        &state.dispatch,
        state.http.clone(),
    )
    .await?;

    histogram!(TRANSCRIBE_DURATION_SECONDS, "provider" => options.provider.as_str())
        .record(started.elapsed().as_secs_f64());
    Ok(Json(result))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::json;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use vox_providers::deepgram::DeepgramConfig;
    use vox_providers::dispatch::DispatchConfig;
    use vox_storage::MemoryStore;

    use crate::routes::build_router;
    use crate::state::AppState;

    fn state_with_dispatch(dispatch: DispatchConfig) -> AppState {
        AppState::with_store(Arc::new(MemoryStore::new()), dispatch)
    }

    fn post_json(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/transcribe")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn encode(bytes: &[u8]) -> String {
        base64::engine::general_purpose::STANDARD.encode(bytes)
    }

    // ── request parsing ─────────────────────────────────────────────────

    #[test]
    fn data_uri_prefix_is_stripped() {
        assert_eq!(strip_data_uri("data:audio/webm;base64,AAAA"), "AAAA");
        assert_eq!(strip_data_uri("AAAA"), "AAAA");
        assert_eq!(strip_data_uri("data:no-comma"), "data:no-comma");
    }

    #[tokio::test]
    async fn invalid_base64_is_bad_request() {
        let app = build_router(state_with_dispatch(DispatchConfig::default()));
        let resp = app
            .oneshot(post_json(json!({"audioBase64": "!!not-base64!!"})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn empty_audio_is_bad_request() {
        let app = build_router(state_with_dispatch(DispatchConfig::default()));
        let resp = app
            .oneshot(post_json(json!({"audioBase64": ""})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn oversized_audio_is_rejected() {
        let mut state = state_with_dispatch(DispatchConfig::default());
        state.max_upload_bytes = 8;
        let app = build_router(state);
        let resp = app
            .oneshot(post_json(json!({"audioBase64": encode(&[0u8; 64])})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn multi_megabyte_upload_reaches_the_handler() {
        let app = build_router(state_with_dispatch(DispatchConfig::default()));
        let audio = vec![0u8; 3 * 1024 * 1024];
        let resp = app
            .oneshot(post_json(json!({"audioBase64": encode(&audio)})))
            .await
            .unwrap();
        // Under the cap the body limit must not intercept the request: the
        // only failure left is the missing provider credential, rendered in
        // the JSON error shape.
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(resp.into_body(), 10_000).await.unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(parsed["error"]
            .as_str()
            .unwrap()
            .contains("VOX_DEEPGRAM_API_KEY"));
    }

    #[tokio::test]
    async fn missing_credential_yields_single_error_message() {
        let app = build_router(state_with_dispatch(DispatchConfig::default()));
        let resp = app
            .oneshot(post_json(json!({"audioBase64": encode(b"audio")})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(resp.into_body(), 10_000).await.unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let message = parsed["error"].as_str().unwrap();
        assert!(message.contains("VOX_DEEPGRAM_API_KEY"), "got: {message}");
    }

    // ── end to end against a mock provider ──────────────────────────────

    #[tokio::test]
    async fn transcribes_through_mock_deepgram() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/listen"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": {"channels": [{"alternatives": [{
                    "transcript": "hello from the mock",
                    "confidence": 0.97,
                    "words": []
                }]}]}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let dispatch = DispatchConfig {
            deepgram: DeepgramConfig {
                api_key: "dg-key".into(),
                base_url: Some(server.uri()),
            },
            ..DispatchConfig::default()
        };
        let app = build_router(state_with_dispatch(dispatch));
        let resp = app
            .oneshot(post_json(json!({
                "audioBase64": format!("data:audio/webm;base64,{}", encode(b"opus-bytes")),
                "mimeType": "audio/webm"
            })))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), 100_000).await.unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed["text"], "hello from the mock");
        assert_eq!(parsed["confidence"], 0.97);
    }

    #[tokio::test]
    async fn provider_error_surfaces_as_bad_gateway() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/listen"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "err_msg": "Invalid credentials."
            })))
            .mount(&server)
            .await;

        let dispatch = DispatchConfig {
            deepgram: DeepgramConfig {
                api_key: "bad-key".into(),
                base_url: Some(server.uri()),
            },
            ..DispatchConfig::default()
        };
        let app = build_router(state_with_dispatch(dispatch));
        let resp = app
            .oneshot(post_json(json!({"audioBase64": encode(b"audio")})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let body = axum::body::to_bytes(resp.into_body(), 10_000).await.unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(parsed["error"]
            .as_str()
            .unwrap()
            .contains("Invalid credentials."));
    }
}
