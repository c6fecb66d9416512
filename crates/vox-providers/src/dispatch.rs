//! Route a transcription request to exactly one backend.
//!
//! Deepgram and Gemini accept arbitrarily large uploads, so they only ever
//! see the first chunk (chunking exists for Whisper's upload cap). OpenAI
//! gets every chunk in parallel, all-or-nothing: one failed chunk aborts
//! the whole batch.

use futures::future::try_join_all;
use metrics::counter;
use tracing::{info, instrument, warn};

use vox_core::{ProviderKind, Transcription, TranscriptionOptions};

use crate::deepgram::{DeepgramConfig, DeepgramProvider};
use crate::gemini::{GeminiConfig, GeminiProvider};
use crate::openai::{self, OpenAiConfig, OpenAiProvider};
use crate::provider::{ProviderError, ProviderResult, Transcriber};

/// Counter: transcription requests dispatched, labeled by provider.
pub const METRIC_REQUESTS: &str = "vox_transcribe_requests_total";
/// Counter: transcription requests that failed, labeled by provider.
pub const METRIC_FAILURES: &str = "vox_transcribe_failures_total";

/// Credentials and endpoint overrides for every backend.
///
/// All three live here regardless of which one a request selects; a missing
/// key only matters once its provider is actually chosen.
#[derive(Clone, Debug, Default)]
pub struct DispatchConfig {
    pub deepgram: DeepgramConfig,
    pub openai: OpenAiConfig,
    pub gemini: GeminiConfig,
}

/// Transcribe pre-chunked audio with the provider named in `options`.
///
/// `chunks` must be non-empty. The HTTP client is shared across providers
/// so connection pools survive across requests.
#[instrument(skip_all, fields(provider = options.provider.as_str(), chunks = chunks.len()))]
pub async fn transcribe(
    chunks: &[Vec<u8>],
    mime_type: &str,
    options: &TranscriptionOptions,
    config: &DispatchConfig,
    client: reqwest::Client,
) -> ProviderResult<Transcription> {
    if chunks.is_empty() || chunks.iter().all(Vec::is_empty) {
        return Err(ProviderError::InvalidInput("no audio data".into()));
    }

    let provider_label = options.provider.as_str();
    counter!(METRIC_REQUESTS, "provider" => provider_label).increment(1);

    let result = match options.provider {
        ProviderKind::Deepgram => {
            let provider = DeepgramProvider::with_client(config.deepgram.clone(), client);
            provider.transcribe(&chunks[0], mime_type, options).await
        }
        ProviderKind::Gemini => {
            let provider = GeminiProvider::with_client(config.gemini.clone(), client);
            provider.transcribe(&chunks[0], mime_type, options).await
        }
        ProviderKind::OpenAi => {
            let provider = OpenAiProvider::with_client(config.openai.clone(), client);
            let futures = chunks
                .iter()
                .map(|chunk| provider.transcribe(chunk, mime_type, options));
            try_join_all(futures).await.map(openai::combine)
        }
    };

    match &result {
        Ok(transcription) => {
            info!(
                segments = transcription.segments.len(),
                speakers = transcription.speakers.len(),
                "transcription complete"
            );
        }
        Err(err) => {
            counter!(METRIC_FAILURES, "provider" => provider_label).increment(1);
            warn!(error = %err, "transcription failed");
        }
    }
    result
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(base_url: &str) -> DispatchConfig {
        DispatchConfig {
            deepgram: DeepgramConfig {
                api_key: "dg-key".into(),
                base_url: Some(base_url.to_string()),
            },
            openai: OpenAiConfig {
                api_key: "oa-key".into(),
                base_url: Some(base_url.to_string()),
            },
            gemini: GeminiConfig {
                api_key: "gm-key".into(),
                base_url: Some(base_url.to_string()),
            },
        }
    }

    #[tokio::test]
    async fn empty_chunks_rejected_before_any_request() {
        let err = transcribe(
            &[],
            "audio/wav",
            &TranscriptionOptions::default(),
            &DispatchConfig::default(),
            reqwest::Client::new(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ProviderError::InvalidInput(_)));

        let err = transcribe(
            &[Vec::new()],
            "audio/wav",
            &TranscriptionOptions::default(),
            &DispatchConfig::default(),
            reqwest::Client::new(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ProviderError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn deepgram_sees_only_first_chunk() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/listen"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": {"channels": [{"alternatives": [{
                    "transcript": "hello", "confidence": 0.9, "words": []
                }]}]}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let chunks = vec![b"first".to_vec(), b"second".to_vec(), b"third".to_vec()];
        let result = transcribe(
            &chunks,
            "audio/wav",
            &TranscriptionOptions::default(),
            &config_for(&server.uri()),
            reqwest::Client::new(),
        )
        .await
        .unwrap();
        assert_eq!(result.text, "hello");
    }

    #[tokio::test]
    async fn openai_transcribes_every_chunk_and_combines() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/audio/transcriptions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "text": "part",
                "segments": [
                    {"id": 0, "start": 0.0, "end": 10.0, "text": " part", "avg_logprob": 0.0}
                ]
            })))
            .expect(3)
            .mount(&server)
            .await;

        let chunks = vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()];
        let options = TranscriptionOptions::for_provider(ProviderKind::OpenAi);
        let result = transcribe(
            &chunks,
            "audio/mp4",
            &options,
            &config_for(&server.uri()),
            reqwest::Client::new(),
        )
        .await
        .unwrap();
        assert_eq!(result.text, "part part part");
        assert_eq!(result.segments.len(), 3);
        assert_eq!(result.segments[2].start, 20.0);
        assert!(result.segments_ordered());
    }

    #[tokio::test]
    async fn one_failed_chunk_aborts_the_batch() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/audio/transcriptions"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "error": {"message": "upstream blew up"}
            })))
            .mount(&server)
            .await;

        let chunks = vec![b"a".to_vec(), b"b".to_vec()];
        let options = TranscriptionOptions::for_provider(ProviderKind::OpenAi);
        let err = transcribe(
            &chunks,
            "audio/mp4",
            &options,
            &config_for(&server.uri()),
            reqwest::Client::new(),
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("upstream blew up"));
    }

    #[tokio::test]
    async fn gemini_routes_to_generate_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"parts": [{"text": "Speaker 1: hi"}]}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let options = TranscriptionOptions::for_provider(ProviderKind::Gemini);
        let result = transcribe(
            &[b"audio".to_vec()],
            "audio/webm",
            &options,
            &config_for(&server.uri()),
            reqwest::Client::new(),
        )
        .await
        .unwrap();
        assert_eq!(result.speakers.len(), 1);
    }
}
