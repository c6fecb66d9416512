//! Deepgram client implementing the [`Transcriber`] trait.
//!
//! One `POST /v1/listen` with the raw audio bytes as the body and the
//! feature toggles as query parameters. Uses `Token` auth. No retry — a
//! single attempt per request.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::{debug, error, instrument};

use vox_core::{ProviderKind, TopicMode, Transcription, TranscriptionOptions};

use crate::error_parsing::parse_api_error;
use crate::provider::{ProviderError, ProviderResult, Transcriber};

use super::normalizer;

/// Default API origin.
pub const DEFAULT_BASE_URL: &str = "https://api.deepgram.com";

/// Deepgram client configuration.
#[derive(Clone, Debug, Default)]
pub struct DeepgramConfig {
    /// API key (`Token` auth scheme).
    pub api_key: String,
    /// Override origin, mainly for tests.
    pub base_url: Option<String>,
}

/// Deepgram transcription provider.
pub struct DeepgramProvider {
    config: DeepgramConfig,
    client: reqwest::Client,
}

impl DeepgramProvider {
    /// Create a new Deepgram provider.
    #[must_use]
    pub fn new(config: DeepgramConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Create a new Deepgram provider with a shared HTTP client.
    #[must_use]
    pub fn with_client(config: DeepgramConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    fn build_headers(&self, mime_type: &str) -> ProviderResult<HeaderMap> {
        if self.config.api_key.trim().is_empty() {
            return Err(ProviderError::MissingCredential {
                provider: ProviderKind::Deepgram,
            });
        }
        let mut headers = HeaderMap::new();
        let auth = format!("Token {}", self.config.api_key);
        let _ = headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth).map_err(|_| ProviderError::MissingCredential {
                provider: ProviderKind::Deepgram,
            })?,
        );
        let _ = headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_str(mime_type)
                .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream")),
        );
        Ok(headers)
    }

    /// Build the `/v1/listen` URL with feature toggles as query parameters.
    fn build_url(&self, options: &TranscriptionOptions) -> String {
        let base = self.config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let mut params: Vec<(String, String)> = vec![
            ("model".into(), options.model.clone()),
            ("punctuate".into(), options.punctuate.to_string()),
            ("smart_format".into(), "true".into()),
            ("diarize".into(), options.diarize.to_string()),
        ];
        if options.detect_language {
            params.push(("detect_language".into(), "true".into()));
        } else if let Some(lang) = &options.language {
            params.push(("language".into(), lang.clone()));
        }
        if options.detect_topics {
            params.push(("topics".into(), "true".into()));
            for topic in &options.custom_topics {
                params.push(("custom_topic".into(), topic.clone()));
            }
            match options.topic_mode {
                TopicMode::Strict => {
                    params.push(("custom_topic_mode".into(), "strict".into()));
                }
                TopicMode::Extended => {
                    params.push(("custom_topic_mode".into(), "extended".into()));
                }
                TopicMode::Default => {}
            }
        }
        if options.detect_sentiment {
            params.push(("sentiment".into(), "true".into()));
        }

        let query: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
        format!("{base}/v1/listen?{}", query.join("&"))
    }

    async fn request(
        &self,
        audio: &[u8],
        mime_type: &str,
        options: &TranscriptionOptions,
    ) -> ProviderResult<Value> {
        let url = self.build_url(options);
        let headers = self.build_headers(mime_type)?;

        debug!(
            model = %options.model,
            bytes = audio.len(),
            diarize = options.diarize,
            "sending Deepgram request"
        );

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .body(audio.to_vec())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let info = parse_api_error(&body, status);
            error!(
                status = status.as_u16(),
                code = info.code.as_deref().unwrap_or("unknown"),
                "Deepgram API error"
            );
            return Err(ProviderError::Api {
                provider: ProviderKind::Deepgram,
                status: status.as_u16(),
                message: info.message,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl Transcriber for DeepgramProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Deepgram
    }

    #[instrument(skip_all, fields(provider = "deepgram", model = %options.model))]
    async fn transcribe(
        &self,
        audio: &[u8],
        mime_type: &str,
        options: &TranscriptionOptions,
    ) -> ProviderResult<Transcription> {
        let raw = self.request(audio, mime_type, options).await?;
        let mut result = normalizer::normalize(raw);
        if result.language.is_none() {
            result.language = options.language.clone();
        }
        Ok(result)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
