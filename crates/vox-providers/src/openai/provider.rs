//! OpenAI Whisper client implementing the [`Transcriber`] trait.
//!
//! Multipart upload to `/v1/audio/transcriptions` with `verbose_json` so we
//! get timed segments back. The multipart filename extension matters —
//! Whisper picks its container decoder from it.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::{debug, error, instrument};

use vox_core::{ProviderKind, Segment, Transcription, TranscriptionOptions};

use crate::error_parsing::parse_api_error;
use crate::provider::{ProviderError, ProviderResult, Transcriber, filename_for_mime};

use super::types::WhisperResponse;

/// Default API origin.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Overall confidence when the response has no scored segments.
const DEFAULT_CONFIDENCE: f64 = 0.9;

/// OpenAI client configuration.
#[derive(Clone, Debug, Default)]
pub struct OpenAiConfig {
    /// API key (`Bearer` auth scheme).
    pub api_key: String,
    /// Override origin, mainly for tests.
    pub base_url: Option<String>,
}

/// OpenAI Whisper transcription provider.
pub struct OpenAiProvider {
    config: OpenAiConfig,
    client: reqwest::Client,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider.
    #[must_use]
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Create a new OpenAI provider with a shared HTTP client.
    #[must_use]
    pub fn with_client(config: OpenAiConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    fn build_headers(&self) -> ProviderResult<HeaderMap> {
        if self.config.api_key.trim().is_empty() {
            return Err(ProviderError::MissingCredential {
                provider: ProviderKind::OpenAi,
            });
        }
        let mut headers = HeaderMap::new();
        let auth = format!("Bearer {}", self.config.api_key);
        let _ = headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth).map_err(|_| ProviderError::MissingCredential {
                provider: ProviderKind::OpenAi,
            })?,
        );
        Ok(headers)
    }

    fn build_form(
        audio: &[u8],
        mime_type: &str,
        options: &TranscriptionOptions,
    ) -> ProviderResult<Form> {
        let part = Part::bytes(audio.to_vec())
            .file_name(filename_for_mime(mime_type))
            .mime_str(mime_type)
            .map_err(ProviderError::Http)?;
        let mut form = Form::new()
            .part("file", part)
            .text("model", options.model.clone())
            .text("response_format", "verbose_json");
        if let Some(lang) = &options.language {
            form = form.text("language", lang.clone());
        }
        Ok(form)
    }

    async fn request(
        &self,
        audio: &[u8],
        mime_type: &str,
        options: &TranscriptionOptions,
    ) -> ProviderResult<Value> {
        let headers = self.build_headers()?;
        let base = self.config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let url = format!("{base}/v1/audio/transcriptions");
        let form = Self::build_form(audio, mime_type, options)?;

        debug!(model = %options.model, bytes = audio.len(), "sending Whisper request");

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let info = parse_api_error(&body, status);
            error!(
                status = status.as_u16(),
                code = info.code.as_deref().unwrap_or("unknown"),
                "OpenAI API error"
            );
            return Err(ProviderError::Api {
                provider: ProviderKind::OpenAi,
                status: status.as_u16(),
                message: info.message,
            });
        }

        Ok(response.json().await?)
    }
}

/// Normalize one chunk's `verbose_json` body into the canonical shape.
///
/// Whisper never reports speakers, topics, or sentiment — only text, timed
/// segments, and a language. Segment confidence comes from `avg_logprob`
/// mapped through `exp` back into probability space.
#[must_use]
pub fn normalize_chunk(raw: Value) -> Transcription {
    let parsed: WhisperResponse = serde_json::from_value(raw.clone()).unwrap_or_default();

    let segments: Vec<Segment> = parsed
        .segments
        .iter()
        .map(|s| Segment {
            start: s.start,
            end: s.end,
            text: s.text.trim().to_string(),
            speaker: None,
            confidence: s.avg_logprob.map(|lp| lp.exp().clamp(0.0, 1.0)),
        })
        .collect();

    let scored: Vec<f64> = segments.iter().filter_map(|s| s.confidence).collect();
    let confidence = if scored.is_empty() {
        DEFAULT_CONFIDENCE
    } else {
        scored.iter().sum::<f64>() / scored.len() as f64
    };

    Transcription {
        text: parsed.text.trim().to_string(),
        confidence,
        language: parsed.language,
        segments,
        raw,
        ..Transcription::default()
    }
}

#[async_trait]
impl Transcriber for OpenAiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    #[instrument(skip_all, fields(provider = "openai", model = %options.model))]
    async fn transcribe(
        &self,
        audio: &[u8],
        mime_type: &str,
        options: &TranscriptionOptions,
    ) -> ProviderResult<Transcription> {
        let raw = self.request(audio, mime_type, options).await?;
        let mut result = normalize_chunk(raw);
        if result.language.is_none() {
            result.language = options.language.clone();
        }
        Ok(result)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
