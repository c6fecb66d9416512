//! Gemini client implementing the [`Transcriber`] trait.
//!
//! One `generateContent` call with the audio inlined as base64. The model
//! answers in prose; everything structured about the canonical result is
//! recovered by [`super::normalizer`].

use async_trait::async_trait;
use base64::Engine;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::{Value, json};
use tracing::{debug, error, instrument};

use vox_core::{ProviderKind, Transcription, TranscriptionOptions};

use crate::error_parsing::parse_api_error;
use crate::provider::{ProviderError, ProviderResult, Transcriber};

use super::normalizer;

/// Default API origin.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Gemini client configuration.
#[derive(Clone, Debug, Default)]
pub struct GeminiConfig {
    /// API key (`x-goog-api-key` header).
    pub api_key: String,
    /// Override origin, mainly for tests.
    pub base_url: Option<String>,
}

/// Gemini transcription provider.
pub struct GeminiProvider {
    config: GeminiConfig,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// Create a new Gemini provider.
    #[must_use]
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Create a new Gemini provider with a shared HTTP client.
    #[must_use]
    pub fn with_client(config: GeminiConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    fn build_headers(&self) -> ProviderResult<HeaderMap> {
        if self.config.api_key.trim().is_empty() {
            return Err(ProviderError::MissingCredential {
                provider: ProviderKind::Gemini,
            });
        }
        let mut headers = HeaderMap::new();
        let _ = headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let _ = headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(&self.config.api_key).map_err(|_| {
                ProviderError::MissingCredential {
                    provider: ProviderKind::Gemini,
                }
            })?,
        );
        Ok(headers)
    }

    /// The transcription instruction sent alongside the audio.
    fn build_prompt(options: &TranscriptionOptions) -> String {
        let mut prompt = String::from("Transcribe this audio recording exactly.");
        if options.speaker_labels {
            prompt.push_str(" Label each distinct speaker as 'Speaker 1:', 'Speaker 2:', and so on, one line per utterance.");
        }
        if options.timestamps {
            prompt.push_str(" Include [mm:ss] timestamps where you can.");
        }
        if let Some(lang) = &options.language {
            prompt.push_str(&format!(" The audio is in '{lang}'."));
        }
        prompt
    }

    /// Pull the prose answer out of the candidates list.
    fn extract_text(body: &Value) -> String {
        let Some(parts) = body.pointer("/candidates/0/content/parts").and_then(Value::as_array)
        else {
            return String::new();
        };
        parts
            .iter()
            .filter_map(|p| p.get("text").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join("\n")
    }

    async fn request(
        &self,
        audio: &[u8],
        mime_type: &str,
        options: &TranscriptionOptions,
    ) -> ProviderResult<String> {
        let headers = self.build_headers()?;
        let base = self.config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let url = format!("{base}/v1beta/models/{}:generateContent", options.model);

        let body = json!({
            "contents": [{
                "parts": [
                    {"text": Self::build_prompt(options)},
                    {"inline_data": {
                        "mime_type": mime_type,
                        "data": base64::engine::general_purpose::STANDARD.encode(audio),
                    }}
                ]
            }]
        });

        debug!(model = %options.model, bytes = audio.len(), "sending Gemini request");

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let info = parse_api_error(&body, status);
            error!(
                status = status.as_u16(),
                code = info.code.as_deref().unwrap_or("unknown"),
                "Gemini API error"
            );
            return Err(ProviderError::Api {
                provider: ProviderKind::Gemini,
                status: status.as_u16(),
                message: info.message,
            });
        }

        let body: Value = response.json().await?;
        Ok(Self::extract_text(&body))
    }
}

#[async_trait]
impl Transcriber for GeminiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    #[instrument(skip_all, fields(provider = "gemini", model = %options.model))]
    async fn transcribe(
        &self,
        audio: &[u8],
        mime_type: &str,
        options: &TranscriptionOptions,
    ) -> ProviderResult<Transcription> {
        let text = self.request(audio, mime_type, options).await?;
        Ok(normalizer::normalize(&text, options))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
