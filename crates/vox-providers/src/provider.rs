//! The [`Transcriber`] trait and shared provider error taxonomy.

use async_trait::async_trait;

use vox_core::{ProviderKind, Transcription, TranscriptionOptions};

/// Errors surfaced by provider clients.
///
/// Every variant renders to a single human-readable message — the UI layer
/// shows the string and nothing else. There is no retry at this layer; one
/// request, one verdict.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Missing or empty API credential for the selected provider.
    #[error("missing {provider} API key — set VOX_{}_API_KEY or providers.{provider}.apiKey", provider.as_str().to_uppercase())]
    MissingCredential {
        /// The provider that lacked a credential.
        provider: ProviderKind,
    },

    /// Transport-level failure (connect, TLS, timeout from the underlying client).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx provider response; `message` is the structured body message
    /// when one was found, else a generic status line.
    #[error("{provider} API error ({status}): {message}")]
    Api {
        /// The provider that rejected the request.
        provider: ProviderKind,
        /// HTTP status code.
        status: u16,
        /// Human-readable message.
        message: String,
    },

    /// Provider returned a body that does not parse as expected JSON.
    #[error("invalid provider response: {0}")]
    Json(#[from] serde_json::Error),

    /// The caller handed us nothing to transcribe.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience alias for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// One transcription backend.
///
/// Implementations own their HTTP plumbing and their normalizer; callers
/// get the canonical [`Transcription`] regardless of what the wire carried.
/// `transcribe` takes one audio blob — multi-chunk fan-out is the
/// dispatcher's job, not the provider's.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Which backend this is.
    fn kind(&self) -> ProviderKind;

    /// Transcribe one audio blob into the canonical shape.
    async fn transcribe(
        &self,
        audio: &[u8],
        mime_type: &str,
        options: &TranscriptionOptions,
    ) -> ProviderResult<Transcription>;
}

/// Map a MIME type to a default filename with the right extension.
///
/// Whisper uses the multipart filename extension to pick the container
/// decoder; sending m4a audio named `.wav` fails with a RIFF error.
#[must_use]
pub fn filename_for_mime(mime_type: &str) -> String {
    let ext = match mime_type {
        "audio/mp4" | "audio/m4a" | "audio/x-m4a" | "audio/aac" => "m4a",
        "audio/mpeg" | "audio/mp3" => "mp3",
        "audio/ogg" | "audio/vorbis" => "ogg",
        "audio/webm" => "webm",
        "audio/flac" | "audio/x-flac" => "flac",
        _ => "wav",
    };
    format!("audio.{ext}")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credential_names_env_var() {
        let err = ProviderError::MissingCredential {
            provider: ProviderKind::Deepgram,
        };
        let msg = err.to_string();
        assert!(msg.contains("VOX_DEEPGRAM_API_KEY"), "got: {msg}");
        assert!(msg.contains("providers.deepgram.apiKey"));
    }

    #[test]
    fn api_error_carries_status_and_message() {
        let err = ProviderError::Api {
            provider: ProviderKind::OpenAi,
            status: 401,
            message: "Incorrect API key provided".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("401"));
        assert!(msg.contains("Incorrect API key provided"));
        assert!(msg.contains("openai"));
    }

    #[test]
    fn filename_for_mime_variants() {
        assert_eq!(filename_for_mime("audio/m4a"), "audio.m4a");
        assert_eq!(filename_for_mime("audio/mpeg"), "audio.mp3");
        assert_eq!(filename_for_mime("audio/webm"), "audio.webm");
        assert_eq!(filename_for_mime("audio/wav"), "audio.wav");
        assert_eq!(filename_for_mime("unknown/type"), "audio.wav");
    }
}
