//! Request configuration: provider selection and feature toggles.
//!
//! All types use `#[serde(rename_all = "camelCase")]` to match the browser
//! JSON wire format. [`TranscriptionOptions`] implements [`Default`] and
//! allows partial JSON — missing fields get their default value.

use serde::{Deserialize, Serialize};

/// The transcription backend to route a request to.
///
/// Each variant has exactly one default model; switching provider on a
/// [`TranscriptionOptions`] resets the model to that default so the pair
/// stays mutually consistent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Deepgram pre-recorded audio API (rich structured response).
    Deepgram,
    /// `OpenAI` Whisper transcription API (per-chunk, combined client-side).
    #[serde(rename = "openai")]
    OpenAi,
    /// Google Gemini (returns prose; structure recovered heuristically).
    Gemini,
}

impl ProviderKind {
    /// The default model identifier for this provider.
    #[must_use]
    pub fn default_model(self) -> &'static str {
        match self {
            Self::Deepgram => "nova-2",
            Self::OpenAi => "whisper-1",
            Self::Gemini => "gemini-1.5-flash",
        }
    }

    /// Wire name, as used in JSON and log fields.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Deepgram => "deepgram",
            Self::OpenAi => "openai",
            Self::Gemini => "gemini",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How user-supplied custom topics are matched against the transcript.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopicMode {
    /// Only the custom topic list is reported.
    Strict,
    /// Custom topics are merged with detected topics.
    Extended,
    /// Provider/heuristic detection only.
    #[default]
    Default,
}

/// Configuration selected before a transcription request.
///
/// Invariant: `provider` and `model` are mutually consistent — an empty or
/// stale model is repaired to the provider's default by [`Self::normalize`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranscriptionOptions {
    /// Which backend handles the request.
    pub provider: ProviderKind,
    /// Model identifier; empty string means "use the provider default".
    pub model: String,
    /// Declared language code (e.g. "en"). `None` lets the provider decide.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Request speaker diarization where the provider supports it.
    pub diarize: bool,
    /// Request punctuated output.
    pub punctuate: bool,
    /// Request word/segment timestamps.
    pub timestamps: bool,
    /// Ask the Gemini prompt for "Speaker N:" style labels.
    pub speaker_labels: bool,
    /// Run sentiment scoring over the result.
    pub detect_sentiment: bool,
    /// Run topic detection over the result.
    pub detect_topics: bool,
    /// Auto-detect the spoken language instead of trusting `language`.
    pub detect_language: bool,
    /// User-supplied topics of interest.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub custom_topics: Vec<String>,
    /// How `custom_topics` interact with detected topics.
    pub topic_mode: TopicMode,
}

impl Default for TranscriptionOptions {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Deepgram,
            model: ProviderKind::Deepgram.default_model().to_string(),
            language: None,
            diarize: true,
            punctuate: true,
            timestamps: true,
            speaker_labels: true,
            detect_sentiment: true,
            detect_topics: true,
            detect_language: false,
            custom_topics: Vec::new(),
            topic_mode: TopicMode::Default,
        }
    }
}

impl TranscriptionOptions {
    /// Options for a specific provider with that provider's default model.
    #[must_use]
    pub fn for_provider(provider: ProviderKind) -> Self {
        Self {
            provider,
            model: provider.default_model().to_string(),
            ..Self::default()
        }
    }

    /// Switch provider, resetting the model to the new provider's default.
    pub fn set_provider(&mut self, provider: ProviderKind) {
        self.provider = provider;
        self.model = provider.default_model().to_string();
    }

    /// Repair the provider/model invariant: an empty model (e.g. from
    /// partial JSON) becomes the provider's default.
    pub fn normalize(&mut self) {
        if self.model.trim().is_empty() {
            self.model = self.provider.default_model().to_string();
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
