//! Wire types for the Whisper `verbose_json` response.
//!
//! Everything is `#[serde(default)]` — a field the API drops must never
//! fail deserialization.

use serde::Deserialize;

/// Top-level `verbose_json` response.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct WhisperResponse {
    pub text: String,
    pub language: Option<String>,
    pub duration: Option<f64>,
    pub segments: Vec<WhisperSegment>,
}

/// One decoded segment.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct WhisperSegment {
    pub id: i64,
    pub start: f64,
    pub end: f64,
    pub text: String,
    /// Mean log-probability of the segment's tokens.
    pub avg_logprob: Option<f64>,
    pub no_speech_prob: Option<f64>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
