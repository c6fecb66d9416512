//! The canonical transcription result — the single normalized shape all
//! provider responses map into.
//!
//! A [`Transcription`] is constructed fresh per request and is immutable
//! once produced; the raw provider payload rides along in [`Transcription::raw`]
//! for diagnostics and is never interpreted further.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A speaker identifier — numeric index (Deepgram diarization) or a
/// label recovered from prose ("Speaker 1", "Alice").
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Speaker {
    /// Zero-based diarization index.
    Index(u32),
    /// Free-form label.
    Label(String),
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Label(l) => f.write_str(l),
        }
    }
}

/// A word- or utterance-level unit with timing.
///
/// Invariant: `end >= start`; a segment sequence is non-decreasing by
/// `start`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// Seconds from audio start.
    pub start: f64,
    /// Seconds from audio start.
    pub end: f64,
    /// Segment text (punctuated form when available).
    pub text: String,
    /// Speaker, when diarization produced one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaker: Option<Speaker>,
    /// Per-segment confidence in [0, 1], when the provider reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// A provider-defined grouping of segments, coarser than per-word timing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    /// Seconds from audio start.
    pub start: f64,
    /// Seconds from audio start.
    pub end: f64,
    /// Paragraph text.
    pub text: String,
    /// Speaker, when diarization produced one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaker: Option<Speaker>,
    /// Paragraph-level sentiment, when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<SentimentLabel>,
}

/// A detected topic with its confidence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    /// Topic name (deduplication key).
    pub topic: String,
    /// Confidence in [0, 1].
    pub confidence: f64,
}

/// The three sentiment classes.
///
/// Enumeration order is load-bearing: majority votes scan
/// positive → negative → neutral with a strict comparator, so the first
/// class reaching the max count wins ties.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    /// Positive sentiment.
    Positive,
    /// Negative sentiment.
    Negative,
    /// Neutral sentiment.
    Neutral,
}

impl SentimentLabel {
    /// All classes in tie-break enumeration order.
    pub const ALL: [Self; 3] = [Self::Positive, Self::Negative, Self::Neutral];

    /// Parse a provider label string; unknown labels read as neutral.
    #[must_use]
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "positive" => Self::Positive,
            "negative" => Self::Negative,
            _ => Self::Neutral,
        }
    }
}

/// Per-class counts backing an overall sentiment vote.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentDistribution {
    /// Number of positive spans.
    pub positive: u32,
    /// Number of negative spans.
    pub negative: u32,
    /// Number of neutral spans.
    pub neutral: u32,
}

impl SentimentDistribution {
    /// Count of the given class.
    #[must_use]
    pub fn count(&self, label: SentimentLabel) -> u32 {
        match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Negative => self.negative,
            SentimentLabel::Neutral => self.neutral,
        }
    }

    /// Majority class with the documented tie-break: classes are scanned in
    /// [`SentimentLabel::ALL`] order and only a strictly greater count
    /// displaces the current winner.
    #[must_use]
    pub fn majority(&self) -> SentimentLabel {
        let mut winner = SentimentLabel::Positive;
        let mut best = 0u32;
        for label in SentimentLabel::ALL {
            let count = self.count(label);
            if count > best {
                best = count;
                winner = label;
            }
        }
        winner
    }
}

/// Sentiment for one span of the transcript.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentSpan {
    /// Span text.
    pub text: String,
    /// Seconds from audio start, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<f64>,
    /// Seconds from audio start, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,
    /// Sentiment class.
    pub sentiment: SentimentLabel,
    /// Provider score for the span (Deepgram: [-1, 1]).
    pub score: f64,
}

/// Overall sentiment verdict for a transcription.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallSentiment {
    /// Majority class.
    pub sentiment: SentimentLabel,
    /// Confidence in [0, 1].
    pub confidence: f64,
    /// Per-class span counts behind the vote.
    pub distribution: SentimentDistribution,
}

/// Overall + per-span sentiment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentSummary {
    /// The overall verdict.
    pub overall: OverallSentiment,
    /// Ordered per-span sentiment.
    pub segments: Vec<SentimentSpan>,
}

/// The normalized transcription result, independent of provider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Transcription {
    /// Full transcript.
    pub text: String,
    /// Overall confidence in [0, 1], provider-supplied or estimated.
    pub confidence: f64,
    /// Detected or declared language code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Distinct speakers in ascending/encounter order; empty without diarization.
    pub speakers: Vec<Speaker>,
    /// Word- or utterance-level units, non-decreasing by start.
    pub segments: Vec<Segment>,
    /// Coarser provider-defined grouping.
    pub paragraphs: Vec<Paragraph>,
    /// Detected topics, deduplicated by name.
    pub topics: Vec<Topic>,
    /// Sentiment summary, when requested and available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<SentimentSummary>,
    /// Flat list of `[mm:ss]` markers scanned from prose responses;
    /// not attached to segments (acknowledged as incomplete).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub time_markers: Vec<f64>,
    /// Original provider payload, retained for diagnostics only.
    pub raw: Value,
}

impl Default for Transcription {
    fn default() -> Self {
        Self {
            text: String::new(),
            confidence: 0.0,
            language: None,
            speakers: Vec::new(),
            segments: Vec::new(),
            paragraphs: Vec::new(),
            topics: Vec::new(),
            sentiment: None,
            time_markers: Vec::new(),
            raw: Value::Null,
        }
    }
}

impl Transcription {
    /// The all-empty result used for malformed-but-well-typed provider
    /// responses, keeping the raw payload for diagnostics.
    #[must_use]
    pub fn empty(raw: Value) -> Self {
        Self {
            raw,
            ..Self::default()
        }
    }

    /// Whether the segment sequence honors the timing invariants
    /// (`end >= start` per segment, non-decreasing by `start`).
    #[must_use]
    pub fn segments_ordered(&self) -> bool {
        self.segments.iter().all(|s| s.end >= s.start)
            && self.segments.windows(2).all(|w| w[0].start <= w[1].start)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
