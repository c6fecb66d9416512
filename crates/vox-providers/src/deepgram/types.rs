//! Deepgram pre-recorded response wire shapes.
//!
//! Every struct is `#[serde(default)]`-tolerant: a malformed-but-well-typed
//! body deserializes to empty collections instead of failing, so the
//! normalizer can honor its never-throws contract.

use serde::Deserialize;
use serde_json::Value;

/// Top-level response body from `POST /v1/listen`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeepgramResponse {
    /// Transcription results.
    pub results: DeepgramResults,
    /// Request metadata (model, duration, ids) — kept opaque.
    pub metadata: Value,
}

/// `results` body.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeepgramResults {
    /// One entry per audio channel.
    pub channels: Vec<DeepgramChannel>,
    /// Topic detection output, when requested.
    pub topics: Option<DeepgramTopics>,
    /// Sentiment analysis output, when requested.
    pub sentiment: Option<DeepgramSentiment>,
    /// Metadata nested under results (detected language rides here).
    pub metadata: Option<DeepgramResultsMetadata>,
}

/// `results.metadata`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeepgramResultsMetadata {
    /// BCP-47 language code detected by the model.
    pub detected_language: Option<String>,
}

/// One audio channel.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeepgramChannel {
    /// Ranked hypotheses; the first is the best.
    pub alternatives: Vec<DeepgramAlternative>,
    /// Channel-level detected language (newer schema placement).
    pub detected_language: Option<String>,
}

/// One transcription hypothesis.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeepgramAlternative {
    /// Full transcript text.
    pub transcript: String,
    /// Overall confidence in [0, 1].
    pub confidence: f64,
    /// Word-level timing and diarization.
    pub words: Vec<DeepgramWord>,
    /// Paragraph grouping, when smart formatting is on.
    pub paragraphs: Option<DeepgramParagraphs>,
}

/// One word with timing.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeepgramWord {
    /// Raw word form.
    pub word: String,
    /// Seconds from audio start.
    pub start: f64,
    /// Seconds from audio start.
    pub end: f64,
    /// Word confidence in [0, 1].
    pub confidence: Option<f64>,
    /// Punctuated/capitalized form, preferred for display.
    pub punctuated_word: Option<String>,
    /// Diarization speaker index.
    pub speaker: Option<u32>,
}

/// Paragraph wrapper (`alternatives[].paragraphs`).
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeepgramParagraphs {
    /// The paragraph list.
    pub paragraphs: Vec<DeepgramParagraph>,
}

/// One paragraph.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeepgramParagraph {
    /// Sentences making up the paragraph.
    pub sentences: Vec<DeepgramSentence>,
    /// Seconds from audio start.
    pub start: f64,
    /// Seconds from audio start.
    pub end: f64,
    /// Diarization speaker index.
    pub speaker: Option<u32>,
    /// Paragraph-level sentiment label, when sentiment is on.
    pub sentiment: Option<String>,
}

/// One sentence within a paragraph.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeepgramSentence {
    /// Sentence text.
    pub text: String,
    /// Seconds from audio start.
    pub start: f64,
    /// Seconds from audio start.
    pub end: f64,
}

/// Topic detection output (`results.topics`).
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeepgramTopics {
    /// Detected topics.
    pub topics: Vec<DeepgramTopic>,
}

/// One detected topic.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeepgramTopic {
    /// Topic name.
    pub topic: String,
    /// Confidence in [0, 1] (renamed to `confidence` in the canonical shape).
    pub confidence_score: f64,
}

/// Sentiment analysis output (`results.sentiment`).
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeepgramSentiment {
    /// Per-span sentiment.
    pub segments: Vec<DeepgramSentimentSegment>,
}

/// Sentiment for one span.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeepgramSentimentSegment {
    /// Span text.
    pub text: String,
    /// Seconds from audio start, when present.
    pub start: Option<f64>,
    /// Seconds from audio start, when present.
    pub end: Option<f64>,
    /// Label: positive / negative / neutral.
    pub sentiment: String,
    /// Score in [-1, 1].
    pub sentiment_score: f64,
}
