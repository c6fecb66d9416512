//! Deepgram response → canonical [`Transcription`].
//!
//! Pure field remapping: no network, no options, deterministic. Malformed
//! but well-typed input (empty channels, missing alternatives) normalizes
//! to the all-empty canonical result — this path never errors.

use serde_json::Value;

use vox_core::{
    OverallSentiment, Paragraph, Segment, SentimentDistribution, SentimentLabel, SentimentSpan,
    SentimentSummary, Speaker, Topic, Transcription,
};

use super::types::{DeepgramResponse, DeepgramSentiment};

/// Normalize a raw Deepgram JSON body.
#[must_use]
pub fn normalize(raw: Value) -> Transcription {
    let Ok(parsed) = serde_json::from_value::<DeepgramResponse>(raw.clone()) else {
        return Transcription::empty(raw);
    };

    let Some(channel) = parsed.results.channels.first() else {
        return Transcription::empty(raw);
    };
    let Some(alt) = channel.alternatives.first() else {
        return Transcription::empty(raw);
    };

    // Distinct speakers in encounter order, rendered ascending.
    let mut speaker_ids: Vec<u32> = Vec::new();
    for word in &alt.words {
        if let Some(id) = word.speaker {
            if !speaker_ids.contains(&id) {
                speaker_ids.push(id);
            }
        }
    }
    speaker_ids.sort_unstable();

    let segments: Vec<Segment> = alt
        .words
        .iter()
        .map(|w| Segment {
            start: w.start,
            end: w.end,
            text: w.punctuated_word.clone().unwrap_or_else(|| w.word.clone()),
            speaker: w.speaker.map(Speaker::Index),
            confidence: w.confidence,
        })
        .collect();

    let paragraphs: Vec<Paragraph> = alt
        .paragraphs
        .as_ref()
        .map(|wrapper| {
            wrapper
                .paragraphs
                .iter()
                .map(|p| Paragraph {
                    start: p.start,
                    end: p.end,
                    text: p
                        .sentences
                        .iter()
                        .map(|s| s.text.as_str())
                        .collect::<Vec<_>>()
                        .join(" "),
                    speaker: p.speaker.map(Speaker::Index),
                    sentiment: p.sentiment.as_deref().map(SentimentLabel::parse),
                })
                .collect()
        })
        .unwrap_or_default();

    // Rename only: confidence_score → confidence, deduplicated by name.
    let mut topics: Vec<Topic> = Vec::new();
    if let Some(dg_topics) = &parsed.results.topics {
        for t in &dg_topics.topics {
            if !topics.iter().any(|seen| seen.topic == t.topic) {
                topics.push(Topic {
                    topic: t.topic.clone(),
                    confidence: t.confidence_score,
                });
            }
        }
    }

    let sentiment = parsed.results.sentiment.as_ref().and_then(summarize_sentiment);

    let language = parsed
        .results
        .metadata
        .as_ref()
        .and_then(|m| m.detected_language.clone())
        .or_else(|| channel.detected_language.clone());

    Transcription {
        text: alt.transcript.clone(),
        confidence: alt.confidence,
        language,
        speakers: speaker_ids.into_iter().map(Speaker::Index).collect(),
        segments,
        paragraphs,
        topics,
        sentiment,
        time_markers: Vec::new(),
        raw,
    }
}

/// Majority vote across span labels; overall confidence is the mean of the
/// span score magnitudes (scores live in [-1, 1]), not re-weighted by class.
fn summarize_sentiment(sentiment: &DeepgramSentiment) -> Option<SentimentSummary> {
    if sentiment.segments.is_empty() {
        return None;
    }

    let mut distribution = SentimentDistribution::default();
    let mut spans = Vec::with_capacity(sentiment.segments.len());
    let mut score_sum = 0.0f64;

    for seg in &sentiment.segments {
        let label = SentimentLabel::parse(&seg.sentiment);
        match label {
            SentimentLabel::Positive => distribution.positive += 1,
            SentimentLabel::Negative => distribution.negative += 1,
            SentimentLabel::Neutral => distribution.neutral += 1,
        }
        score_sum += seg.sentiment_score.abs();
        spans.push(SentimentSpan {
            text: seg.text.clone(),
            start: seg.start,
            end: seg.end,
            sentiment: label,
            score: seg.sentiment_score,
        });
    }

    let confidence = (score_sum / spans.len() as f64).clamp(0.0, 1.0);

    Some(SentimentSummary {
        overall: OverallSentiment {
            sentiment: distribution.majority(),
            confidence,
            distribution,
        },
        segments: spans,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rich_response() -> Value {
        json!({
            "metadata": {"request_id": "abc", "duration": 7.5},
            "results": {
                "metadata": {"detected_language": "en"},
                "channels": [{
                    "alternatives": [{
                        "transcript": "Hello there. How are you?",
                        "confidence": 0.97,
                        "words": [
                            {"word": "hello", "punctuated_word": "Hello", "start": 0.0, "end": 0.4, "confidence": 0.99, "speaker": 0},
                            {"word": "there", "punctuated_word": "there.", "start": 0.4, "end": 0.8, "confidence": 0.98, "speaker": 0},
                            {"word": "how", "punctuated_word": "How", "start": 1.2, "end": 1.5, "confidence": 0.95, "speaker": 1},
                            {"word": "are", "start": 1.5, "end": 1.7, "confidence": 0.96, "speaker": 1},
                            {"word": "you", "punctuated_word": "you?", "start": 1.7, "end": 2.0, "confidence": 0.97, "speaker": 0}
                        ],
                        "paragraphs": {
                            "paragraphs": [
                                {"sentences": [{"text": "Hello there.", "start": 0.0, "end": 0.8}], "start": 0.0, "end": 0.8, "speaker": 0, "sentiment": "positive"},
                                {"sentences": [{"text": "How are you?", "start": 1.2, "end": 2.0}], "start": 1.2, "end": 2.0, "speaker": 1}
                            ]
                        }
                    }]
                }],
                "topics": {
                    "topics": [
                        {"topic": "greetings", "confidence_score": 0.91},
                        {"topic": "weather", "confidence_score": 0.42},
                        {"topic": "greetings", "confidence_score": 0.11}
                    ]
                },
                "sentiment": {
                    "segments": [
                        {"text": "Hello there.", "start": 0.0, "end": 0.8, "sentiment": "positive", "sentiment_score": 0.6},
                        {"text": "How are you?", "start": 1.2, "end": 2.0, "sentiment": "neutral", "sentiment_score": 0.1}
                    ]
                }
            }
        })
    }

    // ── empty-input safety ──────────────────────────────────────────────

    #[test]
    fn empty_channels_normalize_to_empty_result() {
        let raw = json!({"results": {"channels": []}});
        let t = normalize(raw.clone());
        assert_eq!(t.text, "");
        assert_eq!(t.confidence, 0.0);
        assert!(t.speakers.is_empty());
        assert!(t.topics.is_empty());
        assert!(t.sentiment.is_none());
        assert_eq!(t.raw, raw);
    }

    #[test]
    fn empty_alternatives_normalize_to_empty_result() {
        let t = normalize(json!({"results": {"channels": [{"alternatives": []}]}}));
        assert_eq!(t.text, "");
        assert!(t.segments.is_empty());
    }

    #[test]
    fn missing_results_normalizes_to_empty_result() {
        let t = normalize(json!({}));
        assert_eq!(t.text, "");
        assert!(t.sentiment.is_none());
    }

    // ── speakers ────────────────────────────────────────────────────────

    #[test]
    fn speakers_are_unique_and_ascending() {
        let raw = json!({"results": {"channels": [{"alternatives": [{
            "transcript": "a b c",
            "confidence": 0.9,
            "words": [
                {"word": "a", "start": 0.0, "end": 0.1, "speaker": 1},
                {"word": "b", "start": 0.1, "end": 0.2, "speaker": 0},
                {"word": "c", "start": 0.2, "end": 0.3, "speaker": 1}
            ]
        }]}]}});
        let t = normalize(raw);
        assert_eq!(t.speakers, vec![Speaker::Index(0), Speaker::Index(1)]);
    }

    #[test]
    fn no_diarization_means_no_speakers() {
        let raw = json!({"results": {"channels": [{"alternatives": [{
            "transcript": "a",
            "confidence": 0.9,
            "words": [{"word": "a", "start": 0.0, "end": 0.1}]
        }]}]}});
        assert!(normalize(raw).speakers.is_empty());
    }

    // ── segments ────────────────────────────────────────────────────────

    #[test]
    fn segments_prefer_punctuated_form() {
        let t = normalize(rich_response());
        assert_eq!(t.segments[0].text, "Hello");
        assert_eq!(t.segments[1].text, "there.");
        // "are" has no punctuated form — raw word carried through
        assert_eq!(t.segments[3].text, "are");
        assert!(t.segments_ordered());
    }

    #[test]
    fn segments_carry_speaker_and_confidence() {
        let t = normalize(rich_response());
        assert_eq!(t.segments[2].speaker, Some(Speaker::Index(1)));
        assert_eq!(t.segments[0].confidence, Some(0.99));
    }

    // ── paragraphs ──────────────────────────────────────────────────────

    #[test]
    fn paragraphs_pass_through_with_renaming() {
        let t = normalize(rich_response());
        assert_eq!(t.paragraphs.len(), 2);
        assert_eq!(t.paragraphs[0].text, "Hello there.");
        assert_eq!(t.paragraphs[0].speaker, Some(Speaker::Index(0)));
        assert_eq!(t.paragraphs[0].sentiment, Some(SentimentLabel::Positive));
        assert_eq!(t.paragraphs[1].sentiment, None);
    }

    // ── topics ──────────────────────────────────────────────────────────

    #[test]
    fn topics_renamed_and_deduplicated() {
        let t = normalize(rich_response());
        assert_eq!(t.topics.len(), 2);
        assert_eq!(t.topics[0].topic, "greetings");
        assert_eq!(t.topics[0].confidence, 0.91);
        assert_eq!(t.topics[1].topic, "weather");
    }

    // ── sentiment ───────────────────────────────────────────────────────

    #[test]
    fn sentiment_majority_and_mean_confidence() {
        let t = normalize(rich_response());
        let s = t.sentiment.unwrap();
        assert_eq!(s.overall.sentiment, SentimentLabel::Positive);
        // mean(|0.6|, |0.1|) = 0.35
        assert!((s.overall.confidence - 0.35).abs() < 1e-9);
        assert_eq!(s.overall.distribution.positive, 1);
        assert_eq!(s.overall.distribution.neutral, 1);
        assert_eq!(s.segments.len(), 2);
    }

    #[test]
    fn sentiment_tie_breaks_positive_first() {
        let raw = json!({"results": {
            "channels": [{"alternatives": [{"transcript": "x", "confidence": 0.5, "words": []}]}],
            "sentiment": {"segments": [
                {"text": "great", "sentiment": "positive", "sentiment_score": 0.5},
                {"text": "awful", "sentiment": "negative", "sentiment_score": -0.5}
            ]}
        }});
        let s = normalize(raw).sentiment.unwrap();
        assert_eq!(s.overall.sentiment, SentimentLabel::Positive);
        assert_eq!(s.overall.distribution.positive, 1);
        assert_eq!(s.overall.distribution.negative, 1);
    }

    #[test]
    fn sentiment_absent_when_no_segments() {
        let raw = json!({"results": {
            "channels": [{"alternatives": [{"transcript": "x", "confidence": 0.5, "words": []}]}],
            "sentiment": {"segments": []}
        }});
        assert!(normalize(raw).sentiment.is_none());
    }

    // ── language / misc ─────────────────────────────────────────────────

    #[test]
    fn detected_language_from_results_metadata() {
        assert_eq!(normalize(rich_response()).language.as_deref(), Some("en"));
    }

    #[test]
    fn detected_language_from_channel_fallback() {
        let raw = json!({"results": {"channels": [{
            "detected_language": "es",
            "alternatives": [{"transcript": "hola", "confidence": 0.8, "words": []}]
        }]}});
        assert_eq!(normalize(raw).language.as_deref(), Some("es"));
    }

    #[test]
    fn raw_payload_is_retained() {
        let raw = rich_response();
        let t = normalize(raw.clone());
        assert_eq!(t.raw, raw);
    }

    #[test]
    fn normalization_is_idempotent() {
        let a = normalize(rich_response());
        let b = normalize(rich_response());
        assert_eq!(a, b);
    }
}
