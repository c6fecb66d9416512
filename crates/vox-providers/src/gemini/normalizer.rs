//! Gemini prose → canonical [`Transcription`].
//!
//! Gemini returns a single text blob with no guaranteed structure. Speaker
//! labels are recovered line by line from a fixed leading pattern; bracketed
//! `[mm:ss]` tokens are collected into a flat auxiliary list (never attached
//! to segments — acknowledged as incomplete). Segment timestamps are never
//! recovered, so every segment carries zero timing.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use vox_core::{Segment, SentimentSummary, Speaker, Transcription, TranscriptionOptions};

use super::analysis;

/// Fixed overall confidence — Gemini never reports one.
pub const GEMINI_CONFIDENCE: f64 = 0.85;

fn speaker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(Speaker \d+|Person [A-Z]|[A-Z][a-z]+ ?\d*):\s*(.+)$")
            .expect("speaker regex is valid")
    })
}

fn time_marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[(\d{1,2}):(\d{2})\]").expect("time marker regex is valid"))
}

/// Normalize a Gemini prose transcript under the given options.
#[must_use]
pub fn normalize(text: &str, options: &TranscriptionOptions) -> Transcription {
    let mut speakers: Vec<Speaker> = Vec::new();
    let mut segments: Vec<Segment> = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(caps) = speaker_regex().captures(line) {
            let label = caps[1].trim().to_string();
            let spoken = caps[2].trim().to_string();
            let speaker = Speaker::Label(label);
            if !speakers.contains(&speaker) {
                speakers.push(speaker.clone());
            }
            segments.push(Segment {
                start: 0.0,
                end: 0.0,
                text: spoken,
                speaker: Some(speaker),
                confidence: None,
            });
        } else {
            segments.push(Segment {
                start: 0.0,
                end: 0.0,
                text: line.to_string(),
                speaker: None,
                confidence: None,
            });
        }
    }

    // Secondary flat scan — markers are not attached to segments.
    let time_markers: Vec<f64> = time_marker_regex()
        .captures_iter(text)
        .filter_map(|caps| {
            let minutes: f64 = caps[1].parse().ok()?;
            let seconds: f64 = caps[2].parse().ok()?;
            Some(minutes * 60.0 + seconds)
        })
        .collect();

    let sentiment = options.detect_sentiment.then(|| SentimentSummary {
        overall: analysis::score_sentiment(text),
        segments: Vec::new(),
    });

    let topics = if options.detect_topics {
        match options.topic_mode {
            vox_core::TopicMode::Strict => {
                analysis::match_custom_topics(text, &options.custom_topics)
            }
            vox_core::TopicMode::Extended => {
                let mut topics = analysis::match_custom_topics(text, &options.custom_topics);
                for detected in analysis::extract_topics(text) {
                    if !topics.iter().any(|t| t.topic == detected.topic) {
                        topics.push(detected);
                    }
                }
                topics
            }
            vox_core::TopicMode::Default => analysis::extract_topics(text),
        }
    } else {
        Vec::new()
    };

    let language = if options.detect_language {
        Some(analysis::detect_language(text).to_string())
    } else {
        options.language.clone()
    };

    Transcription {
        text: text.trim().to_string(),
        confidence: GEMINI_CONFIDENCE,
        language,
        speakers,
        segments,
        paragraphs: Vec::new(),
        topics,
        sentiment,
        time_markers,
        raw: Value::String(text.to_string()),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use vox_core::{ProviderKind, TopicMode};

    fn gemini_options() -> TranscriptionOptions {
        TranscriptionOptions::for_provider(ProviderKind::Gemini)
    }

    // ── speaker recovery ────────────────────────────────────────────────

    #[test]
    fn speaker_n_lines_become_labeled_segments() {
        let text = "Speaker 1: Hello everyone.\nSpeaker 2: Hi there.\nSpeaker 1: Shall we start?";
        let t = normalize(text, &gemini_options());
        assert_eq!(
            t.speakers,
            vec![
                Speaker::Label("Speaker 1".into()),
                Speaker::Label("Speaker 2".into())
            ]
        );
        assert_eq!(t.segments.len(), 3);
        assert_eq!(t.segments[0].text, "Hello everyone.");
        assert_eq!(t.segments[0].speaker, Some(Speaker::Label("Speaker 1".into())));
    }

    #[test]
    fn person_and_name_patterns_match() {
        let text = "Person A: First point.\nAlice: Second point.";
        let t = normalize(text, &gemini_options());
        assert_eq!(
            t.speakers,
            vec![
                Speaker::Label("Person A".into()),
                Speaker::Label("Alice".into())
            ]
        );
    }

    #[test]
    fn unlabeled_lines_become_plain_segments() {
        let text = "just some transcribed prose\nand another line";
        let t = normalize(text, &gemini_options());
        assert!(t.speakers.is_empty());
        assert_eq!(t.segments.len(), 2);
        assert_eq!(t.segments[0].speaker, None);
        assert_eq!(t.segments[0].text, "just some transcribed prose");
    }

    #[test]
    fn blank_lines_are_skipped() {
        let t = normalize("one\n\n\n   \ntwo", &gemini_options());
        assert_eq!(t.segments.len(), 2);
    }

    #[test]
    fn segments_never_carry_timestamps() {
        let t = normalize("Speaker 1: Hello [00:15] world", &gemini_options());
        assert!(t.segments.iter().all(|s| s.start == 0.0 && s.end == 0.0));
        assert!(t.segments_ordered());
    }

    // ── time markers ────────────────────────────────────────────────────

    #[test]
    fn bracketed_timestamps_collected_flat() {
        let text = "[00:05] intro\nSpeaker 1: body [01:30] continued\n[12:00] outro";
        let t = normalize(text, &gemini_options());
        assert_eq!(t.time_markers, vec![5.0, 90.0, 720.0]);
    }

    #[test]
    fn no_markers_means_empty_list() {
        let t = normalize("no timing here", &gemini_options());
        assert!(t.time_markers.is_empty());
    }

    // ── feature toggles ─────────────────────────────────────────────────

    #[test]
    fn sentiment_respects_toggle() {
        let mut opts = gemini_options();
        let t = normalize("a great day", &opts);
        assert!(t.sentiment.is_some());

        opts.detect_sentiment = false;
        let t = normalize("a great day", &opts);
        assert!(t.sentiment.is_none());
    }

    #[test]
    fn topics_respect_toggle_and_mode() {
        let text = "We reviewed Project Mercury and the Budget Review twice. Budget Review passed.";
        let mut opts = gemini_options();
        let t = normalize(text, &opts);
        assert!(t.topics.iter().any(|t| t.topic.contains("Mercury")));

        opts.topic_mode = TopicMode::Strict;
        opts.custom_topics = vec!["Budget Review".into(), "Headcount".into()];
        let t = normalize(text, &opts);
        assert_eq!(t.topics.len(), 1);
        assert_eq!(t.topics[0].topic, "Budget Review");

        opts.topic_mode = TopicMode::Extended;
        let t = normalize(text, &opts);
        assert!(t.topics.iter().any(|t| t.topic == "Budget Review"));
        assert!(t.topics.iter().any(|t| t.topic.contains("Mercury")));
        // No duplicate of the custom topic from detection
        assert_eq!(
            t.topics.iter().filter(|t| t.topic == "Budget Review").count(),
            1
        );
    }

    #[test]
    fn language_detection_vs_declared() {
        let mut opts = gemini_options();
        opts.detect_language = true;
        let t = normalize("la reunión era muy larga pero buena", &opts);
        assert_eq!(t.language.as_deref(), Some("es"));

        opts.detect_language = false;
        opts.language = Some("de".into());
        let t = normalize("whatever text", &opts);
        assert_eq!(t.language.as_deref(), Some("de"));
    }

    #[test]
    fn language_falls_back_to_english() {
        let mut opts = gemini_options();
        opts.detect_language = true;
        let t = normalize("zxcv qwerty asdf", &opts);
        assert_eq!(t.language.as_deref(), Some("en"));
    }

    // ── fixed fields ────────────────────────────────────────────────────

    #[test]
    fn confidence_is_fixed_constant() {
        let t = normalize("anything", &gemini_options());
        assert!((t.confidence - 0.85).abs() < f64::EPSILON);
    }

    #[test]
    fn raw_retains_original_prose() {
        let t = normalize("  padded text  ", &gemini_options());
        assert_eq!(t.raw, Value::String("  padded text  ".into()));
        assert_eq!(t.text, "padded text");
    }

    #[test]
    fn normalization_is_idempotent() {
        let text = "Speaker 1: Project Mercury was great. [00:10]\nSpeaker 2: Terrible budget though.";
        let opts = gemini_options();
        assert_eq!(normalize(text, &opts), normalize(text, &opts));
    }
}
