//! Heuristic text analysis for prose transcripts.
//!
//! All functions here are pure and deterministic: fixed word lists, exact
//! counting, no external calls. They are keyword heuristics, not models —
//! documented as-is rather than dressed up as anything smarter.

use std::sync::OnceLock;

use regex::Regex;

use vox_core::{OverallSentiment, SentimentDistribution, SentimentLabel, Topic};

/// Words counted as positive signal (case-insensitive substring matches).
const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "happy", "love", "wonderful", "amazing", "fantastic",
    "awesome", "best", "nice", "thank", "pleased", "glad", "perfect", "enjoy",
];

/// Words counted as negative signal (case-insensitive substring matches).
const NEGATIVE_WORDS: &[&str] = &[
    "bad", "terrible", "awful", "sad", "hate", "horrible", "angry", "worst", "problem",
    "wrong", "unfortunately", "poor", "fail", "failed", "annoying", "broken",
];

/// Capitalized function words dropped from topic phrases.
const TOPIC_STOP_WORDS: &[&str] = &[
    "The", "This", "That", "These", "Those", "There", "Then", "They", "Their", "When",
    "Where", "What", "Which", "While", "Who", "Why", "How", "And", "But", "For", "Not",
    "With", "From", "Have", "Has", "Had", "Will", "Would", "Could", "Should", "Was",
    "Were", "Are", "You", "Our", "Your", "Also", "Just", "Very", "Speaker", "Person",
];

/// Small fixed vocabularies for language detection.
const ENGLISH_WORDS: &[&str] = &[
    "the", "and", "is", "are", "was", "were", "this", "that", "with", "have", "for",
    "not", "but", "you", "they", "what",
];
const SPANISH_WORDS: &[&str] = &[
    "el", "la", "los", "las", "es", "son", "era", "que", "con", "para", "una", "uno",
    "pero", "por", "como", "muy",
];
const FRENCH_WORDS: &[&str] = &[
    "le", "les", "est", "sont", "était", "avec", "pour", "une", "mais", "dans", "comme",
    "vous", "nous", "très", "je", "pas",
];

/// Maximum topics reported.
const MAX_TOPICS: usize = 10;

fn topic_run_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*").expect("topic regex is valid")
    })
}

/// Score overall sentiment by counting fixed-list keyword occurrences.
///
/// Label: positive if positive hits strictly exceed negative hits, negative
/// if reversed, else neutral. Confidence is the ad hoc scale
/// `min(0.9, |pos − neg| / word_count × 10)` — non-probabilistic by design.
#[must_use]
pub fn score_sentiment(text: &str) -> OverallSentiment {
    let lowered = text.to_lowercase();
    let positive: u32 = POSITIVE_WORDS
        .iter()
        .map(|w| lowered.matches(w).count() as u32)
        .sum();
    let negative: u32 = NEGATIVE_WORDS
        .iter()
        .map(|w| lowered.matches(w).count() as u32)
        .sum();

    let sentiment = if positive > negative {
        SentimentLabel::Positive
    } else if negative > positive {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    };

    let word_count = text.split_whitespace().count();
    let confidence = if word_count == 0 {
        0.0
    } else {
        (f64::from(positive.abs_diff(negative)) / word_count as f64 * 10.0).min(0.9)
    };

    OverallSentiment {
        sentiment,
        confidence,
        distribution: SentimentDistribution {
            positive,
            negative,
            neutral: 0,
        },
    }
}

/// Extract topics from capitalized word/phrase runs.
///
/// Stop-listed words and anything two characters or shorter are stripped
/// from each run; surviving phrases are deduplicated by exact string.
/// Confidence is a deterministic function of the occurrence count —
/// `min(0.95, 0.6 + 0.1 × (occurrences − 1))` — sorted descending, ties
/// broken by name, truncated to the top ten.
#[must_use]
pub fn extract_topics(text: &str) -> Vec<Topic> {
    // Phrase list in first-seen order with occurrence counts.
    let mut phrases: Vec<(String, u32)> = Vec::new();

    for run in topic_run_regex().find_iter(text) {
        let phrase: Vec<&str> = run
            .as_str()
            .split_whitespace()
            .filter(|w| w.len() > 2 && !TOPIC_STOP_WORDS.contains(w))
            .collect();
        if phrase.is_empty() {
            continue;
        }
        let phrase = phrase.join(" ");
        if let Some(entry) = phrases.iter_mut().find(|(p, _)| *p == phrase) {
            entry.1 += 1;
        } else {
            phrases.push((phrase, 1));
        }
    }

    let mut topics: Vec<Topic> = phrases
        .into_iter()
        .map(|(topic, count)| Topic {
            confidence: topic_confidence(count),
            topic,
        })
        .collect();
    topics.sort_by(|a, b| {
        b.confidence
            .total_cmp(&a.confidence)
            .then_with(|| a.topic.cmp(&b.topic))
    });
    topics.truncate(MAX_TOPICS);
    topics
}

/// Match user-supplied topics against the text, scored the same way as
/// detected topics. Matching is case-insensitive substring.
#[must_use]
pub fn match_custom_topics(text: &str, custom: &[String]) -> Vec<Topic> {
    let lowered = text.to_lowercase();
    let mut topics: Vec<Topic> = custom
        .iter()
        .filter_map(|topic| {
            let count = lowered.matches(&topic.to_lowercase()).count() as u32;
            (count > 0).then(|| Topic {
                topic: topic.clone(),
                confidence: topic_confidence(count),
            })
        })
        .collect();
    topics.sort_by(|a, b| {
        b.confidence
            .total_cmp(&a.confidence)
            .then_with(|| a.topic.cmp(&b.topic))
    });
    topics
}

fn topic_confidence(occurrences: u32) -> f64 {
    (0.6 + 0.1 * f64::from(occurrences.saturating_sub(1))).min(0.95)
}

/// Detect the dominant language from three fixed vocabularies.
///
/// Word-by-word exact matching after lowercasing and trimming punctuation.
/// Only a strictly highest count wins; ties and all-zero counts default to
/// English.
#[must_use]
pub fn detect_language(text: &str) -> &'static str {
    let mut en = 0u32;
    let mut es = 0u32;
    let mut fr = 0u32;

    for word in text.split_whitespace() {
        let word = word
            .trim_matches(|c: char| !c.is_alphabetic())
            .to_lowercase();
        if word.is_empty() {
            continue;
        }
        if ENGLISH_WORDS.contains(&word.as_str()) {
            en += 1;
        }
        if SPANISH_WORDS.contains(&word.as_str()) {
            es += 1;
        }
        if FRENCH_WORDS.contains(&word.as_str()) {
            fr += 1;
        }
    }

    if es > en && es > fr {
        "es"
    } else if fr > en && fr > es {
        "fr"
    } else {
        "en"
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
