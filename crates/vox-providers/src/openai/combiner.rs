//! Merge per-chunk Whisper results onto one timeline.
//!
//! Chunk boundaries are byte-based, so each chunk reports timestamps
//! relative to its own start. The combiner rebases every chunk by a running
//! offset — the rebased end of the previous chunk's final segment — and
//! sorts once at the end so the merged timeline is monotonic even when a
//! chunk comes back internally unordered.

use serde_json::Value;

use vox_core::Transcription;

/// Combine chunk results in the order the chunks were produced.
///
/// A single chunk passes through untouched, original `raw` included. For
/// multiple chunks the texts join with a single space and `raw` becomes the
/// array of per-chunk raw bodies. Overall confidence is the mean across
/// chunks; language comes from the first chunk that reports one.
#[must_use]
pub fn combine(chunks: Vec<Transcription>) -> Transcription {
    if chunks.is_empty() {
        return Transcription::default();
    }
    if chunks.len() == 1 {
        let mut only = chunks;
        return only.remove(0);
    }

    let text = chunks
        .iter()
        .map(|c| c.text.as_str())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let confidence = chunks.iter().map(|c| c.confidence).sum::<f64>() / chunks.len() as f64;
    let language = chunks.iter().find_map(|c| c.language.clone());
    let raw = Value::Array(chunks.iter().map(|c| c.raw.clone()).collect());

    let mut segments = Vec::new();
    let mut offset = 0.0_f64;
    for chunk in chunks {
        let mut last_end = offset;
        for mut segment in chunk.segments {
            segment.start += offset;
            segment.end += offset;
            last_end = last_end.max(segment.end);
            segments.push(segment);
        }
        offset = last_end;
    }
    segments.sort_by(|a, b| a.start.total_cmp(&b.start));

    Transcription {
        text,
        confidence,
        language,
        segments,
        raw,
        ..Transcription::default()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
