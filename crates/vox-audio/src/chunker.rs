//! Duration-based blob slicing.
//!
//! The `OpenAI` path transcribes pieces of at most [`MAX_CHUNK_SECONDS`]
//! independently. Boundaries are byte offsets derived from the estimated
//! byte rate, aligned to the WAV block size when one is known.

use tracing::debug;

use crate::wav::probe_wav;

/// Maximum duration of a single chunk, in seconds.
pub const MAX_CHUNK_SECONDS: f64 = 100.0;

/// Flat byte-rate estimate for unknown containers (~16 kB/s of compressed
/// audio), used when no WAV header is present.
const FALLBACK_BYTES_PER_SEC: u32 = 16_000;

/// Estimate the duration of an audio blob in seconds.
///
/// Uses the WAV header when present, else the flat compressed-audio
/// estimate. Never fails; an empty blob estimates to zero.
#[must_use]
pub fn estimate_duration_seconds(audio: &[u8]) -> f64 {
    match probe_wav(audio) {
        Some(info) => info.duration_seconds(),
        None => audio.len() as f64 / f64::from(FALLBACK_BYTES_PER_SEC),
    }
}

/// Slice an audio blob into pieces of at most [`MAX_CHUNK_SECONDS`].
///
/// Blobs at or under the limit come back as a single chunk. Boundaries are
/// aligned down to the WAV block size when a header is present, so PCM
/// frames are never split. Chunks are raw byte ranges of the input — this
/// simulates chunked capture rather than producing standalone files.
#[must_use]
pub fn split_chunks(audio: &[u8]) -> Vec<Vec<u8>> {
    if audio.is_empty() {
        return Vec::new();
    }

    let (byte_rate, block_align) = match probe_wav(audio) {
        Some(info) => (info.byte_rate, u32::from(info.block_align.max(1))),
        None => (FALLBACK_BYTES_PER_SEC, 1),
    };

    let mut chunk_bytes = (f64::from(byte_rate) * MAX_CHUNK_SECONDS) as usize;
    chunk_bytes -= chunk_bytes % block_align as usize;
    let chunk_bytes = chunk_bytes.max(block_align as usize);

    if audio.len() <= chunk_bytes {
        return vec![audio.to_vec()];
    }

    let chunks: Vec<Vec<u8>> = audio.chunks(chunk_bytes).map(<[u8]>::to_vec).collect();
    debug!(
        total_bytes = audio.len(),
        chunk_bytes,
        chunk_count = chunks.len(),
        "split audio into duration-based chunks"
    );
    chunks
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
