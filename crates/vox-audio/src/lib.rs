//! # vox-audio
//!
//! Duration-based audio chunking for the `OpenAI` transcription path.
//!
//! This is deliberately a stub: chunk boundaries come from a byte-rate
//! estimate (WAV header when present, a flat ~16 kB/s guess otherwise),
//! never from silence analysis or codec work. Chunks are raw byte slices of
//! the original blob — good enough to drive per-chunk requests, acknowledged
//! as a simulation.
//!
//! ## Crate Position
//!
//! Standalone (no vox crate dependencies). Depended on by: vox-server.

#![deny(unsafe_code)]

pub mod chunker;
pub mod wav;

pub use chunker::{estimate_duration_seconds, split_chunks, MAX_CHUNK_SECONDS};
pub use wav::{probe_wav, WavInfo};
