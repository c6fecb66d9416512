//! OpenAI Whisper transcription provider.
//!
//! Whisper has a 25 MB upload limit, so long recordings arrive as multiple
//! chunks. Each chunk is transcribed independently (`provider`) and the
//! per-chunk results are merged onto one timeline by `combiner`.

pub mod combiner;
pub mod provider;
pub mod types;

pub use combiner::combine;
pub use provider::{OpenAiConfig, OpenAiProvider};
