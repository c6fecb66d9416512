//! Google Gemini transcription provider.
//!
//! Gemini returns prose, not structured data, so this branch carries its
//! own recovery pipeline: `provider` (entry point), `normalizer` (speaker
//! and timestamp scans), `analysis` (heuristic sentiment/topic/language
//! scoring as pure functions).

pub mod analysis;
pub mod normalizer;
pub mod provider;

pub use provider::{GeminiConfig, GeminiProvider};
