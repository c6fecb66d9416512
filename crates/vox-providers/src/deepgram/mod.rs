//! Deepgram pre-recorded transcription provider.
//!
//! Follows the composition pattern shared across all providers:
//! `provider` (entry point), `types` (wire shapes), `normalizer`.

pub mod normalizer;
pub mod provider;
pub mod types;

pub use provider::{DeepgramConfig, DeepgramProvider};
