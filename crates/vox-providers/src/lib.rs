//! # vox-providers
//!
//! Transcription provider clients and response normalization.
//!
//! Three backends hide behind one seam:
//!
//! - [`deepgram`] — pre-recorded audio API; rich structured JSON normalized
//!   by field remapping.
//! - [`openai`] — Whisper; each audio chunk transcribed independently and
//!   merged by [`openai::combiner`].
//! - [`gemini`] — returns prose; speakers, topics, sentiment, and language
//!   are recovered heuristically by [`gemini::analysis`].
//!
//! [`dispatch::transcribe`] routes a request to exactly one backend and
//! always yields the canonical [`vox_core::Transcription`] shape.
//!
//! ## Crate Position
//!
//! Depends on: vox-core. Depended on by: vox-server.

#![deny(unsafe_code)]

pub mod deepgram;
pub mod dispatch;
pub mod error_parsing;
pub mod gemini;
pub mod openai;
pub mod provider;

pub use dispatch::{transcribe, DispatchConfig};
pub use provider::{ProviderError, ProviderResult, Transcriber};
