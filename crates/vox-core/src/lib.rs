//! # vox-core
//!
//! Foundation types and utilities for the Vox transcription service.
//!
//! This crate provides the shared vocabulary all other vox crates depend on:
//!
//! - **Providers**: [`options::ProviderKind`] tagged union with per-variant default models
//! - **Options**: [`options::TranscriptionOptions`] request configuration
//! - **Canonical result**: [`result::Transcription`] — the single normalized
//!   shape every provider response maps into
//! - **Logging**: [`logging::init_tracing`] subscriber setup
//!
//! ## Crate Position
//!
//! Foundation crate. Depended on by all other vox crates.

#![deny(unsafe_code)]

pub mod logging;
pub mod options;
pub mod result;

pub use options::{ProviderKind, TopicMode, TranscriptionOptions};
pub use result::{
    OverallSentiment, Paragraph, Segment, SentimentDistribution, SentimentLabel, SentimentSpan,
    SentimentSummary, Speaker, Topic, Transcription,
};
