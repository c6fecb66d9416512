//! Storage error types.

use thiserror::Error;

/// Errors surfaced by recording stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Disk-level failure in the filesystem backend.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// No recording with the given pathname.
    #[error("recording not found: {0}")]
    NotFound(String),
    /// Pathname contains separators, traversal, or is empty.
    #[error("invalid pathname: {0}")]
    InvalidPathname(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
