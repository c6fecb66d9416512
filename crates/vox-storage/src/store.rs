//! The [`RecordingStore`] trait and the record shape it serves.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::StoreResult;

/// One stored recording, as listed to clients.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRecording {
    /// Retrieval URL, `/recordings/{pathname}`.
    pub url: String,
    /// Store-relative file name; the delete key.
    pub pathname: String,
    /// Size in bytes.
    pub size: u64,
    /// Upload instant.
    pub uploaded_at: DateTime<Utc>,
    /// MIME type of the audio payload.
    pub content_type: String,
}

/// Storage seam for recordings.
///
/// `list` returns newest first. `delete` is keyed by pathname and errors
/// with [`crate::StoreError::NotFound`] when nothing matches.
#[async_trait]
pub trait RecordingStore: Send + Sync {
    /// Persist one recording under `pathname`.
    async fn save(
        &self,
        pathname: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> StoreResult<StoredRecording>;

    /// List all recordings, newest first.
    async fn list(&self) -> StoreResult<Vec<StoredRecording>>;

    /// Fetch one recording's bytes.
    async fn read(&self, pathname: &str) -> StoreResult<Vec<u8>>;

    /// Remove one recording.
    async fn delete(&self, pathname: &str) -> StoreResult<()>;
}

/// Generate a collision-free pathname for an upload.
///
/// The extension comes from the MIME subtype so the filesystem backend can
/// recover the content type on listing.
#[must_use]
pub fn unique_pathname(content_type: &str) -> String {
    let ext = match content_type {
        "audio/mp4" | "audio/m4a" | "audio/x-m4a" => "m4a",
        "audio/mpeg" | "audio/mp3" => "mp3",
        "audio/ogg" => "ogg",
        "audio/webm" => "webm",
        "audio/flac" => "flac",
        _ => "wav",
    };
    format!("{}.{ext}", Uuid::new_v4())
}

/// Recover a MIME type from a stored file's extension.
#[must_use]
pub fn content_type_for_pathname(pathname: &str) -> String {
    let ext = pathname.rsplit('.').next().unwrap_or_default();
    let mime = match ext {
        "m4a" => "audio/mp4",
        "mp3" => "audio/mpeg",
        "ogg" => "audio/ogg",
        "webm" => "audio/webm",
        "flac" => "audio/flac",
        _ => "audio/wav",
    };
    mime.to_string()
}

/// Build the retrieval URL for a pathname.
#[must_use]
pub fn url_for_pathname(pathname: &str) -> String {
    format!("/recordings/{pathname}")
}

/// Reject pathnames that could escape the store root.
pub fn validate_pathname(pathname: &str) -> StoreResult<()> {
    if pathname.is_empty()
        || pathname.contains('/')
        || pathname.contains('\\')
        || pathname.contains("..")
    {
        return Err(crate::StoreError::InvalidPathname(pathname.to_string()));
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
