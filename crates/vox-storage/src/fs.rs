//! Filesystem recording store.
//!
//! Flat layout: every recording is one file directly under the root
//! directory, named `{uuid}.{ext}`. No sidecar metadata — size and upload
//! time come from file metadata, content type from the extension.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::errors::{StoreError, StoreResult};
use crate::store::{
    RecordingStore, StoredRecording, content_type_for_pathname, url_for_pathname,
    validate_pathname,
};

/// Filesystem-backed [`RecordingStore`].
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        info!(root = %root.display(), "recording store opened");
        Ok(Self { root })
    }

    fn path_for(&self, pathname: &str) -> StoreResult<PathBuf> {
        validate_pathname(pathname)?;
        Ok(self.root.join(pathname))
    }

    fn record_for(path: &Path, metadata: &std::fs::Metadata) -> Option<StoredRecording> {
        let pathname = path.file_name()?.to_str()?.to_string();
        let uploaded_at: DateTime<Utc> = metadata.modified().ok()?.into();
        Some(StoredRecording {
            url: url_for_pathname(&pathname),
            content_type: content_type_for_pathname(&pathname),
            pathname,
            size: metadata.len(),
            uploaded_at,
        })
    }
}

#[async_trait]
impl RecordingStore for FsStore {
    async fn save(
        &self,
        pathname: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> StoreResult<StoredRecording> {
        let path = self.path_for(pathname)?;
        tokio::fs::write(&path, bytes).await?;
        debug!(pathname, size = bytes.len(), "recording saved to disk");
        Ok(StoredRecording {
            url: url_for_pathname(pathname),
            pathname: pathname.to_string(),
            size: bytes.len() as u64,
            uploaded_at: Utc::now(),
            content_type: content_type.to_string(),
        })
    }

    async fn list(&self) -> StoreResult<Vec<StoredRecording>> {
        let mut records = Vec::new();
        let mut dir = tokio::fs::read_dir(&self.root).await?;
        while let Some(entry) = dir.next_entry().await? {
            let metadata = entry.metadata().await?;
            if !metadata.is_file() {
                continue;
            }
            if let Some(record) = Self::record_for(&entry.path(), &metadata) {
                records.push(record);
            }
        }
        records.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        Ok(records)
    }

    async fn read(&self, pathname: &str) -> StoreResult<Vec<u8>> {
        let path = self.path_for(pathname)?;
        tokio::fs::read(&path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                StoreError::NotFound(pathname.to_string())
            } else {
                StoreError::Io(e)
            }
        })
    }

    async fn delete(&self, pathname: &str) -> StoreResult<()> {
        let path = self.path_for(pathname)?;
        tokio::fs::remove_file(&path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                StoreError::NotFound(pathname.to_string())
            } else {
                StoreError::Io(e)
            }
        })?;
        debug!(pathname, "recording deleted from disk");
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, FsStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::open(dir.path()).unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn save_writes_file_and_read_round_trips() {
        let (dir, store) = temp_store();
        let record = store.save("a.webm", "audio/webm", b"opus").await.unwrap();
        assert_eq!(record.size, 4);
        assert!(dir.path().join("a.webm").exists());
        assert_eq!(store.read("a.webm").await.unwrap(), b"opus");
    }

    #[tokio::test]
    async fn list_recovers_metadata_from_disk() {
        let (_dir, store) = temp_store();
        store.save("a.webm", "audio/webm", b"12345").await.unwrap();
        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].pathname, "a.webm");
        assert_eq!(listed[0].size, 5);
        assert_eq!(listed[0].content_type, "audio/webm");
        assert_eq!(listed[0].url, "/recordings/a.webm");
    }

    #[tokio::test]
    async fn delete_removes_file() {
        let (dir, store) = temp_store();
        store.save("a.wav", "audio/wav", b"x").await.unwrap();
        store.delete("a.wav").await.unwrap();
        assert!(!dir.path().join("a.wav").exists());

        let err = store.delete("a.wav").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn read_missing_is_not_found() {
        let (_dir, store) = temp_store();
        let err = store.read("ghost.wav").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn traversal_pathnames_never_touch_disk() {
        let (_dir, store) = temp_store();
        let err = store.save("../escape.wav", "audio/wav", b"x").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidPathname(_)));
        let err = store.delete("sub/dir.wav").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidPathname(_)));
    }

    #[tokio::test]
    async fn open_creates_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("deep").join("recordings");
        let store = FsStore::open(&nested).unwrap();
        assert!(nested.exists());
        assert!(store.list().await.unwrap().is_empty());
    }
}
