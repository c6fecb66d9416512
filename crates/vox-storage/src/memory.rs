//! Volatile in-process recording store.
//!
//! Used when the filesystem backend is disabled and as the test fallback.
//! Everything lives in one `RwLock`-guarded vector; dropping the store
//! drops the recordings.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use tracing::debug;

use crate::errors::{StoreError, StoreResult};
use crate::store::{
    RecordingStore, StoredRecording, url_for_pathname, validate_pathname,
};

struct Entry {
    record: StoredRecording,
    bytes: Vec<u8>,
}

/// In-memory [`RecordingStore`].
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<Vec<Entry>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordingStore for MemoryStore {
    async fn save(
        &self,
        pathname: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> StoreResult<StoredRecording> {
        validate_pathname(pathname)?;
        let record = StoredRecording {
            url: url_for_pathname(pathname),
            pathname: pathname.to_string(),
            size: bytes.len() as u64,
            uploaded_at: Utc::now(),
            content_type: content_type.to_string(),
        };
        let mut entries = self.entries.write();
        // Same pathname overwrites, matching the filesystem backend.
        entries.retain(|e| e.record.pathname != pathname);
        entries.push(Entry {
            record: record.clone(),
            bytes: bytes.to_vec(),
        });
        debug!(pathname, size = bytes.len(), "recording saved to memory");
        Ok(record)
    }

    async fn list(&self) -> StoreResult<Vec<StoredRecording>> {
        let mut indexed: Vec<(usize, StoredRecording)> = self
            .entries
            .read()
            .iter()
            .enumerate()
            .map(|(i, e)| (i, e.record.clone()))
            .collect();
        // Saves append, so equal timestamps fall back to insertion order.
        indexed.sort_by(|(ai, a), (bi, b)| {
            b.uploaded_at.cmp(&a.uploaded_at).then_with(|| bi.cmp(ai))
        });
        Ok(indexed.into_iter().map(|(_, record)| record).collect())
    }

    async fn read(&self, pathname: &str) -> StoreResult<Vec<u8>> {
        validate_pathname(pathname)?;
        self.entries
            .read()
            .iter()
            .find(|e| e.record.pathname == pathname)
            .map(|e| e.bytes.clone())
            .ok_or_else(|| StoreError::NotFound(pathname.to_string()))
    }

    async fn delete(&self, pathname: &str) -> StoreResult<()> {
        validate_pathname(pathname)?;
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|e| e.record.pathname != pathname);
        if entries.len() == before {
            return Err(StoreError::NotFound(pathname.to_string()));
        }
        debug!(pathname, "recording deleted from memory");
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
