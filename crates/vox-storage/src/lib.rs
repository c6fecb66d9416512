//! # vox-storage
//!
//! Recording storage behind one injectable seam.
//!
//! [`RecordingStore`] is the trait the HTTP layer talks to; it never knows
//! which backend is running. Two implementations:
//!
//! - [`FsStore`] — durable files under a root directory.
//! - [`MemoryStore`] — volatile in-process list, used when no disk is
//!   available and as the automatic fallback in tests.
//!
//! Handlers receive the store as `Arc<dyn RecordingStore>` from app state;
//! there is no global.

#![deny(unsafe_code)]

pub mod errors;
pub mod fs;
pub mod memory;
pub mod store;

pub use errors::{StoreError, StoreResult};
pub use fs::FsStore;
pub use memory::MemoryStore;
pub use store::{RecordingStore, StoredRecording, unique_pathname};
