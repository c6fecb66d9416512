//! # vox-settings
//!
//! Configuration loading for the Vox server.
//!
//! Settings come from three layers (in priority order):
//! 1. **Compiled defaults** — [`VoxSettings::default()`]
//! 2. **User file** — `~/.vox/settings.json` (deep-merged over defaults)
//! 3. **Environment variables** — `VOX_*` overrides (highest priority)
//!
//! Loading happens once at startup; the binary owns the resulting
//! [`VoxSettings`] value and hands the pieces other crates need to them
//! directly. There is no global.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path};
pub use types::*;
