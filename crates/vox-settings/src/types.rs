//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase")]` to match the JSON
//! wire format clients write. Each type implements [`Default`] with
//! production default values; `#[serde(default)]` allows partial JSON —
//! missing fields get their default during deserialization.

use serde::{Deserialize, Serialize};

/// Root settings type for the Vox server.
///
/// Loaded from `~/.vox/settings.json` with defaults applied for missing
/// fields. `VOX_*` environment variables override specific values.
///
/// # JSON Format
///
/// All field names are camelCase. Example:
///
/// ```json
/// {
///   "server": { "port": 9090 },
///   "providers": { "deepgram": { "apiKey": "dg-..." } }
/// }
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VoxSettings {
    /// Settings schema version.
    pub version: String,
    /// Application name.
    pub name: String,
    /// Server network settings.
    pub server: ServerSettings,
    /// Recording storage settings.
    pub storage: StorageSettings,
    /// Per-provider credentials and defaults.
    pub providers: ProvidersSettings,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

impl Default for VoxSettings {
    fn default() -> Self {
        Self {
            version: "0.1.0".to_string(),
            name: "vox".to_string(),
            server: ServerSettings::default(),
            storage: StorageSettings::default(),
            providers: ProvidersSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

/// Server network settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerSettings {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Maximum accepted upload size in bytes (decoded audio).
    pub max_upload_bytes: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            // 50 MB, matching the client-side recording cap
            max_upload_bytes: 50 * 1024 * 1024,
        }
    }
}

/// Recording storage settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StorageSettings {
    /// `filesystem` or `memory`.
    pub backend: StorageBackend,
    /// Root directory for the filesystem backend.
    pub root_dir: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Filesystem,
            root_dir: default_storage_dir(),
        }
    }
}

fn default_storage_dir() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    format!("{home}/.vox/recordings")
}

/// Which recording store backend to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Durable store on local disk.
    #[default]
    Filesystem,
    /// Volatile in-process store; survives nothing, needs no disk.
    Memory,
}

/// Per-provider credentials and the default provider choice.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProvidersSettings {
    /// Provider used when a request does not name one.
    pub default_provider: Option<String>,
    pub deepgram: ProviderCredentials,
    pub openai: ProviderCredentials,
    pub gemini: ProviderCredentials,
}

/// Credentials and endpoint override for one provider.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderCredentials {
    /// API key; empty means unconfigured.
    pub api_key: String,
    /// Endpoint origin override (tests, proxies).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Logging configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Default tracing filter when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
