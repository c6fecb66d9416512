//! # vox
//!
//! Vox transcription server binary — loads settings, wires up the
//! recording store and provider dispatcher, and serves the HTTP API.

#![deny(unsafe_code)]

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use vox_server::state::AppState;

/// Vox transcription server.
#[derive(Parser, Debug)]
#[command(name = "vox", about = "Multi-provider voice transcription server")]
struct Cli {
    /// Host to bind (overrides settings).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides settings).
    #[arg(long)]
    port: Option<u16>,

    /// Path to the settings file (default: `~/.vox/settings.json`).
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Directory for stored recordings (overrides settings).
    #[arg(long)]
    storage_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    let settings_path = args.settings.unwrap_or_else(vox_settings::settings_path);
    let mut settings = vox_settings::load_settings_from_path(&settings_path)
        .with_context(|| format!("failed to load settings from {}", settings_path.display()))?;

    if let Some(host) = args.host {
        settings.server.host = host;
    }
    if let Some(port) = args.port {
        settings.server.port = port;
    }
    if let Some(dir) = args.storage_dir {
        settings.storage.root_dir = dir.to_string_lossy().into_owned();
    }

    vox_core::logging::init_tracing(&settings.logging.level);
    tracing::info!(settings = %settings_path.display(), "settings loaded");

    let metrics_handle = vox_server::metrics::install_recorder();

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("invalid host/port in settings")?;

    let state = AppState::from_settings(&settings).with_metrics(metrics_handle);

    vox_server::serve(state, addr)
        .await
        .context("server error")?;

    tracing::info!("shutdown complete");
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults_leave_settings_authoritative() {
        let cli = Cli::parse_from(["vox"]);
        assert_eq!(cli.host, None);
        assert_eq!(cli.port, None);
        assert_eq!(cli.settings, None);
    }

    #[test]
    fn cli_overrides_parse() {
        let cli = Cli::parse_from([
            "vox",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--storage-dir",
            "/tmp/vox-recs",
        ]);
        assert_eq!(cli.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(cli.port, Some(8080));
        assert_eq!(cli.storage_dir, Some(PathBuf::from("/tmp/vox-recs")));
    }

    #[test]
    fn cli_settings_path() {
        let cli = Cli::parse_from(["vox", "--settings", "/tmp/s.json"]);
        assert_eq!(cli.settings, Some(PathBuf::from("/tmp/s.json")));
    }
}
