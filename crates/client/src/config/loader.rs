//! Configuration loader.
//!
//! Loading strategy mirrors the rest of our tooling: environment variables
//! first, then a TOML config file, then built-in local defaults.
//!
//! ## Environment variables
//! - `LOSTFOUND_MODE`: deploy mode, `local` or `networked`
//! - `LOSTFOUND_API_BASE_URL`: base URL for the generic client
//! - `LOSTFOUND_USER_HOST` / `LOSTFOUND_ITEM_HOST` / `LOSTFOUND_CLAIM_HOST` /
//!   `LOSTFOUND_AUDIT_HOST`: per-service base URL overrides
//! - `LOSTFOUND_TIMEOUT_SECS`: transport timeout
//! - `LOSTFOUND_LOGOUT_DELAY_MS`: delay before session teardown on auth loss
//!
//! ## File locations
//! When no explicit path is given, probes `./lostfound.toml` and
//! `./config.toml` in the working directory, then one level up.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use super::{ClientConfig, DeployMode, HostTable, DEFAULT_API_BASE_URL};
use crate::errors::{ApiError, Result};

/// Load configuration with automatic fallback.
///
/// Tries the environment first (requires `LOSTFOUND_MODE` to be set), then a
/// config file in a standard location, then falls back to local-mode
/// defaults. `.env` files are honored.
pub fn load() -> Result<ClientConfig> {
    dotenvy::dotenv().ok();

    if std::env::var("LOSTFOUND_MODE").is_ok() {
        let config = load_from_env()?;
        tracing::info!(mode = %config.mode, "configuration loaded from environment");
        return Ok(config);
    }

    if let Some(path) = probe_config_paths() {
        tracing::info!(path = %path.display(), "configuration loaded from file");
        return load_from_file(path);
    }

    tracing::debug!("no configuration found, using local defaults");
    Ok(ClientConfig::default())
}

/// Load configuration from environment variables.
///
/// # Errors
/// Returns `ApiError::Config` if `LOSTFOUND_MODE` is missing or any variable
/// has an invalid value.
pub fn load_from_env() -> Result<ClientConfig> {
    let mode: DeployMode = env_var("LOSTFOUND_MODE")?.parse()?;
    let config = ClientConfig {
        mode,
        hosts: hosts_with_env_overrides(HostTable::for_mode(mode)),
        api_base_url: std::env::var("LOSTFOUND_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
        timeout: Duration::from_secs(env_u64("LOSTFOUND_TIMEOUT_SECS", 30)?),
        logout_delay: Duration::from_millis(env_u64("LOSTFOUND_LOGOUT_DELAY_MS", 1500)?),
    };
    Ok(config)
}

/// Load configuration from a TOML file.
///
/// Missing fields fall back to the defaults for the file's `mode` (itself
/// defaulting to `local`). Per-service environment overrides still apply on
/// top, so one teammate's host can be redirected without editing the file.
pub fn load_from_file(path: impl Into<PathBuf>) -> Result<ClientConfig> {
    let path = path.into();
    let contents = std::fs::read_to_string(&path).map_err(|e| {
        ApiError::Config(format!("failed to read config file {}: {e}", path.display()))
    })?;

    let file: ConfigFile = toml::from_str(&contents)
        .map_err(|e| ApiError::Config(format!("invalid TOML in {}: {e}", path.display())))?;

    let mode = file.mode.unwrap_or(DeployMode::Local);
    let defaults = HostTable::for_mode(mode);
    let hosts = HostTable {
        user: file.hosts.user.unwrap_or(defaults.user),
        item: file.hosts.item.unwrap_or(defaults.item),
        claim: file.hosts.claim.unwrap_or(defaults.claim),
        audit: file.hosts.audit.unwrap_or(defaults.audit),
    };

    Ok(ClientConfig {
        mode,
        hosts: hosts_with_env_overrides(hosts),
        api_base_url: file.api_base_url.unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
        timeout: Duration::from_secs(file.timeout_secs.unwrap_or(30)),
        logout_delay: Duration::from_millis(file.logout_delay_ms.unwrap_or(1500)),
    })
}

/// On-disk configuration shape.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    mode: Option<DeployMode>,
    #[serde(default)]
    hosts: ConfigFileHosts,
    api_base_url: Option<String>,
    timeout_secs: Option<u64>,
    logout_delay_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFileHosts {
    user: Option<String>,
    item: Option<String>,
    claim: Option<String>,
    audit: Option<String>,
}

fn hosts_with_env_overrides(mut hosts: HostTable) -> HostTable {
    if let Ok(host) = std::env::var("LOSTFOUND_USER_HOST") {
        hosts.user = host;
    }
    if let Ok(host) = std::env::var("LOSTFOUND_ITEM_HOST") {
        hosts.item = host;
    }
    if let Ok(host) = std::env::var("LOSTFOUND_CLAIM_HOST") {
        hosts.claim = host;
    }
    if let Ok(host) = std::env::var("LOSTFOUND_AUDIT_HOST") {
        hosts.audit = host;
    }
    hosts
}

fn probe_config_paths() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let candidates = [
        cwd.join("lostfound.toml"),
        cwd.join("config.toml"),
        cwd.join("../lostfound.toml"),
        cwd.join("../config.toml"),
    ];
    candidates.into_iter().find(|path| path.exists())
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| ApiError::Config(format!("missing required environment variable: {key}")))
}

fn env_u64(key: &str, default: u64) -> Result<u64> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<u64>()
            .map_err(|e| ApiError::Config(format!("invalid value for {key}: {e}"))),
        Err(_) => Ok(default),
    }
}
