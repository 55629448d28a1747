//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `ACCONFIG_STORAGE_BACKEND`: `memory`, `file` or `keychain` (required)
//! - `ACCONFIG_STORAGE_PATH`: Store file path for the file backend
//! - `ACCONFIG_KEYCHAIN_SERVICE`: Service name for the keychain backend
//! - `ACCONFIG_PLATFORM`: Platform override (`native`/`web`)
//! - `ACCONFIG_LOG_FILTER`: `EnvFilter` directives
//! - `ACCONFIG_LOG_JSON`: Emit JSON log lines (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./acconfig.json` or `./acconfig.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. `../acconfig.json` or `../acconfig.toml` (parent directory)
//! 4. `../../acconfig.json` or `../../acconfig.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};

use acconfig_domain::constants::DEFAULT_KEYCHAIN_SERVICE;
use acconfig_domain::{
    AcConfigError, AppConfig, LoggingConfig, Platform, Result, StorageBackend, StorageConfig,
};

use crate::errors::InfraError;

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the required
/// variable is missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `AcConfigError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
pub fn load() -> Result<AppConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// `ACCONFIG_STORAGE_BACKEND` must be present; everything else falls back
/// to defaults.
///
/// # Errors
/// Returns `AcConfigError::Config` if the backend is missing or unknown,
/// or `AcConfigError::Platform` for an unknown platform override.
pub fn load_from_env() -> Result<AppConfig> {
    let backend = env_var("ACCONFIG_STORAGE_BACKEND").and_then(|s| parse_backend(&s))?;
    let path = std::env::var("ACCONFIG_STORAGE_PATH").ok();
    let service_name = std::env::var("ACCONFIG_KEYCHAIN_SERVICE")
        .unwrap_or_else(|_| DEFAULT_KEYCHAIN_SERVICE.to_string());

    let platform = std::env::var("ACCONFIG_PLATFORM")
        .ok()
        .map(|s| s.parse::<Platform>())
        .transpose()?;

    let logging = LoggingConfig {
        filter: std::env::var("ACCONFIG_LOG_FILTER")
            .unwrap_or_else(|_| LoggingConfig::default().filter),
        json: env_bool("ACCONFIG_LOG_JSON", false),
    };

    Ok(AppConfig { platform, storage: StorageConfig { backend, path, service_name }, logging })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `AcConfigError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<AppConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(AcConfigError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            AcConfigError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path).map_err(InfraError::from)?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<AppConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => Ok(toml::from_str(contents).map_err(InfraError::from)?),
        "json" => Ok(serde_json::from_str(contents).map_err(InfraError::from)?),
        _ => Err(AcConfigError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the working directory, up to two parents, then the same
/// locations relative to the executable.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidates_in(dir: &Path) -> Vec<PathBuf> {
    vec![
        dir.join("acconfig.json"),
        dir.join("acconfig.toml"),
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("../acconfig.json"),
        dir.join("../acconfig.toml"),
        dir.join("../../acconfig.json"),
        dir.join("../../acconfig.toml"),
    ]
}

fn parse_backend(value: &str) -> Result<StorageBackend> {
    match value.to_ascii_lowercase().as_str() {
        "memory" => Ok(StorageBackend::Memory),
        "file" => Ok(StorageBackend::File),
        "keychain" => Ok(StorageBackend::Keychain),
        other => Err(AcConfigError::Config(format!("Invalid storage backend: {other}"))),
    }
}

/// Get required environment variable
///
/// # Errors
/// Returns `AcConfigError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        AcConfigError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
