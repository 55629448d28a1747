//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_KEYCHAIN_SERVICE;
use crate::types::Platform;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Platform override; detected from the build target when absent
    pub platform: Option<Platform>,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

/// Durable key-value storage backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process memory only; nothing survives a restart
    Memory,
    /// Single JSON file on disk
    #[default]
    File,
    /// Platform keychain, one entry per key
    Keychain,
}

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// File path for the file backend
    pub path: Option<String>,
    /// Service name for the keychain backend
    pub service_name: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: None,
            service_name: DEFAULT_KEYCHAIN_SERVICE.to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive string
    pub filter: String,
    /// Emit JSON lines instead of human readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: "info".to_string(), json: false }
    }
}
