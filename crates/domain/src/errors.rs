//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for AC Config
///
/// Payloads are plain strings so the error can be cloned and handed to every
/// caller awaiting a shared initialization.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum AcConfigError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown identity provider: {0}")]
    UnknownProvider(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Session engine error: {0}")]
    Engine(String),

    #[error("Platform error: {0}")]
    Platform(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for AcConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type alias for AC Config operations
pub type Result<T> = std::result::Result<T, AcConfigError>;
