//! Runtime platform

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{AcConfigError, Result};

/// Platform the application is running on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Hybrid app inside a native shell (iOS/Android)
    Native,
    /// Plain browser
    Web,
}

impl Platform {
    /// Value of the engine's `platform` setup field
    #[must_use]
    pub const fn engine_name(self) -> &'static str {
        match self {
            Self::Native => "capacitor",
            Self::Web => "web",
        }
    }

    #[must_use]
    pub const fn is_native(self) -> bool {
        matches!(self, Self::Native)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => f.write_str("native"),
            Self::Web => f.write_str("web"),
        }
    }
}

impl FromStr for Platform {
    type Err = AcConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "native" | "hybrid" | "capacitor" | "mobile" => Ok(Self::Native),
            "web" | "browser" => Ok(Self::Web),
            other => Err(AcConfigError::Platform(format!("unknown platform: {other}"))),
        }
    }
}
