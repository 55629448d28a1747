//! OIDC flow catalog

use std::fmt;

use serde::{Deserialize, Serialize};

/// OAuth2 grant/redirect strategy used for a web login
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FlowKind {
    /// Engine default when no flow is selected
    #[default]
    #[serde(rename = "implicit")]
    Implicit,
    #[serde(rename = "PKCE")]
    Pkce,
}

impl FlowKind {
    /// Every registered flow, in catalog order
    pub const ALL: [Self; 2] = [Self::Implicit, Self::Pkce];

    /// Wire key, also used as `web.authFlow` in the engine setup
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Implicit => "implicit",
            Self::Pkce => "PKCE",
        }
    }

    /// Human readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Implicit => "Implicit",
            Self::Pkce => "PKCE",
        }
    }
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Selected flow: key plus display label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flow {
    pub key: FlowKind,
    pub value: String,
}

impl Flow {
    /// Catalog entry for a flow kind
    #[must_use]
    pub fn from_kind(kind: FlowKind) -> Self {
        Self { key: kind, value: kind.label().to_string() }
    }
}

impl From<FlowKind> for Flow {
    fn from(kind: FlowKind) -> Self {
        Self::from_kind(kind)
    }
}

/// Catalog of every supported flow
#[must_use]
pub fn flows() -> Vec<Flow> {
    FlowKind::ALL.into_iter().map(Flow::from_kind).collect()
}
