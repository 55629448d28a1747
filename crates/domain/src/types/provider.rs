//! Identity provider registry
//!
//! The set of supported identity providers is closed: every persisted
//! [`Provider`] key must map onto a [`ProviderKind`] before a provider
//! instance can be constructed for it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{AcConfigError, Result};

/// Supported identity provider integrations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Auth0,
    Azure,
    Cognito,
    Okta,
    OneLogin,
}

impl ProviderKind {
    /// Every registered kind, in catalog order
    pub const ALL: [Self; 5] = [Self::Auth0, Self::Azure, Self::Cognito, Self::Okta, Self::OneLogin];

    /// Registry key persisted in [`Provider::key`]
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Auth0 => "auth0",
            Self::Azure => "azure",
            Self::Cognito => "cognito",
            Self::Okta => "okta",
            Self::OneLogin => "onelogin",
        }
    }

    /// Human readable label shown in provider selectors
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Auth0 => "Auth0",
            Self::Azure => "Azure B2C",
            Self::Cognito => "Cognito (AWS)",
            Self::Okta => "Okta",
            Self::OneLogin => "OneLogin",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ProviderKind {
    type Err = AcConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.key() == s)
            .ok_or_else(|| AcConfigError::UnknownProvider(s.to_string()))
    }
}

/// Selected identity provider: registry key plus display label
///
/// The key is kept as a string so that whatever was persisted round-trips
/// untouched; it is validated against the registry via [`Provider::kind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub key: String,
    pub value: String,
}

impl Provider {
    /// Create a provider entry
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { key: key.into(), value: value.into() }
    }

    /// Registry entry for a known kind
    #[must_use]
    pub fn from_kind(kind: ProviderKind) -> Self {
        Self::new(kind.key(), kind.label())
    }

    /// Resolve the key against the registry
    ///
    /// # Errors
    /// Returns `AcConfigError::UnknownProvider` if the key is not registered.
    pub fn kind(&self) -> Result<ProviderKind> {
        self.key.parse()
    }
}

impl From<ProviderKind> for Provider {
    fn from(kind: ProviderKind) -> Self {
        Self::from_kind(kind)
    }
}

/// Catalog of every supported provider, for selector UIs
#[must_use]
pub fn providers() -> Vec<Provider> {
    ProviderKind::ALL.into_iter().map(Provider::from_kind).collect()
}
