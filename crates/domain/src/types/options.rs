//! Provider connection options

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Provider-specific connection parameters handed to the Session Engine
///
/// Persisted as opaque JSON. Missing fields deserialize to empty strings and
/// unrecognised fields are carried in `extra`, so a blob written by an older
/// or newer schema passes through unchanged; validation is left to the
/// engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProviderOptions {
    #[serde(alias = "clientID")]
    pub client_id: String,
    pub discovery_url: String,
    pub redirect_uri: String,
    pub logout_url: String,
    pub scope: String,
    pub audience: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProviderOptions {
    /// Create options with the core connection parameters
    pub fn new(
        client_id: impl Into<String>,
        discovery_url: impl Into<String>,
        redirect_uri: impl Into<String>,
        logout_url: impl Into<String>,
        scope: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            discovery_url: discovery_url.into(),
            redirect_uri: redirect_uri.into(),
            logout_url: logout_url.into(),
            scope: scope.into(),
            audience: audience.into(),
            extra: Map::new(),
        }
    }

    /// Replace redirect and logout URIs
    #[must_use]
    pub fn with_redirects(mut self, redirect_uri: &str, logout_url: &str) -> Self {
        self.redirect_uri = redirect_uri.to_string();
        self.logout_url = logout_url.to_string();
        self
    }

    /// Whether an audience is configured
    #[must_use]
    pub fn has_audience(&self) -> bool {
        !self.audience.is_empty()
    }
}
