//! Identity provider capabilities and the provider factory
//!
//! A provider instance is what the Session Engine receives alongside the
//! connection options. It carries the per-vendor quirks of the OIDC
//! endpoints: extra authorize parameters and the end-session query shape.
//! Instances hold no state and do no I/O.

use std::fmt;
use std::sync::Arc;

use acconfig_domain::presets::DEFAULT_PROVIDER;
use acconfig_domain::{AuthResult, Provider, ProviderKind, ProviderOptions, Result};
use url::Url;

/// Query parameter list
pub type QueryParams = Vec<(String, String)>;

/// Provider capability consumed by the Session Engine
pub trait IdentityProvider: Send + Sync + fmt::Debug {
    fn kind(&self) -> ProviderKind;

    /// Extra parameters appended to the authorization request
    fn authorize_params(&self, _options: &ProviderOptions) -> QueryParams {
        Vec::new()
    }

    /// Parameters for the end-session (logout) request
    ///
    /// Defaults to RP-initiated logout as defined by OpenID Connect.
    fn end_session_params(&self, options: &ProviderOptions, result: &AuthResult) -> QueryParams {
        let mut params = Vec::new();
        if let Some(id_token) = &result.id_token {
            params.push(("id_token_hint".to_string(), id_token.clone()));
        }
        if !options.logout_url.is_empty() {
            params.push(("post_logout_redirect_uri".to_string(), options.logout_url.clone()));
        }
        params
    }

    /// Full end-session URL built from the discovered endpoint
    fn end_session_url(
        &self,
        endpoint: &Url,
        options: &ProviderOptions,
        result: &AuthResult,
    ) -> Url {
        let mut url = endpoint.clone();
        let params = self.end_session_params(options, result);
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &params {
                pairs.append_pair(name, value);
            }
        }
        url
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Auth0Provider;

impl IdentityProvider for Auth0Provider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Auth0
    }

    fn authorize_params(&self, options: &ProviderOptions) -> QueryParams {
        if options.has_audience() {
            vec![("audience".to_string(), options.audience.clone())]
        } else {
            Vec::new()
        }
    }

    // Auth0's /v2/logout predates RP-initiated logout
    fn end_session_params(&self, options: &ProviderOptions, _result: &AuthResult) -> QueryParams {
        let mut params = vec![("client_id".to_string(), options.client_id.clone())];
        if !options.logout_url.is_empty() {
            params.push(("returnTo".to_string(), options.logout_url.clone()));
        }
        params
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AzureProvider;

impl IdentityProvider for AzureProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Azure
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CognitoProvider;

impl IdentityProvider for CognitoProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Cognito
    }

    fn end_session_params(&self, options: &ProviderOptions, _result: &AuthResult) -> QueryParams {
        let mut params = vec![("client_id".to_string(), options.client_id.clone())];
        if !options.logout_url.is_empty() {
            params.push(("logout_uri".to_string(), options.logout_url.clone()));
        }
        params
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct OktaProvider;

impl IdentityProvider for OktaProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Okta
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct OneLoginProvider;

impl IdentityProvider for OneLoginProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OneLogin
    }
}

/// Maps registry keys onto provider instances
///
/// Every call hands out a new instance; nothing is pooled across
/// configuration changes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProviderFactory;

impl ProviderFactory {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Create the instance for a selected provider, cognito when none
    ///
    /// # Errors
    /// Returns `AcConfigError::UnknownProvider` for keys outside the registry.
    pub fn create(&self, provider: Option<&Provider>) -> Result<Arc<dyn IdentityProvider>> {
        let kind = match provider {
            Some(provider) => provider.kind()?,
            None => DEFAULT_PROVIDER,
        };
        Ok(self.for_kind(kind))
    }

    #[must_use]
    pub fn for_kind(&self, kind: ProviderKind) -> Arc<dyn IdentityProvider> {
        match kind {
            ProviderKind::Auth0 => Arc::new(Auth0Provider),
            ProviderKind::Azure => Arc::new(AzureProvider),
            ProviderKind::Cognito => Arc::new(CognitoProvider),
            ProviderKind::Okta => Arc::new(OktaProvider),
            ProviderKind::OneLogin => Arc::new(OneLoginProvider),
        }
    }
}
