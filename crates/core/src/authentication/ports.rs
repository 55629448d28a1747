//! Port interfaces for authentication

use acconfig_domain::{AuthResult, EngineConfig, Platform, ProviderOptions, Result};
use async_trait::async_trait;

use super::providers::IdentityProvider;

/// Durable key-value storage for configuration and session artifacts
///
/// Values are JSON-encoded strings. Each individual write is expected to be
/// atomic; nothing stronger is assumed.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Read a value, `None` when the key is absent
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a key (idempotent)
    async fn remove(&self, key: &str) -> Result<()>;
}

/// External OIDC client SDK (Auth Connect)
///
/// Token exchange, PKCE and discovery all happen behind this trait.
#[async_trait]
pub trait SessionEngine: Send + Sync {
    /// Configure the engine; called once per initialization and again after
    /// every configuration change
    async fn setup(&self, config: &EngineConfig) -> Result<()>;

    /// Run the interactive login against `provider`
    async fn login(
        &self,
        provider: &dyn IdentityProvider,
        options: &ProviderOptions,
    ) -> Result<AuthResult>;

    /// End the session represented by `result`
    async fn logout(&self, provider: &dyn IdentityProvider, result: &AuthResult) -> Result<()>;

    /// Exchange the refresh token in `result` for a new result
    async fn refresh_session(
        &self,
        provider: &dyn IdentityProvider,
        result: &AuthResult,
    ) -> Result<AuthResult>;

    async fn is_access_token_available(&self, result: &AuthResult) -> Result<bool>;

    async fn is_access_token_expired(&self, result: &AuthResult) -> Result<bool>;

    async fn is_refresh_token_available(&self, result: &AuthResult) -> Result<bool>;
}

/// Platform detection
pub trait PlatformProvider: Send + Sync {
    fn platform(&self) -> Platform;

    fn is_native(&self) -> bool {
        self.platform().is_native()
    }
}
