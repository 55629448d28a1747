//! Shared helpers for `acconfig-infra` integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use acconfig_core::{IdentityProvider, SessionEngine};
use acconfig_domain::{AuthResult, EngineConfig, ProviderOptions, Result as DomainResult};
use async_trait::async_trait;

/// Session Engine stand-in that always succeeds.
#[derive(Default)]
pub struct StubEngine {
    setups: AtomicUsize,
    logins: AtomicUsize,
}

impl StubEngine {
    pub fn setups(&self) -> usize {
        self.setups.load(Ordering::SeqCst)
    }

    pub fn logins(&self) -> usize {
        self.logins.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionEngine for StubEngine {
    async fn setup(&self, _config: &EngineConfig) -> DomainResult<()> {
        self.setups.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn login(
        &self,
        provider: &dyn IdentityProvider,
        options: &ProviderOptions,
    ) -> DomainResult<AuthResult> {
        let n = self.logins.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(AuthResult::new(
            format!("{}-{}-{n}", provider.kind(), options.client_id),
            Some("refresh".to_string()),
            Some("id".to_string()),
        ))
    }

    async fn logout(&self, _provider: &dyn IdentityProvider, _result: &AuthResult) -> DomainResult<()> {
        Ok(())
    }

    async fn refresh_session(
        &self,
        _provider: &dyn IdentityProvider,
        result: &AuthResult,
    ) -> DomainResult<AuthResult> {
        Ok(AuthResult::new(format!("{}-refreshed", result.access_token), None, None))
    }

    async fn is_access_token_available(&self, _result: &AuthResult) -> DomainResult<bool> {
        Ok(true)
    }

    async fn is_access_token_expired(&self, _result: &AuthResult) -> DomainResult<bool> {
        Ok(false)
    }

    async fn is_refresh_token_available(&self, result: &AuthResult) -> DomainResult<bool> {
        Ok(result.refresh_token.is_some())
    }
}
