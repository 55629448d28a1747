//! Scriptable `SessionEngine` mock

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use acconfig_core::{IdentityProvider, SessionEngine};
use acconfig_domain::{
    AcConfigError, AuthResult, EngineConfig, ProviderKind, ProviderOptions,
    Result as DomainResult,
};
use async_trait::async_trait;
use parking_lot::Mutex;

/// Engine mock counting calls, with per-operation failure switches.
///
/// `login` and `refresh_session` hand out numbered tokens
/// (`access-1`, `access-2`, ...) so tests can tell results apart.
pub struct MockSessionEngine {
    pub setup_calls: AtomicUsize,
    pub login_calls: AtomicUsize,
    pub logout_calls: AtomicUsize,
    pub refresh_calls: AtomicUsize,
    issued: AtomicUsize,
    setups: Mutex<Vec<EngineConfig>>,
    providers: Mutex<Vec<ProviderKind>>,
    fail_setup: AtomicBool,
    fail_login: AtomicBool,
    fail_logout: AtomicBool,
    fail_refresh: AtomicBool,
    token_available: AtomicBool,
    token_expired: AtomicBool,
}

impl Default for MockSessionEngine {
    fn default() -> Self {
        Self {
            setup_calls: AtomicUsize::new(0),
            login_calls: AtomicUsize::new(0),
            logout_calls: AtomicUsize::new(0),
            refresh_calls: AtomicUsize::new(0),
            issued: AtomicUsize::new(0),
            setups: Mutex::new(Vec::new()),
            providers: Mutex::new(Vec::new()),
            fail_setup: AtomicBool::new(false),
            fail_login: AtomicBool::new(false),
            fail_logout: AtomicBool::new(false),
            fail_refresh: AtomicBool::new(false),
            token_available: AtomicBool::new(true),
            token_expired: AtomicBool::new(false),
        }
    }
}

impl MockSessionEngine {
    pub fn setups(&self) -> Vec<EngineConfig> {
        self.setups.lock().clone()
    }

    pub fn last_setup(&self) -> Option<EngineConfig> {
        self.setups.lock().last().cloned()
    }

    /// Provider kinds passed to login/logout/refresh, in call order
    pub fn providers_seen(&self) -> Vec<ProviderKind> {
        self.providers.lock().clone()
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    pub fn fail_setup(&self, fail: bool) {
        self.fail_setup.store(fail, Ordering::SeqCst);
    }

    pub fn fail_login(&self, fail: bool) {
        self.fail_login.store(fail, Ordering::SeqCst);
    }

    pub fn fail_logout(&self, fail: bool) {
        self.fail_logout.store(fail, Ordering::SeqCst);
    }

    pub fn fail_refresh(&self, fail: bool) {
        self.fail_refresh.store(fail, Ordering::SeqCst);
    }

    pub fn set_token_available(&self, available: bool) {
        self.token_available.store(available, Ordering::SeqCst);
    }

    pub fn set_token_expired(&self, expired: bool) {
        self.token_expired.store(expired, Ordering::SeqCst);
    }

    fn issue(&self) -> AuthResult {
        let n = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        AuthResult::new(format!("access-{n}"), Some(format!("refresh-{n}")), Some(format!("id-{n}")))
    }

    fn check(flag: &AtomicBool, operation: &str) -> DomainResult<()> {
        if flag.load(Ordering::SeqCst) {
            Err(AcConfigError::Engine(format!("{operation} rejected")))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl SessionEngine for MockSessionEngine {
    async fn setup(&self, config: &EngineConfig) -> DomainResult<()> {
        self.setup_calls.fetch_add(1, Ordering::SeqCst);
        // Give concurrent callers a chance to pile up behind the first
        tokio::task::yield_now().await;
        Self::check(&self.fail_setup, "setup")?;
        self.setups.lock().push(config.clone());
        Ok(())
    }

    async fn login(
        &self,
        provider: &dyn IdentityProvider,
        _options: &ProviderOptions,
    ) -> DomainResult<AuthResult> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        self.providers.lock().push(provider.kind());
        Self::check(&self.fail_login, "login")?;
        Ok(self.issue())
    }

    async fn logout(&self, provider: &dyn IdentityProvider, _result: &AuthResult) -> DomainResult<()> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        self.providers.lock().push(provider.kind());
        Self::check(&self.fail_logout, "logout")
    }

    async fn refresh_session(
        &self,
        provider: &dyn IdentityProvider,
        _result: &AuthResult,
    ) -> DomainResult<AuthResult> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        self.providers.lock().push(provider.kind());
        Self::check(&self.fail_refresh, "refresh")?;
        Ok(self.issue())
    }

    async fn is_access_token_available(&self, _result: &AuthResult) -> DomainResult<bool> {
        Ok(self.token_available.load(Ordering::SeqCst))
    }

    async fn is_access_token_expired(&self, _result: &AuthResult) -> DomainResult<bool> {
        Ok(self.token_expired.load(Ordering::SeqCst))
    }

    async fn is_refresh_token_available(&self, result: &AuthResult) -> DomainResult<bool> {
        Ok(result.refresh_token.is_some())
    }
}
