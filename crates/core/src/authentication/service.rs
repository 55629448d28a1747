//! Authentication orchestrator
//!
//! Owns the session state and drives the Session Engine. Initialization is
//! lazy and single-flight: the first caller installs a shared future in the
//! init slot and every caller arriving before it completes awaits that same
//! future. A failed initialization hands its error to all of those callers
//! and resets the slot, so the next call starts over.

use std::fmt;
use std::sync::Arc;

use acconfig_domain::constants::AUTH_RESULT_KEY;
use acconfig_domain::presets::{default_selection, preset};
use acconfig_domain::{
    AcConfigError, AuthResult, EngineConfig, Flow, Provider, ProviderKind, ProviderOptions,
    Result,
};
use futures::future::{BoxFuture, FutureExt, Shared};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::ports::{ConfigStore, PlatformProvider, SessionEngine};
use super::providers::{IdentityProvider, ProviderFactory};
use super::resolver::ConfigResolver;

type InitFuture = Shared<BoxFuture<'static, Result<()>>>;

enum InitSlot {
    Uninitialized,
    Initializing(InitFuture),
    Ready,
}

/// Whether a session is held once the service is ready
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Anonymous,
    Authenticated,
}

/// Lifecycle position of an [`AuthenticationService`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    Uninitialized,
    Initializing,
    Ready(SessionStatus),
}

/// Everything the info page shows, minus the token itself
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub provider: Option<Provider>,
    pub flow: Option<Flow>,
    pub options: Option<ProviderOptions>,
    pub authenticated: bool,
    pub access_token_expired: bool,
    pub can_refresh: bool,
}

#[derive(Default)]
struct SessionState {
    auth_result: Option<AuthResult>,
    provider: Option<Arc<dyn IdentityProvider>>,
}

struct Inner {
    store: Arc<dyn ConfigStore>,
    engine: Arc<dyn SessionEngine>,
    platform: Arc<dyn PlatformProvider>,
    resolver: ConfigResolver,
    factory: ProviderFactory,
    init: parking_lot::Mutex<InitSlot>,
    /// Serializes the initialization body and configuration changes
    config_gate: tokio::sync::Mutex<()>,
    session: parking_lot::Mutex<SessionState>,
}

/// Client-side authentication orchestrator
///
/// Cheap to clone; clones share state.
#[derive(Clone)]
pub struct AuthenticationService {
    inner: Arc<Inner>,
}

impl AuthenticationService {
    pub fn new(
        store: Arc<dyn ConfigStore>,
        engine: Arc<dyn SessionEngine>,
        platform: Arc<dyn PlatformProvider>,
    ) -> Self {
        let resolver = ConfigResolver::new(Arc::clone(&store));
        Self {
            inner: Arc::new(Inner {
                store,
                engine,
                platform,
                resolver,
                factory: ProviderFactory::new(),
                init: parking_lot::Mutex::new(InitSlot::Uninitialized),
                config_gate: tokio::sync::Mutex::new(()),
                session: parking_lot::Mutex::new(SessionState::default()),
            }),
        }
    }

    /// Resolve configuration, set up the engine and restore any session
    ///
    /// Runs at most once; later calls return immediately.
    ///
    /// # Errors
    /// Storage, engine and unknown-provider errors from the shared run.
    pub async fn initialize(&self) -> Result<()> {
        let future = {
            let mut slot = self.inner.init.lock();
            match &*slot {
                InitSlot::Ready => return Ok(()),
                InitSlot::Initializing(future) => future.clone(),
                InitSlot::Uninitialized => {
                    let inner = Arc::clone(&self.inner);
                    let future = async move { inner.run_initialization().await }.boxed().shared();
                    *slot = InitSlot::Initializing(future.clone());
                    future
                }
            }
        };

        let result = future.clone().await;
        self.inner.settle(&future, &result);
        result
    }

    /// Interactive login; no-op when a session is already held
    ///
    /// # Errors
    /// Engine and storage failures. The session is unchanged on error.
    pub async fn login(&self) -> Result<()> {
        self.initialize().await?;
        if self.inner.auth_result().is_some() {
            debug!("Session already held, skipping login");
            return Ok(());
        }

        let provider = self.inner.provider_instance()?;
        let options = self.inner.resolver.options().await?.ok_or_else(|| {
            AcConfigError::Config("no provider options configured".to_string())
        })?;

        let result = self.inner.engine.login(provider.as_ref(), &options).await.map_err(|err| {
            warn!(provider = %provider.kind(), error = %err, "Login failed");
            err
        })?;
        self.inner.persist_auth_result(&result).await?;
        self.inner.session.lock().auth_result = Some(result);

        info!(provider = %provider.kind(), "Logged in");
        Ok(())
    }

    /// End the current session; no-op when anonymous
    ///
    /// # Errors
    /// Engine and storage failures. The session is unchanged on error.
    pub async fn logout(&self) -> Result<()> {
        self.initialize().await?;
        let Some(result) = self.inner.auth_result() else {
            debug!("No session held, skipping logout");
            return Ok(());
        };

        let provider = self.inner.provider_instance()?;
        self.inner.engine.logout(provider.as_ref(), &result).await.map_err(|err| {
            warn!(provider = %provider.kind(), error = %err, "Logout failed");
            err
        })?;
        self.inner.store.remove(AUTH_RESULT_KEY).await?;
        self.inner.session.lock().auth_result = None;

        info!(provider = %provider.kind(), "Logged out");
        Ok(())
    }

    /// Exchange the refresh token for a new result; no-op when anonymous
    ///
    /// # Errors
    /// Engine and storage failures. The session is unchanged on error.
    pub async fn refresh(&self) -> Result<()> {
        self.initialize().await?;
        let Some(result) = self.inner.auth_result() else {
            debug!("No session held, skipping refresh");
            return Ok(());
        };

        let provider = self.inner.provider_instance()?;
        let refreshed =
            self.inner.engine.refresh_session(provider.as_ref(), &result).await.map_err(|err| {
                warn!(provider = %provider.kind(), error = %err, "Session refresh failed");
                err
            })?;
        self.inner.persist_auth_result(&refreshed).await?;
        self.inner.session.lock().auth_result = Some(refreshed);

        debug!(provider = %provider.kind(), "Session refreshed");
        Ok(())
    }

    /// # Errors
    /// Initialization and engine failures.
    pub async fn is_authenticated(&self) -> Result<bool> {
        self.initialize().await?;
        match self.inner.auth_result() {
            Some(result) => self.inner.engine.is_access_token_available(&result).await,
            None => Ok(false),
        }
    }

    /// # Errors
    /// Initialization and engine failures.
    pub async fn can_refresh(&self) -> Result<bool> {
        self.initialize().await?;
        match self.inner.auth_result() {
            Some(result) => self.inner.engine.is_refresh_token_available(&result).await,
            None => Ok(false),
        }
    }

    /// # Errors
    /// Initialization and engine failures.
    pub async fn access_token_is_expired(&self) -> Result<bool> {
        self.initialize().await?;
        match self.inner.auth_result() {
            Some(result) => self.inner.engine.is_access_token_expired(&result).await,
            None => Ok(false),
        }
    }

    /// Access token of the current session
    ///
    /// # Errors
    /// Initialization failures.
    pub async fn get_access_token(&self) -> Result<Option<String>> {
        self.initialize().await?;
        Ok(self.inner.auth_result().map(|result| result.access_token))
    }

    /// Currently configured provider options
    ///
    /// # Errors
    /// Storage failures on the first read.
    pub async fn get_config(&self) -> Result<Option<ProviderOptions>> {
        self.inner.resolver.options().await
    }

    /// # Errors
    /// Storage failures on the first read.
    pub async fn get_flow(&self) -> Result<Option<Flow>> {
        self.inner.resolver.flow().await
    }

    /// # Errors
    /// Storage failures on the first read.
    pub async fn get_provider(&self) -> Result<Option<Provider>> {
        self.inner.resolver.provider().await
    }

    /// Replace provider, options and flow
    ///
    /// Valid in any state. A held session is kept. When called before
    /// initialization it also restores the persisted session and leaves the
    /// service ready.
    ///
    /// # Errors
    /// `UnknownProvider` before anything is written, then storage and
    /// engine setup failures. After a failure past validation the service
    /// holds no provider instance and initializes again on next use.
    pub async fn set_config(
        &self,
        provider: Provider,
        options: ProviderOptions,
        flow: Option<Flow>,
    ) -> Result<()> {
        let _gate = self.inner.config_gate.lock().await;
        self.inner.apply_config(&provider, &options, flow.as_ref()).await?;

        if !self.inner.is_ready() {
            self.inner.restore_auth_result().await?;
            *self.inner.init.lock() = InitSlot::Ready;
        }
        Ok(())
    }

    /// Apply the built-in tenant for `kind` on the current platform
    ///
    /// # Errors
    /// `Config` for kinds without a preset, otherwise as [`Self::set_config`].
    pub async fn use_preset(&self, kind: ProviderKind) -> Result<()> {
        let (provider, options, flow) = preset(kind, self.inner.platform.platform())?.into_parts();
        self.set_config(provider, options, flow).await
    }

    /// Combined view of the configuration and session queries
    ///
    /// # Errors
    /// Any failure of the underlying queries.
    pub async fn snapshot(&self) -> Result<SessionSnapshot> {
        let authenticated = self.is_authenticated().await?;
        let access_token_expired = self.access_token_is_expired().await?;
        let can_refresh = self.can_refresh().await?;

        Ok(SessionSnapshot {
            provider: self.get_provider().await?,
            flow: self.get_flow().await?,
            options: self.get_config().await?,
            authenticated,
            access_token_expired,
            can_refresh,
        })
    }

    /// Provider instance handed to the engine, once established
    #[must_use]
    pub fn identity_provider(&self) -> Option<Arc<dyn IdentityProvider>> {
        self.inner.session.lock().provider.clone()
    }

    #[must_use]
    pub fn state(&self) -> ServiceState {
        match &*self.inner.init.lock() {
            InitSlot::Uninitialized => ServiceState::Uninitialized,
            InitSlot::Initializing(_) => ServiceState::Initializing,
            InitSlot::Ready => {
                if self.inner.session.lock().auth_result.is_some() {
                    ServiceState::Ready(SessionStatus::Authenticated)
                } else {
                    ServiceState::Ready(SessionStatus::Anonymous)
                }
            }
        }
    }
}

impl fmt::Debug for AuthenticationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticationService")
            .field("state", &self.state())
            .field("platform", &self.inner.platform.platform())
            .finish_non_exhaustive()
    }
}

impl Inner {
    async fn run_initialization(&self) -> Result<()> {
        let _gate = self.config_gate.lock().await;
        // set_config may have completed setup while this run was queued
        if self.is_ready() {
            return Ok(());
        }

        let platform = self.platform.platform();
        info!(%platform, "Initializing authentication service");

        let provider = self.resolver.provider().await?;
        let options = self.resolver.options().await?;

        match (provider, options) {
            (Some(provider), Some(_)) => {
                let flow = self.resolver.flow().await?;
                let instance = self.factory.create(Some(&provider))?;
                self.establish(instance, flow.as_ref()).await?;
                self.restore_auth_result().await?;
            }
            _ => {
                info!(%platform, "No persisted configuration, applying default selection");
                let (provider, options, flow) = default_selection(platform).into_parts();
                self.apply_config(&provider, &options, flow.as_ref()).await?;
            }
        }

        Ok(())
    }

    /// Validate, persist, then set up the engine and swap the instance
    async fn apply_config(
        &self,
        provider: &Provider,
        options: &ProviderOptions,
        flow: Option<&Flow>,
    ) -> Result<()> {
        let instance = self.factory.create(Some(provider)).map_err(|err| {
            warn!(provider = %provider.key, "Rejected unregistered provider");
            err
        })?;
        let applied = async {
            self.resolver.set_config(provider, options, flow).await?;
            self.establish(instance, flow).await
        }
        .await;
        if let Err(err) = applied {
            self.discard_configuration().await;
            return Err(err);
        }

        info!(
            provider = %provider.key,
            flow = flow.map(|f| f.key.key()),
            "Provider configuration applied"
        );
        Ok(())
    }

    /// The instance becomes visible only after setup succeeded
    async fn establish(&self, instance: Arc<dyn IdentityProvider>, flow: Option<&Flow>) -> Result<()> {
        let config = EngineConfig::for_platform(self.platform.platform(), flow);
        self.engine.setup(&config).await?;
        debug!(
            provider = %instance.kind(),
            platform = %config.platform,
            flow = %config.web.auth_flow,
            "Session engine configured"
        );
        self.session.lock().provider = Some(instance);
        Ok(())
    }

    /// Drop the live instance after a failed change
    ///
    /// Storage may now hold part of the new selection, so the cache is
    /// dropped and a ready service goes back to uninitialized. The next
    /// operation sets up again from whatever was persisted.
    async fn discard_configuration(&self) {
        self.session.lock().provider = None;
        self.resolver.invalidate().await;

        let mut slot = self.init.lock();
        if matches!(*slot, InitSlot::Ready) {
            *slot = InitSlot::Uninitialized;
            warn!("Configuration change failed, service will initialize again");
        }
    }

    async fn restore_auth_result(&self) -> Result<()> {
        let restored = match self.store.get(AUTH_RESULT_KEY).await? {
            Some(raw) => Some(serde_json::from_str::<AuthResult>(&raw)?),
            None => None,
        };
        let authenticated = restored.is_some();
        self.session.lock().auth_result = restored;
        debug!(authenticated, "Session restored from storage");
        Ok(())
    }

    async fn persist_auth_result(&self, result: &AuthResult) -> Result<()> {
        let raw = serde_json::to_string(result)?;
        self.store.set(AUTH_RESULT_KEY, &raw).await
    }

    fn auth_result(&self) -> Option<AuthResult> {
        self.session.lock().auth_result.clone()
    }

    fn provider_instance(&self) -> Result<Arc<dyn IdentityProvider>> {
        self.session
            .lock()
            .provider
            .clone()
            .ok_or_else(|| AcConfigError::Internal("identity provider not established".to_string()))
    }

    fn is_ready(&self) -> bool {
        matches!(*self.init.lock(), InitSlot::Ready)
    }

    /// Record the outcome of `future` unless the slot has moved on
    fn settle(&self, future: &InitFuture, result: &Result<()>) {
        let mut slot = self.init.lock();
        let owned = matches!(&*slot, InitSlot::Initializing(current) if current.ptr_eq(future));
        if !owned {
            return;
        }

        *slot = match result {
            Ok(()) => InitSlot::Ready,
            Err(err) => {
                warn!(error = %err, "Initialization failed");
                InitSlot::Uninitialized
            }
        };
    }
}
