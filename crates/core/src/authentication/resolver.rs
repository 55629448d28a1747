//! Cached access to the persisted provider selection

use std::fmt;
use std::sync::Arc;

use acconfig_domain::constants::{AUTH_FLOW_KEY, AUTH_PROVIDER_KEY, AUTH_PROVIDER_OPTIONS_KEY};
use acconfig_domain::{Flow, Provider, ProviderOptions, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::debug;

use super::ports::ConfigStore;

/// Cache slot; absence is remembered as well as values
#[derive(Debug, Clone)]
enum Cached<T> {
    Unread,
    Absent,
    Present(T),
}

impl<T: Clone> Cached<T> {
    fn resolved(&self) -> Option<Option<T>> {
        match self {
            Self::Unread => None,
            Self::Absent => Some(None),
            Self::Present(value) => Some(Some(value.clone())),
        }
    }
}

impl<T> From<Option<T>> for Cached<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Self::Present)
    }
}

/// Reads provider, options and flow from the store once and serves them
/// from memory afterwards
///
/// Each slot has its own async lock held across the store read, so
/// concurrent callers for the same key share a single read. A failed read
/// leaves the slot unread.
pub struct ConfigResolver {
    store: Arc<dyn ConfigStore>,
    provider: Mutex<Cached<Provider>>,
    options: Mutex<Cached<ProviderOptions>>,
    flow: Mutex<Cached<Flow>>,
}

impl ConfigResolver {
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self {
            store,
            provider: Mutex::new(Cached::Unread),
            options: Mutex::new(Cached::Unread),
            flow: Mutex::new(Cached::Unread),
        }
    }

    /// Persisted provider, `None` if never configured
    ///
    /// # Errors
    /// Propagates storage failures and malformed JSON.
    pub async fn provider(&self) -> Result<Option<Provider>> {
        self.resolve(&self.provider, AUTH_PROVIDER_KEY).await
    }

    /// Persisted provider options, `None` if never configured
    ///
    /// # Errors
    /// Propagates storage failures and malformed JSON.
    pub async fn options(&self) -> Result<Option<ProviderOptions>> {
        self.resolve(&self.options, AUTH_PROVIDER_OPTIONS_KEY).await
    }

    /// Persisted flow, `None` means the engine default
    ///
    /// # Errors
    /// Propagates storage failures and malformed JSON.
    pub async fn flow(&self) -> Result<Option<Flow>> {
        self.resolve(&self.flow, AUTH_FLOW_KEY).await
    }

    /// Replace the whole selection in storage and in memory
    ///
    /// Keys are written in the order provider, options, flow. Each slot is
    /// updated right after its own write succeeds, so on a partial failure
    /// memory still matches what the store holds.
    ///
    /// # Errors
    /// Returns the first storage or serialization failure.
    pub async fn set_config(
        &self,
        provider: &Provider,
        options: &ProviderOptions,
        flow: Option<&Flow>,
    ) -> Result<()> {
        let mut provider_slot = self.provider.lock().await;
        let mut options_slot = self.options.lock().await;
        let mut flow_slot = self.flow.lock().await;

        self.write(AUTH_PROVIDER_KEY, provider).await?;
        *provider_slot = Cached::Present(provider.clone());

        self.write(AUTH_PROVIDER_OPTIONS_KEY, options).await?;
        *options_slot = Cached::Present(options.clone());

        match flow {
            Some(flow) => {
                self.write(AUTH_FLOW_KEY, flow).await?;
                *flow_slot = Cached::Present(flow.clone());
            }
            None => {
                self.store.remove(AUTH_FLOW_KEY).await?;
                *flow_slot = Cached::Absent;
            }
        }

        debug!(
            provider = %provider.key,
            flow = flow.map(|f| f.key.key()),
            "Persisted provider configuration"
        );
        Ok(())
    }

    /// Drop every cached value so the next access reads the store again
    pub async fn invalidate(&self) {
        *self.provider.lock().await = Cached::Unread;
        *self.options.lock().await = Cached::Unread;
        *self.flow.lock().await = Cached::Unread;
    }

    async fn resolve<T>(&self, slot: &Mutex<Cached<T>>, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned + Clone,
    {
        let mut slot = slot.lock().await;
        if let Some(value) = slot.resolved() {
            return Ok(value);
        }

        debug!(key, "Config cache miss, reading store");
        let value = match self.store.get(key).await? {
            Some(raw) => Some(serde_json::from_str::<T>(&raw)?),
            None => None,
        };
        *slot = Cached::from(value.clone());
        Ok(value)
    }

    async fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw).await
    }
}

impl fmt::Debug for ConfigResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigResolver").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use acconfig_domain::{AcConfigError, FlowKind, ProviderKind};
    use async_trait::async_trait;

    use super::*;

    #[derive(Default)]
    struct CountingStore {
        values: parking_lot::Mutex<HashMap<String, String>>,
        reads: AtomicUsize,
        fail_reads: bool,
    }

    impl CountingStore {
        fn with(entries: &[(&str, &str)]) -> Self {
            let store = Self::default();
            for (key, value) in entries {
                store.values.lock().insert((*key).to_string(), (*value).to_string());
            }
            store
        }
    }

    #[async_trait]
    impl ConfigStore for CountingStore {
        async fn get(&self, key: &str) -> Result<Option<String>> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            if self.fail_reads {
                return Err(AcConfigError::Storage("read failed".to_string()));
            }
            Ok(self.values.lock().get(key).cloned())
        }

        async fn set(&self, key: &str, value: &str) -> Result<()> {
            self.values.lock().insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn remove(&self, key: &str) -> Result<()> {
            self.values.lock().remove(key);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_empty_store_resolves_to_none() {
        let resolver = ConfigResolver::new(Arc::new(CountingStore::default()));

        assert_eq!(resolver.provider().await.unwrap(), None);
        assert_eq!(resolver.options().await.unwrap(), None);
        assert_eq!(resolver.flow().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_absent_key_is_read_once() {
        let store = Arc::new(CountingStore::default());
        let resolver = ConfigResolver::new(store.clone());

        for _ in 0..3 {
            assert!(resolver.flow().await.unwrap().is_none());
        }
        assert_eq!(store.reads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_present_key_is_parsed_and_cached() {
        let store = Arc::new(CountingStore::with(&[(
            AUTH_PROVIDER_KEY,
            r#"{"key":"okta","value":"Okta"}"#,
        )]));
        let resolver = ConfigResolver::new(store.clone());

        let first = resolver.provider().await.unwrap();
        let second = resolver.provider().await.unwrap();

        assert_eq!(first, Some(Provider::from_kind(ProviderKind::Okta)));
        assert_eq!(first, second);
        assert_eq!(store.reads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_read_failure_is_not_cached() {
        let store = Arc::new(CountingStore { fail_reads: true, ..CountingStore::default() });
        let resolver = ConfigResolver::new(store.clone());

        assert!(resolver.provider().await.is_err());
        assert!(resolver.provider().await.is_err());
        assert_eq!(store.reads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_malformed_json_is_serialization_error() {
        let store = Arc::new(CountingStore::with(&[(AUTH_FLOW_KEY, "not json")]));
        let resolver = ConfigResolver::new(store);

        let err = resolver.flow().await.unwrap_err();
        assert!(matches!(err, AcConfigError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_set_config_without_flow_removes_it() {
        let store = Arc::new(CountingStore::with(&[(
            AUTH_FLOW_KEY,
            r#"{"key":"PKCE","value":"PKCE"}"#,
        )]));
        let resolver = ConfigResolver::new(store.clone());
        assert!(resolver.flow().await.unwrap().is_some());

        let provider = Provider::from_kind(ProviderKind::Azure);
        resolver.set_config(&provider, &ProviderOptions::default(), None).await.unwrap();

        assert!(resolver.flow().await.unwrap().is_none());
        assert!(!store.values.lock().contains_key(AUTH_FLOW_KEY));
        assert!(store.values.lock().contains_key(AUTH_PROVIDER_KEY));
    }

    #[tokio::test]
    async fn test_set_config_populates_cache_without_reads() {
        let store = Arc::new(CountingStore::default());
        let resolver = ConfigResolver::new(store.clone());
        let provider = Provider::from_kind(ProviderKind::Auth0);
        let options = ProviderOptions::new("id", "disc", "r", "l", "openid", "aud");
        let flow = Flow::from_kind(FlowKind::Implicit);

        resolver.set_config(&provider, &options, Some(&flow)).await.unwrap();

        assert_eq!(resolver.provider().await.unwrap(), Some(provider));
        assert_eq!(resolver.options().await.unwrap(), Some(options));
        assert_eq!(resolver.flow().await.unwrap(), Some(flow));
        assert_eq!(store.reads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_invalidate_forces_reread() {
        let store = Arc::new(CountingStore::default());
        let resolver = ConfigResolver::new(store.clone());

        resolver.provider().await.unwrap();
        resolver.invalidate().await;
        resolver.provider().await.unwrap();

        assert_eq!(store.reads.load(Ordering::SeqCst), 2);
    }
}
