//! Platform keychain store
//!
//! One keychain entry per storage key under a shared service name. The
//! `keyring` calls block (Secret Service and Keychain Access both do IPC),
//! so every operation runs on the blocking pool.

use acconfig_core::ConfigStore;
use acconfig_domain::{AcConfigError, Result};
use async_trait::async_trait;
use keyring::Entry;
use tracing::debug;

use crate::errors::InfraError;

/// `ConfigStore` backed by the platform keychain
#[derive(Debug, Clone)]
pub struct KeychainConfigStore {
    service_name: String,
}

impl KeychainConfigStore {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self { service_name: service_name.into() }
    }

    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    async fn run<T, F>(&self, key: &str, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(Entry) -> std::result::Result<T, InfraError> + Send + 'static,
    {
        let service = self.service_name.clone();
        let user = key.to_string();

        tokio::task::spawn_blocking(move || {
            let entry = Entry::new(&service, &user).map_err(InfraError::from)?;
            op(entry)
        })
        .await
        .map_err(|e| AcConfigError::Internal(format!("keychain task failed: {e}")))?
        .map_err(Into::into)
    }
}

#[async_trait]
impl ConfigStore for KeychainConfigStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        debug!(service = %self.service_name, key, "Reading keychain entry");
        self.run(key, |entry| match entry.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(err) => Err(err.into()),
        })
        .await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        debug!(service = %self.service_name, key, "Writing keychain entry");
        let value = value.to_string();
        self.run(key, move |entry| entry.set_password(&value).map_err(InfraError::from)).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        debug!(service = %self.service_name, key, "Deleting keychain entry");
        self.run(key, |entry| match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(err) => Err(err.into()),
        })
        .await
    }
}
