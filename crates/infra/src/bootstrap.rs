//! Composition root
//!
//! Turns an [`AppConfig`] into a ready-to-use [`AuthenticationService`].
//! The Session Engine is always supplied by the caller.

use std::path::PathBuf;
use std::sync::Arc;

use acconfig_core::{AuthenticationService, ConfigStore, PlatformProvider, SessionEngine};
use acconfig_domain::constants::DEFAULT_STORE_FILE;
use acconfig_domain::{AcConfigError, AppConfig, Result, StorageBackend, StorageConfig};
use tracing::info;

use crate::platform::StaticPlatform;
use crate::storage::{FileConfigStore, KeychainConfigStore, MemoryConfigStore};

/// Build the store selected by `config`
///
/// # Errors
/// Returns `AcConfigError::Config` when the keychain backend has no
/// service name.
pub fn build_store(config: &StorageConfig) -> Result<Arc<dyn ConfigStore>> {
    let store: Arc<dyn ConfigStore> = match config.backend {
        StorageBackend::Memory => Arc::new(MemoryConfigStore::new()),
        StorageBackend::File => {
            let path = config
                .path
                .as_deref()
                .map_or_else(|| PathBuf::from(DEFAULT_STORE_FILE), PathBuf::from);
            info!(path = %path.display(), "Using file config store");
            Arc::new(FileConfigStore::new(path))
        }
        StorageBackend::Keychain => {
            if config.service_name.trim().is_empty() {
                return Err(AcConfigError::Config(
                    "keychain backend requires a service name".to_string(),
                ));
            }
            info!(service = %config.service_name, "Using keychain config store");
            Arc::new(KeychainConfigStore::new(config.service_name.clone()))
        }
    };
    Ok(store)
}

/// Build the platform port, honouring the configured override
#[must_use]
pub fn build_platform(config: &AppConfig) -> Arc<dyn PlatformProvider> {
    let platform = config.platform.map_or_else(StaticPlatform::detect, StaticPlatform::new);
    Arc::new(platform)
}

/// Wire store, platform and `engine` into a service
///
/// # Errors
/// Propagates [`build_store`] failures.
pub fn build_authentication_service(
    config: &AppConfig,
    engine: Arc<dyn SessionEngine>,
) -> Result<AuthenticationService> {
    let store = build_store(&config.storage)?;
    let platform = build_platform(config);
    info!(
        platform = %platform.platform(),
        backend = ?config.storage.backend,
        "Authentication service assembled"
    );
    Ok(AuthenticationService::new(store, engine, platform))
}
