//! Shared test helpers for `acconfig-core` integration tests.
//!
//! Recording mocks for the storage, engine and platform ports so service
//! tests can assert on exactly which calls were made.

#![allow(dead_code)]

pub mod engine;
pub mod store;

use std::sync::Arc;

use acconfig_core::{AuthenticationService, PlatformProvider};
use acconfig_domain::Platform;

pub use engine::MockSessionEngine;
pub use store::RecordingStore;

/// Platform port pinned to one value
#[derive(Debug, Clone, Copy)]
pub struct FixedPlatform(pub Platform);

impl PlatformProvider for FixedPlatform {
    fn platform(&self) -> Platform {
        self.0
    }
}

/// Fresh service plus handles on its mocks
pub struct Harness {
    pub service: AuthenticationService,
    pub store: Arc<RecordingStore>,
    pub engine: Arc<MockSessionEngine>,
}

impl Harness {
    pub fn new(platform: Platform) -> Self {
        Self::with_store(platform, RecordingStore::default())
    }

    pub fn with_store(platform: Platform, store: RecordingStore) -> Self {
        let store = Arc::new(store);
        let engine = Arc::new(MockSessionEngine::default());
        let service = AuthenticationService::new(
            store.clone(),
            engine.clone(),
            Arc::new(FixedPlatform(platform)),
        );
        Self { service, store, engine }
    }
}
