//! Recording in-memory `ConfigStore`

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use acconfig_core::ConfigStore;
use acconfig_domain::{AcConfigError, Result as DomainResult};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Serialize;

/// Storage operation observed by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    Set(String),
    Remove(String),
}

/// In-memory store that counts reads and logs every mutation.
#[derive(Default)]
pub struct RecordingStore {
    values: Mutex<HashMap<String, String>>,
    reads: Mutex<HashMap<String, usize>>,
    ops: Mutex<Vec<StoreOp>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    failing_key: Mutex<Option<String>>,
}

impl RecordingStore {
    /// Seed a key with the JSON encoding of `value`.
    pub fn with_json<T: Serialize>(self, key: &str, value: &T) -> Self {
        let raw = serde_json::to_string(value).unwrap();
        self.values.lock().insert(key.to_string(), raw);
        self
    }

    /// Seed a key with a raw string.
    pub fn with_raw(self, key: &str, raw: &str) -> Self {
        self.values.lock().insert(key.to_string(), raw.to_string());
        self
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Fail only mutations of `key`
    pub fn fail_writes_to(&self, key: Option<&str>) {
        *self.failing_key.lock() = key.map(str::to_string);
    }

    fn check_write(&self, operation: &str, key: &str) -> DomainResult<()> {
        let targeted = self.failing_key.lock().as_deref() == Some(key);
        if targeted || self.fail_writes.load(Ordering::SeqCst) {
            return Err(AcConfigError::Storage(format!("{operation} of {key} failed")));
        }
        Ok(())
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.raw(key).map(|raw| serde_json::from_str(&raw).unwrap())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.lock().contains_key(key)
    }

    pub fn reads_of(&self, key: &str) -> usize {
        self.reads.lock().get(key).copied().unwrap_or(0)
    }

    pub fn ops(&self) -> Vec<StoreOp> {
        self.ops.lock().clone()
    }

    /// Mutations touching `key`
    pub fn ops_on(&self, key: &str) -> Vec<StoreOp> {
        self.ops()
            .into_iter()
            .filter(|op| match op {
                StoreOp::Set(k) | StoreOp::Remove(k) => k == key,
            })
            .collect()
    }
}

#[async_trait]
impl ConfigStore for RecordingStore {
    async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        *self.reads.lock().entry(key.to_string()).or_default() += 1;
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AcConfigError::Storage(format!("read of {key} failed")));
        }
        tokio::task::yield_now().await;
        Ok(self.values.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        self.check_write("write", key)?;
        self.values.lock().insert(key.to_string(), value.to_string());
        self.ops.lock().push(StoreOp::Set(key.to_string()));
        Ok(())
    }

    async fn remove(&self, key: &str) -> DomainResult<()> {
        self.check_write("remove", key)?;
        self.values.lock().remove(key);
        self.ops.lock().push(StoreOp::Remove(key.to_string()));
        Ok(())
    }
}
