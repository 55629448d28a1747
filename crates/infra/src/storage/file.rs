//! JSON file store
//!
//! All keys live in one JSON object. Every mutation rewrites the whole file
//! through a sibling temp file and a rename, so readers see either the old
//! or the new document and never a torn write.
//!
//! The write lock lives in the store instance. Two stores over the same
//! path, in one process or several, can lose each other's updates; share a
//! single instance, as `bootstrap::build_store` hands out, instead.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use acconfig_core::ConfigStore;
use acconfig_domain::Result;
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::errors::InfraError;

type Document = BTreeMap<String, String>;

/// `ConfigStore` backed by a single JSON file
#[derive(Debug)]
pub struct FileConfigStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles of this instance
    lock: Mutex<()>,
}

impl FileConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> Result<Document> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) if contents.trim().is_empty() => Ok(Document::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Document::new()),
            Err(err) => Err(InfraError::from(err).into()),
        }
    }

    async fn write_document(&self, document: &Document) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(InfraError::from)?;
        }

        let contents = serde_json::to_vec_pretty(document)?;
        let tmp = self.temp_path();
        tokio::fs::write(&tmp, contents).await.map_err(InfraError::from)?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(InfraError::from)?;

        debug!(path = %self.path.display(), keys = document.len(), "Store file written");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl ConfigStore for FileConfigStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().await;
        let mut document = self.read_document().await?;
        Ok(document.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut document = self.read_document().await?;
        document.insert(key.to_string(), value.to_string());
        self.write_document(&document).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut document = self.read_document().await?;
        if document.remove(key).is_none() {
            return Ok(());
        }
        self.write_document(&document).await
    }
}
