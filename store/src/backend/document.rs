//! Document backend keeping the whole dataset in one JSON file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;
use tokio::sync::Mutex;

use super::Backend;
use crate::codec;
use crate::error::{Error, Result};
use crate::model::{Dataset, Entries, NamespaceInfo};

/// Storage backend that persists the entire dataset as a single JSON
/// document.
///
/// Every operation, reads included, loads and decodes the whole document;
/// mutations re-encode and rewrite it. One mutex serializes the full
/// load-mutate-store cycle so overlapping writers cannot lose each other's
/// updates. Writes land in a sibling temporary file and are renamed into
/// place, so a crash mid-write never leaves a half-written document.
///
/// Cost is linear in total dataset size by design. The backend suits small
/// datasets where a human-inspectable file beats query speed.
pub struct DocumentBackend {
    path: PathBuf,
    /// Guards the whole read-modify-write cycle, not just the file handle.
    lock: Mutex<()>,
}

impl DocumentBackend {
    /// Creates a backend reading and writing the document at `path`.
    ///
    /// The file is not touched until the first operation; a missing file
    /// reads as the empty dataset.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Loads and decodes the whole document.
    async fn load(&self) -> Result<Dataset> {
        match fs::read_to_string(&self.path).await {
            Ok(text) => codec::decode_dataset(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Dataset::new()),
            Err(e) => Err(Error::Unavailable(format!(
                "Failed to read document '{}': {}",
                self.path.display(),
                e
            ))),
        }
    }

    /// Encodes and rewrites the whole document via a temp file and rename.
    async fn store(&self, dataset: &Dataset) -> Result<()> {
        let text = codec::encode_dataset(dataset)?;
        let tmp = temp_path(&self.path);
        fs::write(&tmp, text).await.map_err(|e| {
            Error::Unavailable(format!(
                "Failed to write document '{}': {}",
                tmp.display(),
                e
            ))
        })?;
        fs::rename(&tmp, &self.path).await.map_err(|e| {
            Error::Unavailable(format!(
                "Failed to replace document '{}': {}",
                self.path.display(),
                e
            ))
        })
    }
}

/// Sibling temp path, so the final rename stays on one filesystem.
fn temp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_os_string();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

#[async_trait]
impl Backend for DocumentBackend {
    #[tracing::instrument(level = "trace", skip_all)]
    async fn set(&self, namespace: &str, key: &str, value: Value) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut dataset = self.load().await?;
        dataset
            .entry(namespace.to_string())
            .or_default()
            .insert(key.to_string(), value);
        self.store(&dataset).await
    }

    #[tracing::instrument(level = "trace", skip_all)]
    async fn get(&self, namespace: &str, key: &str) -> Result<Option<Value>> {
        let _guard = self.lock.lock().await;
        let dataset = self.load().await?;
        Ok(dataset
            .get(namespace)
            .and_then(|entries| entries.get(key))
            .cloned())
    }

    #[tracing::instrument(level = "trace", skip_all)]
    async fn get_namespace(&self, namespace: &str) -> Result<Entries> {
        let _guard = self.lock.lock().await;
        let dataset = self.load().await?;
        Ok(dataset.get(namespace).cloned().unwrap_or_default())
    }

    #[tracing::instrument(level = "trace", skip_all)]
    async fn delete(&self, namespace: &str, key: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut dataset = self.load().await?;
        let Some(entries) = dataset.get_mut(namespace) else {
            return Ok(());
        };
        if entries.remove(key).is_none() {
            return Ok(());
        }
        // An emptied namespace must disappear from the directory.
        if entries.is_empty() {
            dataset.remove(namespace);
        }
        self.store(&dataset).await
    }

    #[tracing::instrument(level = "trace", skip_all)]
    async fn delete_namespace(&self, namespace: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut dataset = self.load().await?;
        if dataset.remove(namespace).is_none() {
            return Ok(());
        }
        self.store(&dataset).await
    }

    #[tracing::instrument(level = "trace", skip_all)]
    async fn list_namespaces(&self) -> Result<Vec<NamespaceInfo>> {
        let _guard = self.lock.lock().await;
        let dataset = self.load().await?;
        Ok(dataset
            .iter()
            .map(|(name, entries)| NamespaceInfo {
                name: name.clone(),
                entries: entries.len() as u64,
            })
            .collect())
    }
}
