//! Backend factory for creating storage backends from configuration.

use std::path::Path;
use std::sync::Arc;

use super::document::DocumentBackend;
use super::indexed::IndexedBackend;
use super::Backend;
use crate::config::BackendConfig;
use crate::error::{Error, Result};

/// Creates a storage backend based on the provided configuration.
///
/// The returned backend is the only handle on the persistent medium; open
/// it once at startup and share it behind the `Arc`.
///
/// # Errors
///
/// Returns an error if the backend cannot be initialized, e.g. the
/// document directory cannot be created or the database is unreachable.
pub async fn create_backend(config: &BackendConfig) -> Result<Arc<dyn Backend>> {
    match config {
        BackendConfig::Document(document) => {
            if let Some(parent) = Path::new(&document.path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        Error::Unavailable(format!(
                            "Failed to create document directory '{}': {}",
                            parent.display(),
                            e
                        ))
                    })?;
                }
            }
            Ok(Arc::new(DocumentBackend::new(document.path.clone())))
        }
        BackendConfig::Indexed(indexed) => {
            let backend = IndexedBackend::connect(indexed).await?;
            Ok(Arc::new(backend))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DocumentConfig, IndexedConfig};
    use serde_json::json;

    #[tokio::test]
    async fn should_create_document_backend_from_config() {
        // given
        let path = std::env::temp_dir()
            .join(format!("kvshelf_factory_{}", uuid::Uuid::new_v4()))
            .join("store.json");
        let config = BackendConfig::Document(DocumentConfig {
            path: path.to_string_lossy().into_owned(),
        });

        // when
        let backend = create_backend(&config).await.unwrap();
        backend.set("users", "john", json!(1)).await.unwrap();

        // then
        assert_eq!(backend.get("users", "john").await.unwrap(), Some(json!(1)));

        let _ = std::fs::remove_file(&path);
        if let Some(parent) = path.parent() {
            let _ = std::fs::remove_dir(parent);
        }
    }

    #[tokio::test]
    async fn should_create_indexed_backend_from_config() {
        // given
        let config = BackendConfig::Indexed(IndexedConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        });

        // when
        let backend = create_backend(&config).await.unwrap();
        backend.set("users", "john", json!(1)).await.unwrap();

        // then
        assert_eq!(backend.get("users", "john").await.unwrap(), Some(json!(1)));
    }
}
