//! Configuration for selecting and tuning a storage backend.

use serde::{Deserialize, Serialize};

/// Storage backend configuration.
///
/// Selects which backend [`create_backend`](crate::create_backend) builds
/// and carries its settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BackendConfig {
    /// Whole-dataset JSON document at a filesystem path.
    Document(DocumentConfig),
    /// Relational table reached through a database URL.
    Indexed(IndexedConfig),
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig::Document(DocumentConfig::default())
    }
}

/// Settings for the document backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// Path of the JSON document file. Created on the first write.
    pub path: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            path: "kvshelf.json".to_string(),
        }
    }
}

/// Settings for the indexed backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexedConfig {
    /// Database URL understood by the relational driver, e.g.
    /// `sqlite://kvshelf.db?mode=rwc` or `sqlite::memory:`.
    pub url: String,

    /// Maximum number of pooled connections.
    ///
    /// In-memory SQLite databases exist per connection, so they require a
    /// pool of exactly one. Raise this for file or server databases.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_document_config_from_toml() {
        // given
        let text = r#"
            type = "document"
            path = "data/shelf.json"
        "#;

        // when
        let config: BackendConfig = toml::from_str(text).unwrap();

        // then
        match config {
            BackendConfig::Document(document) => assert_eq!(document.path, "data/shelf.json"),
            other => panic!("expected document config, got {:?}", other),
        }
    }

    #[test]
    fn should_parse_indexed_config_with_default_pool_size() {
        // given
        let text = r#"
            type = "indexed"
            url = "sqlite::memory:"
        "#;

        // when
        let config: BackendConfig = toml::from_str(text).unwrap();

        // then
        match config {
            BackendConfig::Indexed(indexed) => {
                assert_eq!(indexed.url, "sqlite::memory:");
                assert_eq!(indexed.max_connections, 1);
            }
            other => panic!("expected indexed config, got {:?}", other),
        }
    }
}
