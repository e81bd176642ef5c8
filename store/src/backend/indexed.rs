//! Indexed backend keeping each entry as a relational row.

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait,
    FromQueryResult, QueryFilter, QueryOrder, QuerySelect, Schema, Set,
};
use serde_json::Value;

use super::entity::{self, Entity as Entry};
use super::Backend;
use crate::codec;
use crate::config::IndexedConfig;
use crate::error::{Error, Result};
use crate::model::{Entries, NamespaceInfo};

/// Storage backend that persists each entry as a row keyed by
/// `(namespace, key)`.
///
/// Values are stored as JSON text in the `value` column. Every mutation is
/// a single-row statement, so the database's row-level atomicity stands in
/// for the document backend's global lock: concurrent operations on
/// distinct entries never interfere, and same-entry writes resolve
/// last-write-wins. Per-key operations stay constant-time regardless of
/// total dataset size.
pub struct IndexedBackend {
    db: DatabaseConnection,
}

/// Row shape of the grouped namespace-count query.
#[derive(Debug, FromQueryResult)]
struct NamespaceRow {
    namespace: String,
    entries: i64,
}

impl IndexedBackend {
    /// Connects to the database and ensures the `entry` table exists.
    ///
    /// The table is created from the entity definition with
    /// `IF NOT EXISTS`, so connecting to an already-populated database is
    /// harmless.
    pub async fn connect(config: &IndexedConfig) -> Result<Self> {
        let mut options = ConnectOptions::new(config.url.clone());
        options.max_connections(config.max_connections);
        let db = Database::connect(options).await.map_err(|e| {
            Error::Unavailable(format!("Failed to connect to '{}': {}", config.url, e))
        })?;

        let builder = db.get_database_backend();
        let schema = Schema::new(builder);
        let mut table = schema.create_table_from_entity(Entry);
        table.if_not_exists();
        db.execute(builder.build(&table)).await.map_err(|e| {
            Error::Unavailable(format!("Failed to create entry table: {}", e))
        })?;

        tracing::debug!(url = %config.url, "Connected indexed backend");
        Ok(Self { db })
    }
}

#[async_trait]
impl Backend for IndexedBackend {
    #[tracing::instrument(level = "trace", skip_all)]
    async fn set(&self, namespace: &str, key: &str, value: Value) -> Result<()> {
        let model = entity::ActiveModel {
            namespace: Set(namespace.to_string()),
            key: Set(key.to_string()),
            value: Set(codec::encode_value(&value)?),
        };

        Entry::insert(model)
            .on_conflict(
                OnConflict::columns([entity::Column::Namespace, entity::Column::Key])
                    .update_column(entity::Column::Value)
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| Error::Unavailable(format!("Failed to upsert entry: {}", e)))?;
        Ok(())
    }

    #[tracing::instrument(level = "trace", skip_all)]
    async fn get(&self, namespace: &str, key: &str) -> Result<Option<Value>> {
        let row = Entry::find_by_id((namespace.to_string(), key.to_string()))
            .one(&self.db)
            .await
            .map_err(|e| Error::Unavailable(format!("Failed to read entry: {}", e)))?;

        match row {
            Some(model) => Ok(Some(codec::decode_value(&model.value)?)),
            None => Ok(None),
        }
    }

    #[tracing::instrument(level = "trace", skip_all)]
    async fn get_namespace(&self, namespace: &str) -> Result<Entries> {
        let rows = Entry::find()
            .filter(entity::Column::Namespace.eq(namespace))
            .all(&self.db)
            .await
            .map_err(|e| Error::Unavailable(format!("Failed to read namespace: {}", e)))?;

        let mut entries = Entries::new();
        for row in rows {
            let value = codec::decode_value(&row.value)?;
            entries.insert(row.key, value);
        }
        Ok(entries)
    }

    #[tracing::instrument(level = "trace", skip_all)]
    async fn delete(&self, namespace: &str, key: &str) -> Result<()> {
        Entry::delete_by_id((namespace.to_string(), key.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| Error::Unavailable(format!("Failed to delete entry: {}", e)))?;
        Ok(())
    }

    #[tracing::instrument(level = "trace", skip_all)]
    async fn delete_namespace(&self, namespace: &str) -> Result<()> {
        Entry::delete_many()
            .filter(entity::Column::Namespace.eq(namespace))
            .exec(&self.db)
            .await
            .map_err(|e| Error::Unavailable(format!("Failed to delete namespace: {}", e)))?;
        Ok(())
    }

    #[tracing::instrument(level = "trace", skip_all)]
    async fn list_namespaces(&self) -> Result<Vec<NamespaceInfo>> {
        let rows = Entry::find()
            .select_only()
            .column(entity::Column::Namespace)
            .column_as(entity::Column::Key.count(), "entries")
            .group_by(entity::Column::Namespace)
            .order_by_asc(entity::Column::Namespace)
            .into_model::<NamespaceRow>()
            .all(&self.db)
            .await
            .map_err(|e| Error::Unavailable(format!("Failed to list namespaces: {}", e)))?;

        Ok(rows
            .into_iter()
            .map(|row| NamespaceInfo {
                name: row.namespace,
                entries: row.entries as u64,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::{Arc, Mutex};

    use super::*;
    use serde_json::json;

    async fn memory_backend() -> IndexedBackend {
        let config = IndexedConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        };
        IndexedBackend::connect(&config).await.unwrap()
    }

    /// Subscriber that records the name of every span it sees.
    struct SpanRecorder {
        names: Arc<Mutex<Vec<&'static str>>>,
        next_id: AtomicU64,
    }

    impl tracing::Subscriber for SpanRecorder {
        fn enabled(&self, _metadata: &tracing::Metadata<'_>) -> bool {
            true
        }

        fn new_span(&self, span: &tracing::span::Attributes<'_>) -> tracing::span::Id {
            self.names.lock().unwrap().push(span.metadata().name());
            tracing::span::Id::from_u64(self.next_id.fetch_add(1, Ordering::Relaxed))
        }

        fn record(&self, _span: &tracing::span::Id, _values: &tracing::span::Record<'_>) {}
        fn record_follows_from(&self, _span: &tracing::span::Id, _follows: &tracing::span::Id) {}
        fn event(&self, _event: &tracing::Event<'_>) {}
        fn enter(&self, _span: &tracing::span::Id) {}
        fn exit(&self, _span: &tracing::span::Id) {}
    }

    #[tokio::test]
    async fn should_return_none_when_key_not_found() {
        // given
        let backend = memory_backend().await;

        // when
        let result = backend.get("missing", "nothing").await;

        // then
        assert_eq!(result.unwrap(), None);
    }

    #[tokio::test]
    async fn should_set_and_get_value() {
        // given
        let backend = memory_backend().await;
        let value = json!({"name": "John", "age": 30});

        // when
        backend.set("users", "john", value.clone()).await.unwrap();
        let result = backend.get("users", "john").await.unwrap();

        // then
        assert_eq!(result, Some(value));
    }

    #[tokio::test]
    async fn should_upsert_on_conflicting_key() {
        // given
        let backend = memory_backend().await;
        backend.set("users", "john", json!("first")).await.unwrap();

        // when
        backend.set("users", "john", json!("second")).await.unwrap();

        // then
        let result = backend.get("users", "john").await.unwrap();
        assert_eq!(result, Some(json!("second")));
        let namespaces = backend.list_namespaces().await.unwrap();
        assert_eq!(namespaces[0].entries, 1);
    }

    #[tokio::test]
    async fn should_list_namespaces_with_counts_in_order() {
        // given
        let backend = memory_backend().await;
        backend.set("zebra", "k1", json!(1)).await.unwrap();
        backend.set("alpha", "k1", json!(1)).await.unwrap();
        backend.set("alpha", "k2", json!(2)).await.unwrap();

        // when
        let namespaces = backend.list_namespaces().await.unwrap();

        // then
        assert_eq!(namespaces.len(), 2);
        assert_eq!(namespaces[0].name, "alpha");
        assert_eq!(namespaces[0].entries, 2);
        assert_eq!(namespaces[1].name, "zebra");
        assert_eq!(namespaces[1].entries, 1);
    }

    #[tokio::test]
    async fn should_delete_only_rows_of_the_target_namespace() {
        // given
        let backend = memory_backend().await;
        backend.set("users", "john", json!(1)).await.unwrap();
        backend.set("sessions", "john", json!(2)).await.unwrap();

        // when
        backend.delete_namespace("users").await.unwrap();

        // then
        assert_eq!(backend.get("users", "john").await.unwrap(), None);
        assert_eq!(backend.get("sessions", "john").await.unwrap(), Some(json!(2)));
    }

    #[tokio::test]
    async fn should_fail_with_malformed_when_stored_value_is_corrupt() {
        // given - a row written around the codec
        let backend = memory_backend().await;
        let model = entity::ActiveModel {
            namespace: Set("users".to_string()),
            key: Set("john".to_string()),
            value: Set("{broken".to_string()),
        };
        Entry::insert(model)
            .exec_without_returning(&backend.db)
            .await
            .unwrap();

        // when
        let result = backend.get("users", "john").await;

        // then
        assert!(matches!(result, Err(Error::Malformed(_))));
    }

    #[tokio::test]
    async fn should_open_a_span_for_each_operation() {
        // given
        let backend = memory_backend().await;
        let names = Arc::new(Mutex::new(Vec::new()));
        let recorder = SpanRecorder {
            names: names.clone(),
            next_id: AtomicU64::new(1),
        };
        let guard = tracing::subscriber::set_default(recorder);

        // when
        backend.set("users", "john", json!(1)).await.unwrap();
        backend.get("users", "john").await.unwrap();
        backend.get_namespace("users").await.unwrap();
        backend.list_namespaces().await.unwrap();
        backend.delete("users", "john").await.unwrap();
        backend.delete_namespace("users").await.unwrap();
        drop(guard);

        // then
        let seen = names.lock().unwrap();
        for operation in [
            "set",
            "get",
            "get_namespace",
            "list_namespaces",
            "delete",
            "delete_namespace",
        ] {
            assert!(seen.contains(&operation), "no span for {}", operation);
        }
    }
}
