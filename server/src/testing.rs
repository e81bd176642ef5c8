//! Testing utilities for the kvshelf HTTP server.
//!
//! Provides helpers for integration tests that exercise HTTP endpoints
//! using Axum's `oneshot()` infrastructure against real storage backends.

use std::sync::Arc;

use axum::Router;

use crate::metrics::Metrics;
use crate::server::build_router;
use store::{Backend, IndexedBackend, IndexedConfig};

// Re-export response types so tests can deserialize response bodies.
pub use crate::response::{
    DeleteNamespaceResponse, DeleteResponse, GetResponse, ListNamespacesResponse, NamespaceEntry,
    NamespaceResponse, SetResponse,
};

/// Create an indexed backend on a fresh in-memory SQLite database.
pub async fn create_test_store() -> Arc<dyn Backend> {
    let config = IndexedConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
    };
    let backend = IndexedBackend::connect(&config)
        .await
        .expect("in-memory database should open");
    Arc::new(backend)
}

/// Build the production Axum router - same routes, middleware, and state
/// as [`StoreServer::run()`](crate::StoreServer::run) but without binding
/// to a TCP port.
pub fn build_app(store: Arc<dyn Backend>) -> Router {
    build_router(store, Arc::new(Metrics::new()))
}
