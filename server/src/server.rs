//! HTTP server wiring for the kvshelf service.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;

use super::config::ServerConfig;
use super::handlers::{self, AppState};
use super::metrics::Metrics;
use super::middleware::{MetricsLayer, TracingLayer};
use store::{create_backend, Backend};

/// The kvshelf HTTP server.
///
/// Owns the configuration, creates the storage backend at startup, and
/// serves the REST API until interrupted.
pub struct StoreServer {
    config: ServerConfig,
}

impl StoreServer {
    /// Create a server from configuration. Nothing is opened until
    /// [`run`](StoreServer::run).
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Creates the backend, binds the listen address, and serves until
    /// the process receives an interrupt.
    pub async fn run(&self) -> anyhow::Result<()> {
        let store = create_backend(&self.config.backend).await?;
        let metrics = Arc::new(Metrics::new());
        let app = build_router(store, metrics);

        let listener = TcpListener::bind(&self.config.listen_address).await?;
        tracing::info!(address = %self.config.listen_address, "kvshelf server listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("kvshelf server stopped");
        Ok(())
    }
}

/// Builds the production router: routes, middleware, and state.
pub fn build_router(store: Arc<dyn Backend>, metrics: Arc<Metrics>) -> Router {
    let state = AppState {
        store,
        metrics: metrics.clone(),
    };

    Router::new()
        .route("/", get(handlers::handle_list_namespaces))
        .route("/metrics", get(handlers::handle_metrics))
        .route("/-/healthy", get(handlers::handle_healthy))
        .route("/-/ready", get(handlers::handle_ready))
        .route(
            "/:namespace",
            get(handlers::handle_get_namespace).delete(handlers::handle_delete_namespace),
        )
        .route(
            "/:namespace/:key",
            get(handlers::handle_get)
                .post(handlers::handle_set)
                .delete(handlers::handle_delete),
        )
        .fallback(handlers::handle_not_found)
        .layer(MetricsLayer::new(metrics))
        .layer(TracingLayer::new())
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        // Returning would start a graceful shutdown, so a server without a
        // signal handler parks here and keeps serving.
        wait_forever().await;
    }
}

/// Never resolves. Stands in for the shutdown signal when no handler
/// could be registered.
async fn wait_forever() {
    std::future::pending::<()>().await
}
