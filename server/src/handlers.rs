//! HTTP route handlers for the kvshelf server.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use super::error::ApiError;
use super::metrics::{Metrics, Operation, OperationLabels, OperationStatus};
use super::request::SetBody;
use super::response::{
    DeleteNamespaceResponse, DeleteResponse, GetResponse, ListNamespacesResponse, NamespaceEntry,
    NamespaceResponse, SetResponse,
};
use store::Backend;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Backend>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    fn record(&self, operation: Operation, status: OperationStatus) {
        self.metrics
            .store_operations_total
            .get_or_create(&OperationLabels { operation, status })
            .inc();
    }
}

/// Handle GET /
pub async fn handle_list_namespaces(
    State(state): State<AppState>,
) -> Result<Json<ListNamespacesResponse>, ApiError> {
    match state.store.list_namespaces().await {
        Ok(namespaces) => {
            state.record(Operation::ListNamespaces, OperationStatus::Success);
            let entries = namespaces.iter().map(NamespaceEntry::from).collect();
            Ok(Json(ListNamespacesResponse::success(entries)))
        }
        Err(e) => {
            state.record(Operation::ListNamespaces, OperationStatus::Error);
            Err(ApiError::from(e))
        }
    }
}

/// Handle GET /:namespace
pub async fn handle_get_namespace(
    State(state): State<AppState>,
    Path(namespace): Path<String>,
) -> Result<Json<NamespaceResponse>, ApiError> {
    match state.store.get_namespace(&namespace).await {
        Ok(entries) => {
            state.record(Operation::GetNamespace, OperationStatus::Success);
            Ok(Json(NamespaceResponse::success(namespace, entries)))
        }
        Err(e) => {
            state.record(Operation::GetNamespace, OperationStatus::Error);
            Err(ApiError::from(e))
        }
    }
}

/// Handle GET /:namespace/:key
pub async fn handle_get(
    State(state): State<AppState>,
    Path((namespace, key)): Path<(String, String)>,
) -> Result<Json<GetResponse>, ApiError> {
    match state.store.get(&namespace, &key).await {
        Ok(value) => {
            state.record(Operation::Get, OperationStatus::Success);
            Ok(Json(GetResponse::success(namespace, key, value)))
        }
        Err(e) => {
            state.record(Operation::Get, OperationStatus::Error);
            Err(ApiError::from(e))
        }
    }
}

/// Handle POST /:namespace/:key
pub async fn handle_set(
    State(state): State<AppState>,
    Path((namespace, key)): Path<(String, String)>,
    Json(body): Json<SetBody>,
) -> Result<Json<SetResponse>, ApiError> {
    match state.store.set(&namespace, &key, body.value).await {
        Ok(()) => {
            state.record(Operation::Set, OperationStatus::Success);
            Ok(Json(SetResponse::success(namespace, key)))
        }
        Err(e) => {
            state.record(Operation::Set, OperationStatus::Error);
            Err(ApiError::from(e))
        }
    }
}

/// Handle DELETE /:namespace/:key
pub async fn handle_delete(
    State(state): State<AppState>,
    Path((namespace, key)): Path<(String, String)>,
) -> Result<Json<DeleteResponse>, ApiError> {
    match state.store.delete(&namespace, &key).await {
        Ok(()) => {
            state.record(Operation::Delete, OperationStatus::Success);
            Ok(Json(DeleteResponse::success(namespace, key)))
        }
        Err(e) => {
            state.record(Operation::Delete, OperationStatus::Error);
            Err(ApiError::from(e))
        }
    }
}

/// Handle DELETE /:namespace
pub async fn handle_delete_namespace(
    State(state): State<AppState>,
    Path(namespace): Path<String>,
) -> Result<Json<DeleteNamespaceResponse>, ApiError> {
    match state.store.delete_namespace(&namespace).await {
        Ok(()) => {
            state.record(Operation::DeleteNamespace, OperationStatus::Success);
            Ok(Json(DeleteNamespaceResponse::success(namespace)))
        }
        Err(e) => {
            state.record(Operation::DeleteNamespace, OperationStatus::Error);
            Err(ApiError::from(e))
        }
    }
}

/// Handle GET /metrics
pub async fn handle_metrics(State(state): State<AppState>) -> String {
    state.metrics.encode()
}

/// Handle GET /-/healthy
pub async fn handle_healthy() -> &'static str {
    "OK"
}

/// Handle GET /-/ready
///
/// Readiness requires a live round trip through the storage backend.
pub async fn handle_ready(State(state): State<AppState>) -> (StatusCode, &'static str) {
    match state.store.list_namespaces().await {
        Ok(_) => (StatusCode::OK, "OK"),
        Err(_) => (StatusCode::SERVICE_UNAVAILABLE, "Storage unavailable"),
    }
}

/// Fallback for requests matching no route.
pub async fn handle_not_found() -> (StatusCode, Json<serde_json::Value>) {
    let body = serde_json::json!({
        "status": "error",
        "errorType": "bad_route",
        "error": "Unknown route"
    });
    (StatusCode::NOT_FOUND, Json(body))
}
