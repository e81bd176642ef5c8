//! HTTP error types for the kvshelf server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use store::Error;

/// Error wrapper for converting store errors to HTTP responses.
///
/// Every store error is a server-side failure: absence of a key or
/// namespace is a normal response, never an error, so nothing here maps to
/// 404.
pub struct ApiError(pub Error);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self.0 {
            Error::Malformed(_) => (StatusCode::INTERNAL_SERVER_ERROR, "malformed_data"),
            Error::Unavailable(_) => (StatusCode::INTERNAL_SERVER_ERROR, "backend_unavailable"),
            Error::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        };

        let body = serde_json::json!({
            "status": "error",
            "errorType": error_type,
            "error": self.0.to_string()
        });

        (status, Json(body)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}
