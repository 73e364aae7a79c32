//! Request failure taxonomy and its JSON envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Every way a request can fail, each mapped to a status and a stable
/// `{"error": ...}` message. Nothing here is allowed to crash the serving
/// process; unclassified failures are caught and wrapped as [`Internal`].
///
/// [`Internal`]: ApiError::Internal
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("No URL provided")]
    MissingUrl,

    #[error("No question provided")]
    MissingQuery,

    /// Page-load timeout, driver failure, or nothing extractable; one
    /// user-facing class.
    #[error("Could not extract content from the provided URL")]
    ContentUnavailable,

    /// Question asked with no bound context in the session.
    #[error("Please scrape a website first")]
    NoSession,

    /// Inference backend failed; the upstream message is preserved.
    #[error("Inference backend error: {0}")]
    Backend(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingUrl
            | ApiError::MissingQuery
            | ApiError::ContentUnavailable
            | ApiError::NoSession => StatusCode::BAD_REQUEST,
            ApiError::Backend(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request.failed");
        } else {
            tracing::debug!(error = %self, "request.rejected");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
