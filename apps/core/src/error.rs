use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Client-facing message for a request without `message` or `sessionId`.
pub const MISSING_FIELDS_MESSAGE: &str = "Mensaje y sessionId son requeridos";

/// Client-facing message for any internal fault.
pub const PROCESSING_ERROR_MESSAGE: &str = "Error procesando mensaje";

/// Application-wide error type, consolidating all possible errors into a single enum.
#[derive(Debug, Error, Clone)]
pub enum AppError {
    /// Represents invalid or missing request input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents errors specific to the actor system, such as communication failures.
    #[error("Actor error: {0}")]
    Actor(String),

    /// Represents failures of the session store backend.
    #[error("Session store error: {0}")]
    Store(String),

    /// Represents configuration-related errors (e.g., malformed environment variables).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents errors from operations that did not complete in time.
    #[error("Operation timed out: {0}")]
    Timeout(String),
}

impl From<tokio::time::error::Elapsed> for AppError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        AppError::Timeout(format!("Operation timed out: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Validation errors: {}", err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(_) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": MISSING_FIELDS_MESSAGE }),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": PROCESSING_ERROR_MESSAGE, "details": self.to_string() }),
            ),
        };
        (status, Json(body)).into_response()
    }
}
