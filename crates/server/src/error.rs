// crates/server/src/error.rs
use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use timesheet_core::ValidationError;
use timesheet_db::DbError;

/// Structured JSON error response for API errors
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

/// API error types that map to HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A category name or id in the payload does not exist.
    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(DbError),
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Validation(e) => ApiError::Validation(e),
            DbError::UnknownCategory(_) | DbError::UnknownCategoryId(_) => {
                ApiError::InvalidCategory(err.to_string())
            }
            DbError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            DbError::DuplicateCategory(_) => ApiError::Conflict(err.to_string()),
            other => ApiError::Database(other),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(format!("invalid id: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_response) = match &self {
            ApiError::Validation(err) => {
                tracing::warn!(field = err.field(), error = %err, "Validation failed");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::with_details("Validation failed", err.to_string()),
                )
            }
            ApiError::InvalidCategory(msg) => {
                tracing::warn!(message = %msg, "Invalid category reference");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::with_details("Invalid category", msg.clone()),
                )
            }
            ApiError::NotFound(msg) => {
                tracing::warn!(message = %msg, "Not found");
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse::with_details("Not found", msg.clone()),
                )
            }
            ApiError::Conflict(msg) => {
                tracing::warn!(message = %msg, "Conflict");
                (
                    StatusCode::CONFLICT,
                    ErrorResponse::with_details("Conflict", msg.clone()),
                )
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!(message = %msg, "Bad request");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::with_details("Bad request", msg.clone()),
                )
            }
            ApiError::Database(db_err) => {
                tracing::error!(error = %db_err, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("Database error"),
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
