pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Body of every error response produced by the server and the gateway.
///
/// ```json
/// {
///   "code": 1004,
///   "error": "NOT_FOUND",
///   "message": "Item with id 42 not found",
///   "details": null
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Field errors for validation failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application error type that can be converted to HTTP responses.
///
/// Domain crates define their own `thiserror` enums and convert them into
/// this type at the handler boundary.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Query extraction error: {0}")]
    QueryRejection(#[from] QueryRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Invalid X-Sharer-User-Id header: {0}")]
    InvalidUserHeader(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::Database(e) => return map_db_error(&e),
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(
                    error_code = ErrorCode::JsonExtraction.code(),
                    "JSON extraction error: {:?}",
                    e
                );
                (
                    StatusCode::BAD_REQUEST,
                    ErrorCode::JsonExtraction,
                    e.body_text(),
                    None,
                )
            }
            AppError::QueryRejection(e) => {
                tracing::info!(error_code = ErrorCode::InvalidQuery.code(), "{}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorCode::InvalidQuery,
                    e.body_text(),
                    None,
                )
            }
            AppError::ValidationError(e) => {
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    "Validation error: {}",
                    e
                );
                (
                    StatusCode::BAD_REQUEST,
                    ErrorCode::ValidationError,
                    ErrorCode::ValidationError.default_message().to_string(),
                    Some(validation_details(&e)),
                )
            }
            AppError::InvalidId(msg) => {
                tracing::info!(error_code = ErrorCode::InvalidId.code(), "Invalid id: {}", msg);
                (StatusCode::BAD_REQUEST, ErrorCode::InvalidId, msg, None)
            }
            AppError::InvalidUserHeader(msg) => {
                tracing::info!(
                    error_code = ErrorCode::InvalidUserHeader.code(),
                    "Invalid user header: {}",
                    msg
                );
                (StatusCode::BAD_REQUEST, ErrorCode::InvalidUserHeader, msg, None)
            }
            AppError::BadRequest(msg) => {
                tracing::info!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, ErrorCode::BadRequest, msg, None)
            }
            AppError::Forbidden(msg) => {
                tracing::info!("Forbidden: {}", msg);
                (StatusCode::FORBIDDEN, ErrorCode::Forbidden, msg, None)
            }
            AppError::NotFound(msg) => {
                tracing::info!(
                    error_code = ErrorCode::NotFound.code(),
                    "Not found: {}",
                    msg
                );
                (StatusCode::NOT_FOUND, ErrorCode::NotFound, msg, None)
            }
            AppError::Conflict(msg) => {
                tracing::info!("Conflict: {}", msg);
                (StatusCode::CONFLICT, ErrorCode::Conflict, msg, None)
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(
                    error_code = ErrorCode::InternalError.code(),
                    "Internal server error: {}",
                    msg
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::InternalError,
                    ErrorCode::InternalError.default_message().to_string(),
                    None,
                )
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!("Service unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorCode::ServiceUnavailable,
                    msg,
                    None,
                )
            }
            AppError::UpstreamUnavailable(msg) => {
                tracing::warn!(
                    error_code = ErrorCode::UpstreamUnavailable.code(),
                    "Upstream unavailable: {}",
                    msg
                );
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorCode::UpstreamUnavailable,
                    ErrorCode::UpstreamUnavailable.default_message().to_string(),
                    None,
                )
            }
        };

        error_response(status, code, message, details)
    }
}

pub(crate) fn error_response(
    status: StatusCode,
    code: ErrorCode,
    message: String,
    details: Option<serde_json::Value>,
) -> Response {
    let body = Json(ErrorResponse {
        code: code.code(),
        error: code.as_str().to_string(),
        message,
        details,
    });

    (status, body).into_response()
}

/// Unique violations become 409, a missing row 404, everything else 500.
///
/// Driver messages are logged, never returned to the client.
fn map_db_error(error: &DbErr) -> Response {
    if let Some(SqlErr::UniqueConstraintViolation(detail)) = error.sql_err() {
        tracing::info!(
            error_code = ErrorCode::DatabaseUniqueViolation.code(),
            "Unique constraint violation: {}",
            detail
        );
        return error_response(
            StatusCode::CONFLICT,
            ErrorCode::DatabaseUniqueViolation,
            ErrorCode::DatabaseUniqueViolation.default_message().to_string(),
            None,
        );
    }

    if let DbErr::RecordNotFound(msg) = error {
        tracing::info!(error_code = ErrorCode::NotFound.code(), "Record not found: {}", msg);
        return error_response(
            StatusCode::NOT_FOUND,
            ErrorCode::NotFound,
            ErrorCode::NotFound.default_message().to_string(),
            None,
        );
    }

    tracing::error!(
        error_code = ErrorCode::DatabaseError.code(),
        "Database error: {:?}",
        error
    );
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorCode::DatabaseError,
        ErrorCode::DatabaseError.default_message().to_string(),
        None,
    )
}

/// Flattens `validator` errors into `{ field: [{code, message, params}] }`.
pub fn validation_details(errors: &ValidationErrors) -> serde_json::Value {
    let details = errors
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let error_messages: Vec<serde_json::Value> = errors
                .iter()
                .map(|err| {
                    serde_json::json!({
                        "code": err.code,
                        "message": err.message,
                        "params": err.params,
                    })
                })
                .collect();
            (field.to_string(), serde_json::json!(error_messages))
        })
        .collect::<serde_json::Map<_, _>>();

    serde_json::Value::Object(details)
}
