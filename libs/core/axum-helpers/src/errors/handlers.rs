use axum::response::{IntoResponse, Response};

use super::{AppError, ErrorCode};

/// Router fallback for unknown paths.
pub async fn not_found() -> Response {
    AppError::NotFound("The requested resource was not found".to_string()).into_response()
}

/// Handler for 405 Method Not Allowed errors.
pub async fn method_not_allowed() -> Response {
    super::error_response(
        axum::http::StatusCode::METHOD_NOT_ALLOWED,
        ErrorCode::MethodNotAllowed,
        ErrorCode::MethodNotAllowed.default_message().to_string(),
        None,
    )
}
