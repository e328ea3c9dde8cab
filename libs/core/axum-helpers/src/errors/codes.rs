//! Error codes shared by the ShareIt server and gateway.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Machine-readable error identifiers.
///
/// Every [`ErrorResponse`](super::ErrorResponse) carries both the string
/// form (`error`) and the integer form (`code`). The integer ranges are
/// 1000-1999 for client errors, 2000-2999 for database errors and
/// 3000-3999 for upstream (gateway to server) errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Request validation failed
    ValidationError,
    /// Path id is not a positive integer
    InvalidId,
    /// Request body is not the expected JSON
    JsonExtraction,
    NotFound,
    InternalError,
    /// `X-Sharer-User-Id` header missing or malformed
    InvalidUserHeader,
    /// Caller is not allowed to act on the resource
    Forbidden,
    Conflict,
    /// Query string could not be parsed
    InvalidQuery,
    BadRequest,
    MethodNotAllowed,
    ServiceUnavailable,

    DatabaseError,
    DatabaseUniqueViolation,

    /// The ShareIt server could not be reached from the gateway
    UpstreamUnavailable,
}

impl ErrorCode {
    /// ```rust
    /// use axum_helpers::errors::ErrorCode;
    ///
    /// assert_eq!(ErrorCode::ValidationError.as_str(), "VALIDATION_ERROR");
    /// assert_eq!(ErrorCode::NotFound.as_str(), "NOT_FOUND");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidId => "INVALID_ID",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::InternalError => "INTERNAL_ERROR",
            Self::InvalidUserHeader => "INVALID_USER_HEADER",
            Self::Forbidden => "FORBIDDEN",
            Self::Conflict => "CONFLICT",
            Self::InvalidQuery => "INVALID_QUERY",
            Self::BadRequest => "BAD_REQUEST",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::DatabaseUniqueViolation => "DATABASE_UNIQUE_VIOLATION",
            Self::UpstreamUnavailable => "UPSTREAM_UNAVAILABLE",
        }
    }

    /// Integer code used in structured logs.
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidId => 1002,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::InvalidUserHeader => 1006,
            Self::Forbidden => 1007,
            Self::Conflict => 1008,
            Self::InvalidQuery => 1009,
            Self::BadRequest => 1010,
            Self::MethodNotAllowed => 1011,
            Self::ServiceUnavailable => 1012,
            Self::DatabaseError => 2001,
            Self::DatabaseUniqueViolation => 2002,
            Self::UpstreamUnavailable => 3001,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::InvalidId => "Invalid id",
            Self::JsonExtraction => "Failed to parse request body",
            Self::NotFound => "Resource not found",
            Self::InternalError => "An internal server error occurred",
            Self::InvalidUserHeader => "Invalid X-Sharer-User-Id header",
            Self::Forbidden => "Not enough rights",
            Self::Conflict => "Resource already exists",
            Self::InvalidQuery => "Invalid query parameters",
            Self::BadRequest => "Bad request",
            Self::MethodNotAllowed => "The HTTP method is not allowed for this resource",
            Self::ServiceUnavailable => "Service is temporarily unavailable",
            Self::DatabaseError => "Database error occurred",
            Self::DatabaseUniqueViolation => "Resource already exists",
            Self::UpstreamUnavailable => "ShareIt server is unavailable",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
