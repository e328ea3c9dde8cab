//! OpenAPI response components shared by every ShareIt router.
//!
//! Reference them from `#[utoipa::path]` as
//! `(status = 404, response = NotFoundResponse)`.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "code": 1005,
        "error": "INTERNAL_ERROR",
        "message": "An internal server error occurred"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Validation Error",
    content_type = "application/json",
    example = json!({
        "code": 1001,
        "error": "VALIDATION_ERROR",
        "message": "Request validation failed",
        "details": {
            "email": [{
                "code": "email",
                "message": null,
                "params": {"value": "not-an-email"}
            }]
        }
    })
)]
pub struct BadRequestValidationResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Missing or invalid X-Sharer-User-Id header",
    content_type = "application/json",
    example = json!({
        "code": 1006,
        "error": "INVALID_USER_HEADER",
        "message": "Missing X-Sharer-User-Id header"
    })
)]
pub struct BadRequestUserHeaderResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "code": 1004,
        "error": "NOT_FOUND",
        "message": "Item with id 42 not found"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Forbidden - Not enough rights",
    content_type = "application/json",
    example = json!({
        "code": 1007,
        "error": "FORBIDDEN",
        "message": "Only the owner can approve a booking"
    })
)]
pub struct ForbiddenResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Conflict - Resource already exists",
    content_type = "application/json",
    example = json!({
        "code": 2002,
        "error": "DATABASE_UNIQUE_VIOLATION",
        "message": "Resource already exists"
    })
)]
pub struct ConflictResponse(pub ErrorResponse);
