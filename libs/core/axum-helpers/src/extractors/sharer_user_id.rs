//! Caller identity extracted from the `X-Sharer-User-Id` header.

use crate::errors::AppError;
use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Response},
};

use super::parse_positive_id;

pub const SHARER_USER_ID_HEADER: &str = "X-Sharer-User-Id";

/// Id of the acting user.
///
/// ShareIt has no authentication layer; the header is trusted as-is. A
/// missing, non-numeric or non-positive value rejects the request with 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharerUserId(pub i64);

impl<S> FromRequestParts<S> for SharerUserId
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(SHARER_USER_ID_HEADER)
            .ok_or_else(|| {
                AppError::InvalidUserHeader(format!("Missing {} header", SHARER_USER_ID_HEADER))
                    .into_response()
            })?
            .to_str()
            .map_err(|_| {
                AppError::InvalidUserHeader(format!("{} is not valid text", SHARER_USER_ID_HEADER))
                    .into_response()
            })?;

        parse_positive_id(raw).map(SharerUserId).ok_or_else(|| {
            AppError::InvalidUserHeader(format!(
                "{} must be a positive integer, got {}",
                SHARER_USER_ID_HEADER, raw
            ))
            .into_response()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::get};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new().route(
            "/whoami",
            get(|SharerUserId(id): SharerUserId| async move { id.to_string() }),
        )
    }

    #[tokio::test]
    async fn test_reads_header() {
        let response = app()
            .oneshot(
                Request::get("/whoami")
                    .header(SHARER_USER_ID_HEADER, "3")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"3");
    }

    #[tokio::test]
    async fn test_missing_header_is_bad_request() {
        let response = app()
            .oneshot(Request::get("/whoami").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_negative_header_is_bad_request() {
        let response = app()
            .oneshot(
                Request::get("/whoami")
                    .header(SHARER_USER_ID_HEADER, "-5")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
