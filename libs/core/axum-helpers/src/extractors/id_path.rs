//! Positive integer id path parameter extractor.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};

use super::parse_positive_id;

/// Extractor for the single `{id}` segment of a route.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::get;
/// use axum_helpers::extractors::IdPath;
///
/// async fn get_item(IdPath(id): IdPath) -> String {
///     format!("Item ID: {}", id)
/// }
///
/// let app = Router::new().route("/items/{item_id}", get(get_item));
/// ```
pub struct IdPath(pub i64);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        match parse_positive_id(&id) {
            Some(id) => Ok(IdPath(id)),
            None => Err(AppError::InvalidId(format!("Id must be a positive integer, got {}", id))
                .into_response()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::get};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new().route(
            "/items/{item_id}",
            get(|IdPath(id): IdPath| async move { id.to_string() }),
        )
    }

    #[tokio::test]
    async fn test_accepts_positive_id() {
        let response = app()
            .oneshot(Request::get("/items/15").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_rejects_zero() {
        let response = app()
            .oneshot(Request::get("/items/0").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
