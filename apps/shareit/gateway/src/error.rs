use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Unknown state: {0}")]
    UnknownState(String),

    #[error("ShareIt server unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::UnknownState(_) => AppError::BadRequest(err.to_string()),
            GatewayError::Unreachable(e) => AppError::UpstreamUnavailable(e.to_string()),
            GatewayError::Encode(e) => AppError::InternalServerError(e.to_string()),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
