use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Item request with id {0} not found")]
    NotFound(i64),

    #[error("User with id {0} not found")]
    UserNotFound(i64),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type RequestResult<T> = Result<T, RequestError>;

impl From<RequestError> for AppError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::NotFound(_) | RequestError::UserNotFound(_) => {
                AppError::NotFound(err.to_string())
            }
            RequestError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
