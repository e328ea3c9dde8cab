use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ItemError {
    #[error("Item with id {0} not found")]
    NotFound(i64),

    #[error("User with id {0} not found")]
    UserNotFound(i64),

    #[error("Item request with id {0} not found")]
    RequestNotFound(i64),

    #[error("User {user_id} is not the owner of item {item_id}")]
    NotOwner { user_id: i64, item_id: i64 },

    #[error("User {user_id} has not rented item {item_id}")]
    NotRented { user_id: i64, item_id: i64 },

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type ItemResult<T> = Result<T, ItemError>;

impl From<ItemError> for AppError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::NotFound(_) | ItemError::UserNotFound(_) | ItemError::RequestNotFound(_) => {
                AppError::NotFound(err.to_string())
            }
            ItemError::NotOwner { .. } => AppError::Forbidden(err.to_string()),
            ItemError::NotRented { .. } => AppError::BadRequest(err.to_string()),
            ItemError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for ItemError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
