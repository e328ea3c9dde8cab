use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Booking with id {0} not found")]
    NotFound(i64),

    #[error("Item with id {0} not found")]
    ItemNotFound(i64),

    #[error("User with id {0} not found")]
    UserNotFound(i64),

    #[error("Booking end must be after its start")]
    InvalidDates,

    #[error("Item with id {0} is not available for booking")]
    ItemUnavailable(i64),

    /// Reported as not found: an owner cannot see their own item as bookable
    #[error("Owner cannot book their own item {0}")]
    OwnItem(i64),

    #[error("User {user_id} does not own the item of booking {booking_id}")]
    NotOwner { user_id: i64, booking_id: i64 },

    #[error("Booking {0} has already been decided")]
    AlreadyDecided(i64),

    #[error("User {user_id} is neither the booker nor the owner of booking {booking_id}")]
    NotParticipant { user_id: i64, booking_id: i64 },

    #[error("User {0} does not own any items")]
    NoItems(i64),

    #[error("Unknown state: {0}")]
    UnknownState(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type BookingResult<T> = Result<T, BookingError>;

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::NotFound(_)
            | BookingError::ItemNotFound(_)
            | BookingError::UserNotFound(_)
            | BookingError::OwnItem(_)
            | BookingError::NotParticipant { .. }
            | BookingError::NoItems(_) => AppError::NotFound(err.to_string()),
            BookingError::InvalidDates
            | BookingError::ItemUnavailable(_)
            | BookingError::AlreadyDecided(_)
            | BookingError::UnknownState(_) => AppError::BadRequest(err.to_string()),
            BookingError::NotOwner { .. } => AppError::Forbidden(err.to_string()),
            BookingError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
