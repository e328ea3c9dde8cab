use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User with id {0} not found")]
    NotFound(i64),

    #[error("User with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type UserResult<T> = Result<T, UserError>;

impl UserError {
    /// Turns a unique violation on `users.email` into [`UserError::DuplicateEmail`].
    pub fn from_write(err: DbErr, email: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::DuplicateEmail(email.to_string()),
            _ => Self::Database(err),
        }
    }
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => AppError::NotFound(err.to_string()),
            UserError::DuplicateEmail(_) => AppError::Conflict(err.to_string()),
            UserError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            UserError::NotFound(1).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            UserError::DuplicateEmail("a@b.c".into()).into_response().status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_other_write_errors_stay_database_errors() {
        let err = UserError::from_write(DbErr::Custom("boom".into()), "a@b.c");
        assert!(matches!(err, UserError::Database(_)));
    }
}
