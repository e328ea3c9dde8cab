use async_trait::async_trait;

use crate::error::UserResult;
use crate::models::{CreateUser, UpdateUser, User};

/// Repository trait for User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, input: CreateUser) -> UserResult<User>;

    /// All users ordered by id
    async fn find_all(&self) -> UserResult<Vec<User>>;

    async fn find_by_id(&self, id: i64) -> UserResult<Option<User>>;

    /// Writes the present fields of `input` over `user`
    async fn update(&self, user: User, input: UpdateUser) -> UserResult<User>;

    /// Returns false when no row matched
    async fn delete(&self, id: i64) -> UserResult<bool>;
}
