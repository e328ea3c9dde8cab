use async_trait::async_trait;
use axum_helpers::Page;
use chrono::NaiveDateTime;

use crate::error::RequestResult;
use crate::models::ItemRequest;

/// Requests are returned with their answering items attached.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRequestRepository: Send + Sync {
    async fn user_exists(&self, user_id: i64) -> RequestResult<bool>;

    async fn create(
        &self,
        author_id: i64,
        description: String,
        created: NaiveDateTime,
    ) -> RequestResult<ItemRequest>;

    async fn find_by_id(&self, id: i64) -> RequestResult<Option<ItemRequest>>;

    /// Author's own requests, newest first
    async fn find_by_author(&self, author_id: i64) -> RequestResult<Vec<ItemRequest>>;

    /// Requests by everyone except `user_id`, newest first
    async fn find_others(&self, user_id: i64, page: Page) -> RequestResult<Vec<ItemRequest>>;
}
