use axum_helpers::Page;
use chrono::SubsecRound;
use std::sync::Arc;

use crate::error::{RequestError, RequestResult};
use crate::models::{CreateItemRequest, ItemRequest};
use crate::repository::ItemRequestRepository;

#[derive(Clone)]
pub struct ItemRequestService<R: ItemRequestRepository> {
    repository: Arc<R>,
}

impl<R: ItemRequestRepository> ItemRequestService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    async fn ensure_user(&self, user_id: i64) -> RequestResult<()> {
        if !self.repository.user_exists(user_id).await? {
            return Err(RequestError::UserNotFound(user_id));
        }
        Ok(())
    }

    pub async fn create_request(
        &self,
        author_id: i64,
        input: CreateItemRequest,
    ) -> RequestResult<ItemRequest> {
        self.ensure_user(author_id).await?;

        let created = chrono::Local::now().naive_local().trunc_subsecs(0);
        self.repository
            .create(author_id, input.description, created)
            .await
    }

    pub async fn list_own(&self, author_id: i64) -> RequestResult<Vec<ItemRequest>> {
        self.ensure_user(author_id).await?;
        self.repository.find_by_author(author_id).await
    }

    pub async fn list_others(&self, user_id: i64, page: Page) -> RequestResult<Vec<ItemRequest>> {
        self.ensure_user(user_id).await?;
        self.repository.find_others(user_id, page).await
    }

    pub async fn get_request(&self, user_id: i64, request_id: i64) -> RequestResult<ItemRequest> {
        self.ensure_user(user_id).await?;
        self.repository
            .find_by_id(request_id)
            .await?
            .ok_or(RequestError::NotFound(request_id))
    }
}
