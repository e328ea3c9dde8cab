use axum_helpers::Page;
use chrono::{NaiveDateTime, SubsecRound};
use std::sync::Arc;

use crate::adjacency::{last_booking, next_booking};
use crate::error::{ItemError, ItemResult};
use crate::models::{Comment, CreateComment, CreateItem, Item, ItemDetails, UpdateItem};
use crate::repository::ItemRepository;

/// Whole seconds, so a stored `created` reads back exactly as returned.
fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local().trunc_subsecs(0)
}

/// Service layer for Item business logic
#[derive(Clone)]
pub struct ItemService<R: ItemRepository> {
    repository: Arc<R>,
}

impl<R: ItemRepository> ItemService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    async fn ensure_user(&self, user_id: i64) -> ItemResult<()> {
        if !self.repository.user_exists(user_id).await? {
            return Err(ItemError::UserNotFound(user_id));
        }
        Ok(())
    }

    async fn find_item(&self, item_id: i64) -> ItemResult<Item> {
        self.repository
            .find_by_id(item_id)
            .await?
            .ok_or(ItemError::NotFound(item_id))
    }

    /// Loads the item and checks that `user_id` owns it.
    async fn owned_item(&self, user_id: i64, item_id: i64) -> ItemResult<Item> {
        self.ensure_user(user_id).await?;
        let item = self.find_item(item_id).await?;

        if item.owner_id != user_id {
            return Err(ItemError::NotOwner { user_id, item_id });
        }
        Ok(item)
    }

    pub async fn create_item(&self, owner_id: i64, input: CreateItem) -> ItemResult<Item> {
        self.ensure_user(owner_id).await?;

        if let Some(request_id) = input.request_id {
            if !self.repository.request_exists(request_id).await? {
                return Err(ItemError::RequestNotFound(request_id));
            }
        }

        self.repository.create(owner_id, input).await
    }

    pub async fn update_item(
        &self,
        user_id: i64,
        item_id: i64,
        input: UpdateItem,
    ) -> ItemResult<Item> {
        let item = self.owned_item(user_id, item_id).await?;

        if input.is_empty() {
            return Ok(item);
        }

        self.repository.update(item, input).await
    }

    /// Comments are always attached; adjacent bookings only for the owner.
    pub async fn get_item(&self, requester_id: i64, item_id: i64) -> ItemResult<ItemDetails> {
        let item = self.find_item(item_id).await?;
        let ids = [item.id];

        let comments = self
            .repository
            .comments_for_items(&ids)
            .await?
            .remove(&item.id)
            .unwrap_or_default();

        if item.owner_id != requester_id {
            return Ok(ItemDetails::new(item, comments));
        }

        let bookings = self
            .repository
            .bookings_for_items(&ids)
            .await?
            .remove(&item.id)
            .unwrap_or_default();

        let now = now();
        let mut details = ItemDetails::new(item, comments);
        details.last_booking = last_booking(&bookings, now);
        details.next_booking = next_booking(&bookings, now);
        Ok(details)
    }

    pub async fn list_owner_items(&self, owner_id: i64, page: Page) -> ItemResult<Vec<ItemDetails>> {
        self.ensure_user(owner_id).await?;

        let items = self.repository.find_by_owner(owner_id, page).await?;
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = items.iter().map(|item| item.id).collect();
        let mut comments = self.repository.comments_for_items(&ids).await?;
        let bookings = self.repository.bookings_for_items(&ids).await?;

        let now = now();
        let details = items
            .into_iter()
            .map(|item| {
                let item_bookings = bookings.get(&item.id).map(Vec::as_slice).unwrap_or(&[]);
                let last = last_booking(item_bookings, now);
                let next = next_booking(item_bookings, now);
                let item_comments = comments.remove(&item.id).unwrap_or_default();

                let mut details = ItemDetails::new(item, item_comments);
                details.last_booking = last;
                details.next_booking = next;
                details
            })
            .collect();

        Ok(details)
    }

    /// Blank text matches nothing.
    pub async fn search(&self, text: &str, page: Page) -> ItemResult<Vec<Item>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        self.repository.search(text, page).await
    }

    pub async fn delete_item(&self, user_id: i64, item_id: i64) -> ItemResult<()> {
        self.owned_item(user_id, item_id).await?;

        if !self.repository.delete(item_id).await? {
            return Err(ItemError::NotFound(item_id));
        }
        Ok(())
    }

    /// Only a past renter may comment: an approved booking that has ended.
    pub async fn add_comment(
        &self,
        user_id: i64,
        item_id: i64,
        input: CreateComment,
    ) -> ItemResult<Comment> {
        let now = now();

        if !self
            .repository
            .has_finished_booking(user_id, item_id, now)
            .await?
        {
            return Err(ItemError::NotRented { user_id, item_id });
        }

        self.find_item(item_id).await?;
        self.ensure_user(user_id).await?;

        self.repository
            .add_comment(item_id, user_id, input.text, now)
            .await
    }
}
