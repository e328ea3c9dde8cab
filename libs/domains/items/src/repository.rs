use async_trait::async_trait;
use axum_helpers::Page;
use chrono::NaiveDateTime;
use std::collections::HashMap;

use crate::error::ItemResult;
use crate::models::{BookingShort, Comment, CreateItem, Item, UpdateItem};

/// Persistence for items and comments, plus the lookups into users, item
/// requests and bookings that the item rules depend on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn user_exists(&self, user_id: i64) -> ItemResult<bool>;

    async fn request_exists(&self, request_id: i64) -> ItemResult<bool>;

    async fn create(&self, owner_id: i64, input: CreateItem) -> ItemResult<Item>;

    async fn find_by_id(&self, id: i64) -> ItemResult<Option<Item>>;

    /// Writes the present fields of `input` over `item`
    async fn update(&self, item: Item, input: UpdateItem) -> ItemResult<Item>;

    async fn delete(&self, id: i64) -> ItemResult<bool>;

    /// Owner's items ordered by id
    async fn find_by_owner(&self, owner_id: i64, page: Page) -> ItemResult<Vec<Item>>;

    /// Available items whose name or description contains `text`, ignoring case
    async fn search(&self, text: &str, page: Page) -> ItemResult<Vec<Item>>;

    /// Comments grouped by item id, newest first within each group
    async fn comments_for_items(&self, item_ids: &[i64]) -> ItemResult<HashMap<i64, Vec<Comment>>>;

    /// All bookings of the given items grouped by item id
    async fn bookings_for_items(
        &self,
        item_ids: &[i64],
    ) -> ItemResult<HashMap<i64, Vec<BookingShort>>>;

    /// Whether `user_id` has an approved booking of `item_id` that ended before `now`
    async fn has_finished_booking(
        &self,
        user_id: i64,
        item_id: i64,
        now: NaiveDateTime,
    ) -> ItemResult<bool>;

    async fn add_comment(
        &self,
        item_id: i64,
        author_id: i64,
        text: String,
        created: NaiveDateTime,
    ) -> ItemResult<Comment>;
}
