use async_trait::async_trait;
use axum_helpers::Page;
use chrono::NaiveDateTime;
use domain_items::Item;
use domain_users::User;
use entity::BookingStatus;

use crate::error::BookingResult;
use crate::models::{Booking, BookingState};

/// Repository trait for Booking persistence
///
/// Bookings are always returned with their item and booker loaded.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn find_user(&self, user_id: i64) -> BookingResult<Option<User>>;

    async fn find_item(&self, item_id: i64) -> BookingResult<Option<Item>>;

    async fn owner_has_items(&self, owner_id: i64) -> BookingResult<bool>;

    /// Inserts a `WAITING` booking
    async fn create(
        &self,
        item: Item,
        booker: User,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> BookingResult<Booking>;

    async fn find_by_id(&self, id: i64) -> BookingResult<Option<Booking>>;

    async fn set_status(&self, booking: Booking, status: BookingStatus) -> BookingResult<Booking>;

    /// Bookings made by `booker_id`, newest start first
    async fn find_for_booker(
        &self,
        booker_id: i64,
        state: BookingState,
        now: NaiveDateTime,
        page: Page,
    ) -> BookingResult<Vec<Booking>>;

    /// Bookings of items owned by `owner_id`, newest start first
    async fn find_for_owner(
        &self,
        owner_id: i64,
        state: BookingState,
        now: NaiveDateTime,
        page: Page,
    ) -> BookingResult<Vec<Booking>>;
}
