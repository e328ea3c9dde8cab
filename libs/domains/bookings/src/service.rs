use axum_helpers::Page;
use chrono::NaiveDateTime;
use entity::BookingStatus;
use std::sync::Arc;

use crate::error::{BookingError, BookingResult};
use crate::models::{Booking, BookingState, CreateBooking};
use crate::repository::BookingRepository;

fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Service layer for Booking business logic
#[derive(Clone)]
pub struct BookingService<R: BookingRepository> {
    repository: Arc<R>,
}

impl<R: BookingRepository> BookingService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    async fn ensure_user(&self, user_id: i64) -> BookingResult<()> {
        self.repository
            .find_user(user_id)
            .await?
            .map(|_| ())
            .ok_or(BookingError::UserNotFound(user_id))
    }

    async fn find_booking(&self, booking_id: i64) -> BookingResult<Booking> {
        self.repository
            .find_by_id(booking_id)
            .await?
            .ok_or(BookingError::NotFound(booking_id))
    }

    /// Creates a `WAITING` booking of someone else's available item.
    pub async fn create_booking(
        &self,
        booker_id: i64,
        input: CreateBooking,
    ) -> BookingResult<Booking> {
        if input.end <= input.start {
            return Err(BookingError::InvalidDates);
        }

        let item = self
            .repository
            .find_item(input.item_id)
            .await?
            .ok_or(BookingError::ItemNotFound(input.item_id))?;

        let booker = self
            .repository
            .find_user(booker_id)
            .await?
            .ok_or(BookingError::UserNotFound(booker_id))?;

        if !item.available {
            return Err(BookingError::ItemUnavailable(item.id));
        }

        if item.owner_id == booker_id {
            return Err(BookingError::OwnItem(item.id));
        }

        self.repository
            .create(item, booker, input.start, input.end)
            .await
    }

    /// Approves or rejects a waiting booking; only the item's owner may decide.
    pub async fn decide(
        &self,
        owner_id: i64,
        booking_id: i64,
        approved: bool,
    ) -> BookingResult<Booking> {
        let booking = self.find_booking(booking_id).await?;

        if booking.owner_id() != owner_id {
            return Err(BookingError::NotOwner {
                user_id: owner_id,
                booking_id,
            });
        }

        if booking.status.is_terminal() {
            return Err(BookingError::AlreadyDecided(booking_id));
        }

        self.repository
            .set_status(booking, BookingStatus::decided(approved))
            .await
    }

    /// Visible to the booker and the item's owner only.
    pub async fn get_booking(&self, requester_id: i64, booking_id: i64) -> BookingResult<Booking> {
        self.ensure_user(requester_id).await?;
        let booking = self.find_booking(booking_id).await?;

        if booking.booker.id != requester_id && booking.owner_id() != requester_id {
            return Err(BookingError::NotParticipant {
                user_id: requester_id,
                booking_id,
            });
        }
        Ok(booking)
    }

    pub async fn list_for_booker(
        &self,
        booker_id: i64,
        state: Option<&str>,
        page: Page,
    ) -> BookingResult<Vec<Booking>> {
        self.ensure_user(booker_id).await?;
        let state = BookingState::parse(state)?;

        self.repository
            .find_for_booker(booker_id, state, now(), page)
            .await
    }

    pub async fn list_for_owner(
        &self,
        owner_id: i64,
        state: Option<&str>,
        page: Page,
    ) -> BookingResult<Vec<Booking>> {
        if !self.repository.owner_has_items(owner_id).await? {
            return Err(BookingError::NoItems(owner_id));
        }
        let state = BookingState::parse(state)?;

        self.repository
            .find_for_owner(owner_id, state, now(), page)
            .await
    }
}
