use async_trait::async_trait;
use axum_helpers::Page;
use chrono::NaiveDateTime;
use database::BaseRepository;
use domain_items::Item;
use domain_users::User;
use entity::{BookingStatus, bookings, items, users};
use sea_orm::ActiveValue::{Set, Unchanged};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use std::collections::HashMap;

use crate::{
    error::{BookingError, BookingResult},
    models::{Booking, BookingState},
    repository::BookingRepository,
};

#[derive(Clone)]
pub struct PgBookingRepository {
    base: BaseRepository<bookings::Entity>,
}

/// Row filter for a listing state at `now`.
fn state_condition(state: BookingState, now: NaiveDateTime) -> Condition {
    let condition = Condition::all();
    match state {
        BookingState::All => condition,
        BookingState::Current => condition
            .add(bookings::Column::Start.lt(now))
            .add(bookings::Column::End.gt(now)),
        BookingState::Past => condition.add(bookings::Column::End.lt(now)),
        BookingState::Future => condition.add(bookings::Column::Start.gt(now)),
        BookingState::Waiting => condition.add(bookings::Column::Status.eq(BookingStatus::Waiting)),
        BookingState::Rejected => {
            condition.add(bookings::Column::Status.eq(BookingStatus::Rejected))
        }
    }
}

impl PgBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn db(&self) -> &DatabaseConnection {
        self.base.db()
    }

    /// Runs a paged listing query and attaches items and bookers.
    async fn list(
        &self,
        filter: Condition,
        state: BookingState,
        now: NaiveDateTime,
        page: Page,
    ) -> BookingResult<Vec<Booking>> {
        let rows = bookings::Entity::find()
            .find_also_related(items::Entity)
            .filter(filter)
            .filter(state_condition(state, now))
            .order_by_desc(bookings::Column::Start)
            .order_by_desc(bookings::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(self.db())
            .await?;

        self.hydrate(rows).await
    }

    async fn hydrate(
        &self,
        rows: Vec<(bookings::Model, Option<items::Model>)>,
    ) -> BookingResult<Vec<Booking>> {
        let booker_ids: Vec<i64> = rows.iter().map(|(b, _)| b.booker_id).collect();
        let bookers: HashMap<i64, User> = if booker_ids.is_empty() {
            HashMap::new()
        } else {
            users::Entity::find()
                .filter(users::Column::Id.is_in(booker_ids))
                .all(self.db())
                .await?
                .into_iter()
                .map(|u| (u.id, User::from(u)))
                .collect()
        };

        rows.into_iter()
            .map(|(booking, item)| {
                let item = item.ok_or(BookingError::ItemNotFound(booking.item_id))?;
                let booker = bookers
                    .get(&booking.booker_id)
                    .cloned()
                    .ok_or(BookingError::UserNotFound(booking.booker_id))?;
                Ok(Booking::from_parts(booking, Item::from(item), booker))
            })
            .collect()
    }
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn find_user(&self, user_id: i64) -> BookingResult<Option<User>> {
        Ok(users::Entity::find_by_id(user_id)
            .one(self.db())
            .await?
            .map(User::from))
    }

    async fn find_item(&self, item_id: i64) -> BookingResult<Option<Item>> {
        Ok(items::Entity::find_by_id(item_id)
            .one(self.db())
            .await?
            .map(Item::from))
    }

    async fn owner_has_items(&self, owner_id: i64) -> BookingResult<bool> {
        let count = items::Entity::find()
            .filter(items::Column::OwnerId.eq(owner_id))
            .count(self.db())
            .await?;
        Ok(count > 0)
    }

    async fn create(
        &self,
        item: Item,
        booker: User,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> BookingResult<Booking> {
        let active_model = bookings::ActiveModel {
            item_id: Set(item.id),
            booker_id: Set(booker.id),
            start: Set(start),
            end: Set(end),
            status: Set(BookingStatus::Waiting),
            ..Default::default()
        };

        let model = self.base.insert(active_model).await?;

        tracing::info!(
            booking_id = model.id,
            item_id = item.id,
            booker_id = booker.id,
            "Created booking"
        );
        Ok(Booking::from_parts(model, item, booker))
    }

    async fn find_by_id(&self, id: i64) -> BookingResult<Option<Booking>> {
        let row = bookings::Entity::find()
            .filter(bookings::Column::Id.eq(id))
            .find_also_related(items::Entity)
            .one(self.db())
            .await?;

        match row {
            Some(row) => Ok(self.hydrate(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn set_status(&self, booking: Booking, status: BookingStatus) -> BookingResult<Booking> {
        let active_model = bookings::ActiveModel {
            id: Unchanged(booking.id),
            item_id: Unchanged(booking.item.id),
            booker_id: Unchanged(booking.booker.id),
            start: Unchanged(booking.start),
            end: Unchanged(booking.end),
            status: Set(status),
        };

        let model = self.base.update(active_model).await?;

        tracing::info!(booking_id = model.id, status = %model.status, "Decided booking");
        Ok(Booking::from_parts(model, booking.item, booking.booker))
    }

    async fn find_for_booker(
        &self,
        booker_id: i64,
        state: BookingState,
        now: NaiveDateTime,
        page: Page,
    ) -> BookingResult<Vec<Booking>> {
        let filter = Condition::all().add(bookings::Column::BookerId.eq(booker_id));
        self.list(filter, state, now, page).await
    }

    async fn find_for_owner(
        &self,
        owner_id: i64,
        state: BookingState,
        now: NaiveDateTime,
        page: Page,
    ) -> BookingResult<Vec<Booking>> {
        let filter = Condition::all().add(items::Column::OwnerId.eq(owner_id));
        self.list(filter, state, now, page).await
    }
}
