use async_trait::async_trait;
use axum_helpers::Page;
use chrono::NaiveDateTime;
use database::BaseRepository;
use entity::{BookingStatus, bookings, comments, item_requests, items, users};
use sea_orm::ActiveValue::{Set, Unchanged};
use sea_orm::sea_query::{Expr, ExprTrait, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use std::collections::HashMap;

use crate::{
    error::{ItemError, ItemResult},
    models::{BookingShort, Comment, CreateItem, Item, UpdateItem},
    repository::ItemRepository,
};

#[derive(Clone)]
pub struct PgItemRepository {
    base: BaseRepository<items::Entity>,
}

impl PgItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn db(&self) -> &DatabaseConnection {
        self.base.db()
    }
}

/// `%text%` with LIKE wildcards in `text` matched literally.
fn contains_pattern(text: &str) -> String {
    let escaped = text
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

fn comment_from(model: comments::Model, author: Option<users::Model>) -> Comment {
    Comment {
        id: model.id,
        text: model.text,
        author_name: author.map(|a| a.name).unwrap_or_default(),
        created: model.created,
    }
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    async fn user_exists(&self, user_id: i64) -> ItemResult<bool> {
        Ok(users::Entity::find_by_id(user_id).count(self.db()).await? > 0)
    }

    async fn request_exists(&self, request_id: i64) -> ItemResult<bool> {
        Ok(item_requests::Entity::find_by_id(request_id)
            .count(self.db())
            .await?
            > 0)
    }

    async fn create(&self, owner_id: i64, input: CreateItem) -> ItemResult<Item> {
        let active_model = items::ActiveModel {
            name: Set(input.name),
            description: Set(input.description),
            available: Set(input.available),
            owner_id: Set(owner_id),
            request_id: Set(input.request_id),
            ..Default::default()
        };

        let model = self.base.insert(active_model).await?;

        tracing::info!(item_id = model.id, owner_id, "Created item");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: i64) -> ItemResult<Option<Item>> {
        Ok(self.base.find_by_id(id).await?.map(Item::from))
    }

    async fn update(&self, item: Item, input: UpdateItem) -> ItemResult<Item> {
        let available = input.available.unwrap_or(item.available);
        let active_model = items::ActiveModel {
            id: Unchanged(item.id),
            name: input.name.map_or(Unchanged(item.name), Set),
            description: input.description.map_or(Unchanged(item.description), Set),
            // always written so the UPDATE has at least one column
            available: Set(available),
            owner_id: Unchanged(item.owner_id),
            request_id: Unchanged(item.request_id),
        };

        let model = self.base.update(active_model).await?;

        tracing::info!(item_id = model.id, "Updated item");
        Ok(model.into())
    }

    async fn delete(&self, id: i64) -> ItemResult<bool> {
        let deleted = self.base.delete_by_id(id).await? > 0;
        if deleted {
            tracing::info!(item_id = id, "Deleted item");
        }
        Ok(deleted)
    }

    async fn find_by_owner(&self, owner_id: i64, page: Page) -> ItemResult<Vec<Item>> {
        let models = items::Entity::find()
            .filter(items::Column::OwnerId.eq(owner_id))
            .order_by_asc(items::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(self.db())
            .await?;

        Ok(models.into_iter().map(Item::from).collect())
    }

    async fn search(&self, text: &str, page: Page) -> ItemResult<Vec<Item>> {
        let pattern = contains_pattern(text);
        let matches_text = Condition::any()
            .add(Expr::expr(Func::lower(Expr::col(items::Column::Name))).like(pattern.clone()))
            .add(Expr::expr(Func::lower(Expr::col(items::Column::Description))).like(pattern));

        let models = items::Entity::find()
            .filter(
                Condition::all()
                    .add(items::Column::Available.eq(true))
                    .add(matches_text),
            )
            .order_by_asc(items::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(self.db())
            .await?;

        Ok(models.into_iter().map(Item::from).collect())
    }

    async fn comments_for_items(&self, item_ids: &[i64]) -> ItemResult<HashMap<i64, Vec<Comment>>> {
        if item_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = comments::Entity::find()
            .find_also_related(users::Entity)
            .filter(comments::Column::ItemId.is_in(item_ids.iter().copied()))
            .order_by_desc(comments::Column::Created)
            .order_by_desc(comments::Column::Id)
            .all(self.db())
            .await?;

        let mut grouped: HashMap<i64, Vec<Comment>> = HashMap::new();
        for (comment, author) in rows {
            grouped
                .entry(comment.item_id)
                .or_default()
                .push(comment_from(comment, author));
        }
        Ok(grouped)
    }

    async fn bookings_for_items(
        &self,
        item_ids: &[i64],
    ) -> ItemResult<HashMap<i64, Vec<BookingShort>>> {
        if item_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = bookings::Entity::find()
            .filter(bookings::Column::ItemId.is_in(item_ids.iter().copied()))
            .filter(bookings::Column::Status.ne(BookingStatus::Rejected))
            .order_by_desc(bookings::Column::Start)
            .all(self.db())
            .await?;

        let mut grouped: HashMap<i64, Vec<BookingShort>> = HashMap::new();
        for booking in rows {
            grouped
                .entry(booking.item_id)
                .or_default()
                .push(BookingShort::from(booking));
        }
        Ok(grouped)
    }

    async fn has_finished_booking(
        &self,
        user_id: i64,
        item_id: i64,
        now: NaiveDateTime,
    ) -> ItemResult<bool> {
        let count = bookings::Entity::find()
            .filter(bookings::Column::ItemId.eq(item_id))
            .filter(bookings::Column::BookerId.eq(user_id))
            .filter(bookings::Column::Status.eq(BookingStatus::Approved))
            .filter(bookings::Column::End.lt(now))
            .count(self.db())
            .await?;

        Ok(count > 0)
    }

    async fn add_comment(
        &self,
        item_id: i64,
        author_id: i64,
        text: String,
        created: NaiveDateTime,
    ) -> ItemResult<Comment> {
        let author = users::Entity::find_by_id(author_id)
            .one(self.db())
            .await?
            .ok_or(ItemError::UserNotFound(author_id))?;

        let active_model = comments::ActiveModel {
            text: Set(text),
            item_id: Set(item_id),
            author_id: Set(author_id),
            created: Set(created),
            ..Default::default()
        };
        let model = active_model.insert(self.db()).await?;

        tracing::info!(comment_id = model.id, item_id, author_id, "Added comment");
        Ok(comment_from(model, Some(author)))
    }
}
