use async_trait::async_trait;
use axum_helpers::Page;
use chrono::NaiveDateTime;
use database::BaseRepository;
use domain_items::Item;
use entity::{item_requests, items, users};
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use std::collections::HashMap;

use crate::{error::RequestResult, models::ItemRequest, repository::ItemRequestRepository};

#[derive(Clone)]
pub struct PgItemRequestRepository {
    base: BaseRepository<item_requests::Entity>,
}

impl PgItemRequestRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn db(&self) -> &DatabaseConnection {
        self.base.db()
    }

    /// Loads the answering items of all `requests` in one query.
    async fn with_items(
        &self,
        requests: Vec<item_requests::Model>,
    ) -> RequestResult<Vec<ItemRequest>> {
        if requests.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = requests.iter().map(|r| r.id).collect();
        let mut by_request: HashMap<i64, Vec<Item>> = HashMap::new();
        for item in items::Entity::find()
            .filter(items::Column::RequestId.is_in(ids))
            .order_by_asc(items::Column::Id)
            .all(self.db())
            .await?
        {
            if let Some(request_id) = item.request_id {
                by_request
                    .entry(request_id)
                    .or_default()
                    .push(Item::from(item));
            }
        }

        Ok(requests
            .into_iter()
            .map(|request| {
                let answers = by_request.remove(&request.id).unwrap_or_default();
                ItemRequest::new(request, answers)
            })
            .collect())
    }
}

#[async_trait]
impl ItemRequestRepository for PgItemRequestRepository {
    async fn user_exists(&self, user_id: i64) -> RequestResult<bool> {
        Ok(users::Entity::find_by_id(user_id).count(self.db()).await? > 0)
    }

    async fn create(
        &self,
        author_id: i64,
        description: String,
        created: NaiveDateTime,
    ) -> RequestResult<ItemRequest> {
        let active_model = item_requests::ActiveModel {
            description: Set(description),
            author_id: Set(author_id),
            created: Set(created),
            ..Default::default()
        };

        let model = self.base.insert(active_model).await?;

        tracing::info!(request_id = model.id, author_id, "Created item request");
        Ok(ItemRequest::new(model, Vec::new()))
    }

    async fn find_by_id(&self, id: i64) -> RequestResult<Option<ItemRequest>> {
        match self.base.find_by_id(id).await? {
            Some(model) => Ok(self.with_items(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn find_by_author(&self, author_id: i64) -> RequestResult<Vec<ItemRequest>> {
        let requests = item_requests::Entity::find()
            .filter(item_requests::Column::AuthorId.eq(author_id))
            .order_by_desc(item_requests::Column::Created)
            .order_by_desc(item_requests::Column::Id)
            .all(self.db())
            .await?;

        self.with_items(requests).await
    }

    async fn find_others(&self, user_id: i64, page: Page) -> RequestResult<Vec<ItemRequest>> {
        let requests = item_requests::Entity::find()
            .filter(item_requests::Column::AuthorId.ne(user_id))
            .order_by_desc(item_requests::Column::Created)
            .order_by_desc(item_requests::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(self.db())
            .await?;

        self.with_items(requests).await
    }
}
