use async_trait::async_trait;
use database::BaseRepository;
use entity::users;
use sea_orm::ActiveValue::{Set, Unchanged};
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use crate::{
    error::{UserError, UserResult},
    models::{CreateUser, UpdateUser, User},
    repository::UserRepository,
};

#[derive(Clone)]
pub struct PgUserRepository {
    base: BaseRepository<users::Entity>,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, input: CreateUser) -> UserResult<User> {
        let active_model = users::ActiveModel {
            name: Set(input.name),
            email: Set(input.email.clone()),
            ..Default::default()
        };

        let model = self
            .base
            .insert(active_model)
            .await
            .map_err(|e| UserError::from_write(e, &input.email))?;

        tracing::info!(user_id = model.id, "Created user");
        Ok(model.into())
    }

    async fn find_all(&self) -> UserResult<Vec<User>> {
        let models = users::Entity::find()
            .order_by_asc(users::Column::Id)
            .all(self.base.db())
            .await?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> UserResult<Option<User>> {
        Ok(self.base.find_by_id(id).await?.map(User::from))
    }

    async fn update(&self, user: User, input: UpdateUser) -> UserResult<User> {
        // email is always written so the UPDATE never has an empty SET list
        let email = input.email.unwrap_or(user.email);
        let active_model = users::ActiveModel {
            id: Unchanged(user.id),
            name: match input.name {
                Some(name) => Set(name),
                None => Unchanged(user.name),
            },
            email: Set(email.clone()),
        };

        let model = self
            .base
            .update(active_model)
            .await
            .map_err(|e| UserError::from_write(e, &email))?;

        tracing::info!(user_id = model.id, "Updated user");
        Ok(model.into())
    }

    async fn delete(&self, id: i64) -> UserResult<bool> {
        let deleted = self.base.delete_by_id(id).await? > 0;
        if deleted {
            tracing::info!(user_id = id, "Deleted user");
        }
        Ok(deleted)
    }
}
