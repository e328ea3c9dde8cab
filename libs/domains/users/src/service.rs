use std::sync::Arc;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, User};
use crate::repository::UserRepository;

/// Service layer for User business logic
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn create_user(&self, input: CreateUser) -> UserResult<User> {
        self.repository.create(input).await
    }

    pub async fn list_users(&self) -> UserResult<Vec<User>> {
        self.repository.find_all().await
    }

    pub async fn get_user(&self, id: i64) -> UserResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    /// Applies the present fields; an empty patch returns the stored user as-is.
    pub async fn update_user(&self, id: i64, input: UpdateUser) -> UserResult<User> {
        let user = self.get_user(id).await?;

        if input.name.is_none() && input.email.is_none() {
            return Ok(user);
        }

        self.repository.update(user, input).await
    }

    pub async fn delete_user(&self, id: i64) -> UserResult<()> {
        if !self.repository.delete(id).await? {
            return Err(UserError::NotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;
    use mockall::predicate::*;

    fn ann() -> User {
        User {
            id: 1,
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(7))
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(repo);
        let result = service.get_user(7).await;

        assert!(matches!(result, Err(UserError::NotFound(7))));
    }

    #[tokio::test]
    async fn test_update_user_merges_fields() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(Some(ann())));
        repo.expect_update()
            .withf(|user, input| user.id == 1 && input.name.as_deref() == Some("Anna"))
            .times(1)
            .returning(|user, input| {
                Ok(User {
                    name: input.name.unwrap_or(user.name),
                    ..user
                })
            });

        let service = UserService::new(repo);
        let updated = service
            .update_user(
                1,
                UpdateUser {
                    name: Some("Anna".to_string()),
                    email: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Anna");
        assert_eq!(updated.email, "ann@example.com");
    }

    #[tokio::test]
    async fn test_empty_update_skips_write() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(Some(ann())));
        repo.expect_update().never();

        let service = UserService::new(repo);
        let user = service.update_user(1, UpdateUser::default()).await.unwrap();

        assert_eq!(user, ann());
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = UserService::new(repo);
        let result = service.update_user(5, UpdateUser::default()).await;

        assert!(matches!(result, Err(UserError::NotFound(5))));
    }

    #[tokio::test]
    async fn test_delete_missing_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete().with(eq(3)).returning(|_| Ok(false));

        let service = UserService::new(repo);

        assert!(matches!(
            service.delete_user(3).await,
            Err(UserError::NotFound(3))
        ));
    }

    #[tokio::test]
    async fn test_duplicate_email_bubbles_up() {
        let mut repo = MockUserRepository::new();
        repo.expect_create()
            .returning(|input| Err(UserError::DuplicateEmail(input.email)));

        let service = UserService::new(repo);
        let result = service
            .create_user(CreateUser {
                name: "Bob".to_string(),
                email: "ann@example.com".to_string(),
            })
            .await;

        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
    }
}
