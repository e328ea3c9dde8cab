//! Repository tests against a real PostgreSQL instance.
//!
//! Run with `cargo test -p domain_users -- --ignored` (requires Docker).

use domain_users::*;
use test_utils::{TestDataBuilder, TestDatabase};

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_and_fetch_user() {
    let db = TestDatabase::new().await;
    let service = UserService::new(PgUserRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("users_create_fetch");

    let created = service
        .create_user(CreateUser {
            name: builder.name("user", "ann"),
            email: builder.email("ann"),
        })
        .await
        .unwrap();

    let fetched = service.get_user(created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_duplicate_email_rejected() {
    let db = TestDatabase::new().await;
    let service = UserService::new(PgUserRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("users_duplicate");
    let email = builder.email("dup");

    service
        .create_user(CreateUser {
            name: "First".into(),
            email: email.clone(),
        })
        .await
        .unwrap();

    let second = service
        .create_user(CreateUser {
            name: "Second".into(),
            email,
        })
        .await;

    assert!(matches!(second, Err(UserError::DuplicateEmail(_))));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_email_to_taken_one_conflicts() {
    let db = TestDatabase::new().await;
    let service = UserService::new(PgUserRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("users_update_conflict");

    let ann = service
        .create_user(CreateUser {
            name: "Ann".into(),
            email: builder.email("ann"),
        })
        .await
        .unwrap();
    let bob = service
        .create_user(CreateUser {
            name: "Bob".into(),
            email: builder.email("bob"),
        })
        .await
        .unwrap();

    let result = service
        .update_user(
            bob.id,
            UpdateUser {
                name: None,
                email: Some(ann.email.clone()),
            },
        )
        .await;
    assert!(matches!(result, Err(UserError::DuplicateEmail(_))));

    let renamed = service
        .update_user(
            bob.id,
            UpdateUser {
                name: Some("Robert".into()),
                email: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "Robert");
    assert_eq!(renamed.email, bob.email);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_list_and_delete() {
    let db = TestDatabase::new().await;
    let service = UserService::new(PgUserRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("users_list_delete");

    let first = db.create_test_user(&builder.email("one")).await;
    let second = db.create_test_user(&builder.email("two")).await;

    let ids: Vec<i64> = service
        .list_users()
        .await
        .unwrap()
        .into_iter()
        .map(|u| u.id)
        .collect();
    assert_eq!(ids, vec![first, second]);

    service.delete_user(first).await.unwrap();
    assert!(matches!(
        service.get_user(first).await,
        Err(UserError::NotFound(_))
    ));
    assert!(matches!(
        service.delete_user(first).await,
        Err(UserError::NotFound(_))
    ));
}
