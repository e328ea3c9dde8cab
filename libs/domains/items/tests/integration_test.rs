//! Repository and service tests against a real PostgreSQL instance.
//!
//! Run with `cargo test -p domain_items -- --ignored` (requires Docker).

use axum_helpers::Page;
use chrono::{Duration, Local};
use domain_items::*;
use entity::{BookingStatus, bookings};
use sea_orm::{ActiveModelTrait, Set};
use test_utils::{TestDataBuilder, TestDatabase};

fn new_item(name: &str, description: &str, available: bool) -> CreateItem {
    CreateItem {
        name: name.to_string(),
        description: description.to_string(),
        available,
        request_id: None,
    }
}

async fn insert_booking(
    db: &TestDatabase,
    item_id: i64,
    booker_id: i64,
    start_h: i64,
    end_h: i64,
    status: BookingStatus,
) -> i64 {
    let now = Local::now().naive_local();
    bookings::ActiveModel {
        item_id: Set(item_id),
        booker_id: Set(booker_id),
        start: Set(now + Duration::hours(start_h)),
        end: Set(now + Duration::hours(end_h)),
        status: Set(status),
        ..Default::default()
    }
    .insert(&db.connection)
    .await
    .unwrap()
    .id
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_search_is_case_insensitive_and_skips_unavailable() {
    let db = TestDatabase::new().await;
    let service = ItemService::new(PgItemRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("items_search");
    let owner = db.create_test_user(&builder.email("owner")).await;

    let drill = service
        .create_item(owner, new_item("Power DRILL", "Cordless", true))
        .await
        .unwrap();
    service
        .create_item(owner, new_item("Hammer", "Heavy drill companion", false))
        .await
        .unwrap();
    let saw = service
        .create_item(owner, new_item("Saw", "cuts better than a drill", true))
        .await
        .unwrap();

    let found: Vec<i64> = service
        .search("dRiLl", Page::new(0, 10))
        .await
        .unwrap()
        .into_iter()
        .map(|i| i.id)
        .collect();

    assert_eq!(found, vec![drill.id, saw.id]);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_owner_list_is_paginated_by_id() {
    let db = TestDatabase::new().await;
    let service = ItemService::new(PgItemRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("items_owner_page");
    let owner = db.create_test_user(&builder.email("owner")).await;

    let mut ids = Vec::new();
    for n in 0..5 {
        let item = service
            .create_item(owner, new_item(&format!("Item {}", n), "Thing", true))
            .await
            .unwrap();
        ids.push(item.id);
    }

    let page: Vec<i64> = service
        .list_owner_items(owner, Page::new(3, 2))
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.item.id)
        .collect();

    assert_eq!(page, ids[2..4].to_vec());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_comment_flow_and_adjacent_bookings() {
    let db = TestDatabase::new().await;
    let service = ItemService::new(PgItemRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("items_comment_flow");
    let owner = db.create_test_user(&builder.email("owner")).await;
    let renter = db.create_test_user(&builder.email("renter")).await;

    let item = service
        .create_item(owner, new_item("Ladder", "Three meters", true))
        .await
        .unwrap();

    let denied = service
        .add_comment(renter, item.id, CreateComment { text: "Solid".into() })
        .await;
    assert!(matches!(denied, Err(ItemError::NotRented { .. })));

    let past = insert_booking(&db, item.id, renter, -48, -24, BookingStatus::Approved).await;
    let next = insert_booking(&db, item.id, renter, 24, 48, BookingStatus::Waiting).await;
    insert_booking(&db, item.id, renter, 2, 3, BookingStatus::Rejected).await;

    let comment = service
        .add_comment(renter, item.id, CreateComment { text: "Solid".into() })
        .await
        .unwrap();
    assert_eq!(comment.author_name, format!("Test User {}", builder.email("renter")));

    let for_owner = service.get_item(owner, item.id).await.unwrap();
    assert_eq!(for_owner.last_booking.map(|b| b.id), Some(past));
    assert_eq!(for_owner.next_booking.map(|b| b.id), Some(next));
    assert_eq!(for_owner.comments.len(), 1);

    let for_renter = service.get_item(renter, item.id).await.unwrap();
    assert!(for_renter.last_booking.is_none());
    assert_eq!(for_renter.comments[0].text, "Solid");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_only_owner_can_delete() {
    let db = TestDatabase::new().await;
    let service = ItemService::new(PgItemRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("items_delete");
    let owner = db.create_test_user(&builder.email("owner")).await;
    let stranger = db.create_test_user(&builder.email("stranger")).await;

    let item = service
        .create_item(owner, new_item("Tent", "Four person", true))
        .await
        .unwrap();

    assert!(matches!(
        service.delete_item(stranger, item.id).await,
        Err(ItemError::NotOwner { .. })
    ));
    service.delete_item(owner, item.id).await.unwrap();
    assert!(matches!(
        service.get_item(owner, item.id).await,
        Err(ItemError::NotFound(_))
    ));
}
