use axum_helpers::{DEFAULT_PAGE_SIZE, Page};
use chrono::NaiveDateTime;
use entity::BookingStatus;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Item as returned by every endpoint that embeds one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub request_id: Option<i64>,
    #[serde(skip)]
    pub owner_id: i64,
}

impl From<entity::items::Model> for Item {
    fn from(model: entity::items::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            available: model.available,
            request_id: model.request_id,
            owner_id: model.owner_id,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItem {
    #[validate(
        custom(function = "axum_helpers::validation::not_blank"),
        length(max = 255)
    )]
    pub name: String,
    #[validate(
        custom(function = "axum_helpers::validation::not_blank"),
        length(max = 512)
    )]
    pub description: String,
    pub available: bool,
    /// Item request this item answers
    pub request_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItem {
    #[validate(length(max = 255))]
    pub name: Option<String>,
    #[validate(length(max = 512))]
    pub description: Option<String>,
    pub available: Option<bool>,
}

impl UpdateItem {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.available.is_none()
    }
}

/// Booking summary shown to an item's owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingShort {
    pub id: i64,
    pub booker_id: i64,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub status: BookingStatus,
}

impl From<entity::bookings::Model> for BookingShort {
    fn from(model: entity::bookings::Model) -> Self {
        Self {
            id: model.id,
            booker_id: model.booker_id,
            start: model.start,
            end: model.end,
            status: model.status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub text: String,
    pub author_name: String,
    pub created: NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateComment {
    #[validate(
        custom(function = "axum_helpers::validation::not_blank"),
        length(max = 512)
    )]
    pub text: String,
}

/// Item with its comments and, for the owner, the adjacent bookings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemDetails {
    #[serde(flatten)]
    pub item: Item,
    pub last_booking: Option<BookingShort>,
    pub next_booking: Option<BookingShort>,
    /// Newest first
    pub comments: Vec<Comment>,
}

impl ItemDetails {
    pub fn new(item: Item, comments: Vec<Comment>) -> Self {
        Self {
            item,
            last_booking: None,
            next_booking: None,
            comments,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Substring matched against name and description, ignoring case
    pub text: Option<String>,
    #[validate(range(min = 0))]
    pub from: Option<i64>,
    #[validate(range(min = 1))]
    pub size: Option<i64>,
}

impl SearchParams {
    pub fn page(&self) -> Page {
        Page::new(
            self.from.unwrap_or(0),
            self.size.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn drill() -> Item {
        Item {
            id: 3,
            name: "Drill".into(),
            description: "Cordless".into(),
            available: true,
            request_id: None,
            owner_id: 9,
        }
    }

    #[test]
    fn test_item_json_is_camel_case_and_hides_owner() {
        let value = serde_json::to_value(drill()).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 3,
                "name": "Drill",
                "description": "Cordless",
                "available": true,
                "requestId": null
            })
        );
    }

    #[test]
    fn test_details_flatten_item_fields() {
        let value = serde_json::to_value(ItemDetails::new(drill(), vec![])).unwrap();
        assert_eq!(value["name"], "Drill");
        assert!(value["lastBooking"].is_null());
        assert!(value["nextBooking"].is_null());
        assert_eq!(value["comments"], json!([]));
    }

    #[test]
    fn test_create_item_rejects_blank_description() {
        let input: CreateItem = serde_json::from_value(json!({
            "name": "Drill",
            "description": " ",
            "available": true
        }))
        .unwrap();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_item_name_fits_column() {
        let input: CreateItem = serde_json::from_value(json!({
            "name": "n".repeat(256),
            "description": "Cordless",
            "available": true
        }))
        .unwrap();
        assert!(input.validate().unwrap_err().field_errors().contains_key("name"));

        let patch = UpdateItem {
            name: Some("n".repeat(256)),
            ..Default::default()
        };
        assert!(patch.validate().is_err());

        let patch = UpdateItem {
            name: Some("n".repeat(255)),
            ..Default::default()
        };
        assert!(patch.validate().is_ok());
    }

    #[test]
    fn test_create_item_requires_available() {
        let parsed = serde_json::from_value::<CreateItem>(json!({
            "name": "Drill",
            "description": "Cordless"
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_comment_length_limit() {
        let input = CreateComment {
            text: "x".repeat(513),
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_search_page_defaults() {
        let page = SearchParams::default().page();
        assert_eq!(page, Page::new(0, DEFAULT_PAGE_SIZE));
    }
}
