use chrono::NaiveDateTime;
use domain_items::Item;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A request together with the items created in answer to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ItemRequest {
    pub id: i64,
    pub description: String,
    pub created: NaiveDateTime,
    /// Ordered by id
    pub items: Vec<Item>,
}

impl ItemRequest {
    pub fn new(model: entity::item_requests::Model, items: Vec<Item>) -> Self {
        Self {
            id: model.id,
            description: model.description,
            created: model.created,
            items,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateItemRequest {
    #[validate(
        custom(function = "axum_helpers::validation::not_blank"),
        length(max = 512)
    )]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_rules() {
        let blank = CreateItemRequest {
            description: "\t".into(),
        };
        assert!(blank.validate().is_err());

        let long = CreateItemRequest {
            description: "a".repeat(513),
        };
        assert!(long.validate().is_err());

        let ok = CreateItemRequest {
            description: "Need a ladder for the weekend".into(),
        };
        assert!(ok.validate().is_ok());
    }
}
