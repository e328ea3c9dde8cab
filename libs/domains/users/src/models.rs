use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<entity::users::Model> for User {
    fn from(model: entity::users::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(
        custom(function = "axum_helpers::validation::not_blank"),
        length(max = 255)
    )]
    pub name: String,
    #[validate(email, length(max = 512))]
    pub email: String,
}

/// Partial update: absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(
        custom(function = "axum_helpers::validation::not_blank"),
        length(max = 255)
    )]
    pub name: Option<String>,
    #[validate(email, length(max = 512))]
    pub email: Option<String>,
}
