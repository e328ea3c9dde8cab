use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// Lifecycle of a booking: `WAITING` until the owner decides, then
/// `APPROVED` or `REJECTED` for good.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "booking_status")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    #[default]
    #[sea_orm(string_value = "WAITING")]
    Waiting,
    #[sea_orm(string_value = "APPROVED")]
    Approved,
    #[sea_orm(string_value = "REJECTED")]
    Rejected,
}

impl BookingStatus {
    /// Outcome of the owner's decision on a waiting booking.
    pub fn decided(approved: bool) -> Self {
        if approved {
            Self::Approved
        } else {
            Self::Rejected
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Waiting)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub item_id: i64,
    pub booker_id: i64,
    pub start: DateTime,
    pub end: DateTime,
    pub status: BookingStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::items::Entity",
        from = "Column::ItemId",
        to = "super::items::Column::Id",
        on_delete = "Cascade"
    )]
    Item,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::BookerId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    Booker,
}

impl Related<super::items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Item.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Booker.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
