use axum_helpers::{DEFAULT_PAGE_SIZE, Page};
use chrono::NaiveDateTime;
use domain_items::Item;
use domain_users::User;
use entity::BookingStatus;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::BookingError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Booking {
    pub id: i64,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub status: BookingStatus,
    pub item: Item,
    pub booker: User,
}

impl Booking {
    pub fn from_parts(model: entity::bookings::Model, item: Item, booker: User) -> Self {
        Self {
            id: model.id,
            start: model.start,
            end: model.end,
            status: model.status,
            item,
            booker,
        }
    }

    pub fn owner_id(&self) -> i64 {
        self.item.owner_id
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBooking {
    pub item_id: i64,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Filter applied to booking listings.
///
/// Date-based states are evaluated against the current local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum BookingState {
    #[default]
    All,
    /// `start < now < end`
    Current,
    /// `end < now`
    Past,
    /// `start > now`
    Future,
    Waiting,
    Rejected,
}

impl BookingState {
    /// Case-insensitive; `None` means [`BookingState::All`].
    pub fn parse(raw: Option<&str>) -> Result<Self, BookingError> {
        match raw {
            None => Ok(Self::All),
            Some(value) => {
                Self::from_str(value).map_err(|_| BookingError::UnknownState(value.to_string()))
            }
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookingListParams {
    /// ALL, CURRENT, PAST, FUTURE, WAITING or REJECTED (default ALL)
    pub state: Option<String>,
    #[validate(range(min = 0))]
    pub from: Option<i64>,
    #[validate(range(min = 1))]
    pub size: Option<i64>,
}

impl BookingListParams {
    pub fn page(&self) -> Page {
        Page::new(
            self.from.unwrap_or(0),
            self.size.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DecisionParams {
    /// `true` approves, `false` rejects
    pub approved: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_state_parse_ignores_case() {
        assert_eq!(BookingState::parse(Some("current")).unwrap(), BookingState::Current);
        assert_eq!(BookingState::parse(Some("Rejected")).unwrap(), BookingState::Rejected);
        assert_eq!(BookingState::parse(None).unwrap(), BookingState::All);
    }

    #[test]
    fn test_unknown_state_keeps_raw_value() {
        let err = BookingState::parse(Some("UNSUPPORTED_STATUS")).unwrap_err();
        assert_eq!(err.to_string(), "Unknown state: UNSUPPORTED_STATUS");
    }

    #[test]
    fn test_create_booking_reads_camel_case() {
        let input: CreateBooking = serde_json::from_value(json!({
            "itemId": 4,
            "start": "2030-01-01T10:00:00",
            "end": "2030-01-02T10:00:00"
        }))
        .unwrap();
        assert_eq!(input.item_id, 4);
        assert!(input.end > input.start);
    }
}
