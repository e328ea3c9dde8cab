//! Request bodies and query strings checked by the gateway.
//!
//! The server validates again; these rules only stop obviously bad input
//! before it crosses the network.

use axum_helpers::{GATEWAY_PAGE_SIZE, Page, validation::not_blank};
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use validator::{Validate, ValidationError};

use crate::error::GatewayError;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct NewUser {
    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub name: String,
    #[validate(custom(function = "not_blank"), email, length(max = 512))]
    pub email: String,
}

#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 255))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(email, length(max = 512))]
    pub email: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub name: String,
    #[validate(custom(function = "not_blank"), length(max = 512))]
    pub description: String,
    #[validate(required)]
    pub available: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<i64>,
}

#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct ItemPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 255))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 512))]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct NewComment {
    #[validate(custom(function = "not_blank"), length(max = 512))]
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct NewItemRequest {
    #[validate(custom(function = "not_blank"), length(max = 512))]
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    #[validate(required)]
    pub item_id: Option<i64>,
    #[validate(required, custom(function = "not_in_past"))]
    pub start: Option<NaiveDateTime>,
    #[validate(required, custom(function = "in_future"))]
    pub end: Option<NaiveDateTime>,
}

fn not_in_past(value: &NaiveDateTime) -> Result<(), ValidationError> {
    if *value < Local::now().naive_local() {
        let mut error = ValidationError::new("past");
        error.message = Some("must not be in the past".into());
        return Err(error);
    }
    Ok(())
}

fn in_future(value: &NaiveDateTime) -> Result<(), ValidationError> {
    if *value <= Local::now().naive_local() {
        let mut error = ValidationError::new("future");
        error.message = Some("must be in the future".into());
        return Err(error);
    }
    Ok(())
}

/// Booking list filter, parsed case-insensitively (`all`, `Current`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum BookingState {
    #[default]
    All,
    Current,
    Past,
    Future,
    Waiting,
    Rejected,
}

impl BookingState {
    pub fn parse(raw: Option<&str>) -> Result<Self, GatewayError> {
        match raw {
            None => Ok(Self::default()),
            Some(raw) => raw
                .parse()
                .map_err(|_| GatewayError::UnknownState(raw.to_string())),
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct BookingListQuery {
    pub state: Option<String>,
    #[validate(range(min = 0))]
    pub from: Option<i64>,
    #[validate(range(min = 1))]
    pub size: Option<i64>,
}

impl BookingListQuery {
    pub fn page(&self) -> Page {
        Page::new(self.from.unwrap_or(0), self.size.unwrap_or(GATEWAY_PAGE_SIZE))
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct SearchQuery {
    #[serde(default)]
    pub text: String,
    #[validate(range(min = 0))]
    pub from: Option<i64>,
    #[validate(range(min = 1))]
    pub size: Option<i64>,
}

impl SearchQuery {
    pub fn page(&self) -> Page {
        Page::new(self.from.unwrap_or(0), self.size.unwrap_or(GATEWAY_PAGE_SIZE))
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct Decision {
    pub approved: bool,
}
