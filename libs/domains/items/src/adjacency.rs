//! Selection of the bookings shown next to an item for its owner.
//!
//! - last: approved, already started, latest `end`
//! - next: not rejected, not yet started, earliest `start`

use chrono::NaiveDateTime;
use entity::BookingStatus;

use crate::models::BookingShort;

pub fn last_booking(bookings: &[BookingShort], now: NaiveDateTime) -> Option<BookingShort> {
    bookings
        .iter()
        .filter(|b| b.status == BookingStatus::Approved && b.start < now)
        .max_by_key(|b| b.end)
        .cloned()
}

pub fn next_booking(bookings: &[BookingShort], now: NaiveDateTime) -> Option<BookingShort> {
    bookings
        .iter()
        .filter(|b| b.status != BookingStatus::Rejected && b.start > now)
        .min_by_key(|b| b.start)
        .cloned()
}
