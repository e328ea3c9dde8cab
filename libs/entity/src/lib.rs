//! SeaORM entities for the ShareIt schema.
//!
//! The tables reference each other (items → users, bookings → items, …), so
//! the entities and their `Related` impls live together here; every domain
//! crate maps them onto its own models.

pub mod bookings;
pub mod comments;
pub mod item_requests;
pub mod items;
pub mod users;

pub use bookings::BookingStatus;
