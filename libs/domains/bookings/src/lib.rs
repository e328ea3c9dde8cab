//! Bookings Domain
//!
//! Reservations of an item for a date range. A booking starts `WAITING`
//! and is approved or rejected once by the item's owner.
//!
//! ```text
//!            approve
//! WAITING ───────────▶ APPROVED
//!    │
//!    └───────────────▶ REJECTED
//!            reject
//! ```
//!
//! Listings filter by [`BookingState`], a view over status and dates
//! relative to now, and are ordered by start, newest first.

pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{BookingError, BookingResult};
pub use models::{Booking, BookingListParams, BookingState, CreateBooking, DecisionParams};
pub use postgres::PgBookingRepository;
pub use repository::BookingRepository;
pub use service::BookingService;
