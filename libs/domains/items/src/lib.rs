//! Items Domain
//!
//! Items listed for rent by their owners, the comments renters leave on
//! them, and the owner's view of the previous and upcoming booking.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← /items endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐     ┌──────────────┐
//! │   Service   │ ──▶ │  adjacency   │  ← last / next booking selection
//! └──────┬──────┘     └──────────────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← items, comments, plus the user / request / booking
//! └──────┬──────┘    lookups the item rules need
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Item, ItemDetails, Comment, BookingShort
//! └─────────────┘
//! ```
//!
//! [`Item`] is also the item shape embedded in booking and item request
//! responses.

pub mod adjacency;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{ItemError, ItemResult};
pub use models::{
    BookingShort, Comment, CreateComment, CreateItem, Item, ItemDetails, SearchParams, UpdateItem,
};
pub use postgres::PgItemRepository;
pub use repository::ItemRepository;
pub use service::ItemService;
