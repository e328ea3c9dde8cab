//! Item Requests Domain
//!
//! Public asks for items nobody has listed yet. Owners answer a request by
//! creating an item with its `requestId`; every listing returns each request
//! with the items that answer it.

pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{RequestError, RequestResult};
pub use models::{CreateItemRequest, ItemRequest};
pub use postgres::PgItemRequestRepository;
pub use repository::ItemRequestRepository;
pub use service::ItemRequestService;
