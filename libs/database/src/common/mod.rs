//! Error type and retry policy used by the connector

pub mod error;
pub mod retry;

pub use error::DatabaseError;
pub use retry::{RetryConfig, retry_with_backoff};
