//! Custom extractors for Axum handlers.
//!
//! Every rejection is an [`AppError`](crate::errors::AppError) response, so
//! clients see the same error body whether a header, path, query or JSON
//! body was wrong.

pub mod id_path;
pub mod sharer_user_id;
pub mod validated_json;
pub mod validated_query;

pub use id_path::IdPath;
pub use sharer_user_id::{SHARER_USER_ID_HEADER, SharerUserId};
pub use validated_json::ValidatedJson;
pub use validated_query::ValidatedQuery;

/// Parses a strictly positive database id.
pub(crate) fn parse_positive_id(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|id| *id > 0)
}
