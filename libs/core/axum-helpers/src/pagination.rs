//! `from` / `size` paging shared by every list endpoint.
//!
//! `from` is an element index, not a page number. The page containing it is
//! returned: with `from=7&size=5` the caller gets rows 5..10.

use serde::{Deserialize, Serialize};
use utoipa::IntoParams;
use validator::Validate;

/// Page size the server uses when `size` is omitted.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Page size the gateway forwards when `size` is omitted.
pub const GATEWAY_PAGE_SIZE: i64 = 10;

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Index of the first wanted element (>= 0)
    #[validate(range(min = 0))]
    pub from: Option<i64>,
    /// Page size (> 0)
    #[validate(range(min = 1))]
    pub size: Option<i64>,
}

impl PageParams {
    pub fn resolve(&self, default_size: i64) -> Page {
        Page::new(self.from.unwrap_or(0), self.size.unwrap_or(default_size))
    }
}

/// Validated window over an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub from: i64,
    pub size: i64,
}

impl Page {
    /// Callers validate first; out-of-range values are clamped.
    pub fn new(from: i64, size: i64) -> Self {
        Self {
            from: from.max(0),
            size: size.max(1),
        }
    }

    /// Row offset of the page containing `from`.
    pub fn offset(&self) -> u64 {
        ((self.from / self.size) * self.size) as u64
    }

    pub fn limit(&self) -> u64 {
        self.size as u64
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}
