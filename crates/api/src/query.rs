//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Values are clamped in the handlers via
/// `daimo_core::search::{clamp_limit, clamp_offset}`.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for the tag listing endpoint (`?search=`).
#[derive(Debug, Deserialize)]
pub struct TagSearchParams {
    pub search: Option<String>,
}
