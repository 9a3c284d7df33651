//! Route definitions for the `/tags` resource.
//!
//! ```text
//! GET /   -> list (public; ?search= substring or recency order)
//! ```
//!
//! Tag creation has no public route: tags come into existence through the
//! generation job and are related to characters internally.

use axum::routing::get;
use axum::Router;

use crate::handlers::tags;
use crate::state::AppState;

/// Routes mounted at `/tags`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(tags::list))
}
