//! Route definitions for subscriptions and plans.
//!
//! ```text
//! GET /subscriptions/current  -> current_subscription (auth)
//! GET /plans/{plan_id}        -> plan_features
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::billing;
use crate::state::AppState;

/// Routes merged into the `/api/v1` tree.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/subscriptions/current", get(billing::current_subscription))
        .route("/plans/{plan_id}", get(billing::plan_features))
}
