//! Route definitions for onboarding: the user flag, child profiles, and
//! the wizard's next-step decision.
//!
//! ```text
//! PATCH /users/{id}/onboarding   -> set_completed_onboarding
//! POST  /children                -> create_child (auth)
//! GET   /children/mine           -> my_child (auth)
//! GET   /children/mine/tags      -> child_tags (auth)
//! PUT   /children/mine/tags      -> set_child_tags (auth)
//! GET   /onboarding/next-step    -> next_step (auth)
//! ```

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::onboarding;
use crate::state::AppState;

/// Routes merged into the `/api/v1` tree.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/users/{id}/onboarding",
            patch(onboarding::set_completed_onboarding),
        )
        .route("/children", post(onboarding::create_child))
        .route("/children/mine", get(onboarding::my_child))
        .route(
            "/children/mine/tags",
            get(onboarding::child_tags).put(onboarding::set_child_tags),
        )
        .route("/onboarding/next-step", get(onboarding::next_step))
}
