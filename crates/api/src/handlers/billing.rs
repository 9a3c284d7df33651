//! Handlers for subscriptions and the static plan table.

use axum::extract::{Path, State};
use axum::Json;
use daimo_core::plans::{self, PlanFeatures};
use daimo_db::models::subscription::Subscription;
use daimo_db::repositories::SubscriptionRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

/// GET /api/v1/subscriptions/current
///
/// The caller's subscription, or JSON `null` when they have never
/// subscribed; absence is not an error here.
pub async fn current_subscription(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<Option<Subscription>>> {
    let subscription = SubscriptionRepo::current_for_user(&state.pool, user.user_id).await?;
    Ok(Json(subscription))
}

/// GET /api/v1/plans/{plan_id}
///
/// Static feature lookup; plans are configuration, not rows.
pub async fn plan_features(Path(plan_id): Path<String>) -> AppResult<Json<&'static PlanFeatures>> {
    let features = plans::get_features(&plan_id)
        .ok_or_else(|| AppError::NotFound(format!("Plan '{plan_id}' not found")))?;
    Ok(Json(features))
}
