//! Handlers for onboarding: the user flag, child profiles, and the
//! next-step redirect decision the onboarding wizard follows.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use daimo_core::error::CoreError;
use daimo_core::types::DbId;
use daimo_db::models::child::{Child, CreateChild};
use daimo_db::models::tag::Tag;
use daimo_db::models::user::User;
use daimo_db::repositories::{ChildRepo, TagRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

/// Onboarding wizard steps, in the order the redirect decision walks them.
const STEP_GETTING_STARTED: &str = "/onboarding/getting-started";
const STEP_PROFILE_TAGS: &str = "/onboarding/profile-tags";
const STEP_CHARACTER_SELECTION: &str = "/onboarding/character-selection";

// ---------------------------------------------------------------------------
// User flag
// ---------------------------------------------------------------------------

/// Request body for PATCH /users/{id}/onboarding.
#[derive(Debug, Deserialize)]
pub struct SetOnboardingRequest {
    pub completed_onboarding: bool,
}

/// PATCH /api/v1/users/{id}/onboarding
///
/// Patches the onboarding-completed flag on the addressed user.
pub async fn set_completed_onboarding(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
    Json(input): Json<SetOnboardingRequest>,
) -> AppResult<Json<User>> {
    let user = UserRepo::set_completed_onboarding(&state.pool, user_id, input.completed_onboarding)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;
    Ok(Json(user))
}

// ---------------------------------------------------------------------------
// Child profiles
// ---------------------------------------------------------------------------

/// POST /api/v1/children
///
/// Creates the caller's child profile. A second profile for the same
/// account is rejected with 409 by `uq_childrens_parent_id`.
pub async fn create_child(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<CreateChild>,
) -> AppResult<(StatusCode, Json<Child>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    if input.gender != "boy" && input.gender != "girl" {
        return Err(AppError::Core(CoreError::Validation(
            "gender must be 'boy' or 'girl'".to_string(),
        )));
    }

    let child = ChildRepo::create(&state.pool, user.user_id, &input).await?;
    tracing::info!(child_id = child.id, parent_id = user.user_id, "Child profile created");
    Ok((StatusCode::CREATED, Json(child)))
}

/// GET /api/v1/children/mine
pub async fn my_child(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<Option<Child>>> {
    let child = ChildRepo::find_by_parent(&state.pool, user.user_id).await?;
    Ok(Json(child))
}

/// Request body for PUT /children/mine/tags.
#[derive(Debug, Deserialize)]
pub struct SetChildTagsRequest {
    pub tag_ids: Vec<DbId>,
}

/// PUT /api/v1/children/mine/tags
///
/// Relates existing tags to the caller's child profile. Each tag must
/// exist; duplicate relations are no-ops. Returns the full tag list after
/// the update.
pub async fn set_child_tags(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<SetChildTagsRequest>,
) -> AppResult<Json<Vec<Tag>>> {
    let child = require_child(&state, user.user_id).await?;

    for tag_id in &input.tag_ids {
        let tag = TagRepo::find_by_id(&state.pool, *tag_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Tag",
                id: *tag_id,
            }))?;
        TagRepo::relate_child(&state.pool, tag.id, child.id).await?;
    }

    let tags = TagRepo::list_for_child(&state.pool, child.id).await?;
    Ok(Json(tags))
}

/// GET /api/v1/children/mine/tags
pub async fn child_tags(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Tag>>> {
    let child = require_child(&state, user.user_id).await?;
    let tags = TagRepo::list_for_child(&state.pool, child.id).await?;
    Ok(Json(tags))
}

// ---------------------------------------------------------------------------
// Redirect decision
// ---------------------------------------------------------------------------

/// Where the onboarding wizard should send the caller next.
#[derive(Debug, Serialize)]
pub struct NextStepResponse {
    pub next_step: &'static str,
}

/// GET /api/v1/onboarding/next-step
///
/// No child profile -> getting started; child without tags -> profile
/// tags; otherwise character selection.
pub async fn next_step(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<NextStepResponse>> {
    let Some(child) = ChildRepo::find_by_parent(&state.pool, user.user_id).await? else {
        return Ok(Json(NextStepResponse {
            next_step: STEP_GETTING_STARTED,
        }));
    };

    let tags = TagRepo::list_for_child(&state.pool, child.id).await?;
    let next_step = if tags.is_empty() {
        STEP_PROFILE_TAGS
    } else {
        STEP_CHARACTER_SELECTION
    };
    Ok(Json(NextStepResponse { next_step }))
}

async fn require_child(state: &AppState, parent_id: DbId) -> AppResult<Child> {
    ChildRepo::find_by_parent(&state.pool, parent_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No child profile for this account".to_string()))
}
