//! Handlers for starring characters.
//!
//! The star ledger has one consistency rule: the per-character aggregate
//! count must always equal the star rows it summarizes. Both mutations here
//! write only the `stars` table; the aggregate moves with it inside the
//! same transaction via the database trigger.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use daimo_core::error::CoreError;
use daimo_core::types::DbId;
use daimo_db::repositories::{CharacterRepo, StarRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

/// POST /api/v1/characters/{id}/star
///
/// Stars the character for the caller. Starring an already-starred
/// character is a no-op, so repeat calls cannot inflate the count.
pub async fn star(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(character_id): Path<DbId>,
) -> AppResult<StatusCode> {
    ensure_character_exists(&state, character_id).await?;

    let created = StarRepo::star(&state.pool, user.user_id, character_id).await?;
    if created {
        tracing::debug!(user_id = user.user_id, character_id, "Star recorded");
    }
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/characters/{id}/star
///
/// Removes the caller's star; 404 when the caller has not starred this
/// character, with the star table left unchanged.
pub async fn unstar(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(character_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let removed = StarRepo::unstar(&state.pool, user.user_id, character_id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Star for character",
            id: character_id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Whether the calling user has starred a character.
#[derive(Debug, Serialize)]
pub struct StarStateResponse {
    pub starring: bool,
}

/// GET /api/v1/characters/{id}/star
pub async fn is_starring(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(character_id): Path<DbId>,
) -> AppResult<Json<StarStateResponse>> {
    let starring = StarRepo::is_starring(&state.pool, user.user_id, character_id).await?;
    Ok(Json(StarStateResponse { starring }))
}

/// Aggregate star count for a character.
#[derive(Debug, Serialize)]
pub struct StarCountResponse {
    pub count: i64,
}

/// GET /api/v1/characters/{id}/stars
///
/// Public read of the trigger-maintained aggregate (0 when never starred).
pub async fn star_count(
    State(state): State<AppState>,
    Path(character_id): Path<DbId>,
) -> AppResult<Json<StarCountResponse>> {
    let count = StarRepo::star_count(&state.pool, character_id).await?;
    Ok(Json(StarCountResponse { count }))
}

async fn ensure_character_exists(state: &AppState, character_id: DbId) -> AppResult<()> {
    CharacterRepo::find_by_id(&state.pool, character_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id: character_id,
        }))?;
    Ok(())
}
