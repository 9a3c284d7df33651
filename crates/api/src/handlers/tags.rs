//! Handlers for the `/tags` resource.

use axum::extract::{Query, State};
use axum::Json;
use daimo_core::search::escape_like_term;
use daimo_db::models::tag::Tag;
use daimo_db::repositories::TagRepo;

use crate::error::AppResult;
use crate::query::TagSearchParams;
use crate::state::AppState;

/// GET /api/v1/tags
///
/// Up to 10 tags. With a usable `?search=` term, substring matches in name
/// order; otherwise the most recently created tags.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<TagSearchParams>,
) -> AppResult<Json<Vec<Tag>>> {
    let term = params.search.as_deref().and_then(escape_like_term);
    let tags = TagRepo::list(&state.pool, term.as_deref()).await?;
    Ok(Json(tags))
}
