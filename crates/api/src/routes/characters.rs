//! Route definitions for the `/characters` resource, including the
//! per-character star sub-resource.
//!
//! ```text
//! POST   /                     -> create (admin)
//! POST   /generate             -> generate (admin)
//! POST   /upload-url           -> upload_url (admin)
//! GET    /mine                 -> list_mine (auth)
//! GET    /{id}                 -> get_by_id
//! PUT    /{id}/storage-key     -> set_storage_key (admin)
//! GET    /{id}/tags            -> list_tags
//! GET    /{id}/star            -> is_starring (auth)
//! POST   /{id}/star            -> star (auth)
//! DELETE /{id}/star            -> unstar (auth)
//! GET    /{id}/stars           -> star_count
//! ```
//!
//! Note: the literal routes (`/mine`, `/generate`, `/upload-url`) are
//! registered alongside `/{id}`; Axum prefers exact matches over captures.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{characters, stars};
use crate::state::AppState;

/// Routes mounted at `/characters`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(characters::create))
        .route("/generate", post(characters::generate))
        .route("/upload-url", post(characters::upload_url))
        .route("/mine", get(characters::list_mine))
        .route("/{id}", get(characters::get_by_id))
        .route("/{id}/storage-key", put(characters::set_storage_key))
        .route("/{id}/tags", get(characters::list_tags))
        .route(
            "/{id}/star",
            get(stars::is_starring)
                .post(stars::star)
                .delete(stars::unstar),
        )
        .route("/{id}/stars", get(stars::star_count))
}
