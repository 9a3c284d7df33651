//! Route-tree assembly for `/api/v1`.

pub mod billing;
pub mod characters;
pub mod health;
pub mod onboarding;
pub mod tags;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /characters                        create (admin), generate (admin)
/// /characters/mine                   caller's characters (auth)
/// /characters/upload-url             presigned image upload (admin)
/// /characters/{id}                   public read
/// /characters/{id}/storage-key       attach image blob (admin)
/// /characters/{id}/tags              public read
/// /characters/{id}/star              star state / star / unstar (auth)
/// /characters/{id}/stars             public aggregate count
///
/// /tags                              public search / recency listing
///
/// /subscriptions/current             caller's subscription (auth)
/// /plans/{plan_id}                   static plan features
///
/// /users/{id}/onboarding             onboarding flag patch
/// /children                          child profile create (auth)
/// /children/mine[/tags]              caller's child + tags (auth)
/// /onboarding/next-step              wizard redirect decision (auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/characters", characters::router())
        .nest("/tags", tags::router())
        .merge(billing::router())
        .merge(onboarding::router())
}
