//! Star entity model.

use daimo_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A star row from the `stars` table: one user's vote for one character.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Star {
    pub id: DbId,
    pub starred_by: DbId,
    pub starred_character: DbId,
    pub created_at: Timestamp,
}
