//! Tag entity model.

use daimo_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A tag row from the `tags` table. Names are unique, lowercase, and never
/// edited or deleted once created. Relations to characters and children
/// live in join tables owned by the tag repository.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tag {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}
