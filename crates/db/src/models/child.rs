//! Child profile entity model and DTOs.

use daimo_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A child profile row from the `childrens` table. At most one per account.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Child {
    pub id: DbId,
    pub parent_id: DbId,
    pub name: String,
    pub age: i32,
    /// `"boy"` or `"girl"` (checked at the schema level).
    pub gender: String,
    /// Freeform interests text used during onboarding.
    pub likes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a child profile. `parent_id` is stamped from the
/// authenticated caller.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateChild {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(range(min = 0, max = 17))]
    pub age: i32,
    pub gender: String,
    pub likes: Option<String>,
}
