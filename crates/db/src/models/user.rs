//! User entity model and DTOs.

use daimo_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user row from the `users` table.
///
/// Credentials and sessions live in the external identity provider; this
/// row is the local projection used for ownership and onboarding state.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub username: String,
    /// Role name (`"admin"` or `"user"`).
    pub role: String,
    pub completed_onboarding: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new user projection.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub username: String,
    /// Defaults to `"user"` if omitted.
    pub role: Option<String>,
}
