//! Subscription entity model.

use daimo_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A subscription row linking a user to a plan id.
///
/// Plan features themselves are static code (`daimo_core::plans`), not rows.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subscription {
    pub id: DbId,
    pub user_id: DbId,
    pub plan: String,
    pub created_at: Timestamp,
}
