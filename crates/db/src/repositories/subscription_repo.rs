//! Repository for the `subscriptions` table.

use daimo_core::types::DbId;
use sqlx::PgPool;

use crate::models::subscription::Subscription;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, plan, created_at";

/// Provides subscription lookups.
pub struct SubscriptionRepo;

impl SubscriptionRepo {
    /// The caller's current subscription: first row in insertion order, or
    /// `None` when the user has never subscribed.
    pub async fn current_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Subscription>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM subscriptions
             WHERE user_id = $1
             ORDER BY id ASC
             LIMIT 1"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a subscription row. Used by billing webhooks and test setup;
    /// no uniqueness is enforced, matching the first-match read contract.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        plan: &str,
    ) -> Result<Subscription, sqlx::Error> {
        let query = format!(
            "INSERT INTO subscriptions (user_id, plan)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(user_id)
            .bind(plan)
            .fetch_one(pool)
            .await
    }
}
