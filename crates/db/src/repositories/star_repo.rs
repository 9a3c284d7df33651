//! Repository for the `stars` table and its trigger-maintained aggregate.
//!
//! `character_star_counts` is written only by the `trg_stars_count` trigger,
//! in the same transaction as the star insert/delete. This repo never
//! touches the aggregate except to read it.

use daimo_core::types::DbId;
use sqlx::PgPool;

use crate::models::star::Star;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, starred_by, starred_character, created_at";

/// Provides star/unstar operations and aggregate reads.
pub struct StarRepo;

impl StarRepo {
    /// Record that `user_id` starred `character_id`.
    ///
    /// Returns `true` if a star row was written, `false` when the pair was
    /// already starred (the duplicate insert is absorbed by
    /// `uq_stars_user_character` and leaves the count untouched).
    pub async fn star(
        pool: &PgPool,
        user_id: DbId,
        character_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO stars (starred_by, starred_character)
             VALUES ($1, $2)
             ON CONFLICT (starred_by, starred_character) DO NOTHING",
        )
        .bind(user_id)
        .bind(character_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete `user_id`'s star on `character_id`.
    ///
    /// Returns `false` when no such star exists; nothing is changed in that
    /// case, including the aggregate.
    pub async fn unstar(
        pool: &PgPool,
        user_id: DbId,
        character_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM stars WHERE starred_by = $1 AND starred_character = $2",
        )
        .bind(user_id)
        .bind(character_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// The unique star for a (user, character) pair, if any.
    pub async fn find(
        pool: &PgPool,
        user_id: DbId,
        character_id: DbId,
    ) -> Result<Option<Star>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM stars WHERE starred_by = $1 AND starred_character = $2"
        );
        sqlx::query_as::<_, Star>(&query)
            .bind(user_id)
            .bind(character_id)
            .fetch_optional(pool)
            .await
    }

    /// Existence check over the (user, character) unique index.
    pub async fn is_starring(
        pool: &PgPool,
        user_id: DbId,
        character_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        Ok(Self::find(pool, user_id, character_id).await?.is_some())
    }

    /// Read the aggregate star count for a character (0 when never starred).
    pub async fn star_count(pool: &PgPool, character_id: DbId) -> Result<i64, sqlx::Error> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT star_count FROM character_star_counts WHERE character_id = $1",
        )
        .bind(character_id)
        .fetch_optional(pool)
        .await?;
        Ok(count.unwrap_or(0))
    }

    /// Count star rows directly, bypassing the aggregate. Used by tests to
    /// assert the aggregate never drifts from the rows it summarizes.
    pub async fn count_rows(pool: &PgPool, character_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM stars WHERE starred_character = $1",
        )
        .bind(character_id)
        .fetch_one(pool)
        .await
    }
}
