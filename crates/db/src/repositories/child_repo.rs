//! Repository for the `childrens` table.

use daimo_core::types::DbId;
use sqlx::PgPool;

use crate::models::child::{Child, CreateChild};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, parent_id, name, age, gender, likes, created_at, updated_at";

/// Provides operations for child profiles (one per account).
pub struct ChildRepo;

impl ChildRepo {
    /// Insert a child profile for `parent_id`, returning the created row.
    ///
    /// A second profile for the same account violates
    /// `uq_childrens_parent_id`, which the API layer surfaces as a 409.
    pub async fn create(
        pool: &PgPool,
        parent_id: DbId,
        input: &CreateChild,
    ) -> Result<Child, sqlx::Error> {
        let query = format!(
            "INSERT INTO childrens (parent_id, name, age, gender, likes)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Child>(&query)
            .bind(parent_id)
            .bind(&input.name)
            .bind(input.age)
            .bind(&input.gender)
            .bind(&input.likes)
            .fetch_one(pool)
            .await
    }

    /// The child profile belonging to `parent_id`, if any.
    pub async fn find_by_parent(
        pool: &PgPool,
        parent_id: DbId,
    ) -> Result<Option<Child>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM childrens WHERE parent_id = $1");
        sqlx::query_as::<_, Child>(&query)
            .bind(parent_id)
            .fetch_optional(pool)
            .await
    }
}
