//! Repository for tags and their relations to characters and children.
//!
//! Create-if-absent semantics live at the storage layer: a lost race on
//! `uq_tags_name` (or a relation unique constraint) is a rejected duplicate
//! write that the methods here absorb as "already exists".

use daimo_core::search::TAG_SEARCH_LIMIT;
use daimo_core::types::DbId;
use sqlx::PgPool;

use crate::models::tag::Tag;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at";

/// Provides tag lookup, creation and relation operations.
pub struct TagRepo;

impl TagRepo {
    /// Exact-match lookup over the unique name index.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tags WHERE name = $1");
        sqlx::query_as::<_, Tag>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Find a tag by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tags WHERE id = $1");
        sqlx::query_as::<_, Tag>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Create a tag if no tag with this name exists, returning the row
    /// either way.
    ///
    /// Two concurrent calls for the same name converge on the same row: the
    /// loser's insert is a no-op and the follow-up read sees the winner's
    /// committed row (tags are never deleted, so the read cannot miss).
    pub async fn create_if_absent(pool: &PgPool, name: &str) -> Result<Tag, sqlx::Error> {
        let insert = format!(
            "INSERT INTO tags (name) VALUES ($1)
             ON CONFLICT (name) DO NOTHING
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, Tag>(&insert)
            .bind(name)
            .fetch_optional(pool)
            .await?;

        match inserted {
            Some(tag) => Ok(tag),
            None => {
                let query = format!("SELECT {COLUMNS} FROM tags WHERE name = $1");
                sqlx::query_as::<_, Tag>(&query).bind(name).fetch_one(pool).await
            }
        }
    }

    /// Relate a tag to a character. Returns `true` if a join row was
    /// written, `false` when the relation already existed.
    pub async fn relate(
        pool: &PgPool,
        tag_id: DbId,
        character_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO character_tags (character_id, tag_id)
             VALUES ($1, $2)
             ON CONFLICT (character_id, tag_id) DO NOTHING",
        )
        .bind(character_id)
        .bind(tag_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Relate a tag to a child profile. Same no-op-on-duplicate contract as
    /// [`TagRepo::relate`].
    pub async fn relate_child(
        pool: &PgPool,
        tag_id: DbId,
        child_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO children_tags (child_id, tag_id)
             VALUES ($1, $2)
             ON CONFLICT (child_id, tag_id) DO NOTHING",
        )
        .bind(child_id)
        .bind(tag_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Up to [`TAG_SEARCH_LIMIT`] tags matching an escaped substring term,
    /// or the most recently created tags when `term` is `None`.
    pub async fn list(pool: &PgPool, term: Option<&str>) -> Result<Vec<Tag>, sqlx::Error> {
        match term {
            Some(term) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM tags
                     WHERE name ILIKE '%' || $1 || '%'
                     ORDER BY name ASC
                     LIMIT $2"
                );
                sqlx::query_as::<_, Tag>(&query)
                    .bind(term)
                    .bind(TAG_SEARCH_LIMIT)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM tags
                     ORDER BY created_at DESC, id DESC
                     LIMIT $1"
                );
                sqlx::query_as::<_, Tag>(&query)
                    .bind(TAG_SEARCH_LIMIT)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// All tags related to a character, in name order.
    pub async fn list_for_character(
        pool: &PgPool,
        character_id: DbId,
    ) -> Result<Vec<Tag>, sqlx::Error> {
        sqlx::query_as::<_, Tag>(
            "SELECT t.id, t.name, t.created_at FROM tags t
             JOIN character_tags ct ON ct.tag_id = t.id
             WHERE ct.character_id = $1
             ORDER BY t.name ASC",
        )
        .bind(character_id)
        .fetch_all(pool)
        .await
    }

    /// All tags related to a child profile, in name order.
    pub async fn list_for_child(pool: &PgPool, child_id: DbId) -> Result<Vec<Tag>, sqlx::Error> {
        sqlx::query_as::<_, Tag>(
            "SELECT t.id, t.name, t.created_at FROM tags t
             JOIN children_tags ctg ON ctg.tag_id = t.id
             WHERE ctg.child_id = $1
             ORDER BY t.name ASC",
        )
        .bind(child_id)
        .fetch_all(pool)
        .await
    }
}
