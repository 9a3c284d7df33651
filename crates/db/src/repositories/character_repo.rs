//! Repository for the `characters` table.

use daimo_core::types::DbId;
use sqlx::PgPool;

use crate::models::character::{Character, CreateCharacter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, creator_id, name, short_description, description, storage_key, \
     voice_prompt, first_message_prompt, voice_id, tts_provider, created_at, updated_at";

/// Provides CRUD operations for characters.
pub struct CharacterRepo;

impl CharacterRepo {
    /// Insert a new character owned by `creator_id`, returning the created
    /// row. The creator stamp is immutable after this point.
    pub async fn create(
        pool: &PgPool,
        creator_id: DbId,
        input: &CreateCharacter,
    ) -> Result<Character, sqlx::Error> {
        let query = format!(
            "INSERT INTO characters (creator_id, name, short_description, description, \
             storage_key, voice_prompt, first_message_prompt, voice_id, tts_provider)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(creator_id)
            .bind(&input.name)
            .bind(&input.short_description)
            .bind(&input.description)
            .bind(&input.storage_key)
            .bind(&input.voice_prompt)
            .bind(&input.first_message_prompt)
            .bind(&input.voice_id)
            .bind(&input.tts_provider)
            .fetch_one(pool)
            .await
    }

    /// Find a character by its internal ID.
    ///
    /// Absence is an `Ok(None)`, not an error; callers decide whether that
    /// becomes a 404 or a skipped job.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Character>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM characters WHERE id = $1");
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Page of characters owned by `creator_id`, in insertion order.
    ///
    /// Limit/offset are expected to be pre-clamped via
    /// `daimo_core::search::{clamp_limit, clamp_offset}`.
    pub async fn list_by_creator(
        pool: &PgPool,
        creator_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Character>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM characters
             WHERE creator_id = $1
             ORDER BY id ASC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(creator_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Attach (or replace) the stored image key for a character.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn set_storage_key(
        pool: &PgPool,
        id: DbId,
        storage_key: &str,
    ) -> Result<Option<Character>, sqlx::Error> {
        let query = format!(
            "UPDATE characters SET storage_key = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .bind(storage_key)
            .fetch_optional(pool)
            .await
    }
}
