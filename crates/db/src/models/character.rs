//! Character entity model and DTOs.

use daimo_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A character row from the `characters` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Character {
    pub id: DbId,
    /// Owning user; stamped at creation and never changed afterwards.
    pub creator_id: DbId,
    pub name: String,
    pub short_description: String,
    pub description: Option<String>,
    /// Opaque object-storage key for the character image.
    pub storage_key: Option<String>,
    pub voice_prompt: String,
    pub first_message_prompt: String,
    pub voice_id: String,
    pub tts_provider: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new character. `creator_id` is not accepted here;
/// the repository stamps it from the authenticated caller.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCharacter {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(length(min = 1, max = 500))]
    pub short_description: String,
    pub description: Option<String>,
    pub storage_key: Option<String>,
    #[validate(length(min = 1))]
    pub voice_prompt: String,
    #[validate(length(min = 1))]
    pub first_message_prompt: String,
    #[validate(length(min = 1))]
    pub voice_id: String,
    #[validate(length(min = 1))]
    pub tts_provider: String,
}
