//! Handlers for the `/characters` resource.
//!
//! Characters are created by admins only; reads are public. Every read
//! decorates the row with a freshly presigned `storage_url` for its image
//! blob -- the URL is derived, never persisted.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use daimo_core::error::CoreError;
use daimo_core::search::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use daimo_core::types::DbId;
use daimo_db::models::character::{Character, CreateCharacter};
use daimo_db::models::tag::Tag;
use daimo_db::repositories::{CharacterRepo, TagRepo};
use daimo_llm::character::{build_character_prompt, parse_character_draft};
use daimo_storage::ObjectStorage;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::background;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::query::PaginationParams;
use crate::state::AppState;

/// A character decorated with a resolved (presigned) image URL.
#[derive(Debug, Serialize)]
pub struct CharacterWithUrl {
    #[serde(flatten)]
    pub character: Character,
    /// `null` when no blob is attached or the provider refused to sign.
    pub storage_url: Option<String>,
}

/// Resolve the accessible URL for a character's image blob.
///
/// Resolution failures are logged and rendered as an absent URL rather than
/// failing the read: a missing blob must not make the character unreadable.
async fn with_storage_url(storage: &dyn ObjectStorage, character: Character) -> CharacterWithUrl {
    let storage_url = match character.storage_key.as_deref() {
        Some(key) => match storage.download_url(key).await {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::warn!(character_id = character.id, error = %e, "Failed to presign storage URL");
                None
            }
        },
        None => None,
    };

    CharacterWithUrl {
        character,
        storage_url,
    }
}

/// POST /api/v1/characters
///
/// Admin only. Stamps the caller as creator and schedules tag generation
/// for the new character out-of-band.
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateCharacter>,
) -> AppResult<(StatusCode, Json<Character>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let character = CharacterRepo::create(&state.pool, admin.user_id, &input).await?;
    tracing::info!(character_id = character.id, creator_id = admin.user_id, "Character created");

    background::tag_generation::schedule(&state, character.id);

    Ok((StatusCode::CREATED, Json(character)))
}

/// Request body for POST /characters/generate.
#[derive(Debug, Deserialize, Validate)]
pub struct GenerateCharacter {
    /// Freeform description the model drafts the character from; becomes
    /// the stored short description.
    #[validate(length(min = 1, max = 500))]
    pub description: String,
    #[validate(length(min = 1))]
    pub voice_id: String,
    #[validate(length(min = 1))]
    pub tts_provider: String,
}

/// POST /api/v1/characters/generate
///
/// Admin only. Asks the text model to draft the character fields from a
/// freeform description, then inserts the draft exactly like a manual
/// create. A model or parse failure aborts with 502 and writes nothing.
pub async fn generate(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<GenerateCharacter>,
) -> AppResult<(StatusCode, Json<Character>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let prompt = build_character_prompt(&input.description);
    let response = state.text_model.complete(&prompt).await?;
    let draft = parse_character_draft(&response)?;

    let create = CreateCharacter {
        name: draft.name,
        short_description: input.description,
        description: Some(draft.description),
        storage_key: None,
        voice_prompt: draft.voice_prompt,
        first_message_prompt: draft.first_message_prompt,
        voice_id: input.voice_id,
        tts_provider: input.tts_provider,
    };
    create
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(format!("model draft rejected: {e}"))))?;

    let character = CharacterRepo::create(&state.pool, admin.user_id, &create).await?;
    tracing::info!(character_id = character.id, creator_id = admin.user_id, "Character drafted by model");

    background::tag_generation::schedule(&state, character.id);

    Ok((StatusCode::CREATED, Json(character)))
}

/// GET /api/v1/characters/mine
///
/// Page of the caller's own characters in insertion order, each with a
/// resolved storage URL.
pub async fn list_mine(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Vec<CharacterWithUrl>>> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);

    let characters =
        CharacterRepo::list_by_creator(&state.pool, user.user_id, limit, offset).await?;

    let mut page = Vec::with_capacity(characters.len());
    for character in characters {
        page.push(with_storage_url(state.storage.as_ref(), character).await);
    }
    Ok(Json(page))
}

/// GET /api/v1/characters/{id}
///
/// Public read; absence is a 404 decided here, not in the repository.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<CharacterWithUrl>> {
    let character = CharacterRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id,
        }))?;
    Ok(Json(with_storage_url(state.storage.as_ref(), character).await))
}

/// GET /api/v1/characters/{id}/tags
pub async fn list_tags(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Tag>>> {
    let tags = TagRepo::list_for_character(&state.pool, id).await?;
    Ok(Json(tags))
}

/// Response for POST /characters/upload-url.
#[derive(Debug, Serialize)]
pub struct UploadUrlResponse {
    /// Opaque storage key to attach to the character after the upload.
    pub key: String,
    /// Presigned PUT URL, valid for the configured upload window.
    pub url: String,
}

/// Request body for POST /characters/upload-url.
#[derive(Debug, Deserialize)]
pub struct UploadUrlRequest {
    /// Content type of the blob to be uploaded (default: `image/png`).
    pub content_type: Option<String>,
}

/// POST /api/v1/characters/upload-url
///
/// Admin only. Mints a fresh storage key and a presigned PUT URL for a
/// character image; the key is attached to a character in a separate call.
pub async fn upload_url(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<UploadUrlRequest>,
) -> AppResult<Json<UploadUrlResponse>> {
    let key = format!("characters/{}", Uuid::now_v7());
    let content_type = input.content_type.as_deref().unwrap_or("image/png");

    let url = state.storage.upload_url(&key, content_type).await?;
    Ok(Json(UploadUrlResponse { key, url }))
}

/// Request body for PUT /characters/{id}/storage-key.
#[derive(Debug, Deserialize, Validate)]
pub struct SetStorageKey {
    #[validate(length(min = 1))]
    pub storage_key: String,
}

/// PUT /api/v1/characters/{id}/storage-key
///
/// Admin only. Attaches an uploaded blob to the character.
pub async fn set_storage_key(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SetStorageKey>,
) -> AppResult<Json<CharacterWithUrl>> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let character = CharacterRepo::set_storage_key(&state.pool, id, &input.storage_key)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id,
        }))?;
    Ok(Json(with_storage_url(state.storage.as_ref(), character).await))
}
