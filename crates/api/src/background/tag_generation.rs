//! Model-backed search-tag generation for a character.
//!
//! Runs out-of-band after character creation: fetch the character, ask the
//! text model for tag candidates, then fan out one create-if-absent plus
//! relate per candidate concurrently. Each candidate is its own pair of
//! atomic writes; there is no batch transaction, so a mid-run failure can
//! leave a partial tag set (and a later rerun converges, since every write
//! is a no-op once its row exists).

use daimo_core::error::CoreError;
use daimo_core::types::DbId;
use daimo_db::repositories::{CharacterRepo, TagRepo};
use daimo_llm::tags::{build_tag_prompt, parse_tag_candidates};
use daimo_llm::TextModel;
use sqlx::PgPool;
use std::sync::Arc;
use tokio::task::JoinSet;

use crate::error::AppError;
use crate::state::AppState;

/// Spawn the generation job for a freshly created character.
///
/// Detached on purpose: creation must not wait on the model, and a failed
/// job must not affect the character row. Failures are logged only.
pub fn schedule(state: &AppState, character_id: DbId) {
    let pool = state.pool.clone();
    let model = Arc::clone(&state.text_model);

    tokio::spawn(async move {
        match run(&pool, model.as_ref(), character_id).await {
            Ok(related) => {
                tracing::info!(character_id, related, "Tag generation finished");
            }
            Err(e) => {
                tracing::error!(character_id, error = %e, "Tag generation failed");
            }
        }
    });
}

/// Generate and relate tags for `character_id`, returning how many
/// candidates were successfully related.
///
/// Fails with `NotFound` when the character is absent and propagates model
/// failures; individual candidate write errors are logged and skipped.
pub async fn run(
    pool: &PgPool,
    model: &dyn TextModel,
    character_id: DbId,
) -> Result<usize, AppError> {
    let character = CharacterRepo::find_by_id(pool, character_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id: character_id,
        }))?;

    let description = character
        .description
        .as_deref()
        .unwrap_or(&character.short_description);
    let prompt = build_tag_prompt(&character.name, description);

    let response = model.complete(&prompt).await?;
    let candidates = parse_tag_candidates(&response)?;

    let mut join_set = JoinSet::new();
    for name in candidates {
        let pool = pool.clone();
        join_set.spawn(async move {
            let tag = TagRepo::create_if_absent(&pool, &name).await?;
            TagRepo::relate(&pool, tag.id, character_id).await?;
            Ok::<String, sqlx::Error>(name)
        });
    }

    let mut related = 0;
    while let Some(result) = join_set.join_next().await {
        match result {
            Ok(Ok(name)) => {
                tracing::debug!(character_id, tag = %name, "Tag related");
                related += 1;
            }
            Ok(Err(e)) => {
                tracing::warn!(character_id, error = %e, "Tag candidate write failed, skipping");
            }
            Err(e) => {
                tracing::warn!(character_id, error = %e, "Tag candidate task panicked, skipping");
            }
        }
    }

    Ok(related)
}
