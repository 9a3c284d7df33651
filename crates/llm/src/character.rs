//! Prompt and parser for model-assisted character drafting.
//!
//! An admin supplies a freeform description; the model returns the fields a
//! character record needs. The model is instructed to answer with a bare
//! JSON object, and the response is parsed strictly so a chatty model fails
//! the operation instead of inserting garbage.

use serde::Deserialize;

use crate::{strip_code_fences, LlmError};

/// Fields the model fills in when drafting a character.
#[derive(Debug, Clone, Deserialize)]
pub struct CharacterDraft {
    pub name: String,
    pub description: String,
    pub voice_prompt: String,
    pub first_message_prompt: String,
}

/// Build the character-drafting prompt.
pub fn build_character_prompt(description: &str) -> String {
    format!(
        r#"You are an API that generates JSON.
Generate a character for a voice AI that has to adopt the identity of the
character described here: "{description}".

Respond ONLY with a valid JSON object. Do not write markdown, do not write
"Here is the JSON".

JSON format:
{{
  "name": "Character name",
  "description": "Description of the character (used mainly as a prompt)",
  "voice_prompt": "Voice tone description",
  "first_message_prompt": "The first thing they say"
}}"#
    )
}

/// Parse the model response into a [`CharacterDraft`].
pub fn parse_character_draft(response: &str) -> Result<CharacterDraft, LlmError> {
    let body = strip_code_fences(response);

    let draft: CharacterDraft = serde_json::from_str(body)
        .map_err(|e| LlmError::MalformedOutput(format!("expected a JSON character object: {e}")))?;

    if draft.name.trim().is_empty() {
        return Err(LlmError::MalformedOutput(
            "character draft has an empty name".to_string(),
        ));
    }
    Ok(draft)
}
