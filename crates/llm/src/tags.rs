//! Prompt and parser for the search-tag generation job.
//!
//! The model is asked for exactly [`TAG_CANDIDATE_COUNT`] internal search
//! tags per character, as a bare JSON array of lowercase strings. Model
//! output is untrusted: everything is re-normalized and capped before it
//! touches the database.

use daimo_core::tags::normalize_candidates;

use crate::{strip_code_fences, LlmError};

/// How many tag candidates the model is asked for.
pub const TAG_CANDIDATE_COUNT: usize = 10;

/// Build the tag-generation prompt for a character.
pub fn build_tag_prompt(name: &str, description: &str) -> String {
    format!(
        r#"Generate {TAG_CANDIDATE_COUNT} internal search tags for the voice-AI character "{name}".
Description: "{description}"

Rules:
1. Include SYNONYMS (e.g. for a robot: 'bot', 'android', 'ai').
2. Include INTENT (e.g. 'learning', 'companionship', 'homework', 'play').
3. Include VOICE ATTRIBUTES (e.g. 'calm', 'high-pitched', 'robotic').
4. Lowercase only, no accents, no special characters.

Respond ONLY with a JSON array of {TAG_CANDIDATE_COUNT} strings. Do not write markdown or any other text."#
    )
}

/// Parse the model response into normalized, deduplicated tag names.
///
/// Returns at most [`TAG_CANDIDATE_COUNT`] names; fails when the response
/// is not a JSON string array or yields no usable name at all.
pub fn parse_tag_candidates(response: &str) -> Result<Vec<String>, LlmError> {
    let body = strip_code_fences(response);

    let raw: Vec<String> = serde_json::from_str(body)
        .map_err(|e| LlmError::MalformedOutput(format!("expected a JSON string array: {e}")))?;

    let mut names = normalize_candidates(&raw);
    names.truncate(TAG_CANDIDATE_COUNT);

    if names.is_empty() {
        return Err(LlmError::MalformedOutput(
            "no usable tag candidates in response".to_string(),
        ));
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn prompt_embeds_character_fields() {
        let prompt = build_tag_prompt("Robo", "A helpful robot");
        assert!(prompt.contains("\"Robo\""));
        assert!(prompt.contains("A helpful robot"));
        assert!(prompt.contains("JSON array"));
    }

    #[test]
    fn parses_plain_array() {
        let tags = parse_tag_candidates(r#"["robot","bot","calm"]"#).unwrap();
        assert_eq!(tags, vec!["robot", "bot", "calm"]);
    }

    #[test]
    fn parses_fenced_array_and_normalizes() {
        let tags = parse_tag_candidates("```json\n[\"Robot\", \"Sci Fi\", \"robot\"]\n```").unwrap();
        assert_eq!(tags, vec!["robot", "sci-fi"]);
    }

    #[test]
    fn caps_at_candidate_count() {
        let raw: Vec<String> = (0..20).map(|i| format!("\"tag-{i}\"")).collect();
        let tags = parse_tag_candidates(&format!("[{}]", raw.join(","))).unwrap();
        assert_eq!(tags.len(), TAG_CANDIDATE_COUNT);
    }

    #[test]
    fn rejects_non_array_output() {
        assert_matches!(
            parse_tag_candidates("here are your tags: robot, bot"),
            Err(LlmError::MalformedOutput(_))
        );
    }

    #[test]
    fn rejects_array_with_nothing_usable() {
        assert_matches!(
            parse_tag_candidates(r#"["!!!", "   "]"#),
            Err(LlmError::MalformedOutput(_))
        );
    }
}
