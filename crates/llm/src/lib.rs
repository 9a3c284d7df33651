//! Text-generation boundary.
//!
//! Model calls go through the [`TextModel`] trait so callers receive the
//! client by explicit injection (an `Arc<dyn TextModel>` built once at
//! startup) rather than reaching for a process-wide global, and tests can
//! substitute a canned fake.

use async_trait::async_trait;
use genai::chat::ChatRequest;
use genai::Client;

pub mod character;
pub mod tags;

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("model request failed: {0}")]
    Request(#[from] genai::Error),

    #[error("model returned an empty response")]
    EmptyResponse,

    #[error("model returned malformed output: {0}")]
    MalformedOutput(String),
}

/// A provider that completes a single-turn prompt with text.
#[async_trait]
pub trait TextModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

/// [`TextModel`] backed by the `genai` multi-provider client.
///
/// Provider API keys are picked up from the environment by `genai` itself
/// (e.g. `GEMINI_API_KEY`, `GROQ_API_KEY`), keyed off the model name.
pub struct GenaiTextModel {
    client: Client,
    model: String,
}

impl GenaiTextModel {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: Client::default(),
            model: model.into(),
        }
    }
}

#[async_trait]
impl TextModel for GenaiTextModel {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let request = ChatRequest::from_user(prompt);
        let response = self.client.exec_chat(&self.model, request, None).await?;

        response
            .content_text_as_str()
            .map(str::to_string)
            .ok_or(LlmError::EmptyResponse)
    }
}

/// Strip markdown code fences some models wrap around JSON output.
pub(crate) fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop an optional language tag on the fence line.
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.trim_end_matches("```").trim()
}

#[cfg(test)]
mod tests {
    use super::strip_code_fences;

    #[test]
    fn passes_bare_text_through() {
        assert_eq!(strip_code_fences("[\"a\"]"), "[\"a\"]");
    }

    #[test]
    fn strips_json_fences() {
        assert_eq!(strip_code_fences("```json\n[\"a\"]\n```"), "[\"a\"]");
        assert_eq!(strip_code_fences("```\n{}\n```"), "{}");
    }
}
