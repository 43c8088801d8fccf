//! JSON chat helper.
//!
//! Every generation stage asks the model for JSON and must keep going when it
//! does not get any, so the helper reports what came back as a value instead
//! of an error.

use crate::strip_code_fence;
use serde_json::Value;
use tracing::{debug, error, instrument, warn};
use whodunit_core::GenerateRequest;
use whodunit_interface::CompletionDriver;

/// Appended to every user instruction sent through [`chat_json`].
pub const JSON_ONLY_SUFFIX: &str = "\n\nRespond ONLY with valid JSON, no explanation, no markdown.";

/// Default temperature for JSON chats.
pub const DEFAULT_JSON_TEMPERATURE: f32 = 0.6;

/// What a JSON chat produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelReply {
    /// The reply parsed as JSON once a surrounding code fence was removed
    Json(Value),
    /// The reply did not parse; the original text is kept for later recovery
    RawText(String),
    /// The completion call itself failed
    Failure(String),
}

impl ModelReply {
    /// The parsed value, if the reply was JSON.
    pub fn json(&self) -> Option<&Value> {
        match self {
            ModelReply::Json(value) => Some(value),
            ModelReply::RawText(_) | ModelReply::Failure(_) => None,
        }
    }

    /// A printable form of the reply, kept as `raw_model_output` by stages
    /// that fall back to defaults.
    pub fn describe(&self) -> String {
        match self {
            ModelReply::Json(value) => value.to_string(),
            ModelReply::RawText(text) => text.clone(),
            ModelReply::Failure(message) => format!("[LLM ERROR] {}", message),
        }
    }

    /// Classify a raw text reply.
    pub fn from_text(raw: &str) -> Self {
        match serde_json::from_str(strip_code_fence(raw)) {
            Ok(value) => ModelReply::Json(value),
            Err(e) => {
                let preview: String = raw.chars().take(200).collect();
                warn!(error = %e, raw_preview = %preview, "Failed to parse JSON from model");
                ModelReply::RawText(raw.to_string())
            }
        }
    }
}

/// Ask the model for JSON.
///
/// Sends `system` and `user` (with [`JSON_ONLY_SUFFIX`] appended) and
/// classifies the answer. Never fails: transport errors become
/// [`ModelReply::Failure`].
#[instrument(skip(driver, system, user), fields(provider = driver.provider_name(), user_len = user.len()))]
pub async fn chat_json<D>(driver: &D, system: &str, user: &str, temperature: f32) -> ModelReply
where
    D: CompletionDriver + ?Sized,
{
    let request = GenerateRequest::instruction_pair(system, format!("{}{}", user, JSON_ONLY_SUFFIX))
        .with_temperature(temperature);

    match driver.generate(&request).await {
        Ok(response) => {
            let raw = response.text().unwrap_or_default();
            debug!(reply_len = raw.len(), "Model replied");
            ModelReply::from_text(&raw)
        }
        Err(e) => {
            error!(error = %e, "Completion call failed");
            ModelReply::Failure(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use whodunit_interface::{ScriptedDriver, ScriptedReply};

    #[tokio::test]
    async fn fenced_json_parses() {
        let driver = ScriptedDriver::new(vec![ScriptedReply::text("```json\n{\"a\": 1}\n```")]);
        let reply = chat_json(&driver, "sys", "user", DEFAULT_JSON_TEMPERATURE).await;
        assert_eq!(reply, ModelReply::Json(json!({"a": 1})));
    }

    #[tokio::test]
    async fn prose_is_kept_as_raw_text() {
        let driver = ScriptedDriver::new(vec![ScriptedReply::text("Sure! [{\"name\": \"A\"}]")]);
        let reply = chat_json(&driver, "sys", "user", DEFAULT_JSON_TEMPERATURE).await;
        assert_eq!(
            reply,
            ModelReply::RawText("Sure! [{\"name\": \"A\"}]".to_string())
        );
    }

    #[tokio::test]
    async fn driver_error_is_a_failure_value() {
        let driver = ScriptedDriver::unavailable("connection refused");
        let reply = chat_json(&driver, "sys", "user", DEFAULT_JSON_TEMPERATURE).await;
        assert!(matches!(&reply, ModelReply::Failure(m) if m.contains("connection refused")));
        assert!(reply.describe().starts_with("[LLM ERROR]"));
    }

    #[tokio::test]
    async fn instruction_carries_suffix_and_temperature() {
        let driver = ScriptedDriver::repeating("[]");
        chat_json(&driver, "sys", "make a cast", 0.6).await;

        let requests = driver.requests();
        let sent = &requests[0];
        assert_eq!(sent.messages()[0].content, "sys");
        assert!(sent.messages()[1].content.starts_with("make a cast"));
        assert!(sent.messages()[1].content.ends_with(JSON_ONLY_SUFFIX));
        assert_eq!(*sent.temperature(), Some(0.6));
    }
}
