//! Utilities for extracting JSON from model responses.
//!
//! Models wrap JSON in markdown fences or surround it with chatter. These
//! helpers relocate the JSON that is actually there; they never invent any.

use whodunit_error::{JsonError, WhodunitResult};

/// Remove a surrounding markdown code fence and its language tag.
///
/// Text that does not start with a fence is returned trimmed.
///
/// # Examples
///
/// ```
/// use whodunit_narrative::strip_code_fence;
///
/// assert_eq!(strip_code_fence("```json\n[1, 2]\n```"), "[1, 2]");
/// assert_eq!(strip_code_fence("  {\"a\": 1} "), "{\"a\": 1}");
/// ```
pub fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    let rest = rest.trim_start_matches('`');
    let rest = match rest.get(..4) {
        Some(tag) if tag.eq_ignore_ascii_case("json") => &rest[4..],
        _ => rest,
    };
    let rest = rest.trim_end();
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim_end_matches('`').trim()
}

/// Extract JSON from a response that may contain markdown or extra text.
///
/// Strategies, first success wins:
/// 1. Markdown code blocks: ```json ... ```
/// 2. Balanced brackets or braces, whichever opens first
///
/// # Errors
///
/// Returns an error if nothing JSON-shaped is found.
///
/// # Examples
///
/// ```
/// use whodunit_narrative::extract_json;
///
/// let response = "Here is the cast:\n[{\"name\": \"Eva\"}]\nEnjoy!";
/// assert_eq!(extract_json(response).unwrap(), "[{\"name\": \"Eva\"}]");
/// ```
pub fn extract_json(response: &str) -> WhodunitResult<String> {
    if let Some(json) = extract_from_code_block(response) {
        return Ok(json);
    }

    let bracket_pos = response.find('[');
    let brace_pos = response.find('{');

    let found = match (bracket_pos, brace_pos) {
        (Some(b_pos), Some(c_pos)) if b_pos < c_pos => extract_balanced(response, '[', ']')
            .or_else(|| extract_balanced(response, '{', '}')),
        (Some(_), None) => extract_balanced(response, '[', ']'),
        _ => extract_balanced(response, '{', '}')
            .or_else(|| extract_balanced(response, '[', ']')),
    };

    found.ok_or_else(|| {
        tracing::debug!(response_length = response.len(), "No JSON found in response");
        JsonError::new(format!(
            "No JSON found in response (length: {})",
            response.len()
        ))
        .into()
    })
}

/// Parse the JSON value a response carries, trying fence stripping first
/// and balanced extraction second.
pub fn recover_json(response: &str) -> Option<serde_json::Value> {
    if let Ok(value) = serde_json::from_str(strip_code_fence(response)) {
        return Some(value);
    }
    let candidate = extract_json(response).ok()?;
    serde_json::from_str(&candidate).ok()
}

/// Content of the first fenced block, if its body looks like JSON.
fn extract_from_code_block(response: &str) -> Option<String> {
    let start = response.find("```")?;
    let content_start = start + 3;
    let skip_to = response[content_start..]
        .find('\n')
        .map(|n| content_start + n + 1)
        .unwrap_or(content_start);

    let body = match response[skip_to..].find("```") {
        Some(end) => &response[skip_to..skip_to + end],
        // Truncated response without closing fence
        None => &response[skip_to..],
    };
    let body = body.trim();

    if body.starts_with('[') || body.starts_with('{') {
        Some(body.to_string())
    } else {
        None
    }
}

/// Extract content between balanced delimiters.
///
/// Finds the first `open` and returns everything up to its matching
/// `close`, ignoring delimiters inside string literals.
fn extract_balanced(response: &str, open: char, close: char) -> Option<String> {
    let start = response.find(open)?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in response[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(response[start..start + i + c.len_utf8()].to_string());
                }
            }
            _ => {}
        }
    }

    None
}

/// Parse JSON into a specific type.
///
/// # Errors
///
/// Returns an error if the JSON string cannot be parsed into type `T`.
///
/// # Examples
///
/// ```
/// use whodunit_narrative::parse_json;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Suspect {
///     name: String,
/// }
///
/// let suspect: Suspect = parse_json(r#"{"name": "Eva"}"#).unwrap();
/// assert_eq!(suspect.name, "Eva");
/// ```
pub fn parse_json<T>(json_str: &str) -> WhodunitResult<T>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(json_str).map_err(|e| {
        let preview = json_str.chars().take(100).collect::<String>();

        tracing::warn!(
            error = %e,
            json_preview = %preview,
            "JSON parsing failed"
        );

        JsonError::new(format!("Failed to parse JSON: {} (JSON: {}...)", e, preview)).into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_from_code_block() {
        let response = r#"
Here's the cast you requested:

```json
[{"name": "Eva"}]
```

Hope this helps!
"#;
        assert_eq!(extract_json(response).unwrap(), r#"[{"name": "Eva"}]"#);
    }

    #[test]
    fn extracts_balanced_braces() {
        let response = r#"Sure! {"cast": [{"name": "B"}], "nested": {"x": "}"}} trailing"#;
        let json = extract_json(response).unwrap();
        assert!(json.starts_with('{'));
        assert!(json.ends_with("}}"));
    }

    #[test]
    fn prefers_structure_that_opens_first() {
        let response = r#"[{"name": "A"}] and then {"other": 1}"#;
        assert!(extract_json(response).unwrap().starts_with('['));
    }

    #[test]
    fn handles_escaped_quotes() {
        let response = r#"{"text": "She said \"hello\" }"}"#;
        assert_eq!(extract_json(response).unwrap(), response);
    }

    #[test]
    fn plain_text_has_no_json() {
        assert!(extract_json("not json at all").is_err());
        assert_eq!(recover_json("not json at all"), None);
    }

    #[test]
    fn fence_stripping_handles_tags_and_bare_fences() {
        assert_eq!(strip_code_fence("```JSON\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("```\n[]\n```"), "[]");
        assert_eq!(strip_code_fence("```[1]```"), "[1]");
    }

    #[test]
    fn recovers_from_chatter() {
        let value = recover_json("The answer:\n```json\n{\"cast\": []}\n```\nBye").unwrap();
        assert_eq!(value, json!({"cast": []}));
    }

    #[test]
    fn truncated_fence_still_yields_body() {
        let value = recover_json("```json\n[{\"name\": \"A\"}]").unwrap();
        assert_eq!(value, json!([{"name": "A"}]));
    }
}
