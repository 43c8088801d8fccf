//! Recovering a candidate list from an untrusted reply.

use crate::{ModelReply, recover_json};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Keys a model may nest the cast under, checked in this order.
pub const WRAPPER_KEYS: [&str; 5] = ["characters", "cast", "result", "suspects", "data"];

/// Key under which an upstream parser may have stashed unparsed text.
const RAW_TEXT_KEY: &str = "raw_text";

/// Outcome of cast coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum Coercion {
    /// A list of candidate records, unvalidated
    Recovered(Vec<Value>),
    /// Nothing list-shaped could be found
    NoCastRecovered,
}

impl Coercion {
    /// The recovered candidates, empty when nothing was recovered.
    pub fn into_candidates(self) -> Vec<Value> {
        match self {
            Coercion::Recovered(items) => items,
            Coercion::NoCastRecovered => Vec::new(),
        }
    }
}

fn wrapped_list(map: &Map<String, Value>) -> Option<Vec<Value>> {
    WRAPPER_KEYS.iter().find_map(|key| match map.get(*key) {
        Some(Value::Array(items)) => {
            debug!(key, "Found cast under wrapper key");
            Some(items.clone())
        }
        _ => None,
    })
}

fn from_value(value: &Value) -> Option<Vec<Value>> {
    match value {
        Value::Array(items) => Some(items.clone()),
        Value::Object(map) => wrapped_list(map).or_else(|| match map.get(RAW_TEXT_KEY) {
            Some(Value::String(text)) => from_text(text),
            _ => None,
        }),
        Value::String(text) => from_text(text),
        _ => None,
    }
}

fn from_text(text: &str) -> Option<Vec<Value>> {
    match recover_json(text)? {
        Value::Array(items) => Some(items),
        Value::Object(map) => wrapped_list(&map),
        _ => None,
    }
}

/// Recover a list of record-like values from a model reply.
///
/// Strategies, first success wins:
/// 1. A JSON array is returned as is.
/// 2. A JSON object yields the first array found under [`WRAPPER_KEYS`].
/// 3. Raw text (a [`ModelReply::RawText`], a JSON string, or an object with
///    a `raw_text` field) is searched for embedded JSON, which then goes
///    through 1 and 2.
///
/// Only relocates what the model returned; never fabricates records.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use whodunit_narrative::{Coercion, ModelReply, coerce_cast};
///
/// let reply = ModelReply::Json(json!({"cast": [{"name": "B"}]}));
/// assert_eq!(coerce_cast(&reply), Coercion::Recovered(vec![json!({"name": "B"})]));
///
/// let reply = ModelReply::RawText("not json at all".to_string());
/// assert_eq!(coerce_cast(&reply), Coercion::NoCastRecovered);
/// ```
pub fn coerce_cast(reply: &ModelReply) -> Coercion {
    let recovered = match reply {
        ModelReply::Json(value) => from_value(value),
        ModelReply::RawText(text) => from_text(text),
        ModelReply::Failure(message) => {
            warn!(error = %message, "No cast payload, completion failed");
            None
        }
    };

    match recovered {
        Some(items) => {
            debug!(candidates = items.len(), "Recovered cast candidates");
            Coercion::Recovered(items)
        }
        None => {
            warn!("No cast recovered from model reply");
            Coercion::NoCastRecovered
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_is_returned_unchanged() {
        let list = json!([{"name": "A"}, {"name": "B"}, {"name": "C"}]);
        let Coercion::Recovered(items) = coerce_cast(&ModelReply::Json(list.clone())) else {
            panic!("expected a list");
        };
        assert_eq!(Value::Array(items), list);
    }

    #[test]
    fn fenced_text_is_recovered() {
        let raw = "```json\n[{\"name\":\"A\",\"occupation\":\"Baker\"}]\n```";
        assert_eq!(
            coerce_cast(&ModelReply::RawText(raw.to_string())),
            Coercion::Recovered(vec![json!({"name": "A", "occupation": "Baker"})])
        );
    }

    #[test]
    fn wrapper_keys_are_checked_in_order() {
        let value = json!({"data": [{"name": "D"}], "characters": [{"name": "C"}]});
        assert_eq!(
            coerce_cast(&ModelReply::Json(value)),
            Coercion::Recovered(vec![json!({"name": "C"})])
        );
    }

    #[test]
    fn non_list_wrapper_values_are_skipped() {
        let value = json!({"characters": "see below", "suspects": [{"name": "S"}]});
        assert_eq!(
            coerce_cast(&ModelReply::Json(value)),
            Coercion::Recovered(vec![json!({"name": "S"})])
        );
    }

    #[test]
    fn raw_text_field_is_searched() {
        let value = json!({"raw_text": "Here you go: {\"result\": [{\"name\": \"R\"}]} cheers"});
        assert_eq!(
            coerce_cast(&ModelReply::Json(value)),
            Coercion::Recovered(vec![json!({"name": "R"})])
        );
    }

    #[test]
    fn json_string_payload_is_searched() {
        let value = Value::String("[{\"name\": \"S\"}]".to_string());
        assert_eq!(
            coerce_cast(&ModelReply::Json(value)),
            Coercion::Recovered(vec![json!({"name": "S"})])
        );
    }

    #[test]
    fn unrecoverable_inputs() {
        assert_eq!(
            coerce_cast(&ModelReply::RawText("not json at all".to_string())),
            Coercion::NoCastRecovered
        );
        assert_eq!(
            coerce_cast(&ModelReply::Failure("timeout".to_string())),
            Coercion::NoCastRecovered
        );
        assert_eq!(
            coerce_cast(&ModelReply::Json(json!({"victim": "nobody"}))),
            Coercion::NoCastRecovered
        );
        assert_eq!(coerce_cast(&ModelReply::Json(json!(42))), Coercion::NoCastRecovered);
    }

    #[test]
    fn empty_list_is_still_a_recovery() {
        assert_eq!(
            coerce_cast(&ModelReply::Json(json!([]))),
            Coercion::Recovered(Vec::new())
        );
    }
}
