//! Lenient readers for loosely typed model output.

use serde_json::{Map, Value};

/// The string at `key`, or empty when absent or not a string.
pub(crate) fn text(map: &Map<String, Value>, key: &str) -> String {
    match map.get(key) {
        Some(Value::String(s)) => s.trim().to_string(),
        _ => String::new(),
    }
}

/// A list of strings from either a JSON array or a comma-delimited string.
///
/// Non-string array entries and blank items are dropped.
pub(crate) fn text_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// JSON `true`, or the strings `"true"`/`"yes"` in any case.
pub(crate) fn flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => {
            let s = s.trim();
            s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("yes")
        }
        _ => false,
    }
}

/// The array at `key` of a mapping, or the value itself when it is an array.
pub(crate) fn list_or_wrapped<'a>(value: &'a Value, key: &str) -> Option<&'a Vec<Value>> {
    match value {
        Value::Array(items) => Some(items),
        Value::Object(map) => map.get(key).and_then(Value::as_array),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flag_accepts_yes_and_true_strings() {
        assert!(flag(Some(&json!(true))));
        assert!(flag(Some(&json!("YES"))));
        assert!(flag(Some(&json!(" True "))));
        assert!(!flag(Some(&json!("no"))));
        assert!(!flag(Some(&json!(1))));
        assert!(!flag(None));
    }

    #[test]
    fn text_list_splits_strings_and_filters_arrays() {
        assert_eq!(text_list(Some(&json!("shy, sly ,,proud"))), vec!["shy", "sly", "proud"]);
        assert_eq!(text_list(Some(&json!(["a", 3, " ", "b"]))), vec!["a", "b"]);
        assert!(text_list(Some(&json!({"a": 1}))).is_empty());
    }
}
