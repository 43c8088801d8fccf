//! Per-record field normalization.

use crate::fields::{flag, text, text_list};
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::debug;
use whodunit_core::{CharacterRecord, HintAboutOther, UNRESOLVED_TARGET};

/// Misspelling of `murderer_label` that older prompts asked models to use.
pub const LEGACY_MURDERER_KEY: &str = "muderer_label";

/// Name given to a record whose name is missing or blank.
pub const UNNAMED_SUSPECT: &str = "Unnamed Suspect";

/// At most this many personality traits are kept.
pub const MAX_PERSONALITY_TRAITS: usize = 4;

/// Rewrite legacy field names to their canonical spelling.
///
/// The only legacy name is [`LEGACY_MURDERER_KEY`]. It is dropped when the
/// canonical key is also present, so the canonical value wins.
pub fn migrate_legacy_fields(raw: &Map<String, Value>) -> Map<String, Value> {
    let mut migrated = raw.clone();
    if let Some(legacy) = migrated.remove(LEGACY_MURDERER_KEY) {
        migrated
            .entry("murderer_label".to_string())
            .or_insert(legacy);
    }
    migrated
}

fn hint(value: Option<&Value>) -> HintAboutOther {
    let Some(Value::Object(map)) = value else {
        return HintAboutOther::default();
    };

    let target = text(map, "target");
    HintAboutOther {
        target: if target.is_empty() {
            UNRESOLVED_TARGET.to_string()
        } else {
            target
        },
        hint: text(map, "hint"),
    }
}

fn references(value: Option<&Value>, whitelist: &HashSet<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut kept = Vec::new();
    for id in text_list(value) {
        if !whitelist.contains(&id) {
            debug!(id = %id, "Dropping source reference outside whitelist");
            continue;
        }
        if seen.insert(id.clone()) {
            kept.push(id);
        }
    }
    kept
}

/// Build a well-typed record from one raw mapping.
///
/// Missing or mistyped fields get defaults, extra fields are discarded, and
/// `source_references` keeps only ids present in `whitelist`.
///
/// # Examples
///
/// ```
/// use std::collections::HashSet;
/// use serde_json::json;
/// use whodunit_narrative::normalize_record;
///
/// let whitelist: HashSet<String> = ["doc1".to_string(), "doc2".to_string()].into();
/// let raw = json!({"name": "Eva", "source_references": ["doc1", "doc9"], "muderer_label": "yes"});
/// let record = normalize_record(raw.as_object().unwrap(), &whitelist);
///
/// assert_eq!(record.source_references, vec!["doc1"]);
/// assert!(record.murderer_label);
/// ```
pub fn normalize_record(raw: &Map<String, Value>, whitelist: &HashSet<String>) -> CharacterRecord {
    let raw = migrate_legacy_fields(raw);

    let name = text(&raw, "name");
    let mut personality_traits = text_list(raw.get("personality_traits"));
    personality_traits.truncate(MAX_PERSONALITY_TRAITS);

    CharacterRecord {
        name: if name.is_empty() {
            UNNAMED_SUSPECT.to_string()
        } else {
            name
        },
        appearance: text(&raw, "appearance"),
        occupation: text(&raw, "occupation"),
        relation_to_victim: text(&raw, "relation_to_victim"),
        background: text(&raw, "background"),
        secret: text(&raw, "secret"),
        personality_traits,
        hint_about_other: hint(raw.get("hint_about_other")),
        source_references: references(raw.get("source_references"), whitelist),
        murderer_label: flag(raw.get("murderer_label")),
    }
}
