//! Character record types.

use serde::{Deserialize, Serialize};

/// Target used when a hint points at nobody in particular.
pub const UNRESOLVED_TARGET: &str = "<unresolved>";

/// A hint one character holds about another.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HintAboutOther {
    /// Name of the character the hint is about
    pub target: String,
    /// One or two sentences about that character
    pub hint: String,
}

impl Default for HintAboutOther {
    fn default() -> Self {
        Self {
            target: UNRESOLVED_TARGET.to_string(),
            hint: String::new(),
        }
    }
}

/// One suspect in the cast.
///
/// Within a finished cast, names are pairwise distinct, exactly one record
/// carries `murderer_label`, and every `source_references` entry is an id of
/// a document retrieved for the same request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    /// Display name, unique within a cast
    pub name: String,
    /// Visual details useful for an illustrator
    pub appearance: String,
    /// Short job description
    pub occupation: String,
    /// Friend, colleague, ex-partner, rival ...
    pub relation_to_victim: String,
    /// Two to four sentences of background
    pub background: String,
    /// A secret shared with the victim
    pub secret: String,
    /// At most four short adjectives
    pub personality_traits: Vec<String>,
    /// What this character suspects about someone else
    pub hint_about_other: HintAboutOther,
    /// Retrieved document ids the model drew on
    pub source_references: Vec<String>,
    /// Whether this character is the murderer
    pub murderer_label: bool,
}

impl CharacterRecord {
    /// An otherwise empty record with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}
