//! The complete generation result.

use crate::{CaseData, CharacterClues, CharacterRecord, LastDay, Menu, Solution};
use serde::{Deserialize, Serialize};

/// Everything one generation request produced.
///
/// Serializes to the flat mapping the web layer keeps in its session
/// store: `menu`, `case_data`, `characters`, `last_day_data`, `clues`,
/// `solution`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MysteryKit {
    /// The dinner served
    pub menu: Menu,
    /// Case premise
    pub case_data: CaseData,
    /// Validated cast
    pub characters: Vec<CharacterRecord>,
    /// Victim's last day
    pub last_day_data: LastDay,
    /// Per-character clues
    pub clues: Vec<CharacterClues>,
    /// The reveal
    pub solution: Solution,
}

impl MysteryKit {
    /// The character flagged as murderer, if any.
    pub fn murderer(&self) -> Option<&CharacterRecord> {
        self.characters.iter().find(|c| c.murderer_label)
    }
}
