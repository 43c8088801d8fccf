//! Clue types.

use serde::{Deserialize, Serialize};

/// A clue about another character.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Clue {
    /// Name of the character the clue is about
    pub target: String,
    /// The evidence itself
    pub clue: String,
}

/// The clues one character brings to the table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterClues {
    /// Name of the character holding the clues
    pub character: String,
    /// One or two clues
    pub clues: Vec<Clue>,
}
