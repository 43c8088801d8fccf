//! Solution types.

use serde::{Deserialize, Serialize};

/// How a clue fits the final solution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ClueAlignment {
    /// Who held the clue
    pub character: String,
    /// Who the clue was about
    pub about: String,
    /// `supports_guilt`, `red_herring` or `partial_truth`
    pub clue_role: String,
    /// Explanation for the reveal
    pub explanation: String,
}

/// A suspect who looked guilty but was not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct AlternativeSuspect {
    /// Character name
    pub name: String,
    /// Why they looked suspicious
    pub why_they_looked_suspicious: String,
}

/// The reveal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Solution {
    /// Exact name of the murderer
    pub killer_name: String,
    /// Why the killer did it
    pub motive: String,
    /// How the murder was carried out
    pub method: String,
    /// How the killer had the opportunity
    pub opportunity: String,
    /// How each clue fits
    pub clue_alignment: Vec<ClueAlignment>,
    /// Red herrings
    pub alternative_suspects: Vec<AlternativeSuspect>,
    /// A short speech for the detective
    pub final_reveal_monologue: String,
    /// Model reply kept when the solution was replaced by the fallback
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_model_output: Option<String>,
}
