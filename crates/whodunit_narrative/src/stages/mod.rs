//! The generation stages around the cast.
//!
//! Each stage builds a prompt, asks for JSON, reshapes the answer into a
//! domain type and falls back to a fixed default when the model does not
//! cooperate. None of them fail.

mod case;
mod clues;
mod last_day;
mod solution;

pub use case::{case_prompt, fallback_case, generate_case};
pub use clues::{clues_prompt, fallback_clues, generate_clues};
pub use last_day::{fallback_last_day, generate_last_day, last_day_prompt};
pub use solution::{
    align_murderer_with_solution, fallback_solution, generate_solution, killer_hint,
    solution_prompt,
};

use serde_json::{Value, json};
use whodunit_core::CharacterRecord;

/// Compact cast summary embedded in later prompts.
fn cast_summary(cast: &[CharacterRecord], with_murderer: bool) -> String {
    let summary: Vec<Value> = cast
        .iter()
        .map(|c| {
            let mut entry = json!({
                "name": c.name,
                "relation_to_victim": c.relation_to_victim,
                "occupation": c.occupation,
                "secret_about_victim": c.secret,
                "personality": c.personality_traits,
            });
            if with_murderer {
                entry["murderer_label"] = Value::Bool(c.murderer_label);
            }
            entry
        })
        .collect();
    serde_json::to_string_pretty(&summary).unwrap_or_default()
}

/// Pretty JSON of any serializable stage input.
fn pretty<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}
