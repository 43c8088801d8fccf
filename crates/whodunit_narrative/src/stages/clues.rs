use super::{cast_summary, pretty};
use crate::fields::{list_or_wrapped, text};
use crate::{ModelReply, chat_json};
use serde_json::Value;
use tracing::{debug, instrument, warn};
use whodunit_core::{CaseData, CharacterClues, CharacterRecord, Clue, LastDay};
use whodunit_interface::CompletionDriver;

const SYSTEM: &str = "You are an investigator designing advanced deduction puzzles. \
All output MUST be valid JSON.";

/// User instruction for the clue round.
pub fn clues_prompt(case: &CaseData, cast: &[CharacterRecord], last_day: &LastDay) -> String {
    format!(
        r#"We are constructing a murder mystery. You are given:

CASE_DATA:
{case}

CHARACTERS:
{characters}

VICTIM_LAST_DAY:
{last_day}

TASK:
For EACH character, generate 1-2 clues that they have about ANOTHER character.
The group discusses these clues later to solve the mystery.

RULES FOR CLUES:
1. A clue points toward suspicious behavior, contradictions, evidence, or important insights.
2. A clue uses EXACT character names from the character list.
3. Clues are consistent with the victim's timeline in VICTIM_LAST_DAY.
4. Combined, the clues help solve the mystery and hint at the killer.
5. No clue reveals the killer directly; clues are partial, interconnected leads.
6. Clues are specific, not vague.
7. A character NEVER has a clue about themselves. "target" is always a DIFFERENT character.

FORMAT:
Return a JSON array. Each entry is:

{{
  "character": "NameOfCharacterWhoHasTheClue",
  "clues": [
    {{
      "target": "NameOfCharacterTheClueIsAbout",
      "clue": "1-3 sentence description of evidence, behavior, contradiction, or suspicious detail."
    }}
  ]
}}

Every character appears exactly once, each with 1-2 clues referencing concrete
details from CASE_DATA or VICTIM_LAST_DAY."#,
        case = pretty(case),
        characters = cast_summary(cast, false),
        last_day = pretty(last_day),
    )
}

/// Clues used when the model gives none: the first character suspects the
/// second. Empty for casts smaller than two.
pub fn fallback_clues(cast: &[CharacterRecord]) -> Vec<CharacterClues> {
    match cast {
        [first, second, ..] => vec![CharacterClues {
            character: first.name.clone(),
            clues: vec![Clue {
                target: second.name.clone(),
                clue: "Fallback clue: observed at the harbor near the victim's last location."
                    .to_string(),
            }],
        }],
        _ => Vec::new(),
    }
}

fn same_person(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

fn entry(value: &Value) -> Option<CharacterClues> {
    let map = value.as_object()?;
    let character = text(map, "character");
    if character.is_empty() {
        return None;
    }

    let clues: Vec<Clue> = map
        .get("clues")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_object)
                .map(|c| Clue {
                    target: text(c, "target"),
                    clue: text(c, "clue"),
                })
                .filter(|c| !c.clue.is_empty())
                .filter(|c| {
                    let own = same_person(&c.target, &character);
                    if own {
                        debug!(character = %character, "Dropping self-targeting clue");
                    }
                    !own
                })
                .collect()
        })
        .unwrap_or_default();

    if clues.is_empty() {
        None
    } else {
        Some(CharacterClues { character, clues })
    }
}

/// Generate one or two clues per character.
///
/// Self-targeting and empty clues are dropped. When nothing usable remains
/// the result is [`fallback_clues`].
#[instrument(skip(driver, case, cast, last_day), fields(cast = cast.len()))]
pub async fn generate_clues<D>(
    driver: &D,
    case: &CaseData,
    cast: &[CharacterRecord],
    last_day: &LastDay,
    temperature: f32,
) -> Vec<CharacterClues>
where
    D: CompletionDriver + ?Sized,
{
    let reply = chat_json(driver, SYSTEM, &clues_prompt(case, cast, last_day), temperature).await;

    if let ModelReply::Json(value) = &reply {
        if let Some(items) = list_or_wrapped(value, "clues") {
            let clues: Vec<CharacterClues> = items.iter().filter_map(entry).collect();
            if !clues.is_empty() {
                return clues;
            }
        }
    }

    warn!(reply = %reply.describe(), "Clue reply unusable, using fallback");
    fallback_clues(cast)
}
