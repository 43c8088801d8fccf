use super::{cast_summary, pretty};
use crate::fields::text;
use crate::{ModelReply, chat_json};
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};
use whodunit_core::{
    AlternativeSuspect, CaseData, CharacterClues, CharacterRecord, ClueAlignment, LastDay,
    Solution,
};
use whodunit_interface::CompletionDriver;

const SYSTEM: &str = "You are a detective summarizing and solving an interactive murder \
mystery. You MUST respond with VALID JSON ONLY.";

/// Name of the first flagged murderer, if any.
pub fn killer_hint(cast: &[CharacterRecord]) -> Option<&str> {
    cast.iter()
        .find(|c| c.murderer_label)
        .map(|c| c.name.as_str())
}

/// User instruction for the reveal.
pub fn solution_prompt(
    case: &CaseData,
    cast: &[CharacterRecord],
    last_day: &LastDay,
    clues: &[CharacterClues],
) -> String {
    let hint = killer_hint(cast)
        .map(|name| format!("\"{}\"", name))
        .unwrap_or_else(|| "null".to_string());

    format!(
        r#"You are given a fictional murder mystery. Use ALL of the information to produce a coherent solution.

CASE_DATA:
{case}

CHARACTERS:
{characters}

VICTIM_LAST_DAY:
{last_day}

CHARACTER_CLUES:
{clues}

KILLER_HINT:
{hint}

RULES:
1. If KILLER_HINT is not null, that character IS the murderer and your reasoning concludes so.
2. If KILLER_HINT is null, pick EXACTLY ONE character as the murderer.
3. The solution is consistent with the timeline in VICTIM_LAST_DAY.
4. The solution uses the CHARACTER_CLUES: each either points to the real killer or is
   explainable as a partial truth, misunderstanding, or red herring.
5. Do NOT contradict the basic facts in CASE_DATA.

RETURN STRICT JSON with the following structure:

{{
  "killer_name": "exact name of the murderer (from CHARACTERS)",
  "motive": "2-5 sentence explanation of why the killer did it.",
  "method": "2-4 sentences describing how the murder was carried out.",
  "opportunity": "How the killer had the opportunity (timeline + location).",
  "clue_alignment": [
    {{
      "character": "Name of character who had this clue",
      "about": "Name of target character",
      "clue_role": "supports_guilt" or "red_herring" or "partial_truth",
      "explanation": "How this clue fits into the final solution."
    }}
  ],
  "alternative_suspects": [
    {{
      "name": "Character name",
      "why_they_looked_suspicious": "short explanation"
    }}
  ],
  "final_reveal_monologue": "A short dramatic speech the detective gives when revealing the killer."
}}"#,
        case = pretty(case),
        characters = cast_summary(cast, true),
        last_day = pretty(last_day),
        clues = pretty(&clues),
    )
}

/// The reveal used when the model gives no killer.
///
/// The killer is the flagged murderer, else the first character, else
/// "Unknown".
pub fn fallback_solution(cast: &[CharacterRecord], raw_model_output: String) -> Solution {
    let killer_name = killer_hint(cast)
        .or_else(|| cast.first().map(|c| c.name.as_str()))
        .unwrap_or("Unknown")
        .to_string();

    Solution {
        killer_name,
        motive: "Fallback: The killer feared the exposé would destroy their status and finances."
            .to_string(),
        method: "Fallback: The killer entered the study late at night and staged the scene as an accident."
            .to_string(),
        opportunity: "Fallback: They were present near the victim during the final hours without a solid alibi."
            .to_string(),
        clue_alignment: Vec::new(),
        alternative_suspects: Vec::new(),
        final_reveal_monologue:
            "In the end, it was obvious. Only one person had motive, means, and opportunity..."
                .to_string(),
        raw_model_output: Some(raw_model_output),
    }
}

fn objects<'a>(map: &'a Map<String, Value>, key: &str) -> impl Iterator<Item = &'a Map<String, Value>> {
    map.get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
}

/// Generate the reveal.
///
/// Falls back to [`fallback_solution`] unless the reply is an object with a
/// non-empty `killer_name`.
#[instrument(skip(driver, case, cast, last_day, clues), fields(cast = cast.len()))]
pub async fn generate_solution<D>(
    driver: &D,
    case: &CaseData,
    cast: &[CharacterRecord],
    last_day: &LastDay,
    clues: &[CharacterClues],
    temperature: f32,
) -> Solution
where
    D: CompletionDriver + ?Sized,
{
    let prompt = solution_prompt(case, cast, last_day, clues);
    let reply = chat_json(driver, SYSTEM, &prompt, temperature).await;

    if let ModelReply::Json(Value::Object(map)) = &reply {
        let killer_name = text(map, "killer_name");
        if !killer_name.is_empty() {
            return Solution {
                killer_name,
                motive: text(map, "motive"),
                method: text(map, "method"),
                opportunity: text(map, "opportunity"),
                clue_alignment: objects(map, "clue_alignment")
                    .map(|a| ClueAlignment {
                        character: text(a, "character"),
                        about: text(a, "about"),
                        clue_role: text(a, "clue_role"),
                        explanation: text(a, "explanation"),
                    })
                    .collect(),
                alternative_suspects: objects(map, "alternative_suspects")
                    .map(|s| AlternativeSuspect {
                        name: text(s, "name"),
                        why_they_looked_suspicious: text(s, "why_they_looked_suspicious"),
                    })
                    .collect(),
                final_reveal_monologue: text(map, "final_reveal_monologue"),
                raw_model_output: None,
            };
        }
    }

    warn!("Solution reply unusable, using fallback");
    fallback_solution(cast, reply.describe())
}

/// Move the murderer flag to the character the solution names.
///
/// Applied only when `killer_name` matches exactly one cast member, so the
/// cast keeps exactly one murderer either way. Returns whether the flag
/// now follows the solution.
pub fn align_murderer_with_solution(cast: &mut [CharacterRecord], killer_name: &str) -> bool {
    let killer_name = killer_name.trim();
    let matches: Vec<usize> = cast
        .iter()
        .enumerate()
        .filter(|(_, c)| c.name == killer_name)
        .map(|(i, _)| i)
        .collect();

    let [index] = matches.as_slice() else {
        warn!(killer_name, matches = matches.len(), "Solution killer not in cast, keeping flags");
        return false;
    };

    for (i, character) in cast.iter_mut().enumerate() {
        character.murderer_label = i == *index;
    }
    debug!(killer_name, murderer_index = *index, "Murderer aligned with solution");
    true
}
