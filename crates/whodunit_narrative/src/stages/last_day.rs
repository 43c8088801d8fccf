use super::{cast_summary, pretty};
use crate::fields::{flag, text, text_list};
use crate::{ModelReply, chat_json};
use serde_json::Value;
use tracing::{instrument, warn};
use whodunit_core::{CaseData, CharacterRecord, LastDay, TimelineEvent};
use whodunit_interface::CompletionDriver;

const SYSTEM: &str = "You are an investigator reconstructing the victim's last day. \
Always respond with VALID JSON.";

/// User instruction for the last-day reconstruction.
pub fn last_day_prompt(case: &CaseData, cast: &[CharacterRecord]) -> String {
    format!(
        r#"You are given a murder case and the main characters.

CASE:
{case}

CHARACTERS (summary):
{characters}

TASK:
Reconstruct the victim's last day as a clear, chronological timeline.

Return JSON with:
- "overview": 2-4 sentence summary of the last day
- "timeline": an array of events, each:
    - "time": short string (e.g. "09:00", "late evening")
    - "location": string
    - "participants": list of character names involved (names from CHARACTERS, plus the victim if relevant)
    - "description": 1-3 sentences describing what happened
    - "suspicious": boolean, whether this event is suspicious"#,
        case = pretty(case),
        characters = cast_summary(cast, false),
    )
}

/// The reconstruction used when the model gives no timeline.
pub fn fallback_last_day(raw_model_output: String) -> LastDay {
    LastDay {
        overview: "Fallback: the victim moved through the town, meeting several suspects."
            .to_string(),
        timeline: Vec::new(),
        raw_model_output: Some(raw_model_output),
    }
}

fn event(value: &Value) -> Option<TimelineEvent> {
    let map = value.as_object()?;
    Some(TimelineEvent {
        time: text(map, "time"),
        location: text(map, "location"),
        participants: text_list(map.get("participants")),
        description: text(map, "description"),
        suspicious: flag(map.get("suspicious")),
    })
}

/// Reconstruct the victim's last day.
///
/// Falls back to [`fallback_last_day`] unless the reply is an object with a
/// `timeline` key. Malformed events are skipped.
#[instrument(skip(driver, case, cast), fields(cast = cast.len()))]
pub async fn generate_last_day<D>(
    driver: &D,
    case: &CaseData,
    cast: &[CharacterRecord],
    temperature: f32,
) -> LastDay
where
    D: CompletionDriver + ?Sized,
{
    let reply = chat_json(driver, SYSTEM, &last_day_prompt(case, cast), temperature).await;

    if let ModelReply::Json(Value::Object(map)) = &reply {
        if let Some(timeline) = map.get("timeline") {
            let events: Vec<TimelineEvent> = timeline
                .as_array()
                .map(|items| items.iter().filter_map(event).collect())
                .unwrap_or_default();
            return LastDay {
                overview: text(map, "overview"),
                timeline: events,
                raw_model_output: None,
            };
        }
    }

    warn!("Last-day reply unusable, using fallback");
    fallback_last_day(reply.describe())
}
