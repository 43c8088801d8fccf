use crate::fields::text;
use crate::{ModelReply, chat_json};
use serde_json::Value;
use tracing::{instrument, warn};
use whodunit_core::{CaseData, MenuNames};
use whodunit_interface::CompletionDriver;

const SYSTEM: &str = "You are a creative assistant that designs grounded, structured \
murder-mystery cases. You must always respond with valid JSON only.";

/// User instruction for the case premise.
pub fn case_prompt(theme: &str, location: &str, menu: &MenuNames) -> String {
    let dish = |d: &Option<String>| d.clone().unwrap_or_else(|| "none".to_string());
    format!(
        r#"Create a murder-mystery setup inspired by this setting or theme:

"""{theme}"""

The mystery takes place in the following location:
- location_of_event: "{location}"

During the evening of the murder, a dinner is served with this menu:
- starter: {starter}
- main_course: {main}
- dessert: {dessert}

These dishes are typical for the location and can appear in the setting, the
social dynamics between guests, or the circumstances of the crime.

Requirements:
- There is ONE victim.
- The case revolves around a controversial theme (corruption, data leak, activism, art scandal ...).
- The setting is specific (small coastal town, university, startup office ...).
- The location and the dinner fit naturally into the story.

Return JSON with the following keys:
- victim_name: string
- victim_description: short string (age, job, notable traits)
- controversial_theme: string
- location: short description of the main setting, including the given location
- summary: 3-5 sentences summarizing the case
- timeline: 1-3 sentences describing the rough timeline of the crime"#,
        starter = dish(&menu.starter),
        main = dish(&menu.main),
        dessert = dish(&menu.dessert),
    )
}

/// The premise used when the model gives no usable case.
pub fn fallback_case(location: &str, raw_model_output: String) -> CaseData {
    CaseData {
        victim_name: "Lena Hartmann".to_string(),
        victim_description: "A 35-year-old investigative journalist.".to_string(),
        controversial_theme: "Exposure of corruption in local politics".to_string(),
        location: format!("{} (defaulted case location)", location),
        summary: "Lena Hartmann was found dead shortly before releasing an article about \
corruption in the town council. Many residents had something to lose."
            .to_string(),
        timeline: "Lena disappeared on Friday night, her body was found on Saturday morning."
            .to_string(),
        raw_model_output: Some(raw_model_output),
    }
}

/// Generate the case premise.
///
/// Falls back to [`fallback_case`] when the reply has no `victim_name`.
#[instrument(skip(driver, menu))]
pub async fn generate_case<D>(
    driver: &D,
    theme: &str,
    location: &str,
    menu: &MenuNames,
    temperature: f32,
) -> CaseData
where
    D: CompletionDriver + ?Sized,
{
    let reply = chat_json(driver, SYSTEM, &case_prompt(theme, location, menu), temperature).await;

    if let ModelReply::Json(Value::Object(map)) = &reply {
        let victim_name = text(map, "victim_name");
        if !victim_name.is_empty() {
            return CaseData {
                victim_name,
                victim_description: text(map, "victim_description"),
                controversial_theme: text(map, "controversial_theme"),
                location: text(map, "location"),
                summary: text(map, "summary"),
                timeline: text(map, "timeline"),
                raw_model_output: None,
            };
        }
    }

    warn!("Case reply unusable, using fallback premise");
    fallback_case(location, reply.describe())
}
