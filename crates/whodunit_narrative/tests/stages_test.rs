use serde_json::json;
use whodunit_core::{CaseData, CharacterRecord, LastDay, MenuNames};
use whodunit_interface::{ScriptedDriver, ScriptedReply};
use whodunit_narrative::{
    DEFAULT_JSON_TEMPERATURE, align_murderer_with_solution, generate_case, generate_clues,
    generate_last_day, generate_solution, killer_hint, solution_prompt,
};

fn cast() -> Vec<CharacterRecord> {
    let mut cast: Vec<CharacterRecord> = ["Jonas", "Mira", "Tilda"]
        .into_iter()
        .map(CharacterRecord::named)
        .collect();
    cast[1].murderer_label = true;
    cast
}

fn case() -> CaseData {
    CaseData {
        victim_name: "Lena Hartmann".to_string(),
        summary: "Found dead at the fish market.".to_string(),
        ..CaseData::default()
    }
}

#[tokio::test]
async fn case_is_read_from_model_reply() {
    let reply = json!({
        "victim_name": "Klaus Brandt",
        "victim_description": "Harbor master, 58",
        "controversial_theme": "Port expansion bribes",
        "location": "Hamburg, Speicherstadt",
        "summary": "Klaus was found in the canal.",
        "timeline": "Friday night"
    });
    let driver = ScriptedDriver::new([ScriptedReply::text(format!("```json\n{}\n```", reply))]);

    let menu = MenuNames {
        starter: Some("Labskaus".to_string()),
        ..MenuNames::default()
    };
    let case = generate_case(&driver, "Port scandal", "Hamburg", &menu, DEFAULT_JSON_TEMPERATURE).await;

    assert_eq!(case.victim_name, "Klaus Brandt");
    assert_eq!(case.location, "Hamburg, Speicherstadt");
    assert!(case.raw_model_output.is_none());

    let requests = driver.requests();
    let prompt = &requests[0].messages()[1].content;
    assert!(prompt.contains("starter: Labskaus"));
    assert!(prompt.contains("main_course: none"));
}

#[tokio::test]
async fn case_falls_back_when_model_fails() {
    let driver = ScriptedDriver::unavailable("timed out");
    let case = generate_case(&driver, "", "Kiel", &MenuNames::default(), 0.6).await;

    assert_eq!(case.victim_name, "Lena Hartmann");
    assert!(case.location.starts_with("Kiel"));
    let raw = case.raw_model_output.unwrap_or_default();
    assert!(raw.starts_with("[LLM ERROR]"));
    assert!(raw.contains("timed out"));
}

#[tokio::test]
async fn last_day_skips_malformed_events() {
    let reply = json!({
        "overview": "A long day.",
        "timeline": [
            {"time": "09:00", "location": "Office", "participants": ["Mira"], "description": "Argument", "suspicious": "yes"},
            "garbage",
            {"time": "21:00", "description": "Dinner"}
        ]
    });
    let driver = ScriptedDriver::repeating(reply.to_string());
    let last_day = generate_last_day(&driver, &case(), &cast(), 0.6).await;

    assert_eq!(last_day.overview, "A long day.");
    assert_eq!(last_day.timeline.len(), 2);
    assert!(last_day.timeline[0].suspicious);
    assert_eq!(last_day.timeline[0].participants, vec!["Mira".to_string()]);
    assert!(last_day.timeline[1].participants.is_empty());
}

#[tokio::test]
async fn last_day_falls_back_without_timeline() {
    let driver = ScriptedDriver::repeating("[1, 2, 3]");
    let last_day = generate_last_day(&driver, &case(), &cast(), 0.6).await;
    assert!(last_day.overview.starts_with("Fallback"));
    assert!(last_day.timeline.is_empty());
    assert!(last_day.raw_model_output.is_some());
}

#[tokio::test]
async fn self_targeting_clues_are_dropped() {
    let reply = json!({"clues": [
        {"character": "Jonas", "clues": [
            {"target": "Jonas", "clue": "I was home."},
            {"target": "Mira", "clue": "Mira's coat was wet."}
        ]},
        {"character": "Tilda", "clues": [{"target": "tilda", "clue": "Nothing."}]}
    ]});
    let driver = ScriptedDriver::repeating(reply.to_string());
    let clues = generate_clues(&driver, &case(), &cast(), &LastDay::default(), 0.6).await;

    assert_eq!(clues.len(), 1);
    assert_eq!(clues[0].character, "Jonas");
    assert_eq!(clues[0].clues.len(), 1);
    assert_eq!(clues[0].clues[0].target, "Mira");
}

#[tokio::test]
async fn clues_fall_back_to_first_about_second() {
    let driver = ScriptedDriver::repeating("no clues today");
    let clues = generate_clues(&driver, &case(), &cast(), &LastDay::default(), 0.6).await;

    assert_eq!(clues.len(), 1);
    assert_eq!(clues[0].character, "Jonas");
    assert_eq!(clues[0].clues[0].target, "Mira");

    let lonely = vec![CharacterRecord::named("Solo")];
    let clues = generate_clues(&driver, &case(), &lonely, &LastDay::default(), 0.6).await;
    assert!(clues.is_empty());
}

#[test]
fn flagged_murderer_is_the_killer_hint() {
    assert_eq!(killer_hint(&cast()), Some("Mira"));
    assert_eq!(killer_hint(&[CharacterRecord::named("A")]), None);

    let prompt = solution_prompt(&case(), &cast(), &LastDay::default(), &[]);
    assert!(prompt.contains("KILLER_HINT:\n\"Mira\""));

    let prompt = solution_prompt(&case(), &[], &LastDay::default(), &[]);
    assert!(prompt.contains("KILLER_HINT:\nnull"));
}

#[tokio::test]
async fn solution_is_read_from_model_reply() {
    let reply = json!({
        "killer_name": "Mira",
        "motive": "Money.",
        "method": "Poison.",
        "opportunity": "Dinner.",
        "clue_alignment": [{"character": "Jonas", "about": "Mira", "clue_role": "supports_guilt", "explanation": "Wet coat."}],
        "alternative_suspects": [{"name": "Tilda", "why_they_looked_suspicious": "Left early."}],
        "final_reveal_monologue": "It was Mira."
    });
    let driver = ScriptedDriver::repeating(reply.to_string());
    let solution = generate_solution(&driver, &case(), &cast(), &LastDay::default(), &[], 0.6).await;

    assert_eq!(solution.killer_name, "Mira");
    assert_eq!(solution.clue_alignment[0].clue_role, "supports_guilt");
    assert_eq!(solution.alternative_suspects[0].name, "Tilda");
    assert!(solution.raw_model_output.is_none());
}

#[tokio::test]
async fn solution_falls_back_to_flagged_murderer() {
    let driver = ScriptedDriver::repeating(json!({"killer_name": ""}).to_string());
    let solution = generate_solution(&driver, &case(), &cast(), &LastDay::default(), &[], 0.6).await;
    assert_eq!(solution.killer_name, "Mira");
    assert!(solution.motive.starts_with("Fallback"));

    let solution = generate_solution(&driver, &case(), &[], &LastDay::default(), &[], 0.6).await;
    assert_eq!(solution.killer_name, "Unknown");
}

#[test]
fn murderer_follows_solution_only_on_exact_match() {
    let mut characters = cast();
    assert!(align_murderer_with_solution(&mut characters, "Tilda"));
    assert!(characters[2].murderer_label);
    assert!(!characters[1].murderer_label);

    assert!(!align_murderer_with_solution(&mut characters, "Somebody Else"));
    assert!(characters[2].murderer_label);
    assert_eq!(characters.iter().filter(|c| c.murderer_label).count(), 1);
}
