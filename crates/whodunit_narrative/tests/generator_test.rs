use serde_json::json;
use std::sync::Arc;
use whodunit_core::{CourseType, Recipe};
use whodunit_interface::{ScriptedDriver, ScriptedReply};
use whodunit_narrative::{
    MysteryGenerator, MysteryRequest, MysteryRequestBuilder, evaluate, judge_narrative,
};
use whodunit_retrieval::KeywordRetriever;

fn recipe(city: &str, name: &str, ingredients: &str, course_type: CourseType) -> Recipe {
    Recipe {
        city: city.to_string(),
        name: name.to_string(),
        ingredients: ingredients.to_string(),
        preparation: String::new(),
        source: String::new(),
        course_type,
    }
}

fn recipes() -> Vec<Recipe> {
    vec![
        recipe("Hamburg", "Labskaus", "beef, beetroot", CourseType::Starter),
        recipe("Hamburg", "Fischbrötchen", "herring, onion", CourseType::Main),
        recipe("Bremen", "Knipp", "oats, pork", CourseType::Main),
        recipe("Hamburg", "Rote Grütze", "berries", CourseType::Dessert),
    ]
}

fn scripted_run() -> ScriptedDriver {
    let case = json!({
        "victim_name": "Klaus Brandt",
        "summary": "Klaus was found after a Labskaus dinner.",
        "location": "Hamburg"
    });
    let cast = json!([
        {"name": "Jonas", "murderer_label": true},
        {"name": "Mira"},
        {"name": "Tilda"}
    ]);
    let last_day = json!({"overview": "Busy.", "timeline": [{"time": "20:00", "description": "Dinner"}]});
    let clues = json!([{"character": "Jonas", "clues": [{"target": "Mira", "clue": "Ink on her hands."}]}]);
    let solution = json!({
        "killer_name": "Mira",
        "motive": "Revenge.",
        "final_reveal_monologue": "Mira, Jonas and Tilda were all there."
    });

    ScriptedDriver::new(
        [case, cast, last_day, clues, solution]
            .into_iter()
            .map(|v| ScriptedReply::text(v.to_string())),
    )
}

fn generator(driver: ScriptedDriver, size: usize) -> MysteryGenerator {
    MysteryGenerator::new(
        Arc::new(driver),
        Arc::new(KeywordRetriever::default()),
        recipes(),
        size,
    )
    .unwrap()
    .with_seed(7)
}

#[tokio::test]
async fn generates_complete_kit() {
    let driver = scripted_run();
    let kit = generator(driver.clone(), 3)
        .generate(&MysteryRequest::new("Hamburg", "Harbor scandal"))
        .await;

    assert_eq!(driver.call_count(), 5);
    assert_eq!(kit.menu.main.as_ref().map(|r| r.name.as_str()), Some("Fischbrötchen"));
    assert_eq!(kit.case_data.victim_name, "Klaus Brandt");
    assert_eq!(kit.characters.len(), 3);
    assert_eq!(kit.last_day_data.timeline.len(), 1);
    assert_eq!(kit.clues.len(), 1);
    assert_eq!(kit.solution.killer_name, "Mira");
    assert_eq!(kit.murderer().map(|c| c.name.as_str()), Some("Mira"));

    let value = serde_json::to_value(&kit).unwrap();
    for key in ["menu", "case_data", "characters", "last_day_data", "clues", "solution"] {
        assert!(value.get(key).is_some(), "missing {}", key);
    }
}

#[tokio::test]
async fn ingredients_steer_the_menu() {
    let request = MysteryRequestBuilder::default()
        .location("Hamburg")
        .theme("Harbor scandal")
        .main_ingredient("oats")
        .build()
        .unwrap();
    let kit = generator(ScriptedDriver::unavailable("offline"), 2)
        .generate(&request)
        .await;

    assert_eq!(kit.menu.main.as_ref().map(|r| r.name.as_str()), Some("Knipp"));
    assert_eq!(kit.menu.starter.as_ref().map(|r| r.name.as_str()), Some("Labskaus"));
}

#[tokio::test]
async fn offline_model_still_yields_a_playable_kit() {
    let kit = generator(ScriptedDriver::unavailable("offline"), 7)
        .generate(&MysteryRequest::new("Hamburg", ""))
        .await;

    assert_eq!(kit.characters.len(), 7);
    assert_eq!(kit.characters.iter().filter(|c| c.murderer_label).count(), 1);
    assert_eq!(kit.case_data.victim_name, "Lena Hartmann");
    assert_eq!(kit.clues[0].character, kit.characters[0].name);
    assert_eq!(kit.solution.killer_name, kit.murderer().unwrap().name);
}

#[tokio::test]
async fn evaluation_scores_generated_kit() {
    let kit = generator(scripted_run(), 3)
        .generate(&MysteryRequest::new("Hamburg", "Harbor scandal"))
        .await;

    let report = evaluate(&kit);
    assert_eq!(report.details.characters_mentioned, 3);
    assert_eq!(report.scores.character_consistency, 10.0);
    assert_eq!(report.scores.timeline_completeness, 2.0);
    assert_eq!(report.scores.clue_quantity, 1.0);
    assert_eq!(report.details.menu_items_used, 1);
    assert_eq!(report.scores.menu_integration, 3.3);
    assert!(report.scores.narrative_quality.is_none());

    let judge = ScriptedDriver::repeating("Solid work: 8/10");
    let score = judge_narrative(&judge, &kit).await;
    assert_eq!(score, 8.0);
    let report = report.with_narrative_quality(score);
    assert_eq!(report.overall_score, 4.9);

    let dir = tempfile::tempdir().unwrap();
    let path = report.save(dir.path()).unwrap();
    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(saved["overall_score"], json!(4.9));
}

#[tokio::test]
async fn judge_defaults_when_unavailable() {
    let kit = generator(ScriptedDriver::unavailable("offline"), 2)
        .generate(&MysteryRequest::new("Hamburg", ""))
        .await;
    let score = judge_narrative(&ScriptedDriver::unavailable("offline"), &kit).await;
    assert_eq!(score, 5.0);
}
