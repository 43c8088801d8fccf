use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::{Value, json};
use std::collections::HashSet;
use whodunit_core::{CaseContext, CaseData, CharacterRecord, MenuNames};
use whodunit_interface::{ScriptedDriver, ScriptedReply};
use whodunit_narrative::{
    CastingPipeline, Coercion, JSON_ONLY_SUFFIX, ModelReply, MurdererSource, UNNAMED_SUSPECT,
    coerce_cast, normalize_cast, normalize_record,
};
use whodunit_retrieval::KeywordRetriever;

fn whitelist() -> HashSet<String> {
    ["doc1", "doc2"].iter().map(|s| s.to_string()).collect()
}

fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

fn murderers(cast: &[CharacterRecord]) -> usize {
    cast.iter().filter(|c| c.murderer_label).count()
}

fn context() -> CaseContext {
    let case = CaseData {
        victim_name: "Lena Hartmann".to_string(),
        location: "Hamburg harbor".to_string(),
        ..CaseData::default()
    };
    CaseContext::new(
        "Hamburg",
        "A harbor scandal",
        MenuNames::default(),
        case,
    )
}

#[test]
fn cast_always_has_requested_size() {
    for len in 0..9 {
        let raw: Vec<Value> = (0..len).map(|i| json!({"name": format!("P{}", i)})).collect();
        for n in 1..7 {
            let outcome = normalize_cast(
                &ModelReply::Json(Value::Array(raw.clone())),
                &whitelist(),
                n,
                &mut rng(len as u64),
            );
            assert_eq!(outcome.cast().len(), n, "len {} n {}", len, n);
            assert_eq!(*outcome.padded(), n.saturating_sub(len));
        }
    }
}

#[test]
fn names_are_distinct_after_normalization() {
    let raw = json!([
        {"name": "Eva"},
        {"name": "Eva"},
        {"name": "Eva (2)"},
        {"name": "Suspect 1"},
        {},
        {"name": ""},
    ]);
    let outcome = normalize_cast(&ModelReply::Json(raw), &whitelist(), 8, &mut rng(1));
    let names: HashSet<&str> = outcome.cast().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names.len(), 8);
    assert!(names.contains(UNNAMED_SUSPECT));
}

#[test]
fn exactly_one_murderer_for_any_flag_count() {
    for flagged in 0..4 {
        let raw: Vec<Value> = (0..4)
            .map(|i| json!({"name": format!("P{}", i), "murderer_label": i < flagged}))
            .collect();
        for seed in 0..5 {
            let outcome = normalize_cast(
                &ModelReply::Json(Value::Array(raw.clone())),
                &whitelist(),
                4,
                &mut rng(seed),
            );
            assert_eq!(murderers(outcome.cast()), 1, "flagged {}", flagged);
        }
    }
}

#[test]
fn references_outside_whitelist_are_removed() {
    let raw = json!({"name": "A", "source_references": ["doc1", "doc9"]});
    let record = normalize_record(raw.as_object().unwrap(), &whitelist());
    assert_eq!(record.source_references, vec!["doc1".to_string()]);
}

#[test]
fn empty_mapping_normalizes_to_defaults() {
    let record = normalize_record(&serde_json::Map::new(), &whitelist());
    assert!(!record.name.is_empty());
    assert!(record.occupation.is_empty());
    assert!(record.personality_traits.is_empty());
    assert!(record.source_references.is_empty());
    assert!(!record.murderer_label);
}

#[test]
fn coercion_recovers_common_shapes() {
    let list = json!([{"name": "A"}, {"name": "B"}, {"name": "C"}]);
    assert_eq!(
        coerce_cast(&ModelReply::Json(list.clone())),
        Coercion::Recovered(list.as_array().unwrap().clone())
    );

    let fenced = ModelReply::from_text("```json\n[{\"name\":\"A\",\"occupation\":\"Pilot\"}]\n```");
    assert_eq!(
        coerce_cast(&fenced),
        Coercion::Recovered(vec![json!({"name": "A", "occupation": "Pilot"})])
    );

    let wrapped = ModelReply::Json(json!({"cast": [{"name": "B"}]}));
    assert_eq!(
        coerce_cast(&wrapped),
        Coercion::Recovered(vec![json!({"name": "B"})])
    );
}

#[test]
fn unparseable_reply_becomes_placeholder_cast() {
    let reply = ModelReply::from_text("not json at all");
    assert_eq!(coerce_cast(&reply), Coercion::NoCastRecovered);

    let outcome = normalize_cast(&reply, &whitelist(), 5, &mut rng(9));
    assert_eq!(outcome.cast().len(), 5);
    assert_eq!(*outcome.recovered(), 0);
    assert_eq!(*outcome.padded(), 5);
    assert!(outcome.is_degraded());
    assert_eq!(murderers(outcome.cast()), 1);
    assert_eq!(*outcome.murderer_source(), Some(MurdererSource::Random));
    assert!(outcome.cast().iter().all(|c| c.name.starts_with("Suspect ")));
}

#[test]
fn duplicate_murderer_scenario() {
    let raw = json!([
        {"name": "Eva", "occupation": "Harbor pilot", "murderer_label": true},
        {"name": "Eva", "occupation": "Journalist", "murderer_label": true},
        {"name": "Marco", "occupation": "Chef"},
    ]);
    let outcome = normalize_cast(&ModelReply::Json(raw), &whitelist(), 3, &mut rng(0));
    let cast = outcome.cast();

    assert_eq!(cast.len(), 3);
    assert_eq!(cast[0].name, "Eva");
    assert_eq!(cast[1].name, "Eva (2)");
    assert_eq!(cast[2].name, "Marco");
    assert!(cast[0].murderer_label);
    assert!(!cast[1].murderer_label);
    assert!(!cast[2].murderer_label);
    assert_eq!(cast[1].occupation, "Journalist");
    assert_eq!(*outcome.renamed(), 1);
    assert_eq!(*outcome.murderer_source(), Some(MurdererSource::FirstOfMany));
    assert_eq!(*outcome.murderer_index(), Some(0));
}

#[test]
fn flagged_input_is_deterministic() {
    let raw = ModelReply::Json(json!([
        {"name": "A"},
        {"name": "B", "murderer_label": true},
        {"name": "A"},
    ]));
    let first = normalize_cast(&raw, &whitelist(), 5, &mut rng(1));
    let second = normalize_cast(&raw, &whitelist(), 5, &mut rng(2));
    assert_eq!(first, second);
}

#[tokio::test]
async fn pipeline_casts_from_model_reply() {
    let reply = json!({"characters": [
        {"name": "Jonas Weber", "occupation": "Dock worker", "source_references": ["doc1", "doc7"]},
        {"name": "Mira Lange", "muderer_label": true},
    ]});
    let driver = ScriptedDriver::new([ScriptedReply::text(reply.to_string())]);
    let retriever = KeywordRetriever::default();
    let pipeline = CastingPipeline::new(3).unwrap().with_retrieval_k(2);

    let outcome = pipeline
        .cast(&driver, &retriever, &context(), &mut rng(4))
        .await;

    let cast = outcome.cast();
    assert_eq!(cast.len(), 3);
    assert_eq!(cast[0].source_references, vec!["doc1".to_string()]);
    assert!(cast[1].murderer_label);
    assert_eq!(cast[2].name, "Suspect 1");
    assert_eq!(*outcome.padded(), 1);
    assert_eq!(*outcome.murderer_source(), Some(MurdererSource::Model));

    let requests = driver.requests();
    assert_eq!(requests.len(), 1);
    let user = &requests[0].messages()[1].content;
    assert!(user.contains("[doc1]"));
    assert!(user.contains("exactly 3 characters"));
    assert!(user.ends_with(JSON_ONLY_SUFFIX));
}

#[tokio::test]
async fn pipeline_survives_unavailable_model() {
    let driver = ScriptedDriver::unavailable("connection refused");
    let pipeline = CastingPipeline::new(7).unwrap();

    let outcome = pipeline
        .cast(&driver, &KeywordRetriever::default(), &context(), &mut rng(11))
        .await;

    assert_eq!(outcome.cast().len(), 7);
    assert_eq!(*outcome.padded(), 7);
    assert_eq!(murderers(outcome.cast()), 1);
}
