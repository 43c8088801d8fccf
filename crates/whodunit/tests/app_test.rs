use std::fs;
use std::sync::Arc;
use whodunit::{
    MysteryRequest, ScriptedDriver, WhodunitConfig, build_generator_with, printable_documents,
};

fn config_with_data(root: &std::path::Path) -> WhodunitConfig {
    let recipes = root.join("recipes");
    let corpus = root.join("corpus");
    fs::create_dir_all(&recipes).unwrap();
    fs::create_dir_all(&corpus).unwrap();
    fs::write(
        recipes.join("main_courses.csv"),
        "city;name;ingredients\nKiel;Kieler Sprotten;sprats\n",
    )
    .unwrap();
    fs::write(
        corpus.join("harbor.txt"),
        "Dock workers and fishermen gather at the Kiel harbor.",
    )
    .unwrap();

    let mut config = WhodunitConfig::bundled().unwrap();
    config.data.recipes_dir = recipes;
    config.data.corpus_dir = corpus;
    config.data.output_dir = root.join("outputs");
    config.generation.num_characters = 3;
    config
}

#[tokio::test]
async fn configured_generator_uses_local_data() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_with_data(dir.path());
    let driver = ScriptedDriver::unavailable("offline");

    let generator = build_generator_with(&config, Arc::new(driver.clone())).unwrap();
    assert_eq!(generator.recipe_count(), 1);
    assert_eq!(*generator.casting().num_characters(), 3);

    let kit = generator.generate(&MysteryRequest::new("Kiel", "")).await;
    assert_eq!(kit.characters.len(), 3);
    assert_eq!(
        kit.menu.main.as_ref().map(|r| r.name.as_str()),
        Some("Kieler Sprotten")
    );

    let requests = driver.requests();
    let cast_prompt = &requests[1].messages()[1].content;
    assert!(cast_prompt.contains("[harbor]"));

    assert_eq!(printable_documents(&kit).len(), 4 + 3);
}

#[test]
fn zero_cast_size_is_a_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_with_data(dir.path());
    config.generation.num_characters = 0;
    let result = build_generator_with(&config, Arc::new(ScriptedDriver::unavailable("offline")));
    assert!(result.is_err());
}
