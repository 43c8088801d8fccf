//! Wiring configuration to collaborators.

use std::sync::Arc;
use tracing::{info, instrument};
use whodunit_core::WhodunitConfig;
use whodunit_error::WhodunitResult;
use whodunit_interface::CompletionDriver;
use whodunit_narrative::MysteryGenerator;
use whodunit_retrieval::{KeywordRetriever, load_all_recipes};
use whodunit_server::{ServerClient, ServerConfig};

/// A generator talking to the configured completion endpoint.
///
/// # Errors
///
/// Returns an error when the HTTP client cannot be built, a data file
/// cannot be read, or the cast size is zero.
pub fn build_generator(config: &WhodunitConfig) -> WhodunitResult<MysteryGenerator> {
    let client = ServerClient::new(ServerConfig::from_settings(&config.server))?;
    build_generator_with(config, Arc::new(client))
}

/// A generator using `driver` and the configured corpus and recipes.
///
/// # Errors
///
/// Returns an error when a data file cannot be read or the cast size is
/// zero.
#[instrument(skip(config, driver), fields(provider = driver.provider_name(), model = driver.model_name()))]
pub fn build_generator_with(
    config: &WhodunitConfig,
    driver: Arc<dyn CompletionDriver>,
) -> WhodunitResult<MysteryGenerator> {
    let retriever = KeywordRetriever::from_dir(&config.data.corpus_dir)?;
    let recipes = load_all_recipes(&config.data.recipes_dir)?;
    info!(
        documents = retriever.len(),
        recipes = recipes.len(),
        "Loaded background data"
    );

    MysteryGenerator::from_settings(
        driver,
        Arc::new(retriever),
        recipes,
        &config.generation,
        &config.server,
    )
}
