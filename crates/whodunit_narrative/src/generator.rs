//! The generation pipeline end to end.

use crate::{
    CastingPipeline, DEFAULT_JSON_TEMPERATURE, align_murderer_with_solution, generate_case,
    generate_clues, generate_last_day, generate_solution,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;
use std::sync::Arc;
use tracing::{info, instrument};
use whodunit_core::{CaseContext, GenerationSettings, MysteryKit, Recipe, ServerSettings};
use whodunit_error::WhodunitResult;
use whodunit_interface::{CompletionDriver, Retriever};
use whodunit_retrieval::{menu_by_ingredients, menu_for_location};

/// What the host asked for.
///
/// Ingredient terms are optional; any non-blank term switches the menu
/// lookup to ingredient search.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, derive_getters::Getters, derive_builder::Builder,
)]
#[builder(setter(into), default)]
pub struct MysteryRequest {
    /// Town or region the dinner takes place in
    location: String,
    /// Free-text setting or theme
    theme: String,
    /// Ingredient to search the starters for
    starter_ingredient: String,
    /// Ingredient to search the main courses for
    main_ingredient: String,
    /// Ingredient to search the desserts for
    dessert_ingredient: String,
}

impl MysteryRequest {
    /// A request without ingredient preferences.
    pub fn new(location: impl Into<String>, theme: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            theme: theme.into(),
            ..Self::default()
        }
    }

    /// Whether any ingredient term is set.
    pub fn has_ingredients(&self) -> bool {
        [
            &self.starter_ingredient,
            &self.main_ingredient,
            &self.dessert_ingredient,
        ]
        .iter()
        .any(|term| !term.trim().is_empty())
    }
}

/// Runs menu lookup, case, cast, last day, clues and solution.
///
/// Cheap to clone; collaborators and recipes are shared.
#[derive(Clone)]
pub struct MysteryGenerator {
    driver: Arc<dyn CompletionDriver>,
    retriever: Arc<dyn Retriever>,
    recipes: Arc<Vec<Recipe>>,
    casting: CastingPipeline,
    temperature: f32,
    seed: Option<u64>,
}

impl fmt::Debug for MysteryGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MysteryGenerator")
            .field("provider", &self.driver.provider_name())
            .field("model", &self.driver.model_name())
            .field("recipes", &self.recipes.len())
            .field("casting", &self.casting)
            .field("temperature", &self.temperature)
            .field("seed", &self.seed)
            .finish()
    }
}

impl MysteryGenerator {
    /// A generator producing casts of `num_characters`.
    ///
    /// # Errors
    ///
    /// Returns an error when `num_characters` is zero.
    pub fn new(
        driver: Arc<dyn CompletionDriver>,
        retriever: Arc<dyn Retriever>,
        recipes: Vec<Recipe>,
        num_characters: usize,
    ) -> WhodunitResult<Self> {
        Ok(Self {
            driver,
            retriever,
            recipes: Arc::new(recipes),
            casting: CastingPipeline::new(num_characters)?,
            temperature: DEFAULT_JSON_TEMPERATURE,
            seed: None,
        })
    }

    /// A generator configured from the `[generation]` and `[server]` sections.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured cast size is zero.
    pub fn from_settings(
        driver: Arc<dyn CompletionDriver>,
        retriever: Arc<dyn Retriever>,
        recipes: Vec<Recipe>,
        generation: &GenerationSettings,
        server: &ServerSettings,
    ) -> WhodunitResult<Self> {
        Ok(Self::new(driver, retriever, recipes, generation.num_characters)?
            .with_retrieval_k(generation.retrieval_k)
            .with_temperature(server.json_temperature))
    }

    /// Set how many background documents the cast prompt embeds.
    pub fn with_retrieval_k(mut self, retrieval_k: usize) -> Self {
        self.casting = self.casting.with_retrieval_k(retrieval_k);
        self
    }

    /// Set the sampling temperature of every stage.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.casting = self.casting.with_temperature(temperature);
        self.temperature = temperature;
        self
    }

    /// Seed the murderer draw so runs are reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The cast pipeline in use.
    pub fn casting(&self) -> &CastingPipeline {
        &self.casting
    }

    /// Number of recipes available to the menu lookup.
    pub fn recipe_count(&self) -> usize {
        self.recipes.len()
    }

    /// Generate a complete mystery.
    ///
    /// Never fails: every stage degrades to its default when the model is
    /// unreachable or unhelpful.
    #[instrument(
        skip(self, request),
        fields(location = %request.location, provider = self.driver.provider_name())
    )]
    pub async fn generate(&self, request: &MysteryRequest) -> MysteryKit {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let menu = if request.has_ingredients() {
            menu_by_ingredients(
                &request.starter_ingredient,
                &request.main_ingredient,
                &request.dessert_ingredient,
                &self.recipes,
                &request.location,
            )
        } else {
            menu_for_location(&request.location, &self.recipes)
        };
        let names = menu.names();
        info!(starter = ?names.starter, main = ?names.main, dessert = ?names.dessert, "Menu selected");

        let driver = self.driver.as_ref();
        let case_data = generate_case(
            driver,
            &request.theme,
            &request.location,
            &names,
            self.temperature,
        )
        .await;
        info!(victim = %case_data.victim_name, "Case generated");

        let context = CaseContext::new(
            request.location.clone(),
            request.theme.clone(),
            names,
            case_data.clone(),
        );
        let outcome = self
            .casting
            .cast(driver, self.retriever.as_ref(), &context, &mut rng)
            .await;
        let mut characters = outcome.into_cast();

        let last_day_data =
            generate_last_day(driver, &case_data, &characters, self.temperature).await;
        info!(events = last_day_data.timeline.len(), "Last day generated");

        let clues = generate_clues(
            driver,
            &case_data,
            &characters,
            &last_day_data,
            self.temperature,
        )
        .await;
        info!(entries = clues.len(), "Clues generated");

        let solution = generate_solution(
            driver,
            &case_data,
            &characters,
            &last_day_data,
            &clues,
            self.temperature,
        )
        .await;
        let aligned = align_murderer_with_solution(&mut characters, &solution.killer_name);
        info!(killer = %solution.killer_name, aligned, "Solution generated");

        MysteryKit {
            menu,
            case_data,
            characters,
            last_day_data,
            clues,
            solution,
        }
    }
}
