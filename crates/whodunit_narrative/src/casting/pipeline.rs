//! The cast pipeline end to end.

use super::{
    Coercion, MurdererSource, build_cast_prompt, coerce_cast, enforce_single_murderer,
    enforce_unique_names, fix_cardinality, normalize_record, retrieval_query,
};
use crate::{DEFAULT_JSON_TEMPERATURE, ModelReply, chat_json};
use rand::Rng;
use serde_json::Value;
use std::collections::HashSet;
use tracing::{info, instrument, warn};
use whodunit_core::{CaseContext, CharacterRecord, RetrievedDocument};
use whodunit_error::{NarrativeError, NarrativeErrorKind, WhodunitResult};
use whodunit_interface::{CompletionDriver, Retriever};

/// Background documents retrieved per cast unless configured otherwise.
pub const DEFAULT_RETRIEVAL_K: usize = 5;

/// A validated cast plus the data-quality signals gathered on the way.
///
/// `padded > 0` means the model under-delivered and placeholder suspects
/// fill the gap.
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct CastingOutcome {
    /// Exactly `N` records satisfying every cast invariant
    cast: Vec<CharacterRecord>,
    /// Records recovered from the reply before resizing
    recovered: usize,
    /// Placeholders appended
    padded: usize,
    /// Records renamed to keep names distinct
    renamed: usize,
    /// Non-mapping entries thrown away
    dropped: usize,
    /// How the murderer was settled; `None` only for an empty cast
    murderer_source: Option<MurdererSource>,
    /// Index of the murderer in `cast`
    murderer_index: Option<usize>,
}

impl CastingOutcome {
    /// Take the cast out of the outcome.
    pub fn into_cast(self) -> Vec<CharacterRecord> {
        self.cast
    }

    /// Whether placeholders had to be added.
    pub fn is_degraded(&self) -> bool {
        self.padded > 0
    }
}

/// Turn a model reply into a validated cast of `n` records.
///
/// Deterministic apart from the murderer draw when no record is flagged.
pub fn normalize_cast<R>(
    reply: &ModelReply,
    whitelist: &HashSet<String>,
    n: usize,
    rng: &mut R,
) -> CastingOutcome
where
    R: Rng + ?Sized,
{
    let candidates = match coerce_cast(reply) {
        Coercion::Recovered(items) => items,
        Coercion::NoCastRecovered => Vec::new(),
    };

    let total = candidates.len();
    let mut cast: Vec<CharacterRecord> = candidates
        .iter()
        .filter_map(Value::as_object)
        .map(|raw| normalize_record(raw, whitelist))
        .collect();
    let dropped = total - cast.len();
    if dropped > 0 {
        warn!(dropped, "Dropped non-object cast entries");
    }

    let recovered = cast.len();
    let padded = fix_cardinality(&mut cast, n);
    let renamed = enforce_unique_names(&mut cast);
    let selection = enforce_single_murderer(&mut cast, rng);

    CastingOutcome {
        cast,
        recovered,
        padded,
        renamed,
        dropped,
        murderer_source: selection.map(|s| s.source),
        murderer_index: selection.map(|s| s.index),
    }
}

/// Generates a validated cast for one case.
///
/// Holds no state between calls; one instance can serve any number of
/// concurrent requests.
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct CastingPipeline {
    /// Cast size
    num_characters: usize,
    /// Documents retrieved per cast
    retrieval_k: usize,
    /// Sampling temperature of the cast request
    temperature: f32,
}

impl CastingPipeline {
    /// A pipeline producing casts of `num_characters`.
    ///
    /// # Errors
    ///
    /// Returns an error when `num_characters` is zero.
    pub fn new(num_characters: usize) -> WhodunitResult<Self> {
        if num_characters == 0 {
            return Err(NarrativeError::new(NarrativeErrorKind::InvalidCastSize(num_characters)).into());
        }
        Ok(Self {
            num_characters,
            retrieval_k: DEFAULT_RETRIEVAL_K,
            temperature: DEFAULT_JSON_TEMPERATURE,
        })
    }

    /// Set how many documents are retrieved.
    pub fn with_retrieval_k(mut self, retrieval_k: usize) -> Self {
        self.retrieval_k = retrieval_k;
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Retrieve background, ask the model and normalize the answer.
    ///
    /// Never fails: an unreachable model or an unusable reply yields a cast
    /// of placeholders.
    #[instrument(
        skip(self, driver, retriever, context, rng),
        fields(num_characters = self.num_characters, location = %context.location)
    )]
    pub async fn cast<D, T, R>(
        &self,
        driver: &D,
        retriever: &T,
        context: &CaseContext,
        rng: &mut R,
    ) -> CastingOutcome
    where
        D: CompletionDriver + ?Sized,
        T: Retriever + ?Sized,
        R: Rng + Send + ?Sized,
    {
        let documents: Vec<RetrievedDocument> =
            retriever.retrieve(&retrieval_query(context), self.retrieval_k);
        let whitelist: HashSet<String> = documents.iter().map(|d| d.id.clone()).collect();

        let prompt = build_cast_prompt(context, self.num_characters, &documents);
        let reply = chat_json(driver, &prompt.system, &prompt.user, self.temperature).await;

        let outcome = normalize_cast(&reply, &whitelist, self.num_characters, rng);
        info!(
            recovered = outcome.recovered,
            padded = outcome.padded,
            renamed = outcome.renamed,
            murderer_index = ?outcome.murderer_index,
            "Cast ready"
        );
        outcome
    }
}
