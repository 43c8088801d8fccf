//! Mystery generation pipeline for whodunit.
//!
//! The pipeline asks a language model for each part of a party kit in turn:
//! the case premise, the cast of suspects, the victim's last day, the clues
//! each suspect holds and the final reveal. Model output is untrusted; every
//! stage reshapes what it gets and falls back to defaults instead of failing.
//!
//! The cast is the heart of the kit and gets the most scrutiny: see
//! [`casting`] for how a reply becomes exactly `N` distinct suspects with one
//! murderer.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use whodunit_interface::ScriptedDriver;
//! use whodunit_narrative::{MysteryGenerator, MysteryRequest};
//! use whodunit_retrieval::KeywordRetriever;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> whodunit_error::WhodunitResult<()> {
//! let generator = MysteryGenerator::new(
//!     Arc::new(ScriptedDriver::unavailable("offline")),
//!     Arc::new(KeywordRetriever::default()),
//!     Vec::new(),
//!     7,
//! )?;
//! let kit = generator
//!     .generate(&MysteryRequest::new("Hamburg", "A harbor scandal"))
//!     .await;
//! assert_eq!(kit.characters.len(), 7);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod casting;
mod completion;
mod evaluation;
mod extraction;
mod fields;
mod generator;
mod stages;

pub use casting::{
    CastPrompt, CastingOutcome, CastingPipeline, Coercion, DEFAULT_RETRIEVAL_K, LEGACY_MURDERER_KEY,
    MAX_PERSONALITY_TRAITS, MurdererSelection, MurdererSource, PLACEHOLDER_PREFIX,
    UNNAMED_SUSPECT, WRAPPER_KEYS, build_cast_prompt, coerce_cast, enforce_single_murderer,
    enforce_unique_names, fix_cardinality, migrate_legacy_fields, normalize_cast,
    normalize_record, retrieval_query,
};
pub use completion::{DEFAULT_JSON_TEMPERATURE, JSON_ONLY_SUFFIX, ModelReply, chat_json};
pub use evaluation::{
    DEFAULT_JUDGE_SCORE, EvaluationDetails, EvaluationReport, JUDGE_TEMPERATURE,
    QualityScores, REPORT_FILE_NAME, evaluate, judge_narrative, judge_prompt, parse_judge_score,
};
pub use extraction::{extract_json, parse_json, recover_json, strip_code_fence};
pub use generator::{MysteryGenerator, MysteryRequest, MysteryRequestBuilder};
pub use stages::{
    align_murderer_with_solution, case_prompt, clues_prompt, fallback_case, fallback_clues,
    fallback_last_day, fallback_solution, generate_case, generate_clues, generate_last_day,
    generate_solution, killer_hint, last_day_prompt, solution_prompt,
};
