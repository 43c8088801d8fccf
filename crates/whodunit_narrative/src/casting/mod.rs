//! Character cast normalization.
//!
//! Turns whatever the model returned for the cast into exactly `N` suspects
//! with distinct names, one murderer and only whitelisted source references.
//!
//! Stages, in order:
//! 1. [`build_cast_prompt`] formats the instruction pair
//! 2. [`chat_json`](crate::chat_json) asks the model
//! 3. [`coerce_cast`] recovers a list of record-like values
//! 4. [`normalize_record`] types each mapping
//! 5. [`fix_cardinality`] truncates or pads to `N`
//! 6. [`enforce_unique_names`] disambiguates repeated names
//! 7. [`enforce_single_murderer`] leaves exactly one murderer
//!
//! Order is meaningful throughout: the model's own ordering is treated as
//! narrative importance, so truncation keeps the head and renaming keeps the
//! first occurrence.

mod coerce;
mod enforce;
mod normalize;
mod pipeline;
mod prompt;

pub use coerce::{Coercion, WRAPPER_KEYS, coerce_cast};
pub use enforce::{
    MurdererSelection, MurdererSource, PLACEHOLDER_PREFIX, enforce_single_murderer,
    enforce_unique_names, fix_cardinality,
};
pub use normalize::{
    LEGACY_MURDERER_KEY, MAX_PERSONALITY_TRAITS, UNNAMED_SUSPECT, migrate_legacy_fields,
    normalize_record,
};
pub use pipeline::{CastingOutcome, CastingPipeline, DEFAULT_RETRIEVAL_K, normalize_cast};
pub use prompt::{CastPrompt, build_cast_prompt, retrieval_query};
