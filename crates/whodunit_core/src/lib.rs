//! Core data types for whodunit.
//!
//! This crate provides the foundation types shared by every whodunit crate:
//! provider-neutral request/response types for talking to a language model,
//! the mystery domain model (case, cast, timeline, clues, solution, menu),
//! and configuration loading.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod case;
mod character;
mod clues;
mod config;
mod kit;
mod last_day;
mod message;
mod output;
mod recipe;
mod request;
mod role;
mod solution;

pub use case::{CaseContext, CaseData, RetrievedDocument};
pub use character::{CharacterRecord, HintAboutOther, UNRESOLVED_TARGET};
pub use clues::{CharacterClues, Clue};
pub use config::{DataSettings, GenerationSettings, ServerSettings, WebSettings, WhodunitConfig};
pub use kit::MysteryKit;
pub use last_day::{LastDay, TimelineEvent};
pub use message::Message;
pub use output::{Output, ToolCall};
pub use recipe::{CourseType, Menu, MenuNames, Recipe};
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse};
pub use role::Role;
pub use solution::{AlternativeSuspect, ClueAlignment, Solution};
