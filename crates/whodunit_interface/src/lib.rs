//! Collaborator traits for whodunit.
//!
//! The generation pipeline talks to its collaborators only through these
//! traits: a completion driver for the language model and a retriever for
//! background documents. A scripted driver is included for tests and
//! offline runs.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod scripted;
mod traits;
mod types;

pub use scripted::{ScriptedDriver, ScriptedReply};
pub use traits::{CompletionDriver, Health, Retriever, ToolUse};
pub use types::{HealthStatus, ToolDefinition};
