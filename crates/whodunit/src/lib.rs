//! Whodunit - murder-mystery dinner kits from a local language model
//!
//! Whodunit turns a location and a theme into a complete party kit: a
//! regional three-course menu, a case premise, a cast of suspects with one
//! murderer, the victim's last day, clues for every guest and the final
//! reveal, plus printable documents for the table.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use whodunit::{MysteryRequest, WhodunitConfig, build_generator};
//!
//! #[tokio::main]
//! async fn main() -> whodunit::WhodunitResult<()> {
//!     let config = WhodunitConfig::load()?;
//!     let generator = build_generator(&config)?;
//!     let kit = generator
//!         .generate(&MysteryRequest::new("Hamburg", "A harbor scandal"))
//!         .await;
//!     println!("The murderer is {}", kit.solution.killer_name);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `whodunit_error` - Error types
//! - `whodunit_core` - Domain types and configuration
//! - `whodunit_interface` - Collaborator traits (`CompletionDriver`, `Retriever`)
//! - `whodunit_server` - OpenAI-compatible completion client
//! - `whodunit_retrieval` - Document retrieval, recipes and menus
//! - `whodunit_narrative` - Generation pipeline and the cast normalizer
//! - `whodunit_render` - HTML, printable documents, archives
//! - `whodunit_web` - Web front end
//!
//! This crate (`whodunit`) re-exports everything for convenience.

pub use whodunit_core::*;
pub use whodunit_error::*;
pub use whodunit_interface::*;
pub use whodunit_narrative::{
    CastingOutcome, CastingPipeline, EvaluationReport, ModelReply, MurdererSource,
    MysteryGenerator, MysteryRequest, MysteryRequestBuilder, QualityScores, casting, chat_json,
    evaluate, judge_narrative, normalize_cast,
};
pub use whodunit_render::{
    Document, package_archive, printable_documents, render_index_page, render_results_page,
    write_documents,
};
pub use whodunit_retrieval::{
    KeywordRetriever, load_all_recipes, menu_by_ingredients, menu_for_location,
};
pub use whodunit_server::{ServerClient, ServerConfig};
pub use whodunit_web::{AppState, create_router, serve};

pub mod observability;

mod app;
pub use app::{build_generator, build_generator_with};
