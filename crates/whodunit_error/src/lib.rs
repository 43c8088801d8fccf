//! Error types for whodunit.
//!
//! This crate provides the foundation error types used throughout the whodunit workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! Conditions the generation pipeline recovers from locally (an unreachable
//! model, unparseable output, malformed records) are values, not errors. The
//! types here cover configuration, file I/O and transport failures.
//!
//! # Examples
//!
//! ```
//! use whodunit_error::{WhodunitResult, HttpError};
//!
//! fn fetch_data() -> WhodunitResult<String> {
//!     Err(HttpError::new("Connection refused"))?
//! }
//!
//! match fetch_data() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod config;
mod error;
mod http;
mod json;
mod narrative;
mod recipe;
mod render;
mod server;
mod storage;

pub use backend::BackendError;
pub use config::ConfigError;
pub use error::{WhodunitError, WhodunitErrorKind, WhodunitResult};
pub use http::HttpError;
pub use json::JsonError;
pub use narrative::{NarrativeError, NarrativeErrorKind};
pub use recipe::{RecipeError, RecipeErrorKind};
pub use render::{RenderError, RenderErrorKind};
pub use server::{ServerError, ServerErrorKind};
pub use storage::{StorageError, StorageErrorKind};
