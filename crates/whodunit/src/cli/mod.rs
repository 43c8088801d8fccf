//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the whodunit binary.

mod commands;
mod generate;
mod serve;

pub use commands::{Cli, Commands, GenerateArgs};
pub use generate::handle_generate;
pub use serve::handle_serve;
