//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Whodunit - murder-mystery dinner kits from a local language model
#[derive(Parser, Debug)]
#[command(name = "whodunit")]
#[command(about = "Murder-mystery dinner kits from a local language model", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file replacing the default lookup
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the web front end
    Serve {
        /// Address to bind, overriding `[web] bind`
        #[arg(long)]
        bind: Option<String>,
    },

    /// Generate one mystery and print it
    Generate(GenerateArgs),
}

/// Options of `whodunit generate`
#[derive(clap::Args, Debug, Default)]
pub struct GenerateArgs {
    /// Town or region of the dinner, overriding `[web] default_location`
    #[arg(long)]
    pub location: Option<String>,

    /// Setting or theme, overriding `[web] default_theme`
    #[arg(long)]
    pub theme: Option<String>,

    /// Ingredient to look for among starters
    #[arg(long)]
    pub starter: Option<String>,

    /// Ingredient to look for among main courses
    #[arg(long)]
    pub main: Option<String>,

    /// Ingredient to look for among desserts
    #[arg(long)]
    pub dessert: Option<String>,

    /// Write printable documents under this directory
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Score the result and save an evaluation report
    #[arg(long)]
    pub evaluate: bool,

    /// Seed for the murderer draw
    #[arg(long)]
    pub seed: Option<u64>,
}
