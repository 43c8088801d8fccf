//! Whodunit CLI binary.
//!
//! - `whodunit serve` runs the web front end
//! - `whodunit generate` prints one mystery and optionally exports it

use clap::Parser;
use whodunit::WhodunitConfig;
use whodunit::observability::{ObservabilityConfig, init_observability};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, handle_generate, handle_serve};

    // Missing .env is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let mut observability = ObservabilityConfig::new().with_json_logs(cli.json_logs);
    if cli.verbose {
        observability = observability.with_log_level("debug");
    }
    init_observability(&observability)?;

    let config = match &cli.config {
        Some(path) => WhodunitConfig::from_file(path)?,
        None => WhodunitConfig::load()?,
    };

    match cli.command {
        Commands::Serve { bind } => {
            handle_serve(&config, bind).await?;
        }

        Commands::Generate(args) => {
            handle_generate(&config, args).await?;
        }
    }

    Ok(())
}
