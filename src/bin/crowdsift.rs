//! Crowdsift CLI - compile crowdsourced annotation results
//!
//! Reads saved turn-annotation conversations, aggregates them into a table
//! with one indicator column per problem bucket, and writes the table and a
//! bucket summary to the output folder.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging; --verbose wins over RUST_LOG
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Commands::Compile(args) => {
            cli::compile_command(args)?;
        }
        Commands::ListUnits(args) => {
            cli::list_units_command(args)?;
        }
        Commands::PrintDefaultConfig => {
            cli::print_default_config()?;
        }
        Commands::ValidateConfig(args) => {
            cli::validate_config(args)?;
        }
    }

    Ok(())
}
