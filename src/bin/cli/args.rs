//! CLI Argument Structures
//!
//! Command and argument definitions for the crowdsift binary.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crowdsift_rs::core::config::CompilerArgs;
use crowdsift_rs::io::reports::ReportFormat;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Compile crowdsourced annotation results into tabular reports
#[derive(Parser)]
#[command(name = "crowdsift")]
#[command(version = VERSION)]
#[command(about = "Compile crowdsourced turn-annotation results into tabular reports")]
#[command(long_about = "
Compile the raw results of crowdsourced annotation runs into a single table,
one row per annotated turn with an indicator column per problem bucket.

Common Usage:

  # Compile two result folders and save a CSV report
  crowdsift compile --results-folders runs/a,runs/b --output-folder reports

  # Only keep conversations from finished units of a task
  crowdsift compile --results-folders runs/a --task-name turn_annotations --filter-by-units

  # Inspect the units recorded for a task
  crowdsift list-units --task-name turn_annotations
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile annotation results into a table
    Compile(CompileArgs),

    /// List the work units recorded for a task
    #[command(name = "list-units")]
    ListUnits(ListUnitsArgs),

    /// Print default configuration in YAML format
    #[command(name = "print-default-config")]
    PrintDefaultConfig,

    /// Validate a crowdsift configuration file
    #[command(name = "validate-config")]
    ValidateConfig(ValidateConfigArgs),
}

#[derive(Args)]
pub struct CompileArgs {
    #[command(flatten)]
    pub compiler: CompilerArgs,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format for the results table
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: ReportFormat,

    /// Only compile conversations from finished units of --task-name
    #[arg(long)]
    pub filter_by_units: bool,

    /// Task database path (defaults to $CROWDSIFT_DB or the user data directory)
    #[arg(long)]
    pub db: Option<PathBuf>,
}

#[derive(Args)]
pub struct ListUnitsArgs {
    /// Name of the task to open
    #[arg(long)]
    pub task_name: String,

    /// Task database path (defaults to $CROWDSIFT_DB or the user data directory)
    #[arg(long)]
    pub db: Option<PathBuf>,
}

#[derive(Args)]
pub struct ValidateConfigArgs {
    /// Configuration file path
    #[arg(short, long)]
    pub config: PathBuf,
}
