//! Argument specification for results compilers.

use clap::{ArgMatches, Args, Command};

use crate::core::config::{CompilerOptions, DEFAULT_PROBLEM_BUCKETS};

/// Options every results compiler understands.
///
/// No defaults are attached here so that a flattened copy can tell "not
/// given" apart from "given"; [`setup_args`] adds the bucket default.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilerArgs {
    /// Name of the task to open
    #[arg(long, value_name = "NAME")]
    pub task_name: Option<String>,

    /// Comma-separated list of result folders
    #[arg(long, value_name = "FOLDERS")]
    pub results_folders: Option<String>,

    /// Folder to save output files to
    #[arg(long, value_name = "FOLDER")]
    pub output_folder: Option<String>,

    /// Comma-separated list of buckets used for annotation
    #[arg(long, value_name = "BUCKETS")]
    pub problem_buckets: Option<String>,
}

/// Describe the options every results compiler understands.
///
/// Only the parser description is built here; process arguments are never
/// read. Feed the returned command to `get_matches_from` and convert the
/// matches with [`CompilerOptions::from`].
pub fn setup_args() -> Command {
    let command = Command::new("compile-results").about("Compile crowdsourcing results");
    CompilerArgs::augment_args(command)
        .mut_arg("problem_buckets", |arg| arg.default_value(DEFAULT_PROBLEM_BUCKETS))
}

impl From<&CompilerArgs> for CompilerOptions {
    fn from(args: &CompilerArgs) -> Self {
        Self {
            task_name: args.task_name.clone(),
            results_folders: args.results_folders.clone(),
            output_folder: args.output_folder.clone(),
            problem_buckets: args.problem_buckets.clone(),
        }
    }
}

impl From<&ArgMatches> for CompilerOptions {
    fn from(matches: &ArgMatches) -> Self {
        let get = |id: &str| matches.get_one::<String>(id).cloned();
        Self {
            task_name: get("task_name"),
            results_folders: get("results_folders"),
            output_folder: get("output_folder"),
            problem_buckets: get("problem_buckets"),
        }
    }
}
