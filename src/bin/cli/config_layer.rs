//! Configuration Layer Management
//!
//! Layers compiler options: parser defaults, then a configuration file, then
//! command-line flags, each overriding the one before.

use std::path::{Path, PathBuf};

use tracing::debug;

use crowdsift_rs::core::config::CompilerArgs;
use crowdsift_rs::CompilerOptions;

/// Configuration files picked up from the working directory when `--config`
/// is not given.
const IMPLICIT_CONFIG_FILES: [&str; 2] = [".crowdsift.yml", ".crowdsift.yaml"];

/// Convert CLI arguments to partial configuration overrides
pub trait FromCliArgs<T> {
    /// Create a partial configuration from CLI arguments
    fn from_cli_args(args: &T) -> Self;
}

impl FromCliArgs<CompilerArgs> for CompilerOptions {
    fn from_cli_args(args: &CompilerArgs) -> Self {
        CompilerOptions::from(args)
    }
}

fn implicit_config_file() -> Option<PathBuf> {
    IMPLICIT_CONFIG_FILES
        .iter()
        .map(PathBuf::from)
        .find(|candidate| candidate.is_file())
}

/// Load options from `config_path`, or from an implicit config file, or
/// fall back to defaults.
pub fn load_options(config_path: Option<&Path>) -> anyhow::Result<CompilerOptions> {
    let path = config_path.map(Path::to_path_buf).or_else(implicit_config_file);

    match path {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            Ok(CompilerOptions::from_yaml_file(&path)?)
        }
        None => Ok(CompilerOptions::default()),
    }
}

/// Build the effective options for a compile run: file layer first, CLI
/// flags on top.
pub fn build_options(config_path: Option<&Path>, args: &CompilerArgs) -> anyhow::Result<CompilerOptions> {
    let mut options = load_options(config_path)?;
    options.merge_with(CompilerOptions::from_cli_args(args));
    Ok(options)
}
