//! Configuration types for crowdsift-rs.
//!
//! Two layers live here:
//!
//! - [`CompilerOptions`] is the loosely-typed mapping an argument parser or a
//!   YAML file produces: every option is an optional string, exactly as typed
//!   on the command line.
//! - [`CompilerConfig`] is the validated, immutable configuration a results
//!   compiler owns. It is built once through [`CompilerConfig::from_options`]
//!   and never changes afterwards.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::errors::{CrowdsiftError, Result};

mod args;
mod validation;

pub use args::{setup_args, CompilerArgs};
pub use validation::{require_catch_all_bucket, split_comma_list};

/// Label of the mandatory catch-all bucket meaning "no problem annotated".
pub const CATCH_ALL_BUCKET: &str = "none_all_good";

/// Bucket vocabulary used when `--problem-buckets` is not given.
pub const DEFAULT_PROBLEM_BUCKETS: &str = "bucket_0,bucket_1,bucket_2,bucket_3,bucket_4,none_all_good";

/// Raw compiler options as produced by the argument parser or a config file.
///
/// List-valued options stay comma-separated strings here; splitting and
/// validation happen in [`CompilerConfig::from_options`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerOptions {
    /// Name of the task whose units should be retrieved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_name: Option<String>,

    /// Comma-separated list of result folders
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results_folders: Option<String>,

    /// Folder to save output files to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_folder: Option<String>,

    /// Comma-separated list of buckets used for annotation
    pub problem_buckets: Option<String>,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            task_name: None,
            results_folders: None,
            output_folder: None,
            problem_buckets: Some(DEFAULT_PROBLEM_BUCKETS.to_string()),
        }
    }
}

impl CompilerOptions {
    /// Build options from `key -> value` pairs, the way a generic option
    /// mapping would hand them over. Unknown keys are ignored and keys that
    /// are absent stay unset, including `problem_buckets`.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut options = Self {
            problem_buckets: None,
            ..Self::default()
        };

        for (key, value) in pairs {
            match key.as_ref() {
                "task_name" => options.task_name = Some(value.into()),
                "results_folders" => options.results_folders = Some(value.into()),
                "output_folder" => options.output_folder = Some(value.into()),
                "problem_buckets" => options.problem_buckets = Some(value.into()),
                other => debug!("Ignoring unknown compiler option '{}'", other),
            }
        }

        options
    }

    /// Load options from a YAML file. Fields missing from the file take
    /// their parser defaults.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CrowdsiftError::io(format!("Failed to read config file {}", path.display()), e)
        })?;
        let options: Self = serde_yaml::from_str(&content)?;
        Ok(options)
    }

    /// Serialize options to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Overlay `other` on top of `self`; every option set in `other` wins.
    pub fn merge_with(&mut self, other: CompilerOptions) {
        if other.task_name.is_some() {
            self.task_name = other.task_name;
        }
        if other.results_folders.is_some() {
            self.results_folders = other.results_folders;
        }
        if other.output_folder.is_some() {
            self.output_folder = other.output_folder;
        }
        if other.problem_buckets.is_some() {
            self.problem_buckets = other.problem_buckets;
        }
    }
}

/// Validated configuration shared by every results compiler.
///
/// Fields are private so the configuration stays immutable for the lifetime
/// of the compiler that owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerConfig {
    task_name: Option<String>,
    results_folders: Option<Vec<PathBuf>>,
    output_folder: Option<PathBuf>,
    problem_buckets: Vec<String>,
}

impl CompilerConfig {
    /// Build and validate a configuration from raw options.
    ///
    /// `results_folders` is split on commas when present and left unset
    /// otherwise, so "not provided" stays distinct from "provided but empty".
    /// `problem_buckets` is required and must contain [`CATCH_ALL_BUCKET`].
    pub fn from_options(options: &CompilerOptions) -> Result<Self> {
        let results_folders = options
            .results_folders
            .as_deref()
            .map(|raw| split_comma_list(raw).into_iter().map(PathBuf::from).collect());

        let output_folder = options.output_folder.as_ref().map(PathBuf::from);

        let raw_buckets = options.problem_buckets.as_deref().ok_or_else(|| {
            CrowdsiftError::config_field("problem_buckets option is required", "problem_buckets")
        })?;
        let problem_buckets = split_comma_list(raw_buckets);
        require_catch_all_bucket(&problem_buckets)?;

        debug!(
            "Compiler configuration validated: {} bucket(s), {} result folder(s)",
            problem_buckets.len(),
            results_folders.as_ref().map_or(0, Vec::len)
        );

        Ok(Self {
            task_name: options.task_name.clone(),
            results_folders,
            output_folder,
            problem_buckets,
        })
    }

    /// Task name carried from the options, if any.
    pub fn task_name(&self) -> Option<&str> {
        self.task_name.as_deref()
    }

    /// Task name, failing with a configuration error when it was not given.
    pub fn require_task_name(&self) -> Result<&str> {
        self.task_name().ok_or_else(|| {
            CrowdsiftError::config_field("--task-name is required for unit retrieval", "task_name")
        })
    }

    /// Result folders, or `None` when the option was not provided.
    pub fn results_folders(&self) -> Option<&[PathBuf]> {
        self.results_folders.as_deref()
    }

    /// Output folder, if one was configured.
    pub fn output_folder(&self) -> Option<&Path> {
        self.output_folder.as_deref()
    }

    /// Output folder, failing with a configuration error when it was not given.
    pub fn require_output_folder(&self) -> Result<&Path> {
        self.output_folder().ok_or_else(|| {
            CrowdsiftError::config_field("--output-folder is required to save results", "output_folder")
        })
    }

    /// Problem bucket labels in the order they were configured.
    pub fn problem_buckets(&self) -> &[String] {
        &self.problem_buckets
    }

    /// Whether `label` is one of the configured buckets.
    pub fn has_bucket(&self, label: &str) -> bool {
        self.problem_buckets.iter().any(|bucket| bucket == label)
    }
}

#[cfg(test)]
mod tests;
