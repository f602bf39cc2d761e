//! The contract every results compiler satisfies.
//!
//! A compiler owns a validated [`CompilerConfig`] and supplies one
//! aggregation strategy, [`ResultsCompiler::compile_results`]. Unit
//! retrieval and configuration access are shared through provided methods.
//!
//! The contract is a trait, so it cannot be constructed on its own:
//!
//! ```rust,compile_fail
//! use crowdsift_rs::api::compiler::ResultsCompiler;
//!
//! let compiler = ResultsCompiler {};
//! ```

use std::path::{Path, PathBuf};

use tracing::info;

use crate::api::table::ResultsTable;
use crate::core::config::CompilerConfig;
use crate::core::errors::Result;
use crate::datastore::{UnitStore, WorkUnit};

/// Aggregation strategy turning raw annotation results into a table.
pub trait ResultsCompiler {
    /// Validated configuration this compiler was built with.
    fn config(&self) -> &CompilerConfig;

    /// Produce the final results table.
    ///
    /// May read every configured results folder; callers should treat it as
    /// expensive and must not assume repeated calls return the same table
    /// unless the implementation says so.
    fn compile_results(&self) -> Result<ResultsTable>;

    /// Fetch the work units registered for `task_name` from `store`.
    ///
    /// This is a pass-through: the store's result, including its own error
    /// type, is returned unchanged.
    fn get_task_units<S>(&self, store: &S, task_name: &str) -> std::result::Result<Vec<WorkUnit>, S::Error>
    where
        S: UnitStore + ?Sized,
        Self: Sized,
    {
        let units = store.units_for_task(task_name)?;
        info!("Retrieved {} unit(s) for task '{}'", units.len(), task_name);
        Ok(units)
    }

    /// Configured result folders, `None` when none were given.
    fn results_folders(&self) -> Option<&[PathBuf]> {
        self.config().results_folders()
    }

    /// Configured output folder, if any.
    fn output_folder(&self) -> Option<&Path> {
        self.config().output_folder()
    }

    /// Configured problem buckets, in order.
    fn problem_buckets(&self) -> &[String] {
        self.config().problem_buckets()
    }
}
