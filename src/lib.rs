//! # Crowdsift-RS: Crowdsourced Annotation Results Compiler
//!
//! Compiles the raw output of crowdsourced turn-annotation tasks into a
//! tabular report. The library provides:
//!
//! - **Configuration**: a typed, validated [`CompilerConfig`] built from the
//!   loosely-typed option mapping produced by the argument parser
//! - **Compiler contract**: the [`ResultsCompiler`] trait every aggregation
//!   strategy implements, plus the bundled [`TurnAnnotationsCompiler`]
//! - **Datastore access**: the [`UnitStore`] seam and a local SQLite reader
//!   for the task database
//! - **Reports**: an in-memory [`ResultsTable`] with CSV/JSON exporters and
//!   helpers for writing it to an output folder
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                  CLI (crowdsift binary)                │
//! ├────────────────────────────────────────────────────────┤
//! │   Core        │   Compilers        │   I/O & Storage   │
//! │ • Config      │ • ResultsCompiler  │ • UnitStore       │
//! │ • Errors      │ • Turn annotations │ • Reports         │
//! │ • Arguments   │ • ResultsTable     │                   │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use crowdsift_rs::{CompilerConfig, CompilerOptions, ResultsCompiler, TurnAnnotationsCompiler};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let options = CompilerOptions {
//!         results_folders: Some("runs/2024-01,runs/2024-02".to_string()),
//!         ..CompilerOptions::default()
//!     };
//!     let config = CompilerConfig::from_options(&options)?;
//!     let compiler = TurnAnnotationsCompiler::new(config);
//!
//!     let table = compiler.compile_results()?;
//!     println!("{} annotated turns", table.num_rows());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Configuration and error handling
pub mod core {
    //! Configuration, argument parsing and error types.

    pub mod config;
    pub mod errors;
}

// Task datastore access
pub mod datastore;

// Compiler contract and results table
pub mod api {
    //! The results compiler contract and its output table.

    pub mod compiler;
    pub mod table;
}

// Concrete aggregation strategies
pub mod compilers {
    //! Bundled [`ResultsCompiler`](crate::api::compiler::ResultsCompiler) implementations.

    pub mod records;
    pub mod turn_annotations;
}

// Persisting compiled tables
pub mod io {
    //! Writing compiled results to the output folder.

    pub mod reports;
}

// Re-export primary types for convenience
pub use api::compiler::ResultsCompiler;
pub use api::table::{BucketSummary, Cell, ResultsTable};
pub use compilers::turn_annotations::TurnAnnotationsCompiler;
pub use core::config::{
    CompilerArgs, CompilerConfig, CompilerOptions, CATCH_ALL_BUCKET, DEFAULT_PROBLEM_BUCKETS,
};
pub use core::errors::{CrowdsiftError, Result};
pub use datastore::{DatastoreError, LocalUnitDatabase, UnitStatus, UnitStore, WorkUnit};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
