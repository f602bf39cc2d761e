//! CLI Module Organization
//!
//! - args: CLI argument structures
//! - commands: command execution
//! - config_layer: configuration file discovery and merging
//! - output: console tables and status lines

pub mod args;
pub mod commands;
pub mod config_layer;
pub mod output;

// Re-export commonly used items for convenience
pub use args::*;
pub use commands::*;
