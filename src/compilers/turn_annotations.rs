//! Compiler for per-turn problem annotations.
//!
//! Each saved conversation contributes one row per annotated turn. A row
//! carries the conversation metadata plus one indicator column for every
//! configured problem bucket; when a worker selected none of them, the
//! catch-all bucket is set instead.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::api::compiler::ResultsCompiler;
use crate::api::table::{Cell, ResultsTable};
use crate::compilers::records::{discover_result_files, ConversationRecord};
use crate::core::config::{CompilerConfig, CATCH_ALL_BUCKET};
use crate::core::errors::{CrowdsiftError, Result};
use crate::datastore::WorkUnit;

/// Metadata columns written before the bucket indicators.
pub const METADATA_COLUMNS: [&str; 5] = ["conversation_id", "worker_id", "turn_idx", "agent_idx", "text"];

/// Builds a turn-level table from conversation records in the result folders.
#[derive(Debug, Clone)]
pub struct TurnAnnotationsCompiler {
    config: CompilerConfig,
    unit_filter: Option<HashSet<String>>,
}

impl TurnAnnotationsCompiler {
    /// Compiler over every record found in the configured folders.
    pub fn new(config: CompilerConfig) -> Self {
        Self {
            config,
            unit_filter: None,
        }
    }

    /// Restrict compilation to records produced by `units`.
    ///
    /// Records without a `unit_id`, or whose unit is not listed, are skipped.
    #[must_use]
    pub fn with_units(mut self, units: &[WorkUnit]) -> Self {
        self.unit_filter = Some(units.iter().map(|unit| unit.unit_id.clone()).collect());
        self
    }

    fn columns(&self) -> Vec<String> {
        METADATA_COLUMNS
            .iter()
            .map(|column| (*column).to_string())
            .chain(self.config.problem_buckets().iter().cloned())
            .collect()
    }

    /// Bucket labels become column names, so they must not repeat or shadow
    /// a metadata column.
    fn validate_bucket_columns(&self) -> Result<()> {
        let buckets = self.config.problem_buckets();
        for (index, bucket) in buckets.iter().enumerate() {
            if METADATA_COLUMNS.contains(&bucket.as_str()) {
                return Err(CrowdsiftError::Validation {
                    message: format!("Problem bucket '{bucket}' clashes with a metadata column"),
                    field: Some("problem_buckets".to_string()),
                });
            }
            if buckets[..index].contains(bucket) {
                return Err(CrowdsiftError::Validation {
                    message: format!("Problem bucket '{bucket}' is listed more than once"),
                    field: Some("problem_buckets".to_string()),
                });
            }
        }
        Ok(())
    }

    fn accepts(&self, record: &ConversationRecord) -> bool {
        match (&self.unit_filter, &record.unit_id) {
            (None, _) => true,
            (Some(units), Some(unit_id)) => units.contains(unit_id),
            (Some(_), None) => false,
        }
    }

    fn append_record(
        &self,
        table: &mut ResultsTable,
        record: &ConversationRecord,
        unknown_labels: &mut HashSet<String>,
    ) -> Result<usize> {
        let buckets = self.config.problem_buckets();
        let mut appended = 0;

        for (turn_idx, turn) in record.dialog.iter().enumerate() {
            let Some(problem_data) = &turn.problem_data else {
                continue;
            };

            for label in problem_data.keys() {
                if !self.config.has_bucket(label) && unknown_labels.insert(label.clone()) {
                    warn!(
                        "Ignoring bucket '{}' found in conversation {}: not a configured problem bucket",
                        label, record.conversation_id
                    );
                }
            }

            let mut selected: Vec<bool> = buckets
                .iter()
                .map(|bucket| problem_data.get(bucket).copied().unwrap_or(false))
                .collect();
            if !selected.iter().any(|&flag| flag) {
                if let Some(index) = buckets.iter().position(|b| b == CATCH_ALL_BUCKET) {
                    selected[index] = true;
                }
            }

            let turn_idx = i64::try_from(turn_idx).map_err(|_| {
                CrowdsiftError::validation(format!(
                    "Conversation {} has too many turns",
                    record.conversation_id
                ))
            })?;

            let mut row = vec![
                Cell::from(record.conversation_id.clone()),
                Cell::from(record.worker_id.clone()),
                Cell::Integer(turn_idx),
                Cell::Integer(turn.agent_idx),
                Cell::from(turn.text.clone()),
            ];
            row.extend(selected.into_iter().map(Cell::Bool));
            table.push_row(row)?;
            appended += 1;
        }

        Ok(appended)
    }
}

impl ResultsCompiler for TurnAnnotationsCompiler {
    fn config(&self) -> &CompilerConfig {
        &self.config
    }

    fn compile_results(&self) -> Result<ResultsTable> {
        self.validate_bucket_columns()?;
        let folders = self.config.results_folders().ok_or_else(|| {
            CrowdsiftError::config_field(
                "--results-folders is required to compile turn annotations",
                "results_folders",
            )
        })?;

        let mut table = ResultsTable::try_new(self.columns())?;
        let mut unknown_labels = HashSet::new();
        let mut skipped = 0usize;

        for folder in folders {
            for path in discover_result_files(folder)? {
                let record = ConversationRecord::from_file(&path)?;
                if !self.accepts(&record) {
                    debug!(
                        "Skipping {}: unit {:?} not among the requested units",
                        path.display(),
                        record.unit_id
                    );
                    skipped += 1;
                    continue;
                }
                let rows = self.append_record(&mut table, &record, &mut unknown_labels)?;
                debug!("Compiled {} annotated turn(s) from {}", rows, path.display());
            }
        }

        info!(
            "Compiled {} annotated turn(s) from {} folder(s), {} record(s) skipped",
            table.num_rows(),
            folders.len(),
            skipped
        );
        Ok(table)
    }
}

#[cfg(test)]
#[path = "turn_annotations_tests.rs"]
mod tests;
