//! Writing compiled results tables to the output folder.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::table::{BucketSummary, ResultsTable};
use crate::core::errors::{CrowdsiftError, Result};

/// File name of the bucket summary written next to the results table.
pub const SUMMARY_FILE_NAME: &str = "bucket_summary.json";

/// Available output formats for the results table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    /// Comma-separated values with a header row
    #[default]
    Csv,
    /// JSON array of row objects
    Json,
}

impl ReportFormat {
    /// File name used for the results table in this format.
    pub fn file_name(self) -> &'static str {
        match self {
            ReportFormat::Csv => "results.csv",
            ReportFormat::Json => "results.json",
        }
    }
}

/// Bucket summary as persisted to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryReport {
    /// When the table was compiled
    pub compiled_at: DateTime<Utc>,
    /// Number of rows in the compiled table
    pub total_rows: usize,
    /// Per-bucket selection statistics
    pub buckets: Vec<BucketEntry>,
}

/// One bucket line of a [`SummaryReport`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketEntry {
    /// Bucket label
    pub bucket: String,
    /// Rows selecting the bucket
    pub count: usize,
    /// Share of rows selecting the bucket
    pub fraction: f64,
}

impl From<&BucketSummary> for BucketEntry {
    fn from(summary: &BucketSummary) -> Self {
        Self {
            bucket: summary.bucket.clone(),
            count: summary.count,
            fraction: summary.fraction,
        }
    }
}

fn ensure_folder(folder: &Path) -> Result<()> {
    fs::create_dir_all(folder).map_err(|e| {
        CrowdsiftError::io(format!("Failed to create output folder {}", folder.display()), e)
    })
}

/// Write `table` into `folder` and return the path of the written file.
pub fn write_table(table: &ResultsTable, folder: &Path, format: ReportFormat) -> Result<PathBuf> {
    ensure_folder(folder)?;

    let content = match format {
        ReportFormat::Csv => table.to_csv(),
        ReportFormat::Json => table.to_json()?,
    };
    let path = folder.join(format.file_name());
    fs::write(&path, content)
        .map_err(|e| CrowdsiftError::io(format!("Failed to write {}", path.display()), e))?;

    info!("Wrote {} row(s) to {}", table.num_rows(), path.display());
    Ok(path)
}

/// Write the bucket summary of a table into `folder`.
pub fn write_summary(summary: &[BucketSummary], total_rows: usize, folder: &Path) -> Result<PathBuf> {
    ensure_folder(folder)?;

    let report = SummaryReport {
        compiled_at: Utc::now(),
        total_rows,
        buckets: summary.iter().map(BucketEntry::from).collect(),
    };
    let path = folder.join(SUMMARY_FILE_NAME);
    fs::write(&path, serde_json::to_string_pretty(&report)?)
        .map_err(|e| CrowdsiftError::io(format!("Failed to write {}", path.display()), e))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::table::Cell;

    fn small_table() -> ResultsTable {
        let mut table = ResultsTable::new(vec!["text".to_string(), "none_all_good".to_string()]);
        table.push_row(vec![Cell::from("fine"), Cell::Bool(true)]).unwrap();
        table.push_row(vec![Cell::from("rude"), Cell::Bool(false)]).unwrap();
        table
    }

    #[test]
    fn csv_is_written_into_a_new_folder() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("nested").join("out");

        let path = write_table(&small_table(), &folder, ReportFormat::Csv).unwrap();
        assert_eq!(path, folder.join("results.csv"));
        let content = fs::read_to_string(path).unwrap();
        assert!(content.starts_with("text,none_all_good\n"));
        assert!(content.contains("rude,false"));
    }

    #[test]
    fn json_output_parses_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_table(&small_table(), dir.path(), ReportFormat::Json).unwrap();
        let rows: Vec<serde_json::Value> =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["text"], "fine");
    }

    #[test]
    fn summary_carries_timestamp_and_counts() {
        let dir = tempfile::tempdir().unwrap();
        let table = small_table();
        let summary = table.bucket_summary(&["none_all_good".to_string()]).unwrap();

        let path = write_summary(&summary, table.num_rows(), dir.path()).unwrap();
        let report: SummaryReport = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(report.total_rows, 2);
        assert_eq!(report.buckets[0].count, 1);
        assert!(report.compiled_at <= Utc::now());
    }
}
