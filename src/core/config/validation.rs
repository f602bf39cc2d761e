//! Validation helpers for compiler configuration.

use crate::core::config::CATCH_ALL_BUCKET;
use crate::core::errors::{CrowdsiftError, Result};

/// Split a comma-separated option value into its parts.
///
/// The split is exact: no trimming and no dropping of empty segments, so
/// `"a,,b"` yields three entries.
pub fn split_comma_list(raw: &str) -> Vec<String> {
    raw.split(',').map(str::to_string).collect()
}

/// Fail unless the bucket list contains the catch-all bucket.
///
/// Aggregation assigns the catch-all whenever no specific bucket applies,
/// so a vocabulary without it cannot be compiled.
pub fn require_catch_all_bucket(buckets: &[String]) -> Result<()> {
    if buckets.iter().any(|bucket| bucket == CATCH_ALL_BUCKET) {
        return Ok(());
    }
    Err(CrowdsiftError::config_field(
        format!("There must be a \"{CATCH_ALL_BUCKET}\" category in problem_buckets"),
        "problem_buckets",
    ))
}
