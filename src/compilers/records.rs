//! On-disk format of saved turn-annotation conversations.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;
use walkdir::WalkDir;

use crate::core::errors::{CrowdsiftError, Result};

/// One annotated conversation saved by a crowdsourcing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationRecord {
    /// Conversation identifier
    pub conversation_id: String,
    /// Work unit that produced the conversation
    #[serde(default)]
    pub unit_id: Option<String>,
    /// Worker who annotated it
    #[serde(default)]
    pub worker_id: Option<String>,
    /// Turns in speaking order
    #[serde(default)]
    pub dialog: Vec<DialogTurn>,
}

/// A single utterance, optionally annotated with problem buckets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogTurn {
    /// Speaker index within the conversation
    pub agent_idx: i64,
    /// Utterance text
    #[serde(default)]
    pub text: String,
    /// Bucket selections, present only on annotated turns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problem_data: Option<IndexMap<String, bool>>,
}

impl ConversationRecord {
    /// Read and parse a record file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CrowdsiftError::io(format!("Failed to read results file {}", path.display()), e)
        })?;
        serde_json::from_str(&content).map_err(|e| {
            CrowdsiftError::parse_in_file(
                format!("Malformed results file: {e}"),
                path.display().to_string(),
            )
        })
    }
}

/// Every `*.json` file under `folder`, recursively, in file-name order.
pub fn discover_result_files(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.is_dir() {
        return Err(CrowdsiftError::io(
            format!("Results folder {} does not exist", folder.display()),
            std::io::Error::new(std::io::ErrorKind::NotFound, "results folder not found"),
        ));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(folder).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            CrowdsiftError::io(
                format!("Failed to walk results folder {}", folder.display()),
                e.into(),
            )
        })?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path.to_path_buf());
        }
    }

    debug!("Found {} result file(s) in {}", files.len(), folder.display());
    Ok(files)
}
