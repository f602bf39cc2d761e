//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use crowdsift_rs::LocalUnitDatabase;
use tempfile::TempDir;

/// Root of the checked-in turn-annotation result folders.
pub fn fixture_results_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("turn_annotations")
}

/// Comma-separated list of both fixture runs, `run_1` first.
pub fn fixture_results_folders() -> String {
    let root = fixture_results_root();
    format!(
        "{},{}",
        root.join("run_1").display(),
        root.join("run_2").display()
    )
}

/// Task database populated from `tests/fixtures/task_db.sql`.
pub fn seeded_task_database() -> (TempDir, LocalUnitDatabase) {
    let dir = tempfile::tempdir().expect("temp dir");
    let database = LocalUnitDatabase::new(dir.path().join("database.db"));
    database.initialize_schema().expect("schema");

    let seed = std::fs::read_to_string(
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join("task_db.sql"),
    )
    .expect("seed file");
    let conn = rusqlite::Connection::open(database.path()).expect("open database");
    conn.execute_batch(&seed).expect("seed database");

    (dir, database)
}
