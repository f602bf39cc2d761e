//! End-to-end compilation of the fixture result folders.

mod common;

use common::{fixture_results_folders, fixture_results_root, seeded_task_database};
use crowdsift_rs::io::reports::{write_summary, write_table, ReportFormat, SUMMARY_FILE_NAME};
use crowdsift_rs::{
    Cell, CompilerConfig, CompilerOptions, CrowdsiftError, ResultsCompiler, TurnAnnotationsCompiler,
};

fn compiler_with(options: CompilerOptions) -> TurnAnnotationsCompiler {
    TurnAnnotationsCompiler::new(CompilerConfig::from_options(&options).unwrap())
}

fn fixture_compiler() -> TurnAnnotationsCompiler {
    compiler_with(CompilerOptions {
        results_folders: Some(fixture_results_folders()),
        ..CompilerOptions::default()
    })
}

#[test]
fn compiles_every_annotated_turn() {
    let table = fixture_compiler().compile_results().unwrap();
    assert_eq!(table.num_rows(), 5);

    let conversations: Vec<String> = table
        .column("conversation_id")
        .unwrap()
        .into_iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        conversations,
        ["conv_1001", "conv_1001", "conv_1002", "conv_1002", "conv_2001"]
    );
}

#[test]
fn bucket_counts_match_annotations() {
    let compiler = fixture_compiler();
    let table = compiler.compile_results().unwrap();
    let summary = table.bucket_summary(compiler.problem_buckets()).unwrap();

    let counts: Vec<(&str, usize)> = summary
        .iter()
        .map(|entry| (entry.bucket.as_str(), entry.count))
        .collect();
    assert_eq!(
        counts,
        [
            ("bucket_0", 1),
            ("bucket_1", 0),
            ("bucket_2", 1),
            ("bucket_3", 1),
            ("bucket_4", 1),
            ("none_all_good", 2),
        ]
    );
}

#[test]
fn empty_problem_data_counts_as_all_good() {
    let table = fixture_compiler().compile_results().unwrap();
    let none_all_good = table.column("none_all_good").unwrap();
    assert_eq!(none_all_good[3], &Cell::Bool(true));
    let text = table.column("text").unwrap();
    assert_eq!(text[3], &Cell::Text("Sorry. I like jazz, mostly.".to_string()));
}

#[test]
fn unit_filter_uses_datastore_units() {
    let (_dir, database) = seeded_task_database();
    let compiler = fixture_compiler();
    let units = compiler
        .get_task_units(&database, "turn_annotations_static")
        .unwrap();

    let table = compiler.with_units(&units).compile_results().unwrap();
    assert_eq!(table.num_rows(), 4);
    assert!(table
        .column("conversation_id")
        .unwrap()
        .iter()
        .all(|cell| **cell != Cell::Text("conv_2001".to_string())));
}

#[test]
fn single_run_folder() {
    let compiler = compiler_with(CompilerOptions {
        results_folders: Some(fixture_results_root().join("run_2").display().to_string()),
        problem_buckets: Some("bucket_4,none_all_good".to_string()),
        ..CompilerOptions::default()
    });
    let table = compiler.compile_results().unwrap();
    assert_eq!(table.num_rows(), 1);
    assert_eq!(table.rows()[0][5], Cell::Bool(true));
    assert_eq!(table.rows()[0][6], Cell::Bool(false));
}

#[test]
fn catch_all_is_mandatory() {
    let err = CompilerConfig::from_options(&CompilerOptions {
        results_folders: Some(fixture_results_folders()),
        problem_buckets: Some("bucket_0,bucket_1".to_string()),
        ..CompilerOptions::default()
    })
    .unwrap_err();
    assert!(matches!(err, CrowdsiftError::Config { .. }));
}

#[test]
fn compiled_table_round_trips_through_output_folder() {
    let out = tempfile::tempdir().unwrap();
    let compiler = fixture_compiler();
    let table = compiler.compile_results().unwrap();
    let summary = table.bucket_summary(compiler.problem_buckets()).unwrap();

    let csv_path = write_table(&table, out.path(), ReportFormat::Csv).unwrap();
    write_summary(&summary, table.num_rows(), out.path()).unwrap();

    let csv = std::fs::read_to_string(csv_path).unwrap();
    assert_eq!(csv.lines().count(), 6);
    assert!(csv.contains("\"That's none of your business, \"\"friend\"\".\""));
    assert!(out.path().join(SUMMARY_FILE_NAME).is_file());
}
