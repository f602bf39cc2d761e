use super::*;
use proptest::prelude::*;

fn options_with_buckets(buckets: &str) -> CompilerOptions {
    CompilerOptions::from_pairs([("problem_buckets", buckets)])
}

fn bucket_label() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,11}".prop_filter("catch-all excluded", |label| label != CATCH_ALL_BUCKET)
}

#[test]
fn default_options_validate_successfully() {
    let config = CompilerConfig::from_options(&CompilerOptions::default()).expect("default");
    assert_eq!(
        config.problem_buckets(),
        ["bucket_0", "bucket_1", "bucket_2", "bucket_3", "bucket_4", "none_all_good"]
    );
    assert!(config.results_folders().is_none());
    assert!(config.output_folder().is_none());
}

#[test]
fn catch_all_alone_is_accepted() {
    let config = CompilerConfig::from_options(&options_with_buckets("none_all_good")).unwrap();
    assert_eq!(config.problem_buckets(), ["none_all_good"]);
}

#[test]
fn buckets_without_catch_all_are_rejected() {
    let err = CompilerConfig::from_options(&options_with_buckets("bucket_0,bucket_1")).unwrap_err();
    assert!(err.is_config());
    assert_eq!(err.field(), Some("problem_buckets"));
}

#[test]
fn missing_problem_buckets_is_a_config_error() {
    let options = CompilerOptions::from_pairs([("results_folders", "a")]);
    let err = CompilerConfig::from_options(&options).unwrap_err();
    assert!(err.is_config());
    assert_eq!(err.field(), Some("problem_buckets"));
}

#[test]
fn results_folders_are_split_in_order() {
    let options = CompilerOptions::from_pairs([
        ("results_folders", "a,b,c"),
        ("problem_buckets", "none_all_good"),
    ]);
    let config = CompilerConfig::from_options(&options).unwrap();
    let folders: Vec<PathBuf> = ["a", "b", "c"].iter().map(PathBuf::from).collect();
    assert_eq!(config.results_folders(), Some(folders.as_slice()));
}

#[test]
fn absent_results_folders_stay_unset() {
    let config = CompilerConfig::from_options(&options_with_buckets("none_all_good")).unwrap();
    assert_eq!(config.results_folders(), None);
}

#[test]
fn empty_results_folders_differ_from_unset() {
    let options = CompilerOptions::from_pairs([
        ("results_folders", ""),
        ("problem_buckets", "none_all_good"),
    ]);
    let config = CompilerConfig::from_options(&options).unwrap();
    assert_eq!(config.results_folders(), Some([PathBuf::from("")].as_slice()));
}

#[test]
fn output_folder_and_task_name_are_copied_through() {
    let options = CompilerOptions::from_pairs([
        ("task_name", "turn_annotations_static"),
        ("output_folder", "/tmp/out"),
        ("problem_buckets", "none_all_good"),
    ]);
    let config = CompilerConfig::from_options(&options).unwrap();
    assert_eq!(config.task_name(), Some("turn_annotations_static"));
    assert_eq!(config.output_folder(), Some(Path::new("/tmp/out")));
    assert_eq!(config.require_output_folder().unwrap(), Path::new("/tmp/out"));
}

#[test]
fn required_accessors_fail_lazily_when_unset() {
    let config = CompilerConfig::from_options(&options_with_buckets("none_all_good")).unwrap();
    assert_eq!(config.require_task_name().unwrap_err().field(), Some("task_name"));
    assert_eq!(
        config.require_output_folder().unwrap_err().field(),
        Some("output_folder")
    );
}

#[test]
fn unknown_pairs_are_ignored() {
    let options = CompilerOptions::from_pairs([("verbose", "true"), ("problem_buckets", "x")]);
    assert_eq!(options.problem_buckets.as_deref(), Some("x"));
    assert!(options.task_name.is_none());
}

#[test]
fn merge_prefers_the_overlay() {
    let mut base = CompilerOptions {
        task_name: Some("from_file".to_string()),
        output_folder: Some("file_out".to_string()),
        ..CompilerOptions::default()
    };
    base.merge_with(CompilerOptions {
        task_name: Some("from_cli".to_string()),
        results_folders: None,
        output_folder: None,
        problem_buckets: None,
    });
    assert_eq!(base.task_name.as_deref(), Some("from_cli"));
    assert_eq!(base.output_folder.as_deref(), Some("file_out"));
    assert_eq!(base.problem_buckets.as_deref(), Some(DEFAULT_PROBLEM_BUCKETS));
}

#[test]
fn yaml_round_trip_keeps_defaults_for_missing_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("crowdsift.yml");
    std::fs::write(&path, "results_folders: runs/a,runs/b\n").unwrap();

    let options = CompilerOptions::from_yaml_file(&path).unwrap();
    assert_eq!(options.results_folders.as_deref(), Some("runs/a,runs/b"));
    assert_eq!(options.problem_buckets.as_deref(), Some(DEFAULT_PROBLEM_BUCKETS));

    let yaml = options.to_yaml().unwrap();
    assert!(yaml.contains("problem_buckets"));
    assert!(!yaml.contains("task_name"));
}

#[test]
fn missing_yaml_file_is_an_io_error() {
    let err = CompilerOptions::from_yaml_file("/nonexistent/crowdsift.yml").unwrap_err();
    assert!(matches!(err, CrowdsiftError::Io { .. }));
}

#[test]
fn setup_args_applies_bucket_default() {
    let matches = setup_args()
        .try_get_matches_from(["compile-results", "--task-name", "demo"])
        .unwrap();
    let options = CompilerOptions::from(&matches);
    assert_eq!(options.task_name.as_deref(), Some("demo"));
    assert_eq!(options.results_folders, None);
    assert_eq!(options.problem_buckets.as_deref(), Some(DEFAULT_PROBLEM_BUCKETS));
}

#[test]
fn setup_args_reads_every_option() {
    let matches = setup_args()
        .try_get_matches_from([
            "compile-results",
            "--results-folders",
            "a,b",
            "--output-folder",
            "out",
            "--problem-buckets",
            "rude,none_all_good",
        ])
        .unwrap();
    let config = CompilerConfig::from_options(&CompilerOptions::from(&matches)).unwrap();
    assert_eq!(config.problem_buckets(), ["rude", "none_all_good"]);
    assert_eq!(config.output_folder(), Some(Path::new("out")));
    assert_eq!(config.results_folders().map(<[PathBuf]>::len), Some(2));
}

#[test]
fn setup_args_is_built_from_compiler_args() {
    let command = setup_args();
    let ids: Vec<&str> = command.get_arguments().map(|arg| arg.get_id().as_str()).collect();
    assert_eq!(ids, ["task_name", "results_folders", "output_folder", "problem_buckets"]);

    let buckets = command
        .get_arguments()
        .find(|arg| arg.get_id() == "problem_buckets")
        .unwrap();
    assert_eq!(buckets.get_long(), Some("problem-buckets"));
    assert_eq!(buckets.get_default_values().len(), 1);
    assert_eq!(buckets.get_default_values()[0], *DEFAULT_PROBLEM_BUCKETS);
}

#[test]
fn flattened_compiler_args_leave_buckets_unset() {
    use clap::{Args, FromArgMatches};

    let matches = CompilerArgs::augment_args(clap::Command::new("compile"))
        .try_get_matches_from(["compile", "--output-folder", "out"])
        .unwrap();
    let args = CompilerArgs::from_arg_matches(&matches).unwrap();
    let options = CompilerOptions::from(&args);
    assert_eq!(options.output_folder.as_deref(), Some("out"));
    assert_eq!(options.problem_buckets, None);
}

proptest! {
    #[test]
    fn buckets_missing_catch_all_always_fail(labels in prop::collection::vec(bucket_label(), 1..8)) {
        let result = CompilerConfig::from_options(&options_with_buckets(&labels.join(",")));
        prop_assert!(matches!(result, Err(ref e) if e.is_config()));
    }

    #[test]
    fn buckets_with_catch_all_keep_exact_order(
        labels in prop::collection::vec(bucket_label(), 0..8),
        position in 0usize..8,
    ) {
        let mut labels = labels;
        let index = position.min(labels.len());
        labels.insert(index, CATCH_ALL_BUCKET.to_string());

        let config = CompilerConfig::from_options(&options_with_buckets(&labels.join(","))).unwrap();
        prop_assert_eq!(config.problem_buckets(), labels.as_slice());
    }
}
