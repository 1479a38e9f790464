//! End-to-end tally scenarios through the library API

use anomaly_tally::{Config, ErrorPolicy, Pipeline, WindowSet};
use std::fs;
use std::path::Path;

fn write_source(root: &Path, key: &str, body: &str) {
    let (dir, base) = key.split_once('/').unwrap();
    fs::create_dir_all(root.join(dir)).unwrap();
    fs::write(root.join(dir).join(format!("inscriptive_{base}.diagnostics")), body).unwrap();
}

fn excluded(source_key: &str) -> bool {
    Config::default().is_excluded(source_key)
}

fn pipeline(root: &Path) -> Pipeline {
    Pipeline::new(Config {
        results_root: root.to_path_buf(),
        error_policy: ErrorPolicy::FailFast,
        ..Config::default()
    })
}

#[test]
fn test_source_without_windows_counts_only_false_positives() {
    let temp = tempfile::tempdir().unwrap();
    write_source(
        temp.path(),
        "quiet/stream",
        r#"{"data": [
            {"timestamp": "2020-01-01 00:30:00", "diagnostics": {"f1": {}}},
            {"timestamp": "2020-01-02 00:30:00", "diagnostics": {"f1": {}, "f2": null}}
        ]}"#,
    );
    let windows = WindowSet::from_json_str(r#"{"quiet/stream": []}"#, excluded).unwrap();

    let outcome = pipeline(temp.path()).run_with_windows(&windows).unwrap();
    assert!(outcome.tally.true_positives().is_empty());
    assert_eq!(outcome.tally.fp("f1"), 2);
    assert_eq!(outcome.tally.fp("f2"), 1);
    assert_eq!(outcome.stats.false_positive_records, 2);
}

#[test]
fn test_windows_only_apply_to_their_own_source() {
    let temp = tempfile::tempdir().unwrap();
    let record = r#"{"data": [{"timestamp": "2020-01-01 00:30:00", "diagnostics": {"f1": {}}}]}"#;
    write_source(temp.path(), "a/labeled", record);
    write_source(temp.path(), "b/unlabeled", record);
    let windows = WindowSet::from_json_str(
        r#"{
            "a/labeled": [["2020-01-01 00:00:00.000000", "2020-01-01 01:00:00.000000"]],
            "b/unlabeled": [["2020-01-05 00:00:00.000000", "2020-01-05 01:00:00.000000"]]
        }"#,
        excluded,
    )
    .unwrap();

    let outcome = pipeline(temp.path()).run_with_windows(&windows).unwrap();
    assert_eq!(outcome.tally.tp("f1"), 1);
    assert_eq!(outcome.tally.fp("f1"), 1);
    assert_eq!(outcome.stats.sources_processed, 2);
}

#[test]
fn test_any_overlapping_window_counts_once() {
    let temp = tempfile::tempdir().unwrap();
    write_source(
        temp.path(),
        "a/overlap",
        r#"{"data": [{"timestamp": "2020-01-01 00:30:00", "diagnostics": {"f1": {}}}]}"#,
    );
    let windows = WindowSet::from_json_str(
        r#"{"a/overlap": [
            ["2020-01-01 00:00:00.000000", "2020-01-01 01:00:00.000000"],
            ["2020-01-01 00:15:00.000000", "2020-01-01 00:45:00.000000"]
        ]}"#,
        excluded,
    )
    .unwrap();

    let outcome = pipeline(temp.path()).run_with_windows(&windows).unwrap();
    assert_eq!(outcome.tally.tp("f1"), 1);
}
