#![allow(unused)]
//! End-to-end run harness: hit source → extraction → CSV on disk.
//!
//! # What this covers
//!
//! - **Search-response files**: a saved `hits.hits` document is extracted
//!   into one row per hit, with unknown cells left empty.
//! - **NDJSON fallback**: one hit per line, bad lines skipped.
//! - **In-memory responses** via `ResponseSource`.
//! - **Worker fan-out**: a multi-worker run writes exactly the same table as
//!   a single-worker run.
//! - **Failures**: a missing or malformed input aborts the run and leaves no
//!   output file behind.
//!
//! # What this does NOT cover
//!
//! - CLI argument parsing and tracing setup in `main.rs`
//! - Talking to a live search backend
//!
//! # Running
//!
//! ```sh
//! cargo test --test run_harness
//! ```

mod common;
use common::*;

use logsift::{run, RunError};
use logsift_core::config::Config;
use logsift_feeds::{FileSource, ResponseSource, SourceError};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::path::Path;

fn config_for(output: &Path, workers: usize) -> Config {
    let mut config = Config::defaults();
    config.output.path = output.to_path_buf();
    config.run.workers = workers;
    config
}

// ---------------------------------------------------------------------------
// Search-response files
// ---------------------------------------------------------------------------

#[tokio::test]
async fn two_hit_response_file() {
    let dir = tempfile::tempdir().unwrap();
    let response = search_response(&[
        HitBuilder::new("1")
            .message_json(json!({"incidentid": "1", "timestamp": "2024-01-01T00:00:00"}))
            .build(),
        HitBuilder::new("2").message("foo bar baz").build(),
    ]);
    let input = write_input(dir.path(), "hits.json", &response.to_string());
    let output = dir.path().join("out.csv");

    let summary = run(&FileSource::new(&input), &config_for(&output, 1)).await.unwrap();
    assert_eq!(summary.hits, 2);
    assert_eq!(summary.columns, 3);
    assert_eq!(summary.output, output);

    let (header, rows) = read_csv(&std::fs::read_to_string(&output).unwrap());
    assert_eq!(header, ["incidentid", "timestamp", "_id"]);
    assert_eq!(rows, [["1", "2024-01-01T00:00:00", "1"], ["", "", "2"]]);
}

#[tokio::test]
async fn empty_response_writes_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "hits.json", &search_response(&[]).to_string());
    let output = dir.path().join("out.csv");

    let summary = run(&FileSource::new(&input), &config_for(&output, 1)).await.unwrap();
    assert_eq!(summary.hits, 0);
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "");
}

// ---------------------------------------------------------------------------
// NDJSON fallback
// ---------------------------------------------------------------------------

#[tokio::test]
async fn ndjson_input_skips_bad_lines() {
    let dir = tempfile::tempdir().unwrap();
    let lines = [
        HitBuilder::new("a").message("{'IncidentId': '10'}").build().to_string(),
        "this line is not json".to_string(),
        String::new(),
        HitBuilder::new("b").message("{Channel=Security, EventID=4625}").build().to_string(),
    ];
    let input = write_input(dir.path(), "hits.ndjson", &lines.join("\n"));
    let output = dir.path().join("out.csv");

    let summary = run(&FileSource::new(&input), &config_for(&output, 1)).await.unwrap();
    assert_eq!(summary.hits, 2);

    let (header, rows) = read_csv(&std::fs::read_to_string(&output).unwrap());
    assert_eq!(header, ["incidentid", "eventid", "channel", "_id"]);
    assert_eq!(rows, [["10", "", "", "a"], ["", "4625", "Security", "b"]]);
}

// ---------------------------------------------------------------------------
// In-memory responses and worker fan-out
// ---------------------------------------------------------------------------

#[tokio::test]
async fn response_source_matches_file_source() {
    let dir = tempfile::tempdir().unwrap();
    let response = search_response(&synthetic_hits(40));
    let input = write_input(dir.path(), "hits.json", &response.to_string());
    let from_file = dir.path().join("file.csv");
    let from_memory = dir.path().join("memory.csv");

    run(&FileSource::new(&input), &config_for(&from_file, 1)).await.unwrap();
    run(&ResponseSource::new(response), &config_for(&from_memory, 1)).await.unwrap();

    assert_eq!(
        std::fs::read_to_string(&from_file).unwrap(),
        std::fs::read_to_string(&from_memory).unwrap()
    );
}

#[tokio::test]
async fn parallel_run_writes_same_table() {
    let dir = tempfile::tempdir().unwrap();
    let response = search_response(&synthetic_hits(2_000));
    let sequential = dir.path().join("seq.csv");
    let parallel = dir.path().join("par.csv");

    let source = ResponseSource::new(response);
    run(&source, &config_for(&sequential, 1)).await.unwrap();
    let summary = run(&source, &config_for(&parallel, 8)).await.unwrap();
    assert_eq!(summary.hits, 2_000);

    let seq = std::fs::read_to_string(&sequential).unwrap();
    let par = std::fs::read_to_string(&parallel).unwrap();
    assert_eq!(seq.lines().count(), 2_001);
    assert_eq!(seq, par);
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_input_aborts_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.csv");
    let err = run(&FileSource::new(dir.path().join("nope.json")), &config_for(&output, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, RunError::Source(SourceError::Unavailable { .. })));
    assert!(!output.exists());
}

#[tokio::test]
async fn malformed_input_aborts_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "hits.json", r#"{"error": {"type": "search_phase_execution_exception"}}"#);
    let output = dir.path().join("out.csv");
    let err = run(&FileSource::new(&input), &config_for(&output, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, RunError::Source(SourceError::Malformed(_))));
    assert!(!output.exists());
}

#[tokio::test]
async fn unwritable_output_is_an_export_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("no-such-dir").join("out.csv");
    let source = ResponseSource::new(search_response(&synthetic_hits(3)));
    let err = run(&source, &config_for(&output, 1)).await.unwrap_err();
    assert!(matches!(err, RunError::Export(_)));
    assert!(!output.exists());
}
