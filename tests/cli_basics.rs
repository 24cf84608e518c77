// SPDX-License-Identifier: MIT OR Apache-2.0

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_dummy_embedding_config(root: &Path) {
    fs::write(
        root.join(".vidgreprc.toml"),
        r#"
[embedding]
provider = "dummy"
dimension = 8
"#,
    )
    .unwrap();
}

fn write_transcript(root: &Path, name: &str, json: &str) {
    fs::write(root.join(name), json).unwrap();
}

fn vidgrep() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("vidgrep"))
}

fn fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_dummy_embedding_config(dir.path());
    write_transcript(
        dir.path(),
        "video_001.json",
        r#"[
            {"start": 0.0, "end": 20.0, "text": "machine learning basics"},
            {"start": 20.0, "end": 45.0, "text": "linear regression"},
            {"start": 45.0, "end": 125.0, "text": "classification problems"}
        ]"#,
    );
    write_transcript(
        dir.path(),
        "video_002.json",
        r#"{"segments": [
            {"start": 0.0, "end": 25.0, "text": "neural networks"}
        ]}"#,
    );
    dir
}

#[test]
fn list_shows_all_videos() {
    let dir = fixture();
    vidgrep()
        .arg("list")
        .arg("--path")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("video_001"))
        .stdout(predicate::str::contains("video_002"));
}

#[test]
fn list_json_is_parseable() {
    let dir = fixture();
    let output = vidgrep()
        .arg("list")
        .arg("--path")
        .arg(dir.path())
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let lines: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let lines = lines.as_array().unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["video_id"], "video_001");
}

#[test]
fn video_shows_summary_and_chunks() {
    let dir = fixture();
    vidgrep()
        .arg("video")
        .arg("video_001")
        .arg("--path")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("video_001"))
        // 3 segments, 30s budget, last segment ends at 125s -> 02:05.
        .stdout(predicate::str::contains("02:05"))
        .stdout(predicate::str::contains("machine learning basics"));
}

#[test]
fn unknown_video_is_a_message_not_a_failure() {
    let dir = fixture();
    vidgrep()
        .arg("video")
        .arg("no_such_video")
        .arg("--path")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("not found"));
}

#[test]
fn search_returns_results_with_dummy_provider() {
    let dir = fixture();
    let output = vidgrep()
        .arg("search")
        .arg("anything at all")
        .arg("--path")
        .arg(dir.path())
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    // Dummy vectors are all-zero, so every score is 0.0, but the result
    // shape and fields must still be present.
    let results: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let results = results.as_array().unwrap();
    assert!(!results.is_empty());
    assert!(results[0]["video_id"].is_string());
    assert!(results[0]["timestamp_formatted"].is_string());
    assert!(results[0]["similarity_score"].is_number());
}

#[test]
fn search_scoped_to_video_only_returns_that_video() {
    let dir = fixture();
    let output = vidgrep()
        .arg("search")
        .arg("networks")
        .arg("--path")
        .arg(dir.path())
        .arg("--video")
        .arg("video_002")
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let results: serde_json::Value = serde_json::from_slice(&output).unwrap();
    for result in results.as_array().unwrap() {
        assert_eq!(result["video_id"], "video_002");
    }
}

#[test]
fn malformed_transcript_reports_an_error() {
    let dir = TempDir::new().unwrap();
    write_dummy_embedding_config(dir.path());
    write_transcript(dir.path(), "broken.json", "{not json");

    vidgrep()
        .arg("list")
        .arg("--path")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.json"));
}

#[test]
fn empty_directory_lists_no_videos() {
    let dir = TempDir::new().unwrap();
    write_dummy_embedding_config(dir.path());

    vidgrep()
        .arg("list")
        .arg("--path")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No videos found."));
}
