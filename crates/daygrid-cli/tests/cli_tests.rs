//! Integration tests for the `daygrid` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the day, month,
//! and split subcommands through the actual binary, including stdin/stdout
//! piping, file I/O, config overrides, and error handling.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn events_json() -> String {
    std::fs::read_to_string(fixture("events.json")).expect("events.json fixture must exist")
}

fn run_json(args: &[&str]) -> Value {
    let output = Command::cargo_bin("daygrid")
        .unwrap()
        .args(args)
        .output()
        .expect("daygrid should run");
    assert!(output.status.success(), "daygrid {:?} failed", args);
    serde_json::from_slice(&output.stdout).expect("stdout must be JSON")
}

// ─────────────────────────────────────────────────────────────────────────────
// Day subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn day_stdin_to_stdout() {
    Command::cargo_bin("daygrid")
        .unwrap()
        .args(["day", "--width", "300"])
        .write_stdin(events_json())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"colSpan\""))
        .stdout(predicate::str::contains("\"rect\""));
}

#[test]
fn day_places_overlapping_events_side_by_side() {
    let fixture_path = fixture("events.json");
    let value = run_json(&["day", "-i", &fixture_path, "--width", "300", "--gutter", "0"]);
    let segments = value["segments"].as_array().unwrap();

    // 2 single-day events + 3 offsite pieces + the 1:1
    assert_eq!(segments.len(), 6);
    let standup = segments.iter().find(|s| s["id"] == 1).unwrap();
    let review = segments.iter().find(|s| s["id"] == 2).unwrap();
    assert_eq!(standup["rect"]["left"], 0.0);
    assert_eq!(standup["rect"]["width"], 150.0);
    assert_eq!(review["rect"]["left"], 150.0);
    assert_eq!(review["columns"], 2);
}

#[test]
fn day_with_date_keeps_one_day() {
    let fixture_path = fixture("events.json");
    let value = run_json(&[
        "day",
        "-i",
        &fixture_path,
        "--width",
        "300",
        "--date",
        "2026-03-03",
    ]);
    let ids: Vec<i64> = value["segments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect();

    assert_eq!(ids, vec![3, 4]);
}

#[test]
fn day_config_file_and_flag_override() {
    let fixture_path = fixture("events.json");
    let config_path = fixture("config.json");
    let value = run_json(&[
        "day",
        "-i",
        &fixture_path,
        "--width",
        "320",
        "--config",
        &config_path,
        "--gutter",
        "10",
    ]);
    let standup = value["segments"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["id"] == 1)
        .unwrap()
        .clone();

    // trackHeight 480 → 20 px/hour; leftMargin 20; gutter overridden to 10.
    assert_eq!(standup["rect"]["top"], 180.0);
    assert_eq!(standup["rect"]["left"], 20.0);
    assert_eq!(standup["rect"]["width"], 140.0);
}

#[test]
fn day_zero_width_fails() {
    Command::cargo_bin("daygrid")
        .unwrap()
        .args(["day", "--width", "0"])
        .write_stdin(events_json())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid viewport width"));
}

#[test]
fn day_negative_width_fails() {
    Command::cargo_bin("daygrid")
        .unwrap()
        .args(["day", "--width", "-5"])
        .write_stdin(events_json())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid viewport width"));
}

#[test]
fn day_empty_list_is_empty_layout() {
    Command::cargo_bin("daygrid")
        .unwrap()
        .args(["day", "--width", "300", "--compact"])
        .write_stdin("[]")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"segments":[],"rejected":[]}"#));
}

#[test]
fn malformed_events_are_reported() {
    let fixture_path = fixture("malformed.json");
    let value = run_json(&["day", "-i", &fixture_path, "--width", "300"]);

    assert_eq!(value["segments"].as_array().unwrap().len(), 1);
    assert_eq!(value["rejected"][0]["id"], 2);
}

#[test]
fn zero_duration_policy_keeps_malformed_events() {
    let fixture_path = fixture("malformed.json");
    let value = run_json(&[
        "day",
        "-i",
        &fixture_path,
        "--width",
        "300",
        "--policy",
        "zero-duration",
    ]);

    assert_eq!(value["segments"].as_array().unwrap().len(), 2);
    assert!(value["rejected"].as_array().unwrap().is_empty());
}

#[test]
fn invalid_json_fails() {
    Command::cargo_bin("daygrid")
        .unwrap()
        .args(["day", "--width", "300"])
        .write_stdin("this is not valid json {{{")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse events JSON"));
}

#[test]
fn invalid_config_flag_fails() {
    Command::cargo_bin("daygrid")
        .unwrap()
        .args(["day", "--width", "300", "--track-height", "0"])
        .write_stdin("[]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid layout config"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Month subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn month_groups_by_day() {
    let fixture_path = fixture("events.json");
    let value = run_json(&["month", "-i", &fixture_path]);
    let days = value["days"].as_array().unwrap();

    let dates: Vec<&str> = days.iter().map(|d| d["date"].as_str().unwrap()).collect();
    assert_eq!(dates, vec!["2026-03-02", "2026-03-03", "2026-03-04"]);
    // Monday: standup+review chain, then the offsite's evening piece.
    assert_eq!(days[0]["chains"].as_array().unwrap().len(), 2);
    assert_eq!(days[0]["chains"][0]["segments"].as_array().unwrap().len(), 2);
}

#[test]
fn month_file_to_file() {
    let output_path = std::env::temp_dir().join("daygrid-test-month-output.json");
    let _ = std::fs::remove_file(&output_path);
    let fixture_path = fixture("events.json");

    Command::cargo_bin("daygrid")
        .unwrap()
        .args(["month", "-i", fixture_path.as_str(), "-o"])
        .arg(&output_path)
        .assert()
        .success();

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    assert!(content.contains("\"chains\""));

    let _ = std::fs::remove_file(&output_path);
}

// ─────────────────────────────────────────────────────────────────────────────
// Split subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn split_emits_one_segment_per_day() {
    let fixture_path = fixture("events.json");
    let value = run_json(&["split", "-i", &fixture_path]);
    let offsite: Vec<&Value> = value["segments"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|s| s["id"] == 3)
        .collect();

    assert_eq!(offsite.len(), 3);
    for piece in offsite {
        assert_eq!(piece["multipleDays"], true);
        assert_eq!(piece["startsFrom"], "2026-03-02T22:00:00Z");
        assert_eq!(piece["endsOn"], "2026-03-04T02:00:00Z");
    }
}

#[test]
fn split_rejects_malformed_events() {
    let fixture_path = fixture("malformed.json");
    let value = run_json(&["split", "-i", &fixture_path]);
    let segments = value["segments"].as_array().unwrap();

    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0]["id"], 1);
    assert_eq!(value["rejected"][0]["id"], 2);
}

#[test]
fn split_zero_duration_policy_clamps_malformed_events() {
    let fixture_path = fixture("malformed.json");
    let value = run_json(&["split", "-i", &fixture_path, "--policy", "zero-duration"]);
    let backwards = value["segments"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["id"] == 2)
        .unwrap()
        .clone();

    assert_eq!(backwards["start"], backwards["end"]);
    assert!(value["rejected"].as_array().unwrap().is_empty());
}

#[test]
fn rejection_is_logged_once_per_event() {
    let fixture_path = fixture("malformed.json");
    let output = Command::cargo_bin("daygrid")
        .unwrap()
        .env_remove("RUST_LOG")
        .args(["day", "-i", &fixture_path, "--width", "300"])
        .output()
        .expect("daygrid should run");
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("start >= end").count(), 1, "stderr: {}", stderr);
}

#[test]
fn no_subcommand_shows_usage() {
    Command::cargo_bin("daygrid")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
