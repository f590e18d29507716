//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs against a
//! temporary snapshot store.

use std::path::Path;
use std::process::Command;

use chrono::{TimeZone, Utc};
use daypulse_core::{EnergyLevel, JsonStore, MentalLoad, Task, TaskStatus};

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "daypulse-cli", "--"])
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn write_store(path: &Path) {
    let deadline = Utc.with_ymd_and_hms(2025, 3, 2, 18, 0, 0).unwrap();
    let store = JsonStore {
        tasks: vec![Task {
            id: 1,
            title: "Ship the report".to_string(),
            description: None,
            deadline: Some(deadline),
            created_at: Some(deadline),
            status: Some(TaskStatus::Done),
            energy_requirement: Some(EnergyLevel::High),
            mental_load: Some(MentalLoad::Heavy),
            shelved_at: None,
            user_id: 1,
        }],
        notes: Vec::new(),
        goals: Vec::new(),
        links: Vec::new(),
    };
    std::fs::write(path, serde_json::to_string_pretty(&store).unwrap()).unwrap();
}

#[test]
fn score_outputs_one_record_per_day() {
    let dir = tempfile::tempdir().unwrap();
    let store_path = dir.path().join("store.json");
    write_store(&store_path);

    let (stdout, stderr, code) = run_cli(&[
        "score",
        "--store",
        store_path.to_str().unwrap(),
        "--user",
        "1",
        "--start",
        "2025-03-01",
        "--end",
        "2025-03-03",
    ]);
    assert_eq!(code, 0, "score failed: {stderr}");

    let series: Vec<serde_json::Value> = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(series.len(), 3);
    assert_eq!(series[0]["date"], "2025-03-01");
    assert_eq!(series[0]["totalScore"], 0);
    assert_eq!(series[1]["totalScore"], 57);
    assert_eq!(series[1]["plannedTasks"], 1);
}

#[test]
fn local_summary_reports_the_range() {
    let dir = tempfile::tempdir().unwrap();
    let store_path = dir.path().join("store.json");
    write_store(&store_path);

    let (stdout, stderr, code) = run_cli(&[
        "summary",
        "--store",
        store_path.to_str().unwrap(),
        "--user",
        "1",
        "--start",
        "2025-03-01",
        "--end",
        "2025-03-03",
        "--local",
    ]);
    assert_eq!(code, 0, "summary failed: {stderr}");
    assert!(stdout.contains("3 days of planning scores"));
    assert!(stdout.contains("high of 57"));
}

#[test]
fn missing_store_exits_nonzero() {
    let (_, stderr, code) = run_cli(&[
        "score",
        "--store",
        "/definitely/not/here.json",
        "--user",
        "1",
    ]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Failed to read snapshot store"));
}

#[test]
fn config_path_prints_a_location() {
    let (stdout, _, code) = run_cli(&["config", "path"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("config.toml"));
}
