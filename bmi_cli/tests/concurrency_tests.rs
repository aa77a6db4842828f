//! Repeated-process tests for the bmi binary.
//!
//! These tests verify that back-to-back processes:
//! - Append to the same history without losing entries
//! - Read history while other saves happen around them

use assert_cmd::Command;
use std::collections::HashSet;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

fn cli() -> Command {
    Command::cargo_bin("bmi").expect("Failed to find bmi binary")
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn save(temp_dir: &TempDir, weight: &str) {
    cli()
        .env("BMI_CONFIG", temp_dir.path().join("config.toml"))
        .arg("--data-dir")
        .arg(temp_dir.path())
        .args(["calc", "--weight", weight, "--feet", "5", "--inches", "9"])
        .args(["--save", "--no-delay"])
        .assert()
        .success();
}

#[test]
fn test_sequential_saves_all_persist() {
    let temp_dir = setup_test_dir();

    // Run saves with slight delays between processes
    for i in 0..5u64 {
        thread::sleep(Duration::from_millis(i * 5));
        save(&temp_dir, &(60 + i * 5).to_string());
    }

    let raw = std::fs::read_to_string(temp_dir.path().join("bmi-history.json"))
        .expect("Failed to read history");
    let history: Vec<serde_json::Value> = serde_json::from_str(&raw).unwrap();

    assert_eq!(history.len(), 5, "Expected 5 entries, got {}", history.len());

    let ids: HashSet<_> = history.iter().map(|e| e["id"].as_str().unwrap()).collect();
    assert_eq!(ids.len(), 5, "Entry ids should be unique");

    // Newest first
    assert_eq!(history[0]["weight"], 80.0);
    assert_eq!(history[4]["weight"], 60.0);
}

#[test]
fn test_reads_between_writes() {
    let temp_dir = setup_test_dir();

    save(&temp_dir, "70");

    for weight in ["71", "72"] {
        cli()
            .env("BMI_CONFIG", temp_dir.path().join("config.toml"))
            .arg("--data-dir")
            .arg(temp_dir.path())
            .arg("history")
            .assert()
            .success();
        save(&temp_dir, weight);
    }

    let raw = std::fs::read_to_string(temp_dir.path().join("bmi-history.json")).unwrap();
    let history: Vec<serde_json::Value> = serde_json::from_str(&raw).unwrap();
    assert_eq!(history.len(), 3);
}
