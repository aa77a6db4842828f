//! Corruption recovery tests for the bmi binary.
//!
//! These tests verify the system can handle:
//! - Corrupted history files
//! - History that is valid JSON but not an array
//! - Partially valid history arrays
//! - Unwritable storage

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn cli(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("bmi").expect("Failed to find bmi binary");
    cmd.env("BMI_CONFIG", data_dir.join("config.toml"))
        .arg("--data-dir")
        .arg(data_dir);
    cmd
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn history_path(data_dir: &Path) -> std::path::PathBuf {
    data_dir.join("bmi-history.json")
}

#[test]
fn test_corrupted_history_reads_as_empty() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    fs::write(history_path(data_dir), "{ invalid json }}}}").unwrap();

    cli(data_dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved calculations yet."));
}

#[test]
fn test_non_array_history_reads_as_empty() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    fs::write(history_path(data_dir), r#"{"entries": []}"#).unwrap();

    cli(data_dir)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved calculations yet."));
}

#[test]
fn test_save_over_corrupted_history_recovers() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    fs::write(history_path(data_dir), "corrupted").unwrap();

    cli(data_dir)
        .args(["calc", "--weight", "70", "--feet", "5", "--inches", "8", "--save", "--no-delay"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved to history (1 total)"));

    // History file should now be a valid array with one entry
    let raw = fs::read_to_string(history_path(data_dir)).unwrap();
    let parsed: Vec<serde_json::Value> = serde_json::from_str(&raw).expect("valid JSON array");
    assert_eq!(parsed.len(), 1);
}

#[test]
fn test_bad_elements_are_dropped_on_next_save() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    fs::write(
        history_path(data_dir),
        r#"[{"id": "partial"}, 17, {"id": "x", "date": "not a date"}]"#,
    )
    .unwrap();

    cli(data_dir)
        .args(["calc", "--weight", "80", "--feet", "6", "--inches", "1", "--save", "--no-delay"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved to history (1 total)"));
}

#[test]
fn test_empty_history_file() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    fs::write(history_path(data_dir), "").unwrap();

    cli(data_dir)
        .args(["clear", "--yes"])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(history_path(data_dir)).unwrap(), "[]");
}

#[test]
fn test_unwritable_data_dir_keeps_result() {
    // Skip on Windows (permission model is different)
    if cfg!(windows) {
        return;
    }

    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("locked");
    fs::create_dir_all(&data_dir).unwrap();

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(&data_dir).unwrap().permissions();
        perms.set_mode(0o555); // Read and execute only
        fs::set_permissions(&data_dir, perms).unwrap();

        // Root ignores directory permissions, so only check when the
        // directory is really unwritable
        let writable = fs::write(data_dir.join("probe"), "x").is_ok();

        let assert = cli(&data_dir)
            .args(["calc", "--weight", "70", "--feet", "5", "--inches", "8", "--save", "--no-delay"])
            .assert()
            .success()
            .stdout(predicate::str::contains("BMI: 23.5"));

        if !writable {
            assert.stderr(predicate::str::contains("history could not be written"));
            assert!(!history_path(&data_dir).exists());
        }

        // Clean up permissions for temp dir cleanup
        let mut perms = fs::metadata(&data_dir).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&data_dir, perms).unwrap();
    }
}
