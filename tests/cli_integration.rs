//! CLI Integration Tests
//!
//! Tests the command-line interface end-to-end against a temporary data
//! directory.

use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;

/// Get the binary to test, isolated from the user's real data and config.
fn kegel(data_dir: &assert_fs::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("kegel").unwrap();
    cmd.env("KEGEL_DATA_DIR", data_dir.path())
        .env("KEGEL_CONFIG", data_dir.child("config.toml").path())
        .env_remove("RUST_LOG");
    cmd
}

/// Temp dir with an empty config file.
fn workspace() -> assert_fs::TempDir {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("config.toml").write_str("").unwrap();
    temp
}

const SAMPLE_PROGRESS: &str = r#"{
  "current_level": 2,
  "current_day": 3,
  "last_performed": "2026-10-18T07:30:00",
  "exercise_history": [
    {"date": "2026-10-17T07:30:00", "level": 2, "day": 1, "duration_seconds": 240.0,
     "classic_reps": 12, "pulse_reps": [14, 14, 14]},
    {"date": "2026-10-18T07:30:00", "level": 2, "day": 2, "duration_seconds": 300.0,
     "classic_reps": 12, "pulse_reps": [14, 14, 14]}
  ]
}"#;

// ============================================================================
// Help & Version Tests
// ============================================================================

#[test]
fn test_help_flag() {
    let temp = workspace();
    kegel(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pelvic-floor exercise coach"));
}

#[test]
fn test_version_flag() {
    let temp = workspace();
    kegel(&temp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// ============================================================================
// Routine & Plan Tests
// ============================================================================

#[test]
fn test_routine_first_day() {
    let temp = workspace();
    kegel(&temp)
        .args(["routine", "1", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("11 reps, hold 4s, rest 4s"))
        .stdout(predicate::str::contains("[12, 12, 12]"));
}

#[test]
fn test_routine_json() {
    let temp = workspace();
    let output = kegel(&temp).args(["routine", "11", "6", "--format", "json"]).output().unwrap();
    assert!(output.status.success());

    let routine: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(routine["classic_reps"], 16);
    assert_eq!(routine["classic_rest_secs"], 5);
    assert_eq!(routine["total_days_in_level"], 7);
}

#[test]
fn test_routine_rejects_zero_level() {
    let temp = workspace();
    kegel(&temp).args(["routine", "0", "1"]).assert().failure();
}

#[test]
fn test_routine_huge_level_saturates() {
    let temp = workspace();
    let output =
        kegel(&temp).args(["routine", "3000000000", "1", "--format", "json"]).output().unwrap();
    assert!(output.status.success());

    let routine: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(routine["pulse_set_reps"], serde_json::json!([u32::MAX, u32::MAX, u32::MAX]));
    assert_eq!(routine["total_days_in_level"], 12);

    kegel(&temp)
        .args(["routine", "4294967295", "4294967295"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(total 12884901885)"));
}

#[test]
fn test_plan_lists_every_day() {
    let temp = workspace();
    kegel(&temp)
        .args(["plan", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Level 4 (6 days)"))
        .stdout(predicate::str::contains("[20, 19, 18]"));
}

// ============================================================================
// Status & Stats Tests
// ============================================================================

#[test]
fn test_status_fresh_install() {
    let temp = workspace();
    kegel(&temp)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Level:        1"))
        .stdout(predicate::str::contains("Last workout: Never"));

    // Reading never creates the file
    temp.child("progress.json").assert(predicate::path::missing());
}

#[test]
fn test_status_reads_existing_progress() {
    let temp = workspace();
    temp.child("progress.json").write_str(SAMPLE_PROGRESS).unwrap();

    let output = kegel(&temp).args(["status", "--format", "json"]).output().unwrap();
    assert!(output.status.success());

    let status: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(status["current_level"], 2);
    assert_eq!(status["current_day"], 3);
    assert_eq!(status["total_sessions"], 2);
    assert_eq!(status["routine"]["day"], 3);
}

#[test]
fn test_status_with_corrupt_file_uses_defaults() {
    let temp = workspace();
    temp.child("progress.json").write_str("{{{ nope").unwrap();

    kegel(&temp)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Level:        1"))
        .stderr(predicate::str::contains("Corrupt progress file"));
}

#[test]
fn test_stats_empty() {
    let temp = workspace();
    kegel(&temp).arg("stats").assert().success().stdout(predicate::str::contains("No workouts yet"));
}

#[test]
fn test_stats_text_and_json() {
    let temp = workspace();
    temp.child("progress.json").write_str(SAMPLE_PROGRESS).unwrap();

    kegel(&temp)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Workouts:     2"))
        .stdout(predicate::str::contains("Total time:   9m"));

    let output = kegel(&temp).args(["stats", "--format", "json"]).output().unwrap();
    let stats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["total_workouts"], 2);
    assert_eq!(stats["workout_days"], 2);
    assert_eq!(stats["last_14_days"].as_array().unwrap().len(), 14);
    assert_eq!(stats["level_stats"]["2"], 4.5);
}

// ============================================================================
// Reset Tests
// ============================================================================

#[test]
fn test_reset_cancelled() {
    let temp = workspace();
    temp.child("progress.json").write_str(SAMPLE_PROGRESS).unwrap();

    kegel(&temp).arg("reset").write_stdin("n\n").assert().success().stdout(predicate::str::contains("Cancelled"));
    temp.child("progress.json").assert(predicate::str::contains("\"current_level\": 2"));
}

#[test]
fn test_reset_confirmed() {
    let temp = workspace();
    temp.child("progress.json").write_str(SAMPLE_PROGRESS).unwrap();

    kegel(&temp).args(["reset", "-y"]).assert().success().stdout(predicate::str::contains("reset"));
    temp.child("progress.json").assert(predicate::str::contains("\"current_level\": 1"));
    temp.child("progress.json").assert(predicate::str::contains("\"last_performed\": \"\""));
}

// ============================================================================
// Workout Tests
// ============================================================================

#[test]
fn test_workout_stopped_records_nothing() {
    let temp = workspace();
    kegel(&temp)
        .arg("workout")
        .write_stdin("s\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("SESSION STOPPED"))
        .stdout(predicate::str::contains("progress not recorded"));

    temp.child("progress.json").assert(predicate::path::missing());
}

// ============================================================================
// Info, Config & Completions Tests
// ============================================================================

#[test]
fn test_info() {
    let temp = workspace();
    kegel(&temp)
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("HOW TO KEGEL"))
        .stdout(predicate::str::contains("PULSE KEGELS"));
}

#[test]
fn test_config_shows_effective_values() {
    let temp = workspace();
    temp.child("config.toml").write_str("[ui]\ntheme = \"nord\"\n").unwrap();

    kegel(&temp)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("theme = \"nord\""))
        .stdout(predicate::str::contains("count_paused_time = false"));
}

#[test]
fn test_config_path() {
    let temp = workspace();
    kegel(&temp)
        .args(["config", "--path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_invalid_config_fails() {
    let temp = workspace();
    temp.child("config.toml").write_str("[ui\n").unwrap();
    kegel(&temp).arg("status").assert().failure().stderr(predicate::str::contains("Invalid config file"));
}

#[test]
fn test_completions() {
    let temp = workspace();
    kegel(&temp).args(["completions", "bash"]).assert().success().stdout(predicate::str::contains("kegel"));
}
