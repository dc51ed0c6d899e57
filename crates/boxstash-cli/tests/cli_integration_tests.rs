//! CLI integration tests
//!
//! Drive the `boxstash` binary against a temporary database file and check
//! the JSON it prints.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

fn setup_db(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("boxstash.db")
}

fn boxstash(db: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_boxstash"))
        .arg("--database-uri")
        .arg(db)
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("BOXSTASH_DATABASE_URI")
        .output()
        .expect("Failed to execute boxstash")
}

fn json_of(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn test_migrate_reports_ledger() {
    // Given: A path with no database yet
    let temp_dir = TempDir::new().unwrap();
    let db = setup_db(&temp_dir);

    // When: `boxstash migrate` runs twice
    json_of(&boxstash(&db, &["migrate"]));
    let report = json_of(&boxstash(&db, &["migrate"]));

    // Then: The ledger lists each migration exactly once
    assert_eq!(
        report["applied"],
        serde_json::json!([
            "create-table-user",
            "create-table-box",
            "create-table-version",
            "create-table-provider"
        ])
    );
}

#[test]
fn test_publish_flow_by_names() {
    // Given: A user with a box
    let temp_dir = TempDir::new().unwrap();
    let db = setup_db(&temp_dir);
    json_of(&boxstash(&db, &["user", "create", "jdoe"]));
    json_of(&boxstash(
        &db,
        &["box", "create", "jdoe", "base", "--short-description", "a base box"],
    ));

    // When: A version is added, given a provider and released
    json_of(&boxstash(&db, &["version", "create", "jdoe", "base", "1.0"]));
    let provider = json_of(&boxstash(
        &db,
        &[
            "provider",
            "create",
            "jdoe",
            "base",
            "1.0",
            "virtualbox",
            "--url",
            "https://example.com/base.box",
        ],
    ));
    let released = json_of(&boxstash(&db, &["version", "release", "jdoe", "base", "1.0"]));

    // Then: Each step prints the stored row
    assert_eq!(provider["name"], "virtualbox");
    assert_eq!(provider["original_url"], "https://example.com/base.box");
    assert_eq!(released["status"], "released");

    // And: The box reports 1.0 as current, with its provider
    let vbox = json_of(&boxstash(&db, &["box", "show", "jdoe", "base"]));
    assert_eq!(vbox["short_description"], "a base box");
    assert_eq!(vbox["current_version"]["version"], "1.0");
    assert_eq!(vbox["current_version"]["providers"][0]["name"], "virtualbox");
}

#[test]
fn test_unknown_box_exits_nonzero() {
    let temp_dir = TempDir::new().unwrap();
    let db = setup_db(&temp_dir);

    let output = boxstash(&db, &["box", "show", "nobody", "nothing"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERR_NOT_FOUND"), "stderr was: {}", stderr);
}

#[test]
fn test_duplicate_user_exits_nonzero() {
    let temp_dir = TempDir::new().unwrap();
    let db = setup_db(&temp_dir);
    json_of(&boxstash(&db, &["user", "create", "jdoe"]));

    let output = boxstash(&db, &["user", "create", "jdoe"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_CONSTRAINT_VIOLATION"));
}
