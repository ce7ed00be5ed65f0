//! Shared test helpers for integration tests
//!
//! This module provides common utilities used across all test files.

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to get a bomcheck command isolated from the user's environment
///
/// Config lookup is pointed at the temp dir so a real user config never
/// leaks into a test.
pub fn bomcheck(tmp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("bomcheck"));
    cmd.current_dir(tmp.path())
        .env_remove("BOMCHECK_REFERENCE_FILE")
        .env_remove("RUST_LOG")
        .env("HOME", tmp.path())
        .env("XDG_CONFIG_HOME", tmp.path().join(".config"));
    cmd
}

/// Helper to create a temp dir holding the sample reference CSV
pub fn setup_with_reference() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("reference_items.csv");
    bomcheck(&tmp)
        .args(["reference", "generate"])
        .arg(&path)
        .assert()
        .success();
    (tmp, path)
}

/// Helper to write a file into the temp dir and return its path
pub fn write_file(tmp: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = tmp.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// An external analysis document reporting the sample's missing price and
/// duplicate line ID
pub const EXTERNAL_ANALYSIS: &str = r#"{
  "issues_found": true,
  "total_issues": 2,
  "analysis": [
    {
      "issue_type": "Missing Field",
      "location": "Line ID L004",
      "description": "unit_price is missing",
      "severity": "high",
      "recommendation": "Add the unit price"
    },
    {
      "issue_type": "Duplicate Line ID",
      "location": "Line ID L003",
      "description": "L003 is used by two lines",
      "severity": "medium",
      "recommendation": "Renumber the DIODE-1N4001 line"
    }
  ]
}"#;

/// An external analysis document with no findings
pub const CLEAN_ANALYSIS: &str =
    r#"{"issues_found": false, "total_issues": 0, "analysis": []}"#;
