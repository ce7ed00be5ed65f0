//! `bomcheck check` tests - local validation, external analysis, report sinks

mod common;

use bomcheck::entities::{AnalysisResult, Severity};
use common::{bomcheck, setup_with_reference, write_file, CLEAN_ANALYSIS, EXTERNAL_ANALYSIS};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn parse_result(stdout: &[u8]) -> AnalysisResult {
    serde_json::from_slice(stdout).expect("stdout should be an analysis document")
}

// ============================================================================
// Local validation
// ============================================================================

#[test]
fn test_check_sample_flags_connector() {
    let (tmp, reference) = setup_with_reference();

    bomcheck(&tmp)
        .args(["check", "--sample", "--reference-file"])
        .arg(&reference)
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid Item Number"))
        .stdout(predicate::str::contains("Line ID L005"))
        .stdout(predicate::str::contains("suggested: CONN-7777-F"))
        .stderr(predicate::str::contains("Loaded 10 reference items"))
        .stderr(predicate::str::contains("External analysis unavailable"));
}

#[test]
fn test_check_sample_json_without_analyzer_keeps_local_issues() {
    let (tmp, reference) = setup_with_reference();

    let output = bomcheck(&tmp)
        .args(["check", "--sample", "-f", "json", "--reference-file"])
        .arg(&reference)
        .output()
        .unwrap();
    assert!(output.status.success());

    let result = parse_result(&output.stdout);
    assert!(result.issues_found);
    assert_eq!(result.total_issues, 1);
    let issue = &result.analysis[0];
    assert_eq!(issue.issue_type, "Invalid Item Number");
    assert_eq!(issue.severity, Severity::Medium);
    assert!(issue.recommendation.contains("suggested: CONN-7777-F"));
}

#[test]
fn test_check_catalog_item_produces_no_issue() {
    let (tmp, reference) = setup_with_reference();
    let order = write_file(
        &tmp,
        "order.json",
        r#"{
          "order_id": "ORD-1",
          "customer": "Acme",
          "date": "2025-02-26",
          "priority": "Low",
          "items": [
            {"line_id": "L001", "item_number": "PCB-X7700", "description": "Board",
             "quantity": 1, "unit_price": 10.0, "category": "Electronics"}
          ]
        }"#,
    );
    let analysis = write_file(&tmp, "analysis.json", CLEAN_ANALYSIS);

    let output = bomcheck(&tmp)
        .args(["check", "-f", "json", "--input"])
        .arg(&order)
        .arg("--reference-file")
        .arg(&reference)
        .arg("--analysis")
        .arg(&analysis)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(parse_result(&output.stdout), AnalysisResult::empty());
}

#[test]
fn test_check_missing_reference_degrades_to_patterns() {
    let tmp = TempDir::new().unwrap();

    let output = bomcheck(&tmp)
        .args(["check", "--sample", "-f", "json", "--reference-file", "missing.csv"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("pattern rules only"));

    // Pattern rules alone still reject the connector
    let result = parse_result(&output.stdout);
    assert_eq!(result.total_issues, 1);
    assert!(result.analysis[0].description.contains("CONN-7777"));
}

#[test]
fn test_check_skip_local_validation() {
    let tmp = TempDir::new().unwrap();
    let analysis = write_file(&tmp, "analysis.json", CLEAN_ANALYSIS);

    let output = bomcheck(&tmp)
        .args(["check", "--sample", "--skip-local-validation", "-f", "json", "--analysis"])
        .arg(&analysis)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(!parse_result(&output.stdout).issues_found);
}

// ============================================================================
// External analysis
// ============================================================================

#[test]
fn test_check_merges_external_issues_first() {
    let (tmp, reference) = setup_with_reference();
    let analysis = write_file(&tmp, "analysis.json", EXTERNAL_ANALYSIS);

    let output = bomcheck(&tmp)
        .args(["check", "--sample", "-f", "json", "--reference-file"])
        .arg(&reference)
        .arg("--analysis")
        .arg(&analysis)
        .output()
        .unwrap();
    assert!(output.status.success());

    let result = parse_result(&output.stdout);
    assert_eq!(result.total_issues, 3);
    let kinds: Vec<_> = result.analysis.iter().map(|i| i.issue_type.as_str()).collect();
    assert_eq!(kinds, vec!["Missing Field", "Duplicate Line ID", "Invalid Item Number"]);
}

#[test]
fn test_check_clean_order_without_analyzer_reports_api_error() {
    let tmp = TempDir::new().unwrap();

    bomcheck(&tmp)
        .args(["check", "--clean"])
        .assert()
        .success()
        .stdout(predicate::str::contains("API Error"))
        .stdout(predicate::str::contains("no external analyzer configured"));
}

#[test]
fn test_check_clean_order_with_clean_analysis() {
    let tmp = TempDir::new().unwrap();
    let analysis = write_file(&tmp, "analysis.json", CLEAN_ANALYSIS);

    bomcheck(&tmp)
        .args(["check", "--clean", "--analysis"])
        .arg(&analysis)
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues found"));
}

#[test]
fn test_check_invalid_analysis_is_reconciled() {
    let tmp = TempDir::new().unwrap();
    let analysis = write_file(&tmp, "analysis.json", "Sorry, I cannot help with that.");

    let output = bomcheck(&tmp)
        .args(["check", "--clean", "-f", "json", "--analysis"])
        .arg(&analysis)
        .output()
        .unwrap();
    assert!(output.status.success());

    let result = parse_result(&output.stdout);
    assert_eq!(result.total_issues, 1);
    assert_eq!(result.analysis[0].issue_type, "API Error");
    assert_eq!(result.analysis[0].severity, Severity::High);
}

#[cfg(unix)]
#[test]
fn test_check_analyzer_command() {
    let tmp = TempDir::new().unwrap();
    write_file(&tmp, "analysis.json", EXTERNAL_ANALYSIS);
    write_file(&tmp, "my analyzer.sh", "cat > /dev/null\ncat \"$1\"\n");

    // Arguments pass through untouched, including spaces and leading hyphens
    let output = bomcheck(&tmp)
        .args(["check", "--clean", "-f", "json", "--analyzer-cmd"])
        .args(["sh", "my analyzer.sh", "analysis.json", "-x"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(parse_result(&output.stdout).total_issues, 2);
}

#[test]
fn test_check_partially_malformed_analysis_keeps_external_issues() {
    let (tmp, reference) = setup_with_reference();
    let analysis = write_file(
        &tmp,
        "analysis.json",
        r#"{
          "issues_found": true,
          "total_issues": 5,
          "analysis": [
            {"issue_type": "Missing Field", "location": "Line ID L004",
             "description": "unit_price is missing", "severity": "critical",
             "recommendation": "Add the unit price"},
            {"issue_type": "Duplicate Line ID", "location": "Line ID L003",
             "description": "L003 appears twice", "severity": "medium"}
          ]
        }"#,
    );

    let output = bomcheck(&tmp)
        .args(["check", "--sample", "-f", "json", "--reference-file"])
        .arg(&reference)
        .arg("--analysis")
        .arg(&analysis)
        .output()
        .unwrap();
    assert!(output.status.success());

    let result = parse_result(&output.stdout);
    assert!(result.is_consistent());
    let kinds: Vec<_> = result.analysis.iter().map(|i| i.issue_type.as_str()).collect();
    assert_eq!(kinds, vec!["Missing Field", "Duplicate Line ID", "Invalid Item Number"]);
    assert_eq!(result.analysis[0].severity, Severity::High);
}

// ============================================================================
// Inputs and outputs
// ============================================================================

#[test]
fn test_check_missing_input_fails() {
    let tmp = TempDir::new().unwrap();

    bomcheck(&tmp)
        .args(["check", "--input", "missing.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.json"));
}

#[test]
fn test_check_invalid_input_fails() {
    let tmp = TempDir::new().unwrap();
    write_file(&tmp, "order.json", "{ not json");

    bomcheck(&tmp)
        .args(["check", "--input", "order.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid JSON"));
}

#[test]
fn test_check_wrongly_typed_order_is_still_validated() {
    let (tmp, reference) = setup_with_reference();
    let order = write_file(
        &tmp,
        "order.json",
        r#"{
          "order_id": "ORD-9",
          "priority": "Urgent",
          "items": [
            {"line_id": 5, "item_number": "CONN-7777", "quantity": "5", "unit_price": 1.2}
          ]
        }"#,
    );

    let output = bomcheck(&tmp)
        .args(["check", "-f", "json", "--input"])
        .arg(&order)
        .arg("--reference-file")
        .arg(&reference)
        .output()
        .unwrap();
    assert!(output.status.success());

    let result = parse_result(&output.stdout);
    assert_eq!(result.total_issues, 1);
    assert_eq!(result.analysis[0].location, "Line ID 5");
    assert!(result.analysis[0].recommendation.contains("suggested: CONN-7777-F"));
}

#[test]
fn test_check_writes_json_output() {
    let tmp = TempDir::new().unwrap();
    let analysis = write_file(&tmp, "analysis.json", EXTERNAL_ANALYSIS);

    bomcheck(&tmp)
        .args(["check", "--sample", "--output", "result.json", "--analysis"])
        .arg(&analysis)
        .assert()
        .success();

    let saved: AnalysisResult =
        serde_json::from_str(&fs::read_to_string(tmp.path().join("result.json")).unwrap()).unwrap();
    assert!(saved.is_consistent());
    assert_eq!(saved.total_issues, 3);
}

#[test]
fn test_check_appends_csv_report() {
    let tmp = TempDir::new().unwrap();
    let analysis = write_file(&tmp, "analysis.json", EXTERNAL_ANALYSIS);
    let clean = write_file(&tmp, "clean.json", CLEAN_ANALYSIS);

    bomcheck(&tmp)
        .args(["check", "--sample", "--csv", "report.csv", "--analysis"])
        .arg(&analysis)
        .assert()
        .success();
    bomcheck(&tmp)
        .args(["check", "--clean", "--csv", "report.csv", "--analysis"])
        .arg(&clean)
        .assert()
        .success();

    let content = fs::read_to_string(tmp.path().join("report.csv")).unwrap();
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(
        lines[0],
        "timestamp,order_id,issue_id,issue_type,location,severity,description,recommendation"
    );
    assert_eq!(lines.len(), 1 + 3 + 1);
    assert!(lines[1].contains("ORD-2025-7834-1"));
    assert!(lines[3].contains("ORD-2025-7834-3"));
    assert!(lines[4].contains("No issues found"));
}

#[test]
fn test_check_save_sample() {
    let tmp = TempDir::new().unwrap();
    let analysis = write_file(&tmp, "analysis.json", CLEAN_ANALYSIS);

    bomcheck(&tmp)
        .args(["check", "--sample", "--save-sample", "order.json", "--analysis"])
        .arg(&analysis)
        .assert()
        .success();

    let content = fs::read_to_string(tmp.path().join("order.json")).unwrap();
    assert!(content.contains("CONN-7777"));
}

#[test]
fn test_check_table_format() {
    let tmp = TempDir::new().unwrap();

    bomcheck(&tmp)
        .args(["check", "--sample", "-f", "table"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SEVERITY"))
        .stdout(predicate::str::contains("Line ID L005"));
}

#[test]
fn test_check_csv_format_on_stdout() {
    let tmp = TempDir::new().unwrap();

    bomcheck(&tmp)
        .args(["check", "--sample", "-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("timestamp,order_id,issue_id"))
        .stdout(predicate::str::contains("ORD-2025-7834-1"));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_check_reads_local_config() {
    let (tmp, _) = setup_with_reference();
    write_file(&tmp, "analysis.json", EXTERNAL_ANALYSIS);
    write_file(
        &tmp,
        "bomcheck.yaml",
        "reference_file: reference_items.csv\nanalyzer:\n  kind: file\n  path: analysis.json\n",
    );

    let output = bomcheck(&tmp)
        .args(["check", "--sample", "-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(parse_result(&output.stdout).total_issues, 3);
    assert!(String::from_utf8_lossy(&output.stderr).contains("Loaded 10 reference items"));
}

#[test]
fn test_check_reference_file_from_env() {
    let (tmp, reference) = setup_with_reference();

    bomcheck(&tmp)
        .env("BOMCHECK_REFERENCE_FILE", &reference)
        .args(["check", "--sample"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Loaded 10 reference items"));
}

#[test]
fn test_check_flag_overrides_config_skip() {
    let tmp = TempDir::new().unwrap();
    let analysis = write_file(&tmp, "analysis.json", CLEAN_ANALYSIS);
    write_file(&tmp, "bomcheck.yaml", "skip_local_validation: true\n");

    let skipped = bomcheck(&tmp)
        .args(["check", "--sample", "-f", "json", "--analysis"])
        .arg(&analysis)
        .output()
        .unwrap();
    assert!(skipped.status.success());
    assert!(!parse_result(&skipped.stdout).issues_found);

    let validated = bomcheck(&tmp)
        .args(["check", "--sample", "--local-validation", "-f", "json", "--analysis"])
        .arg(&analysis)
        .output()
        .unwrap();
    assert!(validated.status.success());
    let result = parse_result(&validated.stdout);
    assert_eq!(result.total_issues, 1);
    assert_eq!(result.analysis[0].location, "Line ID L005");
}

#[test]
fn test_check_invalid_config_fails() {
    let tmp = TempDir::new().unwrap();
    write_file(&tmp, "bomcheck.yaml", "analyzer:\n  kind: telepathy\n");

    bomcheck(&tmp)
        .args(["check", "--sample"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config"));
}
