//! Report sinks - text, JSON and CSV renderings of an analysis result

use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::entities::issue::{AnalysisResult, Severity};

/// CSV column order
pub const CSV_COLUMNS: [&str; 8] = [
    "timestamp",
    "order_id",
    "issue_id",
    "issue_type",
    "location",
    "severity",
    "description",
    "recommendation",
];

/// Timestamp format used in CSV reports
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Errors writing a report
#[derive(Debug, Error, miette::Diagnostic)]
pub enum ReportError {
    #[error("Failed to write report {path}: {source}")]
    #[diagnostic(code(bomcheck::report::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write CSV report: {0}")]
    #[diagnostic(code(bomcheck::report::csv))]
    Csv(#[from] csv::Error),

    #[error("Failed to serialize report: {0}")]
    #[diagnostic(code(bomcheck::report::json))]
    Json(#[from] serde_json::Error),
}

/// One flattened CSV row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub timestamp: String,
    pub order_id: String,
    pub issue_id: String,
    pub issue_type: String,
    pub location: String,
    pub severity: String,
    pub description: String,
    pub recommendation: String,
}

/// Flatten a result into CSV rows
///
/// One row per issue with IDs `{order_id}-{n}` counted from 1, or a single
/// placeholder row when there are no issues.
pub fn rows(order_id: &str, result: &AnalysisResult, timestamp: &str) -> Vec<ReportRow> {
    if result.analysis.is_empty() {
        return vec![ReportRow {
            timestamp: timestamp.to_string(),
            order_id: order_id.to_string(),
            issue_id: "N/A".to_string(),
            issue_type: "None".to_string(),
            location: "N/A".to_string(),
            severity: "N/A".to_string(),
            description: "No issues found".to_string(),
            recommendation: "N/A".to_string(),
        }];
    }

    result
        .analysis
        .iter()
        .enumerate()
        .map(|(i, issue)| ReportRow {
            timestamp: timestamp.to_string(),
            order_id: order_id.to_string(),
            issue_id: format!("{}-{}", order_id, i + 1),
            issue_type: issue.issue_type.clone(),
            location: issue.location.clone(),
            severity: issue.severity.to_string(),
            description: issue.description.clone(),
            recommendation: issue.recommendation.clone(),
        })
        .collect()
}

/// Write rows as CSV, with the header row only when `header` is set
pub fn write_csv<W: Write>(writer: W, rows: &[ReportRow], header: bool) -> Result<(), ReportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(header)
        .from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    if header && rows.is_empty() {
        csv_writer.write_record(CSV_COLUMNS)?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Append a result to a CSV report file, creating it with a header if new
///
/// Returns the number of rows written.
pub fn append_csv(
    path: &Path,
    order_id: &str,
    result: &AnalysisResult,
    timestamp: &str,
) -> Result<usize, ReportError> {
    let io_err = |source| ReportError::Io {
        path: path.display().to_string(),
        source,
    };

    let is_new = !path.exists();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_err)?;

    let rows = rows(order_id, result, timestamp);
    write_csv(file, &rows, is_new)?;
    info!(path = %path.display(), rows = rows.len(), "appended analysis to CSV report");
    Ok(rows.len())
}

/// Write a result as a pretty JSON document
pub fn write_json(path: &Path, result: &AnalysisResult) -> Result<(), ReportError> {
    let content = serde_json::to_string_pretty(result)?;
    std::fs::write(path, content + "\n").map_err(|source| ReportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    info!(path = %path.display(), "saved analysis results");
    Ok(())
}

/// Marker shown before each issue in text reports
pub fn severity_marker(severity: Severity) -> &'static str {
    match severity {
        Severity::High => "[HIGH]",
        Severity::Medium => "[MEDIUM]",
        Severity::Low => "[LOW]",
    }
}

/// Render a plain-text report
pub fn format_text(result: &AnalysisResult) -> String {
    if result.analysis.is_empty() {
        return "No issues found in the BOM order data.\n".to_string();
    }

    let mut out = format!(
        "Found {} issue{} in the BOM order:\n\n",
        result.total_issues,
        if result.total_issues == 1 { "" } else { "s" }
    );

    for (i, issue) in result.analysis.iter().enumerate() {
        out.push_str(&format!(
            "{} Issue #{}: {}\n",
            severity_marker(issue.severity),
            i + 1,
            issue.issue_type
        ));
        out.push_str(&format!("   Location: {}\n", issue.location));
        out.push_str(&format!("   Description: {}\n", issue.description));
        out.push_str(&format!("   Recommendation: {}\n\n", issue.recommendation));
    }

    out
}
