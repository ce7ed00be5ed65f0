//! Output formatting utilities

use console::style;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cli::helpers::truncate_str;
use crate::cli::OutputFormat;
use crate::core::report;
use crate::entities::issue::{AnalysisResult, Severity};

/// Determine the effective output format based on context
pub fn effective_format(format: OutputFormat, is_list: bool) -> OutputFormat {
    match format {
        OutputFormat::Auto => {
            if is_list {
                OutputFormat::Table
            } else {
                OutputFormat::Text
            }
        }
        other => other,
    }
}

fn styled_marker(severity: Severity) -> String {
    let marker = report::severity_marker(severity);
    match severity {
        Severity::High => style(marker).red().bold().to_string(),
        Severity::Medium => style(marker).yellow().to_string(),
        Severity::Low => style(marker).dim().to_string(),
    }
}

/// Print an analysis result as a styled text report
pub fn print_text_report(result: &AnalysisResult) {
    if result.analysis.is_empty() {
        println!("{} No issues found in the BOM order data.", style("✓").green().bold());
        return;
    }

    println!(
        "{} Found {} issue(s) in the BOM order:",
        style("✗").red().bold(),
        style(result.total_issues).red()
    );
    println!();

    for (i, issue) in result.analysis.iter().enumerate() {
        println!(
            "{} Issue #{}: {}",
            styled_marker(issue.severity),
            i + 1,
            style(&issue.issue_type).bold()
        );
        println!("   Location: {}", style(&issue.location).cyan());
        println!("   Description: {}", issue.description);
        println!("   Recommendation: {}", issue.recommendation);
        println!();
    }

    println!("{}", style("─".repeat(60)).dim());
    println!(
        "  High: {}  Medium: {}  Low: {}",
        style(result.count_severity(Severity::High)).red(),
        style(result.count_severity(Severity::Medium)).yellow(),
        result.count_severity(Severity::Low)
    );
}

#[derive(Tabled)]
struct IssueRow {
    #[tabled(rename = "#")]
    number: usize,
    #[tabled(rename = "SEVERITY")]
    severity: String,
    #[tabled(rename = "TYPE")]
    issue_type: String,
    #[tabled(rename = "LOCATION")]
    location: String,
    #[tabled(rename = "DESCRIPTION")]
    description: String,
    #[tabled(rename = "RECOMMENDATION")]
    recommendation: String,
}

/// Render an analysis result as a table
pub fn issue_table(result: &AnalysisResult) -> String {
    let rows = result.analysis.iter().enumerate().map(|(i, issue)| IssueRow {
        number: i + 1,
        severity: issue.severity.to_string(),
        issue_type: issue.issue_type.clone(),
        location: issue.location.clone(),
        description: truncate_str(&issue.description, 60),
        recommendation: truncate_str(&issue.recommendation, 60),
    });
    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::issue::Issue;

    #[test]
    fn test_effective_format() {
        assert_eq!(effective_format(OutputFormat::Auto, true), OutputFormat::Table);
        assert_eq!(effective_format(OutputFormat::Auto, false), OutputFormat::Text);
        assert_eq!(effective_format(OutputFormat::Json, true), OutputFormat::Json);
    }

    #[test]
    fn test_issue_table_contains_rows() {
        let result = AnalysisResult::from_issues(vec![Issue::new(
            "Invalid Item Number",
            "Line ID L005",
            "bad",
            Severity::Medium,
            "fix",
        )]);
        let table = issue_table(&result);
        assert!(table.contains("SEVERITY"));
        assert!(table.contains("Line ID L005"));
        assert!(table.contains("medium"));
    }
}
