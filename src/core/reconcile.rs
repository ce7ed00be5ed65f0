//! Issue reconciler - merge local issues with the external analysis outcome
//!
//! Pure: no I/O, only combines issue lists that were already computed.

use crate::core::analysis::AnalysisError;
use crate::entities::issue::{AnalysisResult, Issue, Severity};

/// Issue tag for a failed external analysis with nothing local to report
pub const API_ERROR: &str = "API Error";

/// Combine local issues with the external outcome
///
/// - external failure: local issues alone, or one synthetic "API Error"
///   issue when there are none
/// - external issues and local issues: external first, then local
/// - no external issues: local issues alone (possibly empty)
///
/// The returned counters always agree with the issue list, even when the
/// external document reported inconsistent ones.
pub fn reconcile(
    local_issues: Vec<Issue>,
    external: Result<AnalysisResult, AnalysisError>,
) -> AnalysisResult {
    match external {
        Err(err) if local_issues.is_empty() => AnalysisResult::from_issues(vec![api_error(&err)]),
        Err(_) => AnalysisResult::from_issues(local_issues),
        Ok(result) if result.analysis.is_empty() => AnalysisResult::from_issues(local_issues),
        Ok(result) => {
            let mut analysis = result.analysis;
            analysis.extend(local_issues);
            AnalysisResult::from_issues(analysis)
        }
    }
}

fn api_error(err: &AnalysisError) -> Issue {
    Issue::new(
        API_ERROR,
        "System",
        format!("External analysis failed: {}", err),
        Severity::High,
        "Check analyzer configuration and connectivity",
    )
}
