//! Issue and analysis result types

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::entities::lenient;

/// Issue severity
///
/// Deserialization never fails: labels outside high/medium/low are mapped
/// with [`Severity::from_label`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    #[default]
    Medium,
    Low,
}

impl Severity {
    /// Map a free-form severity label, e.g. "Critical" or "minor"
    ///
    /// Unrecognised labels become `Medium`.
    pub fn from_label(label: &str) -> Self {
        if let Ok(severity) = label.parse() {
            return severity;
        }
        match label.trim().to_lowercase().as_str() {
            "critical" | "severe" | "major" | "error" => Severity::High,
            "minor" | "info" | "trivial" | "warning" => Severity::Low,
            _ => {
                warn!("unrecognised severity {:?}, using medium", label);
                Severity::Medium
            }
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::High => write!(f, "high"),
            Severity::Medium => write!(f, "medium"),
            Severity::Low => write!(f, "low"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Severity::High),
            "medium" => Ok(Severity::Medium),
            "low" => Ok(Severity::Low),
            _ => Err(format!(
                "Invalid severity: {}. Use high, medium, or low",
                s
            )),
        }
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(lenient::opt_string(deserializer)?
            .map(|label| Severity::from_label(&label))
            .unwrap_or_default())
    }
}

/// A single detected defect in an order
///
/// Missing fields in an external document fall back to "Unknown" for the
/// type and location, an empty string for the text fields and medium
/// severity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Tag such as "Invalid Item Number" or "Duplicate Line ID"
    #[serde(default = "lenient::unknown", deserialize_with = "lenient::label")]
    pub issue_type: String,

    /// Human-readable locator, e.g. "Line ID L004"
    #[serde(default = "lenient::unknown", deserialize_with = "lenient::label")]
    pub location: String,

    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,

    #[serde(default)]
    pub severity: Severity,

    #[serde(default, deserialize_with = "lenient::string")]
    pub recommendation: String,
}

impl Issue {
    pub fn new(
        issue_type: impl Into<String>,
        location: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
        recommendation: impl Into<String>,
    ) -> Self {
        Self {
            issue_type: issue_type.into(),
            location: location.into(),
            description: description.into(),
            severity,
            recommendation: recommendation.into(),
        }
    }
}

/// Combined outcome of analysing one order
///
/// Results built through [`AnalysisResult::from_issues`] always satisfy
/// `total_issues == analysis.len()` and `issues_found == (total_issues > 0)`.
/// Documents deserialized from an external analyzer may not; call
/// [`AnalysisResult::normalized`] before trusting the counters. Entries of
/// `analysis` that are not objects are skipped rather than failing the
/// document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub issues_found: bool,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub total_issues: usize,

    #[serde(default, deserialize_with = "lenient::seq")]
    pub analysis: Vec<Issue>,
}

impl AnalysisResult {
    /// Build a result whose counters are derived from the issue list
    pub fn from_issues(analysis: Vec<Issue>) -> Self {
        Self {
            issues_found: !analysis.is_empty(),
            total_issues: analysis.len(),
            analysis,
        }
    }

    /// A result with no issues
    pub fn empty() -> Self {
        Self::from_issues(Vec::new())
    }

    /// Recompute the counters from the issue list
    pub fn normalized(self) -> Self {
        Self::from_issues(self.analysis)
    }

    /// Whether the counters agree with the issue list
    pub fn is_consistent(&self) -> bool {
        self.total_issues == self.analysis.len() && self.issues_found == (self.total_issues > 0)
    }

    pub fn is_empty(&self) -> bool {
        self.analysis.is_empty()
    }

    /// Number of issues at the given severity
    pub fn count_severity(&self, severity: Severity) -> usize {
        self.analysis
            .iter()
            .filter(|issue| issue.severity == severity)
            .count()
    }
}

impl Default for AnalysisResult {
    fn default() -> Self {
        Self::empty()
    }
}
