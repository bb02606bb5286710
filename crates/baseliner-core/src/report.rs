//! Analysis result types
//!
//! These structs are the wire contract consumed by rendering layers; serde
//! field names are stable and must not change without a version bump.
//! Fields marked `#[serde(skip)]` are internal plumbing (the fixer needs
//! the feature id and matched token) and never serialized.

use serde::Serialize;

use crate::catalog::{BaselineStatus, Severity};

/// Why a browser appears in an issue's `browsersUnsupported` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportStatus {
    /// Absent from the browser family regardless of version.
    Unsupported,
    /// Exists, but only in versions newer than the pinned baseline.
    Partial,
    /// Exists behind an experimental flag.
    Flagged,
}

impl SupportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SupportStatus::Unsupported => "unsupported",
            SupportStatus::Partial => "partial",
            SupportStatus::Flagged => "flagged",
        }
    }
}

/// One browser with a support problem for one issue. Browsers with full
/// support are omitted from the list entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserSupportEntry {
    pub name: &'static str,
    pub version: String,
    pub support_status: SupportStatus,
}

/// One detected feature with compatibility risk. Repeated occurrences of
/// the same feature collapse into a single issue carrying the first line.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityIssue {
    #[serde(skip)]
    pub feature_id: &'static str,
    #[serde(skip)]
    pub matched: String,
    pub feature_name: String,
    pub description: String,
    pub severity: Severity,
    pub baseline_status: BaselineStatus,
    pub browsers_unsupported: Vec<BrowserSupportEntry>,
    pub suggested_fix: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_number: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mdn_link: Option<&'static str>,
}

/// Full result of one `analyze` call. Immutable once returned.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityResult {
    pub score: u8,
    pub summary: String,
    pub issues: Vec<CompatibilityIssue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_code: Option<String>,
}

impl CompatibilityResult {
    pub fn grade(&self) -> &'static str {
        grade(self.score)
    }

    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == severity)
            .count()
    }

    pub fn has_high_severity(&self) -> bool {
        self.count_by_severity(Severity::High) > 0
    }
}

/// Letter grade for a 0-100 score.
pub fn grade(score: u8) -> &'static str {
    match score {
        95..=100 => "A+",
        90..=94 => "A",
        80..=89 => "B",
        70..=79 => "C",
        60..=69 => "D",
        _ => "F",
    }
}
