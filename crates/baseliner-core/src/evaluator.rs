//! Occurrence evaluation: issues, score and summary
//!
//! Groups raw occurrences by feature, consults the catalog and the pinned
//! browser matrix, and produces the deduplicated, deterministically ordered
//! issue list with its aggregate score. A group whose feature id is missing
//! from the catalog indicates a scanner/catalog mismatch: it is logged and
//! dropped, never fatal.

use std::collections::HashMap;

use tracing::error;

use crate::catalog::{
    BaselineStatus, Browser, BrowserSupport, FeatureCatalog, FeatureDefinition, Severity,
};
use crate::report::{grade, BrowserSupportEntry, CompatibilityIssue, SupportStatus};
use crate::scanner::Occurrence;

pub struct Evaluator<'a> {
    catalog: &'a FeatureCatalog,
    severity_overrides: &'a HashMap<String, Severity>,
}

pub struct Evaluation {
    pub score: u8,
    pub summary: String,
    pub issues: Vec<CompatibilityIssue>,
}

impl<'a> Evaluator<'a> {
    pub fn new(
        catalog: &'a FeatureCatalog,
        severity_overrides: &'a HashMap<String, Severity>,
    ) -> Self {
        Self {
            catalog,
            severity_overrides,
        }
    }

    pub fn evaluate(&self, occurrences: &[Occurrence]) -> Evaluation {
        let mut issues = Vec::new();

        for group in group_by_feature(occurrences) {
            let feature = match self.catalog.get(group.feature_id) {
                Ok(feature) => feature,
                Err(err) => {
                    // Invariant violation: the scanner only emits catalogued
                    // ids. Drop the group and keep the rest of the analysis.
                    error!(feature = %err.feature_id, "dropping group: {err}");
                    continue;
                }
            };

            if let Some(issue) = self.build_issue(feature, &group) {
                issues.push(issue);
            }
        }

        self.sort_issues(&mut issues);

        let score = score_for(&issues);
        let summary = summarize(score, &issues);

        Evaluation {
            score,
            summary,
            issues,
        }
    }

    fn build_issue(
        &self,
        feature: &FeatureDefinition,
        group: &FeatureGroup,
    ) -> Option<CompatibilityIssue> {
        let browsers_unsupported = browser_entries(feature);

        // A widely-available feature with a clean matrix carries no
        // compatibility risk and is reported as no issue at all.
        if feature.baseline == BaselineStatus::WidelyAvailable && browsers_unsupported.is_empty() {
            return None;
        }

        let severity = self
            .severity_overrides
            .get(feature.id)
            .copied()
            .unwrap_or(feature.severity);

        Some(CompatibilityIssue {
            feature_id: feature.id,
            matched: group.first_matched.clone(),
            feature_name: feature.name.to_string(),
            description: feature.description.to_string(),
            severity,
            baseline_status: feature.baseline,
            browsers_unsupported,
            suggested_fix: feature.suggestion.to_string(),
            line_number: Some(group.first_line),
            mdn_link: feature.mdn,
        })
    }

    fn sort_issues(&self, issues: &mut [CompatibilityIssue]) {
        issues.sort_by_key(|issue| {
            (
                issue.severity.rank(),
                self.catalog.index_of(issue.feature_id).unwrap_or(usize::MAX),
            )
        });
    }
}

struct FeatureGroup {
    feature_id: &'static str,
    first_line: usize,
    first_matched: String,
}

/// Collapse occurrences into one group per feature id, keeping first-seen
/// order and the earliest line as the representative site.
fn group_by_feature(occurrences: &[Occurrence]) -> Vec<FeatureGroup> {
    let mut groups: Vec<FeatureGroup> = Vec::new();
    let mut index_by_id: HashMap<&'static str, usize> = HashMap::new();

    for occurrence in occurrences {
        match index_by_id.get(occurrence.feature_id) {
            Some(&index) => {
                let group = &mut groups[index];
                if occurrence.line < group.first_line {
                    group.first_line = occurrence.line;
                    group.first_matched = occurrence.matched.clone();
                }
            }
            None => {
                index_by_id.insert(occurrence.feature_id, groups.len());
                groups.push(FeatureGroup {
                    feature_id: occurrence.feature_id,
                    first_line: occurrence.line,
                    first_matched: occurrence.matched.clone(),
                });
            }
        }
    }

    groups
}

/// Derive the per-browser entries for one feature against the pinned
/// baseline matrix. Fully supported browsers are omitted.
fn browser_entries(feature: &FeatureDefinition) -> Vec<BrowserSupportEntry> {
    let mut entries = Vec::new();

    for browser in Browser::TRACKED {
        let entry = match feature.support_for(browser) {
            BrowserSupport::Never => Some(BrowserSupportEntry {
                name: browser.name(),
                version: browser.pinned_version().to_string(),
                support_status: SupportStatus::Unsupported,
            }),
            BrowserSupport::Flagged => Some(BrowserSupportEntry {
                name: browser.name(),
                version: browser.pinned_version().to_string(),
                support_status: SupportStatus::Flagged,
            }),
            BrowserSupport::Since(minimum) => {
                if version_after(minimum, browser.pinned_version()) {
                    Some(BrowserSupportEntry {
                        name: browser.name(),
                        version: minimum.to_string(),
                        support_status: SupportStatus::Partial,
                    })
                } else {
                    None
                }
            }
        };

        if let Some(entry) = entry {
            entries.push(entry);
        }
    }

    entries
}

/// Pure, order-independent reduction over the issue set: 100 minus the
/// summed severity penalties, clamped at zero.
fn score_for(issues: &[CompatibilityIssue]) -> u8 {
    let penalty: u32 = issues.iter().map(|issue| issue.severity.penalty()).sum();
    100u32.saturating_sub(penalty) as u8
}

fn summarize(score: u8, issues: &[CompatibilityIssue]) -> String {
    if issues.is_empty() {
        return "No compatibility issues found. Your code uses widely supported web features."
            .to_string();
    }

    let mut parts = Vec::new();
    for severity in [Severity::High, Severity::Medium, Severity::Low] {
        let count = issues.iter().filter(|i| i.severity == severity).count();
        if count > 0 {
            parts.push(format!("{count} {severity}"));
        }
    }

    let noun = if issues.len() == 1 { "issue" } else { "issues" };
    format!(
        "Found {} {noun} ({}). Compatibility grade: {} ({score}/100).",
        issues.len(),
        parts.join(", "),
        grade(score),
    )
}

/// Dotted numeric version comparison: true when `a` is strictly newer
/// than `b`. Non-numeric segments compare as zero.
fn version_after(a: &str, b: &str) -> bool {
    let parse = |v: &str| -> Vec<u32> {
        v.split('.')
            .map(|segment| segment.trim().parse::<u32>().unwrap_or(0))
            .collect()
    };

    let (a, b) = (parse(a), parse(b));
    for i in 0..a.len().max(b.len()) {
        let left = a.get(i).copied().unwrap_or(0);
        let right = b.get(i).copied().unwrap_or(0);
        if left != right {
            return left > right;
        }
    }
    false
}
