//! JSON output formatter for programmatic integration
//!
//! Wraps the engine's wire-contract result types with per-run metadata and
//! summary counts. Issue and result field names come from baseliner-core
//! and are stable.

use serde::Serialize;

use baseliner_core::{CompatibilityResult, Severity};

use crate::commands::check::FileReport;

#[derive(Serialize)]
pub struct JsonOutput<'a> {
    pub version: &'static str,
    pub summary: JsonSummary,
    pub files: Vec<JsonFile<'a>>,
}

#[derive(Serialize)]
pub struct JsonSummary {
    pub total_files: usize,
    pub files_with_issues: usize,
    pub total_issues: usize,
    pub average_score: f64,
    pub by_severity: SeverityCounts,
}

#[derive(Serialize)]
pub struct SeverityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

#[derive(Serialize)]
pub struct JsonFile<'a> {
    pub path: String,
    pub language: &'static str,
    #[serde(flatten)]
    pub result: &'a CompatibilityResult,
}

pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format(&self, reports: &[FileReport]) -> String {
        let output = self.build_output(reports);
        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    }

    fn build_output<'a>(&self, reports: &'a [FileReport]) -> JsonOutput<'a> {
        let total_issues: usize = reports.iter().map(|r| r.result.issues.len()).sum();
        let files_with_issues = reports
            .iter()
            .filter(|r| !r.result.issues.is_empty())
            .count();
        let average_score = if reports.is_empty() {
            100.0
        } else {
            reports.iter().map(|r| f64::from(r.result.score)).sum::<f64>() / reports.len() as f64
        };

        let count = |severity: Severity| {
            reports
                .iter()
                .map(|r| r.result.count_by_severity(severity))
                .sum()
        };

        JsonOutput {
            version: env!("CARGO_PKG_VERSION"),
            summary: JsonSummary {
                total_files: reports.len(),
                files_with_issues,
                total_issues,
                average_score,
                by_severity: SeverityCounts {
                    high: count(Severity::High),
                    medium: count(Severity::Medium),
                    low: count(Severity::Low),
                },
            },
            files: reports
                .iter()
                .map(|report| JsonFile {
                    path: report.path.display().to_string(),
                    language: report.language.as_str(),
                    result: &report.result,
                })
                .collect(),
        }
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}
