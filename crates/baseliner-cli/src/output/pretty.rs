//! Pretty formatter for human-readable terminal output
//!
//! Displays per-file compatibility reports with colors: score and grade,
//! issue cards with affected browsers, and the suggested fix for each.

use colored::{ColoredString, Colorize};

use baseliner_core::{CompatibilityIssue, Severity, SupportStatus};

use crate::commands::check::FileReport;

pub struct PrettyFormatter;

impl PrettyFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format(&self, report: &FileReport) -> String {
        let mut output = String::new();
        let result = &report.result;

        output.push_str(&format!(
            "{} ({})\n",
            report.path.display().to_string().bold(),
            report.language
        ));
        output.push_str(&format!(
            "  score: {} {}\n",
            self.colorize_score(result.score),
            format!("(grade {})", result.grade()).dimmed()
        ));
        output.push_str(&format!("  {}\n", result.summary));

        for issue in &result.issues {
            output.push('\n');
            output.push_str(&self.format_issue(issue));
        }

        output.push('\n');
        output
    }

    fn format_issue(&self, issue: &CompatibilityIssue) -> String {
        let mut lines = Vec::new();

        let location = match issue.line_number {
            Some(line) => format!(" (line {line})"),
            None => String::new(),
        };
        lines.push(format!(
            "  {} {}{} {}",
            self.colorize_severity(issue.severity),
            issue.feature_name.bold(),
            location,
            format!("[{}]", issue.baseline_status).dimmed()
        ));

        if !issue.browsers_unsupported.is_empty() {
            let browsers: Vec<String> = issue
                .browsers_unsupported
                .iter()
                .map(|entry| {
                    format!(
                        "{} {} ({})",
                        entry.name,
                        entry.version,
                        status_label(entry.support_status)
                    )
                })
                .collect();
            lines.push(format!("    browsers: {}", browsers.join(", ")));
        }

        lines.push(format!(
            "    {} {}",
            "fix:".green(),
            issue.suggested_fix
        ));

        if let Some(mdn) = issue.mdn_link {
            lines.push(format!("    docs: {}", mdn.dimmed()));
        }

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }

    fn colorize_severity(&self, severity: Severity) -> ColoredString {
        match severity {
            Severity::High => "high".red().bold(),
            Severity::Medium => "medium".yellow().bold(),
            Severity::Low => "low".blue().bold(),
        }
    }

    fn colorize_score(&self, score: u8) -> ColoredString {
        let text = format!("{score}/100");
        if score >= 90 {
            text.green().bold()
        } else if score >= 70 {
            text.yellow().bold()
        } else {
            text.red().bold()
        }
    }
}

fn status_label(status: SupportStatus) -> &'static str {
    status.as_str()
}

impl Default for PrettyFormatter {
    fn default() -> Self {
        Self::new()
    }
}
