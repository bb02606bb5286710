//! Check command - analyzes files for browser compatibility issues

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Args;
use rayon::prelude::*;
use tracing::debug;
use walkdir::WalkDir;

use baseliner_core::config::{find_config_file, load_config_with_warnings, Config};
use baseliner_core::{AnalysisEngine, CompatibilityResult, Language, ScanStats};

use crate::output::json::JsonFormatter;
use crate::output::pretty::PrettyFormatter;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to file or directory to analyze
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Output format for reports (text or json)
    #[arg(short, long, default_value = "text")]
    pub format: String,

    /// Print the auto-fixed source after each report, when one exists
    #[arg(long)]
    pub fix: bool,

    /// Exit with code 2 on any issue, not only high-severity ones
    #[arg(long)]
    pub strict: bool,
}

/// One analyzed file.
pub struct FileReport {
    pub path: PathBuf,
    pub language: Language,
    pub result: CompatibilityResult,
}

impl CheckArgs {
    pub fn run(&self) -> anyhow::Result<i32> {
        let config_dir = if self.path.is_dir() {
            self.path.clone()
        } else {
            self.path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."))
        };
        let config = match find_config_file(&config_dir) {
            Some(config_path) => {
                let loaded = load_config_with_warnings(&config_path)?;
                for warning in &loaded.warnings {
                    eprintln!("warning: {warning}");
                }
                loaded.config
            }
            None => Config::default(),
        };
        let engine = AnalysisEngine::with_config(&config);

        let targets = collect_targets(&self.path)?;
        if targets.is_empty() {
            bail!(
                "no analyzable files under {} (looking for js, ts, css, html)",
                self.path.display()
            );
        }
        debug!(files = targets.len(), "starting analysis");

        let reports = analyze_targets(&engine, &targets)?;

        let stats = ScanStats::new();
        for report in &reports {
            stats.record(&report.result);
        }

        match self.format.as_str() {
            "json" => {
                let formatter = JsonFormatter::new();
                println!("{}", formatter.format(&reports));
            }
            "text" => {
                let formatter = PrettyFormatter::new();
                for report in &reports {
                    print!("{}", formatter.format(report));
                    if self.fix {
                        if let Some(fixed) = &report.result.fixed_code {
                            println!("\nAuto-fixed source:\n{fixed}");
                        }
                    }
                }
                if reports.len() > 1 {
                    let snapshot = stats.snapshot();
                    println!(
                        "\nAnalyzed {} files, average score {:.1}",
                        snapshot.total_scans, snapshot.average_score
                    );
                }
            }
            other => bail!("unknown output format '{other}', expected 'text' or 'json'"),
        }

        Ok(exit_code(&reports, self.strict))
    }
}

/// Files eligible for analysis under `path`, in stable order. A directory
/// is walked recursively; a single file must have a recognizable extension.
pub fn collect_targets(path: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if path.is_file() {
        if language_of(path).is_none() {
            bail!(
                "cannot detect a supported language from '{}' (expected js, ts, css or html)",
                path.display()
            );
        }
        return Ok(vec![path.to_path_buf()]);
    }

    if !path.is_dir() {
        bail!("path does not exist: {}", path.display());
    }

    let mut targets: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|p| language_of(p).is_some())
        .collect();
    targets.sort();

    Ok(targets)
}

fn analyze_targets(engine: &AnalysisEngine, targets: &[PathBuf]) -> anyhow::Result<Vec<FileReport>> {
    targets
        .par_iter()
        .map(|path| {
            let code = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let language = language_of(path)
                .with_context(|| format!("no language for {}", path.display()))?;

            Ok(FileReport {
                path: path.clone(),
                language,
                result: engine.analyze(&code, language),
            })
        })
        .collect()
}

fn language_of(path: &Path) -> Option<Language> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(Language::from_extension)
}

/// 0 when every file is clean, 1 when only medium/low issues were found,
/// 2 when any high-severity issue is present (or any issue under --strict).
fn exit_code(reports: &[FileReport], strict: bool) -> i32 {
    let any_issue = reports.iter().any(|r| !r.result.issues.is_empty());
    let any_high = reports.iter().any(|r| r.result.has_high_severity());

    if any_high || (strict && any_issue) {
        2
    } else if any_issue {
        1
    } else {
        0
    }
}
