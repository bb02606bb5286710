//! Analysis engine wiring the pipeline together
//!
//! `analyze` runs Scanner → Evaluator → Fixer over one input. The engine is
//! immutable after construction and holds no per-call state, so a single
//! instance can serve concurrent callers without locking.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::OnceLock;

use tracing::debug;

use crate::catalog::{FeatureCatalog, Severity};
use crate::config::Config;
use crate::error::AnalysisError;
use crate::evaluator::Evaluator;
use crate::fixer::{apply_fixes, CatalogSuggestions, SuggestionProvider};
use crate::language::Language;
use crate::report::CompatibilityResult;
use crate::scanner::Scanner;

pub struct AnalysisEngine {
    catalog: FeatureCatalog,
    scanner: Scanner,
    severity_overrides: HashMap<String, Severity>,
    suggestions: Box<dyn SuggestionProvider>,
}

impl AnalysisEngine {
    /// Engine over the builtin catalog with default configuration.
    pub fn new() -> Self {
        Self::with_catalog(FeatureCatalog::builtin())
    }

    pub fn with_catalog(catalog: FeatureCatalog) -> Self {
        Self::build(catalog, &Config::default())
    }

    /// Builtin catalog, behavior adjusted by a `baseliner.toml` config.
    pub fn with_config(config: &Config) -> Self {
        Self::build(FeatureCatalog::builtin(), config)
    }

    pub fn with_catalog_and_config(catalog: FeatureCatalog, config: &Config) -> Self {
        Self::build(catalog, config)
    }

    /// Swap in an external suggestion service. The engine stays fully
    /// deterministic without one.
    pub fn with_suggestion_provider(mut self, provider: Box<dyn SuggestionProvider>) -> Self {
        self.suggestions = provider;
        self
    }

    fn build(catalog: FeatureCatalog, config: &Config) -> Self {
        let scanner = Scanner::with_disabled(&catalog, &config.disabled_features());
        Self {
            catalog,
            scanner,
            severity_overrides: config.severity_overrides(),
            suggestions: Box::new(CatalogSuggestions),
        }
    }

    pub fn catalog(&self) -> &FeatureCatalog {
        &self.catalog
    }

    /// Analyze one snippet. Infallible for a typed [`Language`]; empty
    /// input is a perfect score rather than an error.
    pub fn analyze(&self, code: &str, language: Language) -> CompatibilityResult {
        let occurrences = self.scanner.scan(code, language);
        debug!(
            language = %language,
            occurrences = occurrences.len(),
            "analyzing input"
        );

        let evaluation =
            Evaluator::new(&self.catalog, &self.severity_overrides).evaluate(&occurrences);

        let mut issues = evaluation.issues;
        for issue in &mut issues {
            if let Some(refined) = self.suggestions.refine(issue) {
                issue.suggested_fix = refined;
            }
        }

        let fixed_code = apply_fixes(code, language, &self.catalog, &issues);

        CompatibilityResult {
            score: evaluation.score,
            summary: evaluation.summary,
            issues,
            fixed_code,
        }
    }
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Boundary entry point: analyze with the language supplied as a string,
/// as rendering layers submit it. The only hard failure is an unsupported
/// language value.
pub fn analyze(code: &str, language: &str) -> Result<CompatibilityResult, AnalysisError> {
    let language = Language::from_str(language)?;
    Ok(default_engine().analyze(code, language))
}

fn default_engine() -> &'static AnalysisEngine {
    static ENGINE: OnceLock<AnalysisEngine> = OnceLock::new();
    ENGINE.get_or_init(AnalysisEngine::new)
}
