//! Baseliner core: browser compatibility analysis for web source code
//!
//! Given a snippet of JavaScript, TypeScript, CSS or HTML, the engine
//! detects uses of web-platform features, cross-references each against a
//! baseline/browser support table, and produces a structured report:
//! issues with severity and affected browsers, an aggregate 0-100 score,
//! and optionally an auto-fixed copy of the input.
//!
//! ```
//! use baseliner_core::analyze;
//!
//! let result = analyze("const x = a ?? b;", "javascript").unwrap();
//! assert_eq!(result.issues.len(), 1);
//! assert!(result.score < 100);
//! ```
//!
//! The pipeline (scanner → evaluator → fixer) is synchronous, side-effect
//! free and safe to call concurrently; the feature catalog is immutable
//! data injected at engine construction.

pub mod analysis;
pub mod catalog;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod fixer;
pub mod language;
pub mod report;
pub mod scanner;
pub mod stats;

pub use analysis::{analyze, AnalysisEngine};
pub use catalog::{
    BaselineStatus, Browser, BrowserSupport, Detect, FeatureCatalog, FeatureCategory,
    FeatureDefinition, FixTemplate, Severity, StructuralRule,
};
pub use config::{Config, ConfigError};
pub use error::{AnalysisError, UnknownFeatureError};
pub use fixer::{CatalogSuggestions, SuggestionProvider};
pub use language::Language;
pub use report::{
    grade, BrowserSupportEntry, CompatibilityIssue, CompatibilityResult, SupportStatus,
};
pub use scanner::{Occurrence, Scanner};
pub use stats::{ScanStats, StatsSnapshot};
