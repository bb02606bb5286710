//! Feature catalog: static, versioned web-platform support data
//!
//! The catalog is data, not code. Each entry pairs a declarative detection
//! rule with support metadata; the scanner and evaluator consume it through
//! [`FeatureCatalog`] so the table can be swapped without touching pipeline
//! logic. Declaration order is significant: it breaks severity ties when
//! issues are sorted.

mod features;

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::error::UnknownFeatureError;
use crate::language::Language;

/// Which language family a feature belongs to. Css rules also run on the
/// `<style>` blocks of HTML input, Js rules on its `<script>` blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureCategory {
    Js,
    Css,
    Html,
}

impl FeatureCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureCategory::Js => "js",
            FeatureCategory::Css => "css",
            FeatureCategory::Html => "html",
        }
    }

    /// Categories scanned directly over input of the given language.
    /// Embedded sub-language blocks of HTML are handled by the scanner.
    pub fn for_language(language: Language) -> &'static [FeatureCategory] {
        match language {
            Language::JavaScript | Language::TypeScript => &[FeatureCategory::Js],
            Language::Css => &[FeatureCategory::Css],
            Language::Html => &[FeatureCategory::Html],
        }
    }
}

impl fmt::Display for FeatureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Issue severity. Drives both the score penalty and the report ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    /// Points subtracted from the 100-point score per issue.
    pub fn penalty(&self) -> u32 {
        match self {
            Severity::High => 15,
            Severity::Medium => 8,
            Severity::Low => 3,
        }
    }

    /// Sort rank, high first.
    pub fn rank(&self) -> u8 {
        match self {
            Severity::High => 0,
            Severity::Medium => 1,
            Severity::Low => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Baseline availability classification across the major browsers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BaselineStatus {
    WidelyAvailable,
    NewlyAvailable,
    LimitedAvailability,
}

impl BaselineStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BaselineStatus::WidelyAvailable => "widely_available",
            BaselineStatus::NewlyAvailable => "newly_available",
            BaselineStatus::LimitedAvailability => "limited_availability",
        }
    }
}

impl fmt::Display for BaselineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four tracked browser families, in the fixed order support data is
/// declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Browser {
    Chrome,
    Firefox,
    Safari,
    Edge,
}

impl Browser {
    pub const TRACKED: [Browser; 4] = [
        Browser::Chrome,
        Browser::Firefox,
        Browser::Safari,
        Browser::Edge,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Browser::Chrome => "Chrome",
            Browser::Firefox => "Firefox",
            Browser::Safari => "Safari",
            Browser::Edge => "Edge",
        }
    }

    /// The engine's pinned "last stable" baseline for each family. Features
    /// requiring anything newer are reported as version-gated.
    pub fn pinned_version(&self) -> &'static str {
        match self {
            Browser::Chrome => "126",
            Browser::Firefox => "127",
            Browser::Safari => "17.5",
            Browser::Edge => "126",
        }
    }

    fn index(&self) -> usize {
        match self {
            Browser::Chrome => 0,
            Browser::Firefox => 1,
            Browser::Safari => 2,
            Browser::Edge => 3,
        }
    }
}

/// Per-browser support for one feature.
///
/// This is the explicit schema behind the unsupported/partial/flagged
/// distinction in reports: `Never` means the feature is absent from the
/// family regardless of version, `Flagged` means it exists behind an
/// experimental flag, `Since` gives the minimum stable version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserSupport {
    Since(&'static str),
    Flagged,
    Never,
}

/// How a feature is detected in source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detect {
    /// Regex applied line by line; each match is one occurrence.
    Pattern(&'static str),
    /// Light structural predicate over the whole text.
    Structural(StructuralRule),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuralRule {
    /// `await` at brace depth zero (outside any function or class body).
    TopLevelAwait,
    /// A `#name` private-field sigil inside a `class` body.
    PrivateClassField,
}

/// How a feature's canned fix is applied by the fixer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixTemplate {
    /// Substitute the matched token in place.
    Inline { replace_with: &'static str },
    /// Prepend a guidance/polyfill comment block; no inline rewrite exists.
    Prepend { block: &'static str },
    /// Nothing to change: the feature degrades gracefully where missing.
    Advisory,
    /// Unsafe to auto-apply (needs a broader refactor); blocks auto-fixing.
    Manual,
}

/// One catalogued web-platform feature. All fields are `'static`: the
/// builtin table is compiled-in data, custom tables are leaked or static.
#[derive(Debug, Clone)]
pub struct FeatureDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: FeatureCategory,
    pub detect: Detect,
    pub baseline: BaselineStatus,
    /// Support per tracked browser, in [`Browser::TRACKED`] order.
    pub support: [BrowserSupport; 4],
    pub severity: Severity,
    /// Canned human-readable fix wording, surfaced as `suggestedFix`.
    pub suggestion: &'static str,
    pub fix: FixTemplate,
    pub mdn: Option<&'static str>,
}

impl FeatureDefinition {
    pub fn support_for(&self, browser: Browser) -> BrowserSupport {
        self.support[browser.index()]
    }
}

/// Immutable feature table with id lookup and stable declaration order.
#[derive(Debug, Clone)]
pub struct FeatureCatalog {
    features: Vec<FeatureDefinition>,
    by_id: HashMap<&'static str, usize>,
}

impl FeatureCatalog {
    /// Build a catalog from a feature list. Ids must be unique.
    pub fn new(features: Vec<FeatureDefinition>) -> Self {
        let mut by_id = HashMap::with_capacity(features.len());
        for (index, feature) in features.iter().enumerate() {
            let previous = by_id.insert(feature.id, index);
            assert!(
                previous.is_none(),
                "duplicate feature id in catalog: {}",
                feature.id
            );
        }
        Self { features, by_id }
    }

    /// The builtin table shipped with the engine.
    pub fn builtin() -> Self {
        Self::new(features::builtin_features())
    }

    pub fn lookup(&self, id: &str) -> Option<&FeatureDefinition> {
        self.by_id.get(id).map(|&index| &self.features[index])
    }

    pub fn get(&self, id: &str) -> Result<&FeatureDefinition, UnknownFeatureError> {
        self.lookup(id).ok_or_else(|| UnknownFeatureError {
            feature_id: id.to_string(),
        })
    }

    /// Declaration position of a feature, used as the sort tie-break.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub fn features_for(
        &self,
        category: FeatureCategory,
    ) -> impl Iterator<Item = &FeatureDefinition> {
        self.features.iter().filter(move |f| f.category == category)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeatureDefinition> {
        self.features.iter()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
