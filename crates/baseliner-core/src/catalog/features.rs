//! Builtin feature table
//!
//! Support data snapshot: mid-2024 stable releases (see
//! [`Browser::pinned_version`]). Updating this table is the primary
//! maintenance surface of the crate; nothing outside this module needs to
//! change when a feature's baseline status moves.

use super::{
    BaselineStatus, BrowserSupport, Detect, FeatureCategory, FeatureDefinition, FixTemplate,
    Severity, StructuralRule,
};

use BaselineStatus::{LimitedAvailability, NewlyAvailable, WidelyAvailable};
use BrowserSupport::{Flagged, Never, Since};
use FeatureCategory::{Css, Html, Js};

pub(super) fn builtin_features() -> Vec<FeatureDefinition> {
    vec![
        // JavaScript / TypeScript
        FeatureDefinition {
            id: "js-nullish-coalescing",
            name: "Nullish coalescing operator (??)",
            description: "Returns the right operand only when the left is null or undefined.",
            category: Js,
            detect: Detect::Pattern(r"\?\?"),
            baseline: NewlyAvailable,
            support: [Since("80"), Since("72"), Since("13.1"), Since("80")],
            severity: Severity::Low,
            suggestion:
                "Replace `??` with `||` when a falsy fallback is acceptable, or add an explicit \
                 null check to keep exact semantics on older engines.",
            fix: FixTemplate::Inline { replace_with: "||" },
            mdn: Some(
                "https://developer.mozilla.org/docs/Web/JavaScript/Reference/Operators/Nullish_coalescing",
            ),
        },
        FeatureDefinition {
            id: "js-optional-chaining",
            name: "Optional chaining (?.)",
            description: "Short-circuits property access when the receiver is null or undefined.",
            category: Js,
            detect: Detect::Pattern(r"\?\."),
            baseline: WidelyAvailable,
            support: [Since("80"), Since("74"), Since("13.1"), Since("80")],
            severity: Severity::Low,
            suggestion: "Guard each property access explicitly where pre-2020 engines must run.",
            fix: FixTemplate::Advisory,
            mdn: Some(
                "https://developer.mozilla.org/docs/Web/JavaScript/Reference/Operators/Optional_chaining",
            ),
        },
        FeatureDefinition {
            id: "js-array-at",
            name: "Array.prototype.at()",
            description: "Index access supporting negative offsets from the end.",
            category: Js,
            detect: Detect::Pattern(r"\.at\s*\("),
            baseline: NewlyAvailable,
            support: [Since("92"), Since("90"), Since("15.4"), Since("92")],
            severity: Severity::Low,
            suggestion:
                "Use arr[arr.length - 1] style indexing where negative offsets are needed, or \
                 load the core-js es.array.at polyfill.",
            fix: FixTemplate::Manual,
            mdn: Some(
                "https://developer.mozilla.org/docs/Web/JavaScript/Reference/Global_Objects/Array/at",
            ),
        },
        FeatureDefinition {
            id: "js-private-class-fields",
            name: "Private class fields (#name)",
            description: "Hard-private instance state declared with a # sigil inside class bodies.",
            category: Js,
            detect: Detect::Structural(StructuralRule::PrivateClassField),
            baseline: NewlyAvailable,
            support: [Since("74"), Since("90"), Since("14.1"), Since("79")],
            severity: Severity::Medium,
            suggestion:
                "Use WeakMap-backed private state or an underscore naming convention when older \
                 engines must instantiate this class.",
            fix: FixTemplate::Manual,
            mdn: Some(
                "https://developer.mozilla.org/docs/Web/JavaScript/Reference/Classes/Private_properties",
            ),
        },
        FeatureDefinition {
            id: "js-top-level-await",
            name: "Top-level await",
            description: "await outside any async function, legal only in ES modules.",
            category: Js,
            detect: Detect::Structural(StructuralRule::TopLevelAwait),
            baseline: LimitedAvailability,
            support: [Since("89"), Since("89"), Since("15"), Since("89")],
            severity: Severity::High,
            suggestion:
                "Wrap the awaiting code in an async IIFE so classic scripts and older browsers \
                 can run it.",
            fix: FixTemplate::Prepend {
                block: "compat: top-level await only runs inside ES modules; wrap this logic in \
                        an async function for classic-script consumers.",
            },
            mdn: Some(
                "https://developer.mozilla.org/docs/Web/JavaScript/Reference/Operators/await#top_level_await",
            ),
        },
        FeatureDefinition {
            id: "js-structured-clone",
            name: "structuredClone()",
            description: "Deep-copies structured data, including cyclic references.",
            category: Js,
            detect: Detect::Pattern(r"\bstructuredClone\s*\("),
            baseline: NewlyAvailable,
            support: [Since("98"), Since("94"), Since("15.4"), Since("98")],
            severity: Severity::Medium,
            suggestion:
                "Polyfill structuredClone (core-js) or fall back to \
                 JSON.parse(JSON.stringify(value)) for JSON-safe data.",
            fix: FixTemplate::Prepend {
                block: "compat: structuredClone needs a polyfill on pre-2022 engines; core-js \
                        ships one as web.structured-clone.",
            },
            mdn: Some("https://developer.mozilla.org/docs/Web/API/Window/structuredClone"),
        },
        FeatureDefinition {
            id: "js-intl-segmenter",
            name: "Intl.Segmenter",
            description: "Locale-aware text segmentation into graphemes, words and sentences.",
            category: Js,
            detect: Detect::Pattern(r"Intl\.Segmenter"),
            baseline: LimitedAvailability,
            support: [Since("87"), Never, Since("14.1"), Since("87")],
            severity: Severity::High,
            suggestion:
                "Feature-detect Intl.Segmenter and load a segmenter polyfill for Firefox users.",
            fix: FixTemplate::Prepend {
                block: "compat: Intl.Segmenter is unavailable in Firefox; load a segmenter \
                        polyfill before this code runs.",
            },
            mdn: Some(
                "https://developer.mozilla.org/docs/Web/JavaScript/Reference/Global_Objects/Intl/Segmenter",
            ),
        },
        FeatureDefinition {
            id: "js-clipboard-api",
            name: "Async Clipboard API",
            description: "Promise-based clipboard read/write via navigator.clipboard.",
            category: Js,
            detect: Detect::Pattern(r"navigator\.clipboard"),
            baseline: NewlyAvailable,
            support: [Since("66"), Flagged, Since("13.1"), Since("79")],
            severity: Severity::Medium,
            suggestion:
                "Feature-detect navigator.clipboard and fall back to \
                 document.execCommand('copy'); clipboard read stays behind a flag in Firefox.",
            fix: FixTemplate::Prepend {
                block: "compat: clipboard access is flag-gated in Firefox; feature-detect \
                        navigator.clipboard and keep an execCommand fallback.",
            },
            mdn: Some("https://developer.mozilla.org/docs/Web/API/Clipboard_API"),
        },
        // CSS
        FeatureDefinition {
            id: "css-has",
            name: ":has() selector",
            description: "Parent selector matching elements by their descendants.",
            category: Css,
            detect: Detect::Pattern(r":has\("),
            baseline: NewlyAvailable,
            support: [Since("105"), Since("121"), Since("15.4"), Since("105")],
            severity: Severity::Medium,
            suggestion:
                "Restructure the selector or toggle a class from script where :has() support \
                 cannot be assumed.",
            fix: FixTemplate::Manual,
            mdn: Some("https://developer.mozilla.org/docs/Web/CSS/:has"),
        },
        FeatureDefinition {
            id: "css-container-queries",
            name: "Container queries (@container)",
            description: "Styles elements based on the size of an ancestor container.",
            category: Css,
            detect: Detect::Pattern(r"@container"),
            baseline: NewlyAvailable,
            support: [Since("105"), Since("110"), Since("16"), Since("105")],
            severity: Severity::Medium,
            suggestion:
                "Keep a media-query fallback for layout-critical rules; @container blocks are \
                 ignored by 2022-era browsers.",
            fix: FixTemplate::Prepend {
                block: "compat: @container rules are ignored by 2022-era browsers; keep a \
                        media-query fallback for critical layout.",
            },
            mdn: Some("https://developer.mozilla.org/docs/Web/CSS/@container"),
        },
        FeatureDefinition {
            id: "css-scrollbar-gutter",
            name: "scrollbar-gutter",
            description: "Reserves layout space for the scrollbar to prevent reflow.",
            category: Css,
            detect: Detect::Pattern(r"scrollbar-gutter"),
            baseline: LimitedAvailability,
            support: [Since("94"), Since("97"), Never, Since("94")],
            severity: Severity::Medium,
            suggestion:
                "Reserve space with padding or margin as a fallback; Safari ignores \
                 scrollbar-gutter entirely.",
            fix: FixTemplate::Prepend {
                block: "compat: scrollbar-gutter does nothing in Safari; reserve space with \
                        padding or margin as a fallback.",
            },
            mdn: Some("https://developer.mozilla.org/docs/Web/CSS/scrollbar-gutter"),
        },
        FeatureDefinition {
            id: "css-view-transitions",
            name: "View transitions",
            description: "Animated transitions between document states via ::view-transition.",
            category: Css,
            detect: Detect::Pattern(r"view-transition"),
            baseline: LimitedAvailability,
            support: [Since("111"), Never, Since("18"), Since("111")],
            severity: Severity::High,
            suggestion:
                "Treat view transitions as progressive enhancement: guard with @supports and \
                 keep instant navigation as the fallback.",
            fix: FixTemplate::Prepend {
                block: "compat: view transitions are Chromium-only today; guard with @supports \
                        and keep instant navigation as the fallback.",
            },
            mdn: Some("https://developer.mozilla.org/docs/Web/API/View_Transitions_API"),
        },
        FeatureDefinition {
            id: "css-text-wrap-balance",
            name: "text-wrap: balance",
            description: "Balances line lengths in short runs of text such as headlines.",
            category: Css,
            detect: Detect::Pattern(r"text-wrap\s*:\s*balance"),
            baseline: NewlyAvailable,
            support: [Since("114"), Since("121"), Since("17.5"), Since("114")],
            severity: Severity::Low,
            suggestion:
                "Safe to ship as progressive enhancement; headlines wrap normally where the \
                 property is unsupported.",
            fix: FixTemplate::Advisory,
            mdn: Some("https://developer.mozilla.org/docs/Web/CSS/text-wrap"),
        },
        // HTML
        FeatureDefinition {
            id: "html-dialog",
            name: "<dialog> element",
            description: "Native modal and non-modal dialog boxes with focus management.",
            category: Html,
            detect: Detect::Pattern(r"<dialog[\s>]"),
            baseline: NewlyAvailable,
            support: [Since("37"), Since("98"), Since("15.4"), Since("79")],
            severity: Severity::Medium,
            suggestion:
                "Include the dialog-polyfill package to cover pre-2022 Firefox and Safari.",
            fix: FixTemplate::Prepend {
                block: "compat: include the dialog-polyfill package to support pre-2022 \
                        browsers.",
            },
            mdn: Some("https://developer.mozilla.org/docs/Web/HTML/Element/dialog"),
        },
        FeatureDefinition {
            id: "html-popover",
            name: "popover attribute",
            description: "Declarative popover behavior with light-dismiss and top-layer stacking.",
            category: Html,
            detect: Detect::Pattern(r"\spopover[\s=>]"),
            baseline: LimitedAvailability,
            support: [Since("114"), Since("125"), Since("17"), Since("114")],
            severity: Severity::High,
            suggestion:
                "Provide a scripted toggle fallback; popover is too recent to rely on without \
                 feature detection.",
            fix: FixTemplate::Manual,
            mdn: Some("https://developer.mozilla.org/docs/Web/API/Popover_API"),
        },
        FeatureDefinition {
            id: "html-lazy-loading",
            name: "Lazy loading (loading=\"lazy\")",
            description: "Defers offscreen image and iframe loading without script.",
            category: Html,
            detect: Detect::Pattern(r#"loading\s*=\s*["']lazy["']"#),
            baseline: WidelyAvailable,
            support: [Since("77"), Since("75"), Since("15.4"), Since("79")],
            severity: Severity::Low,
            suggestion: "No action needed; browsers without support load eagerly.",
            fix: FixTemplate::Advisory,
            mdn: Some("https://developer.mozilla.org/docs/Web/Performance/Lazy_loading"),
        },
        FeatureDefinition {
            id: "html-search-element",
            name: "<search> element",
            description: "Semantic container for search and filtering controls.",
            category: Html,
            detect: Detect::Pattern(r"<search[\s>]"),
            baseline: LimitedAvailability,
            support: [Since("118"), Since("118"), Since("17"), Since("118")],
            severity: Severity::Low,
            suggestion:
                "Use <div role=\"search\"> where assistive-technology support for <search> \
                 cannot be assumed.",
            fix: FixTemplate::Manual,
            mdn: Some("https://developer.mozilla.org/docs/Web/HTML/Element/search"),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::super::{Browser, FeatureCatalog};
    use super::*;

    #[test]
    fn table_mixes_baseline_statuses() {
        let features = builtin_features();

        let widely = features.iter().filter(|f| f.baseline == WidelyAvailable);
        let newly = features.iter().filter(|f| f.baseline == NewlyAvailable);
        let limited = features
            .iter()
            .filter(|f| f.baseline == LimitedAvailability);

        assert!(widely.count() > 0, "need widely-available entries");
        assert!(newly.count() > 0, "need newly-available entries");
        assert!(limited.count() > 0, "need limited-availability entries");
    }

    #[test]
    fn scrollbar_gutter_is_absent_from_safari() {
        let catalog = FeatureCatalog::builtin();
        let feature = catalog.lookup("css-scrollbar-gutter").unwrap();

        assert_eq!(feature.support_for(Browser::Safari), Never);
        assert_eq!(feature.support_for(Browser::Chrome), Since("94"));
    }

    #[test]
    fn clipboard_is_flag_gated_in_firefox() {
        let catalog = FeatureCatalog::builtin();
        let feature = catalog.lookup("js-clipboard-api").unwrap();

        assert_eq!(feature.support_for(Browser::Firefox), Flagged);
    }

    #[test]
    fn manual_fixes_exist_for_refactor_heavy_features() {
        let features = builtin_features();

        let manual = features
            .iter()
            .filter(|f| f.fix == FixTemplate::Manual)
            .count();

        assert!(manual > 0);
    }

    #[test]
    fn every_pattern_rule_compiles() {
        for feature in builtin_features() {
            if let Detect::Pattern(pattern) = feature.detect {
                assert!(
                    regex::Regex::new(pattern).is_ok(),
                    "pattern for '{}' does not compile",
                    feature.id
                );
            }
        }
    }

    #[test]
    fn mdn_links_point_at_mdn() {
        for feature in builtin_features() {
            if let Some(link) = feature.mdn {
                assert!(link.starts_with("https://developer.mozilla.org/"));
            }
        }
    }
}
