//! Best-effort auto-fixing
//!
//! Applies each issue's catalog fix template to the input text. This is a
//! textual transformation, not a parser-accurate rewrite: a fix whose token
//! can no longer be located is skipped, and the whole stage is skipped when
//! any issue's fix is unsafe to auto-apply. It never fails the analysis.

use tracing::{debug, warn};

use crate::catalog::{FeatureCatalog, FixTemplate};
use crate::language::Language;
use crate::report::CompatibilityIssue;

/// Narrow seam for an external suggestion service to refine fix wording.
/// The engine is fully deterministic with this absent: the catalog's canned
/// template text is the fallback and the default.
pub trait SuggestionProvider: Send + Sync {
    /// Return improved wording for the issue's `suggestedFix`, or `None`
    /// to keep the catalog template.
    fn refine(&self, issue: &CompatibilityIssue) -> Option<String>;
}

/// Default provider: always defers to the catalog templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogSuggestions;

impl SuggestionProvider for CatalogSuggestions {
    fn refine(&self, _issue: &CompatibilityIssue) -> Option<String> {
        None
    }
}

/// Rewrite `code` by applying the issues' fix templates.
///
/// Returns `None` when there is nothing to do, or when any issue's fix is
/// marked unsafe to auto-apply (the whole stage is skipped rather than
/// shipping a half-rewritten file). Inline substitutions run from the
/// highest first-occurrence line to the lowest and replace every occurrence
/// of the recorded token, so fixed output does not re-report the feature.
pub fn apply_fixes(
    code: &str,
    language: Language,
    catalog: &FeatureCatalog,
    issues: &[CompatibilityIssue],
) -> Option<String> {
    if issues.is_empty() {
        return None;
    }

    let mut inline: Vec<(usize, &str, &'static str)> = Vec::new();
    let mut blocks: Vec<&'static str> = Vec::new();

    for issue in issues {
        let Some(feature) = catalog.lookup(issue.feature_id) else {
            continue;
        };

        match feature.fix {
            FixTemplate::Manual => {
                debug!(
                    feature = issue.feature_id,
                    "fix requires a manual refactor, skipping auto-fix entirely"
                );
                return None;
            }
            FixTemplate::Inline { replace_with } => {
                inline.push((
                    issue.line_number.unwrap_or(0),
                    issue.matched.as_str(),
                    replace_with,
                ));
            }
            FixTemplate::Prepend { block } => {
                if !blocks.contains(&block) {
                    blocks.push(block);
                }
            }
            FixTemplate::Advisory => {}
        }
    }

    let mut fixed = code.to_string();
    let mut changed = false;

    inline.sort_by(|a, b| b.0.cmp(&a.0));
    for (_, matched, replacement) in inline {
        if matched.is_empty() || !fixed.contains(matched) {
            warn!(token = matched, "fix target no longer present, skipped");
            continue;
        }
        fixed = fixed.replace(matched, replacement);
        changed = true;
    }

    if !blocks.is_empty() {
        let mut output = comment_block(language, &blocks);
        output.push('\n');
        output.push_str(&fixed);
        fixed = output;
        changed = true;
    }

    changed.then_some(fixed)
}

fn comment_block(language: Language, blocks: &[&str]) -> String {
    let lines: Vec<String> = blocks
        .iter()
        .map(|block| match language {
            Language::JavaScript | Language::TypeScript => format!("// {block}"),
            Language::Css => format!("/* {block} */"),
            Language::Html => format!("<!-- {block} -->"),
        })
        .collect();

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BaselineStatus, Severity};

    fn issue_for(catalog: &FeatureCatalog, id: &str, line: usize, matched: &str) -> CompatibilityIssue {
        let feature = catalog.lookup(id).expect("catalogued feature");
        CompatibilityIssue {
            feature_id: feature.id,
            matched: matched.to_string(),
            feature_name: feature.name.to_string(),
            description: feature.description.to_string(),
            severity: feature.severity,
            baseline_status: feature.baseline,
            browsers_unsupported: Vec::new(),
            suggested_fix: feature.suggestion.to_string(),
            line_number: Some(line),
            mdn_link: feature.mdn,
        }
    }

    #[test]
    fn no_issues_means_no_fixed_code() {
        let catalog = FeatureCatalog::builtin();

        let fixed = apply_fixes("const x = 1;", Language::JavaScript, &catalog, &[]);

        assert!(fixed.is_none());
    }

    #[test]
    fn inline_fix_replaces_every_occurrence() {
        let catalog = FeatureCatalog::builtin();
        let code = "const x = a ?? b;\nconst y = c ?? d;\n";
        let issues = vec![issue_for(&catalog, "js-nullish-coalescing", 1, "??")];

        let fixed = apply_fixes(code, Language::JavaScript, &catalog, &issues).unwrap();

        assert!(!fixed.contains("??"));
        assert_eq!(fixed.matches("||").count(), 2);
    }

    #[test]
    fn manual_fix_skips_the_whole_stage() {
        let catalog = FeatureCatalog::builtin();
        let code = "const last = arr.at(-1);\nconst x = a ?? b;\n";
        let issues = vec![
            issue_for(&catalog, "js-nullish-coalescing", 2, "??"),
            issue_for(&catalog, "js-array-at", 1, ".at("),
        ];

        let fixed = apply_fixes(code, Language::JavaScript, &catalog, &issues);

        assert!(fixed.is_none());
    }

    #[test]
    fn prepend_fix_uses_javascript_comment_syntax() {
        let catalog = FeatureCatalog::builtin();
        let code = "const words = new Intl.Segmenter('en');\n";
        let issues = vec![issue_for(&catalog, "js-intl-segmenter", 1, "Intl.Segmenter")];

        let fixed = apply_fixes(code, Language::JavaScript, &catalog, &issues).unwrap();

        assert!(fixed.starts_with("// compat:"));
        assert!(fixed.contains("Intl.Segmenter is unavailable in Firefox"));
        assert!(fixed.ends_with(code));
    }

    #[test]
    fn prepend_fix_uses_css_comment_syntax() {
        let catalog = FeatureCatalog::builtin();
        let code = "html { scrollbar-gutter: stable; }\n";
        let issues = vec![issue_for(&catalog, "css-scrollbar-gutter", 1, "scrollbar-gutter")];

        let fixed = apply_fixes(code, Language::Css, &catalog, &issues).unwrap();

        assert!(fixed.starts_with("/* compat:"));
        assert!(fixed.ends_with(code));
    }

    #[test]
    fn prepend_fix_uses_html_comment_syntax() {
        let catalog = FeatureCatalog::builtin();
        let code = "<dialog open></dialog>\n";
        let issues = vec![issue_for(&catalog, "html-dialog", 1, "<dialog ")];

        let fixed = apply_fixes(code, Language::Html, &catalog, &issues).unwrap();

        assert!(fixed.starts_with("<!-- compat:"));
    }

    #[test]
    fn duplicate_prepend_blocks_collapse() {
        let catalog = FeatureCatalog::builtin();
        let code = "a { scrollbar-gutter: stable; }\nb { scrollbar-gutter: stable; }\n";
        let issues = vec![
            issue_for(&catalog, "css-scrollbar-gutter", 1, "scrollbar-gutter"),
            issue_for(&catalog, "css-scrollbar-gutter", 2, "scrollbar-gutter"),
        ];

        let fixed = apply_fixes(code, Language::Css, &catalog, &issues).unwrap();

        assert_eq!(fixed.matches("compat:").count(), 1);
    }

    #[test]
    fn vanished_token_is_skipped_without_error() {
        let catalog = FeatureCatalog::builtin();
        let issues = vec![issue_for(&catalog, "js-nullish-coalescing", 1, "??")];

        // The token is gone; nothing changes, so there is no fixed output.
        let fixed = apply_fixes("const x = 1;", Language::JavaScript, &catalog, &issues);

        assert!(fixed.is_none());
    }

    #[test]
    fn advisory_only_issues_produce_no_fixed_code() {
        let catalog = FeatureCatalog::builtin();
        let code = "h1 { text-wrap: balance; }\n";
        let issues = vec![issue_for(&catalog, "css-text-wrap-balance", 1, "text-wrap: balance")];

        let fixed = apply_fixes(code, Language::Css, &catalog, &issues);

        assert!(fixed.is_none());
    }

    #[test]
    fn default_provider_keeps_catalog_wording() {
        let catalog = FeatureCatalog::builtin();
        let issue = issue_for(&catalog, "js-nullish-coalescing", 1, "??");

        assert!(CatalogSuggestions.refine(&issue).is_none());
    }

    #[test]
    fn issue_helper_reflects_catalog_metadata() {
        let catalog = FeatureCatalog::builtin();
        let issue = issue_for(&catalog, "js-nullish-coalescing", 1, "??");

        assert_eq!(issue.severity, Severity::Low);
        assert_eq!(issue.baseline_status, BaselineStatus::NewlyAvailable);
    }
}
