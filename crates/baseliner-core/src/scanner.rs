//! Feature scanner
//!
//! Walks input text with the catalog's detection rules and produces raw
//! occurrences. Matching is purely lexical/structural: the input is never
//! parsed as a program, let alone executed, so arbitrary input is bounded
//! by catalog size times input length. Deduplication happens downstream in
//! the evaluator.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, error};

use crate::catalog::{Detect, FeatureCatalog, FeatureCategory, StructuralRule};
use crate::language::Language;

/// A single raw feature match: feature id, 1-based line of the first
/// matched character, and the matched token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub feature_id: &'static str,
    pub line: usize,
    pub matched: String,
}

enum Matcher {
    Pattern(Regex),
    Structural(StructuralRule),
}

struct CompiledRule {
    feature_id: &'static str,
    category: FeatureCategory,
    matcher: Matcher,
}

/// Compiled detection rules for one catalog. Built once per engine;
/// individual rules that fail to compile are logged and skipped so one bad
/// catalog entry cannot take down the rest of the scan.
pub struct Scanner {
    rules: Vec<CompiledRule>,
}

impl Scanner {
    pub fn new(catalog: &FeatureCatalog) -> Self {
        Self::with_disabled(catalog, &HashSet::new())
    }

    pub fn with_disabled(catalog: &FeatureCatalog, disabled: &HashSet<String>) -> Self {
        let mut rules = Vec::with_capacity(catalog.len());

        for feature in catalog.iter() {
            if disabled.contains(feature.id) {
                debug!(feature = feature.id, "detection disabled by configuration");
                continue;
            }

            let matcher = match feature.detect {
                Detect::Pattern(pattern) => match Regex::new(pattern) {
                    Ok(regex) => Matcher::Pattern(regex),
                    Err(source) => {
                        error!(
                            feature = feature.id,
                            %source,
                            "invalid detection pattern, rule skipped"
                        );
                        continue;
                    }
                },
                Detect::Structural(rule) => Matcher::Structural(rule),
            };

            rules.push(CompiledRule {
                feature_id: feature.id,
                category: feature.category,
                matcher,
            });
        }

        Self { rules }
    }

    /// Scan `code` with every rule applicable to `language`. Empty or
    /// whitespace-only input yields an empty sequence.
    pub fn scan(&self, code: &str, language: Language) -> Vec<Occurrence> {
        if code.trim().is_empty() {
            return Vec::new();
        }

        let mut occurrences = Vec::new();

        for &category in FeatureCategory::for_language(language) {
            self.scan_category(code, category, 0, &mut occurrences);
        }

        // HTML documents additionally get their embedded blocks scanned
        // with the sub-language rules, lines mapped back to the document.
        if language == Language::Html {
            for block in embedded_blocks(code, script_re()) {
                self.scan_category(
                    block.content,
                    FeatureCategory::Js,
                    block.line_offset,
                    &mut occurrences,
                );
            }
            for block in embedded_blocks(code, style_re()) {
                self.scan_category(
                    block.content,
                    FeatureCategory::Css,
                    block.line_offset,
                    &mut occurrences,
                );
            }
        }

        debug!(
            language = %language,
            count = occurrences.len(),
            "scan complete"
        );
        occurrences
    }

    fn scan_category(
        &self,
        code: &str,
        category: FeatureCategory,
        line_offset: usize,
        out: &mut Vec<Occurrence>,
    ) {
        for rule in self.rules.iter().filter(|r| r.category == category) {
            match &rule.matcher {
                Matcher::Pattern(regex) => {
                    for (index, line) in code.lines().enumerate() {
                        for found in regex.find_iter(line) {
                            out.push(Occurrence {
                                feature_id: rule.feature_id,
                                line: line_offset + index + 1,
                                matched: found.as_str().to_string(),
                            });
                        }
                    }
                }
                Matcher::Structural(StructuralRule::TopLevelAwait) => {
                    scan_top_level_await(code, line_offset, rule.feature_id, out);
                }
                Matcher::Structural(StructuralRule::PrivateClassField) => {
                    scan_private_class_fields(code, line_offset, rule.feature_id, out);
                }
            }
        }
    }
}

struct EmbeddedBlock<'a> {
    content: &'a str,
    /// Newlines preceding the block content; sub-line L maps to
    /// document line `line_offset + L`.
    line_offset: usize,
}

fn embedded_blocks<'a>(code: &'a str, block_re: &Regex) -> Vec<EmbeddedBlock<'a>> {
    block_re
        .captures_iter(code)
        .filter_map(|captures| {
            let content = captures.get(1)?;
            Some(EmbeddedBlock {
                content: content.as_str(),
                line_offset: newlines_before(code, content.start()),
            })
        })
        .collect()
}

fn script_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<script\b[^>]*>(.*?)</script>").unwrap())
}

fn style_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<style\b[^>]*>(.*?)</style>").unwrap())
}

fn private_field_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"#[A-Za-z_$][A-Za-z0-9_$]*").unwrap())
}

fn class_keyword_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bclass\b").unwrap())
}

fn newlines_before(code: &str, byte_index: usize) -> usize {
    code.as_bytes()[..byte_index]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
}

fn line_of(code: &str, byte_index: usize) -> usize {
    newlines_before(code, byte_index) + 1
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

/// Reports `await` at brace depth zero. Brace counting is a deliberate
/// approximation: braces inside string literals skew the depth, which is
/// acceptable for a lexical pre-check that never needs to be parser-exact.
fn scan_top_level_await(code: &str, line_offset: usize, feature_id: &'static str, out: &mut Vec<Occurrence>) {
    let mut depth: usize = 0;

    for (index, line) in code.lines().enumerate() {
        let effective = match line.find("//") {
            Some(comment) => &line[..comment],
            None => line,
        };

        let bytes = effective.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'{' => depth += 1,
                b'}' => depth = depth.saturating_sub(1),
                b'a' if depth == 0 => {
                    let boundary_before = i == 0 || !is_word_byte(bytes[i - 1]);
                    let after = i + "await".len();
                    let boundary_after = after >= bytes.len() || !is_word_byte(bytes[after]);
                    if boundary_before && boundary_after && effective[i..].starts_with("await") {
                        out.push(Occurrence {
                            feature_id,
                            line: line_offset + index + 1,
                            matched: "await".to_string(),
                        });
                        i = after;
                        continue;
                    }
                }
                _ => {}
            }
            i += 1;
        }
    }
}

/// Reports `#name` sigils inside `class` bodies: find each `class`
/// keyword, walk to its body's matching close brace, and match private
/// identifiers within that span.
fn scan_private_class_fields(
    code: &str,
    line_offset: usize,
    feature_id: &'static str,
    out: &mut Vec<Occurrence>,
) {
    for keyword in class_keyword_re().find_iter(code) {
        let Some(body) = class_body_span(code, keyword.end()) else {
            continue;
        };

        for found in private_field_re().find_iter(&code[body.clone()]) {
            out.push(Occurrence {
                feature_id,
                line: line_offset + line_of(code, body.start + found.start()),
                matched: found.as_str().to_string(),
            });
        }
    }
}

/// Byte range of a class body (exclusive of its braces), starting the
/// search at `from`. Returns the span up to end-of-input when the close
/// brace is missing, since malformed input must still scan.
fn class_body_span(code: &str, from: usize) -> Option<std::ops::Range<usize>> {
    let bytes = code.as_bytes();
    let open = bytes[from..].iter().position(|&b| b == b'{')? + from;

    let mut depth = 0usize;
    for (offset, &b) in bytes[open..].iter().enumerate() {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + 1..open + offset);
                }
            }
            _ => {}
        }
    }

    Some(open + 1..code.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanner() -> Scanner {
        Scanner::new(&FeatureCatalog::builtin())
    }

    fn ids(occurrences: &[Occurrence]) -> Vec<&'static str> {
        occurrences.iter().map(|o| o.feature_id).collect()
    }

    #[test]
    fn empty_input_yields_no_occurrences() {
        assert!(scanner().scan("", Language::JavaScript).is_empty());
        assert!(scanner().scan("   \n\t\n", Language::JavaScript).is_empty());
    }

    #[test]
    fn finds_nullish_coalescing_with_line_number() {
        let code = "const a = 1;\nconst x = a ?? b;\n";

        let occurrences = scanner().scan(code, Language::JavaScript);

        let nullish: Vec<_> = occurrences
            .iter()
            .filter(|o| o.feature_id == "js-nullish-coalescing")
            .collect();
        assert_eq!(nullish.len(), 1);
        assert_eq!(nullish[0].line, 2);
        assert_eq!(nullish[0].matched, "??");
    }

    #[test]
    fn reports_each_match_separately() {
        let code = "const x = a ?? b;\nconst y = c ?? d ?? e;\n";

        let occurrences = scanner().scan(code, Language::JavaScript);

        let nullish = occurrences
            .iter()
            .filter(|o| o.feature_id == "js-nullish-coalescing")
            .count();
        assert_eq!(nullish, 3);
    }

    #[test]
    fn javascript_rules_do_not_run_on_css() {
        let occurrences = scanner().scan("a ?? b", Language::Css);

        assert!(occurrences.is_empty());
    }

    #[test]
    fn css_rules_run_on_css_input() {
        let code = ".sidebar:has(.active) { color: red; }\nhtml { scrollbar-gutter: stable; }\n";

        let occurrences = scanner().scan(code, Language::Css);

        assert!(ids(&occurrences).contains(&"css-has"));
        assert!(ids(&occurrences).contains(&"css-scrollbar-gutter"));
    }

    #[test]
    fn typescript_uses_javascript_rules() {
        let occurrences = scanner().scan("const x: number = a ?? 0;", Language::TypeScript);

        assert!(ids(&occurrences).contains(&"js-nullish-coalescing"));
    }

    #[test]
    fn html_scans_document_and_embedded_blocks() {
        let code = "<dialog open>\n</dialog>\n<style>\n.x:has(a) { }\n</style>\n<script>\nconst v = a ?? b;\n</script>\n";

        let occurrences = scanner().scan(code, Language::Html);

        assert!(ids(&occurrences).contains(&"html-dialog"));
        assert!(ids(&occurrences).contains(&"css-has"));
        assert!(ids(&occurrences).contains(&"js-nullish-coalescing"));
    }

    #[test]
    fn embedded_block_lines_map_to_the_document() {
        let code = "<script>\nconst v = a ?? b;\n</script>\n";

        let occurrences = scanner().scan(code, Language::Html);

        let nullish = occurrences
            .iter()
            .find(|o| o.feature_id == "js-nullish-coalescing")
            .unwrap();
        assert_eq!(nullish.line, 2);
    }

    #[test]
    fn css_rules_do_not_run_on_raw_html_text() {
        // :has( outside a <style> block is not a stylesheet use
        let code = "<p>the :has( selector</p>";

        let occurrences = scanner().scan(code, Language::Html);

        assert!(!ids(&occurrences).contains(&"css-has"));
    }

    #[test]
    fn top_level_await_detected_at_depth_zero() {
        let code = "const data = await fetch('/api');\n";

        let occurrences = scanner().scan(code, Language::JavaScript);

        assert!(ids(&occurrences).contains(&"js-top-level-await"));
    }

    #[test]
    fn await_inside_function_body_is_not_top_level() {
        let code = "async function load() {\n  const data = await fetch('/api');\n}\n";

        let occurrences = scanner().scan(code, Language::JavaScript);

        assert!(!ids(&occurrences).contains(&"js-top-level-await"));
    }

    #[test]
    fn await_in_line_comment_is_ignored() {
        let code = "// await fetch later\nconst x = 1;\n";

        let occurrences = scanner().scan(code, Language::JavaScript);

        assert!(!ids(&occurrences).contains(&"js-top-level-await"));
    }

    #[test]
    fn private_field_inside_class_is_detected() {
        let code = "class Counter {\n  #count = 0;\n  get value() { return this.#count; }\n}\n";

        let occurrences = scanner().scan(code, Language::JavaScript);

        let fields: Vec<_> = occurrences
            .iter()
            .filter(|o| o.feature_id == "js-private-class-fields")
            .collect();
        assert!(!fields.is_empty());
        assert_eq!(fields[0].line, 2);
        assert_eq!(fields[0].matched, "#count");
    }

    #[test]
    fn hash_outside_class_body_is_not_a_private_field() {
        let code = "const color = '#ff0000';\n";

        let occurrences = scanner().scan(code, Language::JavaScript);

        assert!(!ids(&occurrences).contains(&"js-private-class-fields"));
    }

    #[test]
    fn unclosed_class_body_still_scans() {
        let code = "class Broken {\n  #field = 1;\n";

        let occurrences = scanner().scan(code, Language::JavaScript);

        assert!(ids(&occurrences).contains(&"js-private-class-fields"));
    }

    #[test]
    fn disabled_features_are_skipped() {
        let catalog = FeatureCatalog::builtin();
        let disabled: HashSet<String> = ["js-nullish-coalescing".to_string()].into();
        let scanner = Scanner::with_disabled(&catalog, &disabled);

        let occurrences = scanner.scan("const x = a ?? b;", Language::JavaScript);

        assert!(!ids(&occurrences).contains(&"js-nullish-coalescing"));
    }

    #[test]
    fn scan_never_reports_zero_line() {
        let code = "const x = a ?? b;";

        for occurrence in scanner().scan(code, Language::JavaScript) {
            assert!(occurrence.line >= 1);
        }
    }
}
