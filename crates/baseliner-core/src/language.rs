//! Input language selection and detection
//!
//! The engine analyzes four source languages. CSS feature rules run for
//! `css` and (via `<style>` blocks) `html`; JS feature rules run for
//! `javascript`, `typescript` and (via `<script>` blocks) `html`.

use std::fmt;
use std::str::FromStr;

use crate::error::AnalysisError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    JavaScript,
    TypeScript,
    Css,
    Html,
}

impl Language {
    /// Canonical lowercase name, as accepted by [`Language::from_str`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Css => "css",
            Language::Html => "html",
        }
    }

    /// Detect a language from a file extension, for callers that analyze
    /// files rather than pasted snippets. Unknown extensions are skipped
    /// rather than guessed.
    pub fn from_extension(ext: &str) -> Option<Language> {
        match ext.to_lowercase().as_str() {
            "js" | "mjs" | "cjs" | "jsx" => Some(Language::JavaScript),
            "ts" | "mts" | "cts" | "tsx" => Some(Language::TypeScript),
            "css" => Some(Language::Css),
            "html" | "htm" => Some(Language::Html),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "javascript" | "js" => Ok(Language::JavaScript),
            "typescript" | "ts" => Ok(Language::TypeScript),
            "css" => Ok(Language::Css),
            "html" => Ok(Language::Html),
            other => Err(AnalysisError::InvalidLanguage(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_names() {
        assert_eq!("javascript".parse::<Language>(), Ok(Language::JavaScript));
        assert_eq!("typescript".parse::<Language>(), Ok(Language::TypeScript));
        assert_eq!("css".parse::<Language>(), Ok(Language::Css));
        assert_eq!("html".parse::<Language>(), Ok(Language::Html));
    }

    #[test]
    fn parses_short_aliases_and_mixed_case() {
        assert_eq!("js".parse::<Language>(), Ok(Language::JavaScript));
        assert_eq!("TS".parse::<Language>(), Ok(Language::TypeScript));
        assert_eq!("CSS".parse::<Language>(), Ok(Language::Css));
    }

    #[test]
    fn rejects_unsupported_language() {
        let err = "markdown".parse::<Language>().unwrap_err();

        assert_eq!(err, AnalysisError::InvalidLanguage("markdown".to_string()));
    }

    #[test]
    fn detects_language_from_extension() {
        assert_eq!(Language::from_extension("js"), Some(Language::JavaScript));
        assert_eq!(Language::from_extension("mjs"), Some(Language::JavaScript));
        assert_eq!(Language::from_extension("tsx"), Some(Language::TypeScript));
        assert_eq!(Language::from_extension("CSS"), Some(Language::Css));
        assert_eq!(Language::from_extension("htm"), Some(Language::Html));
        assert_eq!(Language::from_extension("rs"), None);
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for lang in [
            Language::JavaScript,
            Language::TypeScript,
            Language::Css,
            Language::Html,
        ] {
            assert_eq!(lang.to_string().parse::<Language>(), Ok(lang));
        }
    }
}
