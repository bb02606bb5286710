//! Error taxonomy for the analysis pipeline
//!
//! Only structurally invalid calls are hard failures. Everything else
//! degrades to a partial result: bad catalog entries and unmatchable fixes
//! are logged and skipped, never surfaced to the caller.

/// Errors surfaced to the caller of [`crate::analyze`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    /// The requested language is not one of the supported inputs.
    #[error("unsupported language '{0}', expected one of: javascript, typescript, css, html")]
    InvalidLanguage(String),
}

/// An occurrence referenced a feature id absent from the catalog.
///
/// This indicates a scanner/catalog mismatch, which is a bug: it is caught
/// inside the evaluator, logged, and the offending group is dropped. It
/// never reaches the caller of `analyze`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("occurrence references feature '{feature_id}' absent from the catalog")]
pub struct UnknownFeatureError {
    pub feature_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_language_names_the_offender() {
        let err = AnalysisError::InvalidLanguage("cobol".to_string());

        assert!(err.to_string().contains("cobol"));
        assert!(err.to_string().contains("javascript"));
    }

    #[test]
    fn unknown_feature_names_the_id() {
        let err = UnknownFeatureError {
            feature_id: "js-unobtainium".to_string(),
        };

        assert!(err.to_string().contains("js-unobtainium"));
    }
}
