//! Configuration loading and parsing
//!
//! Provides functionality to load and parse `baseliner.toml` configuration
//! files: disabling catalog features and overriding their default severity.

use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::catalog::Severity;

pub const CONFIG_FILENAME: &str = "baseliner.toml";

const KNOWN_TOP_LEVEL_KEYS: &[&str] = &["features"];
const KNOWN_FEATURES_KEYS: &[&str] = &["disabled", "severity"];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid TOML in '{path}': {message}")]
    ParseError { path: PathBuf, message: String },
}

#[derive(Debug, Clone, Default)]
pub struct ConfigResult {
    pub config: Config,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub features: FeaturesConfig,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeaturesConfig {
    /// Feature ids whose detection rules are skipped entirely.
    pub disabled: Vec<String>,
    /// Per-feature severity replacing the catalog default.
    #[serde(default)]
    pub severity: HashMap<String, SeverityValue>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum SeverityValue {
    High,
    Medium,
    Low,
}

impl From<SeverityValue> for Severity {
    fn from(value: SeverityValue) -> Self {
        match value {
            SeverityValue::High => Severity::High,
            SeverityValue::Medium => Severity::Medium,
            SeverityValue::Low => Severity::Low,
        }
    }
}

impl Config {
    pub fn disabled_features(&self) -> HashSet<String> {
        self.features.disabled.iter().cloned().collect()
    }

    pub fn severity_overrides(&self) -> HashMap<String, Severity> {
        self.features
            .severity
            .iter()
            .map(|(id, value)| (id.clone(), (*value).into()))
            .collect()
    }
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    loop {
        let config_path = current.join(CONFIG_FILENAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if !current.pop() {
            return None;
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.message().to_string(),
    })
}

pub fn load_config_with_warnings(path: &Path) -> Result<ConfigResult, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.message().to_string(),
    })?;

    let warnings = detect_unknown_keys(&content);

    Ok(ConfigResult { config, warnings })
}

fn detect_unknown_keys(content: &str) -> Vec<String> {
    let mut warnings = Vec::new();

    let table: toml::Table = match content.parse() {
        Ok(t) => t,
        Err(_) => return warnings,
    };

    let known_top: HashSet<&str> = KNOWN_TOP_LEVEL_KEYS.iter().copied().collect();
    for key in table.keys() {
        if !known_top.contains(key.as_str()) {
            warnings.push(format!("Unknown config option: '{}'", key));
        }
    }

    if let Some(toml::Value::Table(features)) = table.get("features") {
        let known_features: HashSet<&str> = KNOWN_FEATURES_KEYS.iter().copied().collect();
        for key in features.keys() {
            if !known_features.contains(key.as_str()) {
                warnings.push(format!("Unknown config option in [features]: '{}'", key));
            }
        }
    }

    warnings
}

pub fn load_config_or_default(start_dir: &Path) -> Config {
    find_config_file(start_dir)
        .and_then(|path| load_config(&path).ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILENAME);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let config = load_config_or_default(dir.path());

        assert_eq!(config, Config::default());
    }

    #[test]
    fn parses_disabled_and_severity_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
[features]
disabled = ["html-lazy-loading"]

[features.severity]
css-has = "high"
"#,
        );

        let config = load_config(&path).unwrap();

        assert!(config.disabled_features().contains("html-lazy-loading"));
        assert_eq!(
            config.severity_overrides().get("css-has"),
            Some(&Severity::High)
        );
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "features = [broken");

        let err = load_config(&path).unwrap_err();

        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn unknown_keys_produce_warnings_not_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
browsers = ["chrome"]

[features]
disabled = []
strictness = "max"
"#,
        );

        let result = load_config_with_warnings(&path).unwrap();

        assert_eq!(result.warnings.len(), 2);
        assert!(result.warnings[0].contains("browsers"));
        assert!(result.warnings[1].contains("strictness"));
    }

    #[test]
    fn config_is_discovered_in_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "[features]\ndisabled = []\n");
        let nested = dir.path().join("src").join("components");
        fs::create_dir_all(&nested).unwrap();

        let found = find_config_file(&nested).unwrap();

        assert_eq!(found, dir.path().join(CONFIG_FILENAME));
    }

    #[test]
    fn severity_values_map_to_catalog_severities() {
        assert_eq!(Severity::from(SeverityValue::High), Severity::High);
        assert_eq!(Severity::from(SeverityValue::Medium), Severity::Medium);
        assert_eq!(Severity::from(SeverityValue::Low), Severity::Low);
    }
}
