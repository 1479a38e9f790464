//! Configuration for anomaly-tally.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration for a tally run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Labeled windows file mapping source keys to `[start, end]` pairs
    pub windows_path: PathBuf,

    /// Directory holding per-source diagnostics output
    pub results_root: PathBuf,

    /// Prefix joined to the base name with `_`
    pub file_prefix: String,

    /// Extension of diagnostics files
    pub file_suffix: String,

    /// Source keys containing this marker are never read
    pub exclude_marker: String,

    /// What to do with malformed records and sources
    pub error_policy: ErrorPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            windows_path: PathBuf::from("../labels/combined_windows.json"),
            results_root: PathBuf::from("results/inscriptive"),
            file_prefix: "inscriptive".to_string(),
            file_suffix: "diagnostics".to_string(),
            exclude_marker: "flatline".to_string(),
            error_policy: ErrorPolicy::FailFast,
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, falling back to defaults if it is absent.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content =
                std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Get the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("anomaly-tally")
            .join("config.json")
    }

    /// Whether `source_key` carries the exclusion marker.
    pub fn is_excluded(&self, source_key: &str) -> bool {
        !self.exclude_marker.is_empty() && source_key.contains(&self.exclude_marker)
    }

    /// Serialize for display.
    pub fn to_pretty_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::SerializeError(e.to_string()))
    }
}

/// How the pipeline reacts to bad input past the windows file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Abort on the first error
    #[default]
    FailFast,
    /// Log, count and skip malformed records and unreadable sources
    SkipMalformed,
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {e}"),
            ConfigError::ParseError(e) => write!(f, "Parse error: {e}"),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.results_root, PathBuf::from("results/inscriptive"));
        assert_eq!(config.file_prefix, "inscriptive");
        assert_eq!(config.file_suffix, "diagnostics");
        assert_eq!(config.error_policy, ErrorPolicy::FailFast);
    }

    #[test]
    fn test_exclusion_marker() {
        let config = Config::default();
        assert!(config.is_excluded("flatline/x"));
        assert!(config.is_excluded("realKnownCause/flatline_cpu"));
        assert!(!config.is_excluded("realKnownCause/cpu"));

        let config = Config {
            exclude_marker: String::new(),
            ..Config::default()
        };
        assert!(!config.is_excluded("flatline/x"));
    }

    #[test]
    fn test_partial_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"exclude_marker": "noise", "error_policy": "skip_malformed"}"#)
            .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.exclude_marker, "noise");
        assert_eq!(config.error_policy, ErrorPolicy::SkipMalformed);
        assert_eq!(config.file_prefix, "inscriptive");
    }

    #[test]
    fn test_missing_config_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, Config::default());
    }
}
