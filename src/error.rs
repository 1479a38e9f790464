//! Error types for loading windows and diagnostics.

use std::path::{Path, PathBuf};

/// Errors raised while loading inputs or classifying records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TallyError {
    /// A file could not be read
    Io { path: PathBuf, message: String },
    /// A file was not valid JSON or did not have the expected shape
    Json { path: PathBuf, message: String },
    /// A timestamp string did not match the expected format
    Timestamp { value: String, message: String },
    /// A window entry was not a `[start, end]` pair
    WindowShape { source_key: String, message: String },
    /// A source key did not split into `dir/base`
    SourceKey(String),
    /// A record carried diagnostics but no timestamp
    MissingTimestamp { path: PathBuf, index: usize },
    /// A record's `diagnostics` field was not an object
    DiagnosticsShape { path: PathBuf, index: usize },
}

impl TallyError {
    pub(crate) fn io(path: &Path, err: impl std::fmt::Display) -> Self {
        TallyError::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    pub(crate) fn json(path: &Path, err: impl std::fmt::Display) -> Self {
        TallyError::Json {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    /// Whether this error concerns a single record rather than a whole file.
    pub fn is_record_level(&self) -> bool {
        matches!(
            self,
            TallyError::Timestamp { .. }
                | TallyError::MissingTimestamp { .. }
                | TallyError::DiagnosticsShape { .. }
        )
    }
}

impl std::fmt::Display for TallyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TallyError::Io { path, message } => write!(f, "IO error reading {path:?}: {message}"),
            TallyError::Json { path, message } => {
                write!(f, "JSON error in {path:?}: {message}")
            }
            TallyError::Timestamp { value, message } => {
                write!(f, "Invalid timestamp '{value}': {message}")
            }
            TallyError::WindowShape {
                source_key,
                message,
            } => write!(f, "Invalid window for '{source_key}': {message}"),
            TallyError::SourceKey(key) => {
                write!(f, "Source key '{key}' does not split into dir/base")
            }
            TallyError::MissingTimestamp { path, index } => {
                write!(f, "Record {index} in {path:?} has diagnostics but no timestamp")
            }
            TallyError::DiagnosticsShape { path, index } => {
                write!(f, "Record {index} in {path:?} has non-object diagnostics")
            }
        }
    }
}

impl std::error::Error for TallyError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_level_classification() {
        let ts = TallyError::Timestamp {
            value: "bad".to_string(),
            message: "input contains invalid characters".to_string(),
        };
        assert!(ts.is_record_level());
        assert!(!TallyError::SourceKey("a".to_string()).is_record_level());
    }

    #[test]
    fn test_display_mentions_key() {
        let err = TallyError::SourceKey("a/b/c".to_string());
        assert!(err.to_string().contains("a/b/c"));
    }
}
