//! Reading per-source diagnostics output from a detection run.
//!
//! Each source key `dir/base` maps to one file under the results root:
//!
//! ```text
//! <root>/<dir>/<prefix>_<base>.<suffix>
//! ```
//!
//! The file holds `{"data": [{"timestamp": ..., "diagnostics": {...}}, ...]}`.
//! Only the keys of `diagnostics` are kept; their payloads are ignored.

use crate::config::Config;
use crate::core::timestamp::parse_record_timestamp;
use crate::error::TallyError;
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// One timestamped observation with the features that fired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticRecord {
    pub timestamp: NaiveDateTime,
    /// Fired feature identifiers, in key order
    pub features: Vec<String>,
}

impl DiagnosticRecord {
    pub fn new(timestamp: NaiveDateTime, features: Vec<String>) -> Self {
        Self {
            timestamp,
            features,
        }
    }
}

/// Where diagnostics files live for each source key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticsLayout {
    pub root: PathBuf,
    pub prefix: String,
    pub suffix: String,
}

impl DiagnosticsLayout {
    pub fn new(root: impl Into<PathBuf>, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.results_root.clone(),
            config.file_prefix.clone(),
            config.file_suffix.clone(),
        )
    }

    /// Derive the diagnostics path for `source_key`.
    ///
    /// The key must split on `/` into exactly two parts.
    pub fn path_for(&self, source_key: &str) -> Result<PathBuf, TallyError> {
        let parts: Vec<&str> = source_key.split('/').collect();
        let [dir, base] = parts.as_slice() else {
            return Err(TallyError::SourceKey(source_key.to_string()));
        };
        Ok(self
            .root
            .join(dir)
            .join(format!("{}_{}.{}", self.prefix, base, self.suffix)))
    }
}

#[derive(Debug, Deserialize)]
struct RawFile {
    data: Vec<RawEntry>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(default)]
    timestamp: Option<Value>,
    #[serde(default)]
    diagnostics: Option<Value>,
}

/// A parsed diagnostics file.
#[derive(Debug)]
pub struct DiagnosticsFile {
    path: PathBuf,
    entries: Vec<RawEntry>,
}

impl DiagnosticsFile {
    /// Read and parse the file at `path`.
    pub fn load(path: &Path) -> Result<Self, TallyError> {
        let content = std::fs::read_to_string(path).map_err(|e| TallyError::io(path, e))?;
        Self::from_json_str(path, &content)
    }

    /// Parse diagnostics JSON, attributing errors to `path`.
    pub fn from_json_str(path: &Path, json: &str) -> Result<Self, TallyError> {
        let raw: RawFile = serde_json::from_str(json).map_err(|e| TallyError::json(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            entries: raw.data,
        })
    }

    /// Number of entries under `data`, including ones without diagnostics.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Decode entries in file order.
    ///
    /// `Ok(None)` is an entry without a `diagnostics` field. An entry with
    /// diagnostics always has its timestamp parsed, even when the map is empty.
    pub fn records(&self) -> impl Iterator<Item = Result<Option<DiagnosticRecord>, TallyError>> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(move |(index, entry)| self.decode(index, entry))
    }

    fn decode(&self, index: usize, entry: &RawEntry) -> Result<Option<DiagnosticRecord>, TallyError> {
        let diagnostics = match &entry.diagnostics {
            None => return Ok(None),
            Some(Value::Object(map)) => map,
            Some(_) => {
                return Err(TallyError::DiagnosticsShape {
                    path: self.path.clone(),
                    index,
                })
            }
        };
        let timestamp = match &entry.timestamp {
            Some(Value::String(raw)) => parse_record_timestamp(raw)?,
            None => {
                return Err(TallyError::MissingTimestamp {
                    path: self.path.clone(),
                    index,
                })
            }
            Some(other) => {
                return Err(TallyError::Timestamp {
                    value: other.to_string(),
                    message: "expected a string".to_string(),
                })
            }
        };
        let mut features: Vec<String> = diagnostics.keys().cloned().collect();
        features.sort();
        Ok(Some(DiagnosticRecord::new(timestamp, features)))
    }
}
