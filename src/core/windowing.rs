//! Labeled anomaly windows.
//!
//! The windows file maps each source key to a list of `[start, end]`
//! timestamp pairs. A window marks a period where the source is known to be
//! anomalous.

use crate::core::timestamp::parse_window_timestamp;
use crate::error::TallyError;
use chrono::NaiveDateTime;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// A labeled time range. `start <= end` is assumed, not checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// First instant of the anomaly
    pub start: NaiveDateTime,
    /// Last instant of the anomaly
    pub end: NaiveDateTime,
}

impl Window {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Check if a timestamp falls within this window, both ends inclusive.
    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        self.start <= timestamp && timestamp <= self.end
    }
}

/// True if any of `windows` contains `timestamp`.
pub fn any_contains(windows: &[Window], timestamp: NaiveDateTime) -> bool {
    windows.iter().any(|w| w.contains(timestamp))
}

/// All labeled windows, keyed by source.
///
/// Sources rejected by the exclusion predicate are only recorded by key; their
/// entries are never parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowSet {
    sources: BTreeMap<String, Vec<Window>>,
    excluded: BTreeMap<String, usize>,
}

impl WindowSet {
    /// Load and parse a windows file, skipping sources for which `exclude` is true.
    pub fn load(path: &Path, exclude: impl Fn(&str) -> bool) -> Result<Self, TallyError> {
        let content = std::fs::read_to_string(path).map_err(|e| TallyError::io(path, e))?;
        Self::parse(path, &content, exclude)
    }

    /// Parse a windows document held in memory.
    pub fn from_json_str(json: &str, exclude: impl Fn(&str) -> bool) -> Result<Self, TallyError> {
        Self::parse(Path::new("<memory>"), json, exclude)
    }

    fn parse(path: &Path, json: &str, exclude: impl Fn(&str) -> bool) -> Result<Self, TallyError> {
        let raw: BTreeMap<String, Value> =
            serde_json::from_str(json).map_err(|e| TallyError::json(path, e))?;

        let mut set = Self::default();
        for (source_key, entries) in raw {
            if exclude(&source_key) {
                let count = entries.as_array().map(Vec::len).unwrap_or(0);
                set.excluded.insert(source_key, count);
                continue;
            }
            let pairs: Vec<Vec<String>> =
                serde_json::from_value(entries).map_err(|e| TallyError::WindowShape {
                    source_key: source_key.clone(),
                    message: e.to_string(),
                })?;
            let windows = pairs
                .iter()
                .map(|pair| parse_pair(&source_key, pair))
                .collect::<Result<Vec<_>, _>>()?;
            set.sources.insert(source_key, windows);
        }
        Ok(set)
    }

    /// Iterate included sources in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Window])> {
        self.sources
            .iter()
            .map(|(key, windows)| (key.as_str(), windows.as_slice()))
    }

    /// Iterate excluded sources in key order, with their unparsed entry counts.
    pub fn excluded(&self) -> impl Iterator<Item = (&str, usize)> {
        self.excluded
            .iter()
            .map(|(key, count)| (key.as_str(), *count))
    }

    /// Number of included sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Number of sources skipped by the exclusion predicate.
    pub fn excluded_len(&self) -> usize {
        self.excluded.len()
    }
}

fn parse_pair(source_key: &str, pair: &[String]) -> Result<Window, TallyError> {
    match pair {
        [start, end] => Ok(Window::new(
            parse_window_timestamp(start)?,
            parse_window_timestamp(end)?,
        )),
        _ => Err(TallyError::WindowShape {
            source_key: source_key.to_string(),
            message: format!("expected [start, end], got {} element(s)", pair.len()),
        }),
    }
}
