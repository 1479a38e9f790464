//! Per-feature true-positive / false-positive counting.

use crate::core::diagnostics::DiagnosticRecord;
use crate::core::windowing::{any_contains, Window};
use serde::Serialize;
use std::collections::BTreeMap;

/// Whether a record fell inside a labeled window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    TruePositive,
    FalsePositive,
}

impl Classification {
    /// Classify a record against its source's windows.
    pub fn of(record: &DiagnosticRecord, windows: &[Window]) -> Self {
        if any_contains(windows, record.timestamp) {
            Classification::TruePositive
        } else {
            Classification::FalsePositive
        }
    }
}

/// Feature counts split by classification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TallyTable {
    true_positives: BTreeMap<String, u64>,
    false_positives: BTreeMap<String, u64>,
}

impl TallyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify `record` and count each of its features once.
    ///
    /// Records without features leave the table untouched and return `None`.
    pub fn record(&mut self, record: &DiagnosticRecord, windows: &[Window]) -> Option<Classification> {
        if record.features.is_empty() {
            return None;
        }
        let classification = Classification::of(record, windows);
        for feature in &record.features {
            self.increment(classification, feature, 1);
        }
        Some(classification)
    }

    /// Add `count` to one feature in one bucket.
    pub fn increment(&mut self, classification: Classification, feature: &str, count: u64) {
        let bucket = match classification {
            Classification::TruePositive => &mut self.true_positives,
            Classification::FalsePositive => &mut self.false_positives,
        };
        *bucket.entry(feature.to_string()).or_insert(0) += count;
    }

    /// Fold another table's counts into this one.
    pub fn merge(&mut self, other: &TallyTable) {
        for (feature, count) in &other.true_positives {
            self.increment(Classification::TruePositive, feature, *count);
        }
        for (feature, count) in &other.false_positives {
            self.increment(Classification::FalsePositive, feature, *count);
        }
    }

    pub fn true_positives(&self) -> &BTreeMap<String, u64> {
        &self.true_positives
    }

    pub fn false_positives(&self) -> &BTreeMap<String, u64> {
        &self.false_positives
    }

    /// True-positive count for `feature`, zero if it never fired in a window.
    pub fn tp(&self, feature: &str) -> u64 {
        self.true_positives.get(feature).copied().unwrap_or(0)
    }

    /// False-positive count for `feature`.
    pub fn fp(&self, feature: &str) -> u64 {
        self.false_positives.get(feature).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.true_positives.is_empty() && self.false_positives.is_empty()
    }
}
