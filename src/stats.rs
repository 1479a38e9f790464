//! Run statistics.
//!
//! Counts what the pipeline saw and skipped so a run can be audited after
//! the fact. Nothing here affects the tally itself.

use crate::core::Classification;

/// Counters for a single tally run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Sources whose diagnostics file was read
    pub sources_processed: u64,
    /// Sources skipped for carrying the exclusion marker
    pub sources_excluded: u64,
    /// Sources skipped because their key or file was unusable
    pub sources_failed: u64,
    /// Entries under `data` across all files
    pub records_read: u64,
    /// Entries without a `diagnostics` field
    pub records_without_diagnostics: u64,
    /// Entries whose `diagnostics` map was empty
    pub records_empty: u64,
    /// Entries dropped for a bad timestamp or diagnostics field
    pub records_malformed: u64,
    /// Records inside a labeled window
    pub true_positive_records: u64,
    /// Records outside every labeled window
    pub false_positive_records: u64,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_classification(&mut self, classification: Option<Classification>) {
        match classification {
            Some(Classification::TruePositive) => self.true_positive_records += 1,
            Some(Classification::FalsePositive) => self.false_positive_records += 1,
            None => self.records_empty += 1,
        }
    }

    /// Get a summary string for display.
    pub fn summary(&self) -> String {
        format!(
            "Run Statistics:\n\
             - Sources processed: {}\n\
             - Sources excluded: {}\n\
             - Sources failed: {}\n\
             - Records read: {}\n\
             - Records without diagnostics: {}\n\
             - Records with empty diagnostics: {}\n\
             - Records malformed: {}\n\
             - True positive records: {}\n\
             - False positive records: {}",
            self.sources_processed,
            self.sources_excluded,
            self.sources_failed,
            self.records_read,
            self.records_without_diagnostics,
            self.records_empty,
            self.records_malformed,
            self.true_positive_records,
            self.false_positive_records
        )
    }
}
