//! The tally pipeline: windows and diagnostics in, counts out.

use crate::config::{Config, ErrorPolicy};
use crate::core::{DiagnosticsFile, DiagnosticsLayout, TallyTable, Window, WindowSet};
use crate::error::TallyError;
use crate::stats::RunStats;
use tracing::{debug, info, warn};

/// Result of a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutcome {
    pub tally: TallyTable,
    pub stats: RunStats,
}

/// Drives one pass over every labeled source.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: Config,
    layout: DiagnosticsLayout,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        let layout = DiagnosticsLayout::from_config(&config);
        Self { config, layout }
    }

    /// Load the configured windows file and tally every source in it.
    ///
    /// A windows file that cannot be loaded always aborts, whatever the policy.
    pub fn run(&self) -> Result<RunOutcome, TallyError> {
        let windows = WindowSet::load(&self.config.windows_path, |key| {
            self.config.is_excluded(key)
        })?;
        info!(
            "Loaded windows for {} sources ({} excluded) from {:?}",
            windows.len(),
            windows.excluded_len(),
            self.config.windows_path
        );
        self.run_with_windows(&windows)
    }

    /// Tally every included source in `windows`, in key order.
    ///
    /// Excluded sources were set aside when `windows` was loaded and are only
    /// counted here.
    pub fn run_with_windows(&self, windows: &WindowSet) -> Result<RunOutcome, TallyError> {
        let mut outcome = RunOutcome::default();
        for (source_key, _) in windows.excluded() {
            debug!("Skipping excluded source {source_key}");
            outcome.stats.sources_excluded += 1;
        }

        for (source_key, source_windows) in windows.iter() {
            match self.process_source(source_key, source_windows, &mut outcome) {
                Ok(()) => outcome.stats.sources_processed += 1,
                Err(e) if self.config.error_policy == ErrorPolicy::SkipMalformed => {
                    warn!("Skipping source {source_key}: {e}");
                    outcome.stats.sources_failed += 1;
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            "Tallied {} sources ({} excluded, {} failed)",
            outcome.stats.sources_processed,
            outcome.stats.sources_excluded,
            outcome.stats.sources_failed
        );
        Ok(outcome)
    }

    /// Count one source's records.
    ///
    /// Source-level failures happen before any record is counted, so a skipped
    /// source never leaves partial counts behind.
    fn process_source(
        &self,
        source_key: &str,
        windows: &[Window],
        outcome: &mut RunOutcome,
    ) -> Result<(), TallyError> {
        let path = self.layout.path_for(source_key)?;
        let file = DiagnosticsFile::load(&path)?;
        debug!("Read {} entries from {:?}", file.len(), path);

        for decoded in file.records() {
            outcome.stats.records_read += 1;
            match decoded {
                Ok(Some(record)) => {
                    let classification = outcome.tally.record(&record, windows);
                    outcome.stats.record_classification(classification);
                }
                Ok(None) => outcome.stats.records_without_diagnostics += 1,
                Err(e)
                    if e.is_record_level()
                        && self.config.error_policy == ErrorPolicy::SkipMalformed =>
                {
                    warn!("Skipping record in {source_key}: {e}");
                    outcome.stats.records_malformed += 1;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}
