//! anomaly-tally - score detector diagnostics against labeled anomaly windows.
//!
//! A previous detection run writes one diagnostics file per data source. Each
//! record carries a timestamp and the set of features that fired. This crate
//! checks every record against the labeled anomaly windows for its source and
//! counts, per feature, how often it fired inside a window (true positive) or
//! outside all of them (false positive).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        anomaly-tally                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐                                            │
//! │  │   Windows   │──┐                                         │
//! │  │  (labels)   │  │   ┌─────────────┐   ┌─────────────┐    │
//! │  └─────────────┘  ├──▶│    Tally    │──▶│   Report    │    │
//! │  ┌─────────────┐  │   │ (tp / fp)   │   │ (text/json) │    │
//! │  │ Diagnostics │──┘   └─────────────┘   └─────────────┘    │
//! │  │ (per source)│                                            │
//! │  └─────────────┘                                            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use anomaly_tally::{report, Config, Pipeline};
//!
//! let outcome = Pipeline::new(Config::default()).run().expect("tally failed");
//! print!("{}", report::render_text(&outcome.tally));
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod stats;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigError, ErrorPolicy};
pub use core::{
    Classification, DiagnosticRecord, DiagnosticsFile, DiagnosticsLayout, TallyTable, Window,
    WindowSet,
};
pub use error::TallyError;
pub use pipeline::{Pipeline, RunOutcome};
pub use report::ReportFormat;
pub use stats::RunStats;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
