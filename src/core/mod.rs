//! Core functionality for anomaly-tally.
//!
//! This module contains:
//! - Window loading and containment checks
//! - Diagnostics file layout and record decoding
//! - Per-feature true/false positive counting

pub mod diagnostics;
pub mod tally;
pub mod timestamp;
pub mod windowing;

// Re-export commonly used types
pub use diagnostics::{DiagnosticRecord, DiagnosticsFile, DiagnosticsLayout};
pub use tally::{Classification, TallyTable};
pub use timestamp::{parse_record_timestamp, parse_window_timestamp};
pub use windowing::{any_contains, Window, WindowSet};
