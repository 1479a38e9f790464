//! Rendering tallies for display.

use crate::core::TallyTable;
use std::collections::BTreeMap;

/// Output format for a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Two headed sections of `<feature> <count>` lines
    #[default]
    Text,
    /// The tally table as a JSON object
    Json,
}

impl ReportFormat {
    /// Parse a format name (`text` or `json`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

/// Render `tally` in `format`.
pub fn render(tally: &TallyTable, format: ReportFormat) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Text => Ok(render_text(tally)),
        ReportFormat::Json => serde_json::to_string_pretty(tally),
    }
}

/// Entries sorted ascending by count, ties by feature id.
pub fn sorted_by_count(bucket: &BTreeMap<String, u64>) -> Vec<(&str, u64)> {
    let mut entries: Vec<(&str, u64)> = bucket.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    // Stable sort over key-ordered input keeps ties alphabetical.
    entries.sort_by_key(|&(_, count)| count);
    entries
}

/// Plain text report with a blank line between sections.
pub fn render_text(tally: &TallyTable) -> String {
    let mut out = String::new();
    push_section(&mut out, "True Positives", tally.true_positives());
    out.push('\n');
    push_section(&mut out, "False Positives", tally.false_positives());
    out
}

fn push_section(out: &mut String, title: &str, bucket: &BTreeMap<String, u64>) {
    out.push_str(title);
    out.push('\n');
    for (feature, count) in sorted_by_count(bucket) {
        out.push_str(&format!("{feature} {count}\n"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Classification;

    fn sample() -> TallyTable {
        let mut tally = TallyTable::new();
        tally.increment(Classification::TruePositive, "spike", 5);
        tally.increment(Classification::TruePositive, "drift", 2);
        tally.increment(Classification::TruePositive, "alpha", 5);
        tally.increment(Classification::FalsePositive, "spike", 9);
        tally
    }

    #[test]
    fn test_sorted_ascending_by_count() {
        let tally = sample();
        let sorted = sorted_by_count(tally.true_positives());
        assert_eq!(sorted, vec![("drift", 2), ("alpha", 5), ("spike", 5)]);
    }

    #[test]
    fn test_text_layout() {
        let text = render_text(&sample());
        assert_eq!(
            text,
            "True Positives\ndrift 2\nalpha 5\nspike 5\n\nFalse Positives\nspike 9\n"
        );
    }

    #[test]
    fn test_empty_report_keeps_headers() {
        let text = render_text(&TallyTable::new());
        assert_eq!(text, "True Positives\n\nFalse Positives\n");
    }

    #[test]
    fn test_json_report() {
        let json = render(&sample(), ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["true_positives"]["spike"], 5);
        assert_eq!(value["false_positives"]["spike"], 9);
    }

    #[test]
    fn test_format_names() {
        assert_eq!(ReportFormat::from_name("JSON"), Some(ReportFormat::Json));
        assert_eq!(ReportFormat::from_name("text"), Some(ReportFormat::Text));
        assert_eq!(ReportFormat::from_name("csv"), None);
    }
}
