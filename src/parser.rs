//! Report text parser and severity aggregator
//!
//! Expected row layout, whitespace separated:
//!
//! ```text
//! <address> <critical> <high> <medium> <low> [info] [total] ...
//! ```
//!
//! A line counts as a data row only if it has at least five fields and the
//! second field is a pure digit string. Header rows and junk lines fall out
//! of that check without raising anything. A data row contributes all four
//! of its counts or none of them.

use crate::models::SeverityCounts;
use serde::Serialize;

/// Minimum fields per data row: address + four severity columns
const MIN_FIELDS: usize = 5;

/// Why a line did not contribute to the totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Blank line or fewer than five fields
    TooFewFields,
    /// Second field is not a digit string (header rows land here)
    NotNumeric,
    /// A severity column after the first failed to parse
    BadColumn,
}

/// Classification of a single input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Data(SeverityCounts),
    Skipped(SkipReason),
}

/// Totals plus bookkeeping about which lines were used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ScanSummary {
    pub totals: SeverityCounts,
    pub data_rows: usize,
    pub skipped_rows: usize,
}

/// Sum the four severity columns across every data row in `text`.
///
/// Never fails: malformed lines are dropped.
pub fn aggregate(text: &str) -> SeverityCounts {
    scan(text).totals
}

/// Like [`aggregate`], also reporting how many lines were accepted and skipped.
///
/// Blank lines are not counted as skipped.
pub fn scan(text: &str) -> ScanSummary {
    let mut summary = ScanSummary::default();
    if text.trim().is_empty() {
        return summary;
    }

    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match classify_line(line) {
            LineKind::Data(counts) => {
                summary.totals = summary.totals.saturating_add(counts);
                summary.data_rows += 1;
            }
            LineKind::Skipped(reason) => {
                tracing::debug!("Skipping line {}: {:?}", idx + 1, reason);
                summary.skipped_rows += 1;
            }
        }
    }

    summary
}

/// Classify one line as a data row or a skipped row
pub fn classify_line(line: &str) -> LineKind {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < MIN_FIELDS {
        return LineKind::Skipped(SkipReason::TooFewFields);
    }
    if !is_digits(fields[1]) {
        return LineKind::Skipped(SkipReason::NotNumeric);
    }

    let mut values = [0u64; 4];
    for (slot, field) in values.iter_mut().zip(&fields[1..MIN_FIELDS]) {
        match parse_count(field) {
            Some(n) => *slot = n,
            None => return LineKind::Skipped(SkipReason::BadColumn),
        }
    }

    let [critical, high, medium, low] = values;
    LineKind::Data(SeverityCounts::new(critical, high, medium, low))
}

/// Non-empty and ASCII digits only. Rejects signs, decimal points, separators.
fn is_digits(field: &str) -> bool {
    !field.is_empty() && field.bytes().all(|b| b.is_ascii_digit())
}

/// Parse a count column. `u64::from_str` alone would accept a leading `+`.
fn parse_count(field: &str) -> Option<u64> {
    if !is_digits(field) {
        return None;
    }
    field.parse().ok()
}
