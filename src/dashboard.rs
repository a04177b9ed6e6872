//! Dashboard generation flow
//!
//! Validates the two user inputs, runs the aggregator and produces the
//! data every renderer needs. Input problems surface as [`DashboardError`]
//! with the exact message shown to the user.

use crate::models::SeverityCounts;
use crate::parser::{self, ScanSummary};
use serde::Serialize;
use thiserror::Error;

/// Suffix appended to the vessel name for the chart file
pub const CHART_FILE_SUFFIX: &str = "_PI_CHART.png";

/// User-facing conditions that stop a generation run
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DashboardError {
    #[error("Please enter a Vessel Name")]
    MissingVesselName,

    #[error("Please paste the report data")]
    MissingReportData,

    #[error("No valid data found. Check your copy-paste format.")]
    NoValidData,
}

impl DashboardError {
    /// The all-zero case is a warning rather than an input error
    pub fn is_warning(&self) -> bool {
        matches!(self, DashboardError::NoValidData)
    }
}

/// Inputs collected from the user
#[derive(Debug, Clone)]
pub struct Request<'a> {
    pub vessel_name: &'a str,
    pub report_text: &'a str,
}

/// Result of a successful run
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub vessel_name: String,
    /// Chart title: vessel name in uppercase
    pub title: String,
    pub counts: SeverityCounts,
    pub total: u64,
    pub data_rows: usize,
    pub skipped_rows: usize,
}

impl Outcome {
    fn new(vessel_name: &str, scan: ScanSummary) -> Self {
        Self {
            vessel_name: vessel_name.to_string(),
            title: vessel_name.to_uppercase(),
            counts: scan.totals,
            total: scan.totals.total(),
            data_rows: scan.data_rows,
            skipped_rows: scan.skipped_rows,
        }
    }

    /// File name for the rendered chart
    pub fn chart_filename(&self) -> String {
        chart_filename(&self.vessel_name)
    }
}

/// Validate inputs and aggregate the report.
///
/// The name is checked before the data, and the aggregator only runs when
/// both are present. Only a zero-length input counts as missing: the name
/// is used verbatim, and whitespace-only report text falls through to
/// [`DashboardError::NoValidData`].
pub fn generate(request: &Request<'_>) -> Result<Outcome, DashboardError> {
    let vessel_name = request.vessel_name;
    if vessel_name.is_empty() {
        return Err(DashboardError::MissingVesselName);
    }
    if request.report_text.is_empty() {
        return Err(DashboardError::MissingReportData);
    }

    let scan = parser::scan(request.report_text);
    tracing::info!(
        "Parsed report for {}: {} data rows, {} skipped ({})",
        vessel_name,
        scan.data_rows,
        scan.skipped_rows,
        scan.totals
    );

    if scan.totals.is_empty() {
        return Err(DashboardError::NoValidData);
    }

    Ok(Outcome::new(vessel_name, scan))
}

/// `<vessel name with spaces as underscores>_PI_CHART.png`
pub fn chart_filename(vessel_name: &str) -> String {
    format!("{}{}", vessel_name.replace(' ', "_"), CHART_FILE_SUFFIX)
}
