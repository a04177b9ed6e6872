//! vapt-chart library
//!
//! Parses VAPT report text into per-severity totals ([`parser::aggregate`]),
//! validates dashboard inputs ([`dashboard::generate`]) and renders the
//! result as a PNG chart or a text/JSON/HTML/Markdown summary.

pub mod chart;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod models;
pub mod parser;
pub mod reporters;

pub use dashboard::{DashboardError, Outcome, Request};
pub use models::{Severity, SeverityCounts};
pub use parser::aggregate;
