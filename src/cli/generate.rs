//! Generate command - totals, chart PNG and summary for one vessel

use crate::chart::{self, ChartOptions};
use crate::config::UserConfig;
use crate::dashboard::{self, DashboardError, Request};
use crate::models::{Severity, SeverityCounts};
use crate::reporters::{self, OutputFormat};
use anyhow::{Context, Result};
use console::style;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub(super) struct GenerateArgs {
    pub name: String,
    pub input: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub format: Option<String>,
    pub report: Option<PathBuf>,
    pub scale: Option<u32>,
    pub no_chart: bool,
    pub fail_on: Option<String>,
}

/// Run the generate command
pub(super) fn run(args: GenerateArgs) -> Result<()> {
    let config = UserConfig::load()?;

    // Name is validated before any input is read so an empty name never
    // blocks on stdin
    if args.name.is_empty() {
        exit_with(&DashboardError::MissingVesselName);
    }

    let text = super::read_report(args.input.as_deref())?;
    let outcome = match dashboard::generate(&Request {
        vessel_name: &args.name,
        report_text: &text,
    }) {
        Ok(outcome) => outcome,
        Err(e) => exit_with(&e),
    };

    let format = match args.format.as_deref() {
        Some(f) => OutputFormat::from_str(f)?,
        None => config.output_format(),
    };

    if !args.no_chart {
        let dir = args.output_dir.unwrap_or_else(|| config.output_dir());
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
        let path = dir.join(outcome.chart_filename());
        let options = ChartOptions {
            scale: args.scale.unwrap_or_else(|| config.chart_scale()),
        };
        chart::save(&outcome, options, &path)
            .with_context(|| format!("Failed to write chart {}", path.display()))?;
        eprintln!(
            "{} Chart saved to {}",
            style("📥").bold(),
            style(path.display()).cyan()
        );
    }

    let summary = reporters::report_with_format(&outcome, format)?;
    if let Some(out_path) = args.report.as_deref().map(|p| report_path(p, format)) {
        std::fs::write(&out_path, &summary)
            .with_context(|| format!("Failed to write report {}", out_path.display()))?;
        eprintln!(
            "{} Report saved to {}",
            style("📄").bold(),
            style(out_path.display()).cyan()
        );
    } else {
        println!("{}", summary);
    }

    eprintln!(
        "{} Generated for {}",
        style("✅").green(),
        style(&outcome.vessel_name).bold()
    );

    check_fail_threshold(&args.fail_on, &outcome.counts)
}

/// `--report` path, with the format's extension added when it has none
fn report_path(path: &Path, format: OutputFormat) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(reporters::file_extension(format))
    }
}

/// Check if fail threshold is met
fn check_fail_threshold(fail_on: &Option<String>, counts: &SeverityCounts) -> Result<()> {
    if let Some(ref threshold) = fail_on {
        let min = super::parse_severity(threshold)
            .ok_or_else(|| anyhow::anyhow!("Unknown --fail-on severity '{}'", threshold))?;
        if meets_threshold(counts, min) {
            eprintln!("Failing due to --fail-on={} threshold", threshold);
            std::process::exit(1);
        }
    }
    Ok(())
}

/// Print a dashboard error the way the form would and exit 1
fn exit_with(err: &DashboardError) -> ! {
    if err.is_warning() {
        eprintln!("{} {}", style("⚠️  Warning:").yellow().bold(), err);
    } else {
        eprintln!("{} {}", style("⚠️  Error:").red().bold(), err);
    }
    std::process::exit(1);
}

/// True if any level at `min` or more severe has a non-zero count.
/// `Severity` orders Critical first, so "more severe" means `<=`.
fn meets_threshold(counts: &SeverityCounts, min: Severity) -> bool {
    counts.iter().any(|(sev, n)| sev <= min && n > 0)
}
