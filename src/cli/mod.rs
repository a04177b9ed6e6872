//! CLI command definitions and handlers

mod generate;
mod totals;

use crate::models::Severity;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Parse and validate chart scale (1-8)
fn parse_scale(s: &str) -> Result<u32, String> {
    let n: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("scale must be at least 1".to_string())
    } else if n > crate::chart::MAX_SCALE {
        Err(format!("scale cannot exceed {}", crate::chart::MAX_SCALE))
    } else {
        Ok(n)
    }
}

/// vapt-chart - VAPT severity calculator and chart generator
#[derive(Parser, Debug)]
#[command(name = "vapt-chart")]
#[command(
    version,
    about = "Sum pasted VAPT report rows per severity and render a vessel pie chart",
    long_about = "Reads vulnerability scan report rows (address, critical, high, medium, low, ...), \
sums the four severity columns, and writes a pie chart plus a colored summary table \
as <VESSEL_NAME>_PI_CHART.png.\n\n\
Header rows and malformed lines are skipped automatically.",
    after_help = "\
Examples:
  vapt-chart generate --name \"Coral Pearl\" --input report.txt
  pbpaste | vapt-chart generate --name \"Coral Pearl\"
  vapt-chart generate -n \"Coral Pearl\" -i report.txt --format html --report summary.html
  vapt-chart totals --input report.txt --json"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Calculate totals and generate the chart PNG for a vessel
    #[command(after_help = "\
Examples:
  vapt-chart generate -n \"Coral Pearl\" -i report.txt        Writes Coral_Pearl_PI_CHART.png
  vapt-chart generate -n \"Coral Pearl\" -i - < report.txt    Read rows from stdin
  vapt-chart generate -n \"Coral Pearl\" -i report.txt -o out  Write the PNG into out/
  vapt-chart generate -n \"Coral Pearl\" -i report.txt --fail-on critical")]
    Generate {
        /// Vessel / asset name (chart title and file name)
        #[arg(long, short = 'n')]
        name: Option<String>,

        /// Report rows to read (default: stdin, or `-`)
        #[arg(long, short = 'i')]
        input: Option<PathBuf>,

        /// Directory for the chart PNG (default: config, then current directory)
        #[arg(long, short = 'o')]
        output_dir: Option<PathBuf>,

        /// Summary format printed to stdout: text, json, html, markdown (or md)
        #[arg(long, short = 'f', value_parser = ["text", "json", "html", "markdown", "md"])]
        format: Option<String>,

        /// Also write the summary to this file
        #[arg(long)]
        report: Option<PathBuf>,

        /// Chart pixel multiplier (1-8)
        #[arg(long, value_parser = parse_scale)]
        scale: Option<u32>,

        /// Skip writing the PNG, print the summary only
        #[arg(long)]
        no_chart: bool,

        /// Exit with code 1 if there are findings at this severity or higher
        #[arg(long, value_parser = ["critical", "high", "medium", "low"])]
        fail_on: Option<String>,
    },

    /// Print the four severity totals without rendering anything
    Totals {
        /// Report rows to read (default: stdin, or `-`)
        #[arg(long, short = 'i')]
        input: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration (init or show)
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Initialize config file with example settings
    Init,
    /// Show current config and paths
    Show,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Generate {
            name,
            input,
            output_dir,
            format,
            report,
            scale,
            no_chart,
            fail_on,
        } => generate::run(generate::GenerateArgs {
            name: name.unwrap_or_default(),
            input,
            output_dir,
            format,
            report,
            scale,
            no_chart,
            fail_on,
        }),

        Commands::Totals { input, json } => totals::run(input.as_deref(), json),

        Commands::Config { action } => run_config_action(action),

        Commands::Version => {
            println!("vapt-chart {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Read report text from a file, or stdin when `input` is `None` or `-`
pub(crate) fn read_report(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read report data from {}", path.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read report data from stdin")?;
            Ok(buf)
        }
    }
}

/// Minimum severity parsed from a `--fail-on` value
pub(crate) fn parse_severity(s: &str) -> Option<Severity> {
    match s.to_lowercase().as_str() {
        "critical" => Some(Severity::Critical),
        "high" => Some(Severity::High),
        "medium" => Some(Severity::Medium),
        "low" => Some(Severity::Low),
        _ => None,
    }
}

fn run_config_action(action: ConfigAction) -> Result<()> {
    use crate::config::UserConfig;
    match action {
        ConfigAction::Init => {
            let path = UserConfig::init_user_config()?;
            println!("✅ Config initialized at: {}", path.display());
            println!("\nOr set via environment:");
            println!("  export {}=\"./charts\"", crate::config::ENV_OUTPUT_DIR);
            println!("  export {}=4", crate::config::ENV_SCALE);
            Ok(())
        }
        ConfigAction::Show => show_config(),
    }
}

fn show_config() -> Result<()> {
    use crate::config::UserConfig;
    let config = UserConfig::load()?;
    println!("📁 Config path:");
    if let Some(user_path) = UserConfig::user_config_path() {
        let status = if user_path.exists() {
            "✓"
        } else {
            "(not found)"
        };
        println!("  User: {} {}", user_path.display(), status);
    }
    println!();
    println!("  Output dir:   {}", config.output_dir().display());
    println!("  Format:       {}", config.output_format());
    println!("  Chart scale:  {}", config.chart_scale());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scale() {
        assert_eq!(parse_scale("2"), Ok(2));
        assert!(parse_scale("0").is_err());
        assert!(parse_scale("9").is_err());
        assert!(parse_scale("x").is_err());
    }

    #[test]
    fn test_parse_severity() {
        assert_eq!(parse_severity("HIGH"), Some(Severity::High));
        assert_eq!(parse_severity("info"), None);
    }

    #[test]
    fn test_cli_parses_generate() {
        let cli = Cli::try_parse_from([
            "vapt-chart",
            "generate",
            "--name",
            "Coral Pearl",
            "--input",
            "report.txt",
            "--format",
            "md",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate {
                name, input, format, ..
            } => {
                assert_eq!(name.as_deref(), Some("Coral Pearl"));
                assert_eq!(input, Some(PathBuf::from("report.txt")));
                assert_eq!(format.as_deref(), Some("md"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_bad_scale() {
        let res = Cli::try_parse_from(["vapt-chart", "generate", "-n", "X", "--scale", "0"]);
        assert!(res.is_err());
    }

    #[test]
    fn test_read_report_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.txt");
        std::fs::write(&path, "10.0.0.1 1 2 3 4\n").unwrap();
        assert_eq!(read_report(Some(&path)).unwrap(), "10.0.0.1 1 2 3 4\n");
    }

    #[test]
    fn test_read_report_missing_file() {
        let err = read_report(Some(Path::new("/nonexistent/rows.txt"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read report data"));
    }
}
