//! vapt-chart - VAPT severity calculator and chart generator
//!
//! Sums pasted vulnerability scan rows per severity and renders a
//! pie chart + summary table PNG for a named vessel.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use vapt_chart::cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging: RUST_LOG wins over --log-level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    cli::run(cli)
}
