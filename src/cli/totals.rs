//! Totals command - print the four severity sums only

use crate::parser;
use anyhow::Result;
use std::path::Path;

/// Run the totals command
pub(super) fn run(input: Option<&Path>, json: bool) -> Result<()> {
    let text = super::read_report(input)?;
    let scan = parser::scan(&text);

    if json {
        println!("{}", serde_json::to_string_pretty(&scan)?);
        return Ok(());
    }

    for (sev, n) in scan.totals.iter() {
        println!("{:<10} {}", sev.label(), n);
    }
    if scan.totals.is_empty() {
        eprintln!("No valid data found. Check your copy-paste format.");
    }
    Ok(())
}
