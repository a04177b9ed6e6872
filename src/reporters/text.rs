//! Text (terminal) reporter with colors and formatting

use crate::dashboard::Outcome;
use crate::models::{Rgb, Severity};
use anyhow::Result;

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Truecolor background + foreground escape for a severity row
fn severity_color(severity: Severity) -> String {
    let style = severity.style();
    format!("{}{}", bg(style.fill), fg(style.text))
}

fn bg(c: Rgb) -> String {
    format!("\x1b[48;2;{};{};{}m", c.0, c.1, c.2)
}

fn fg(c: Rgb) -> String {
    format!("\x1b[38;2;{};{};{}m", c.0, c.1, c.2)
}

/// Share of the total as a percentage, one decimal
fn percent(n: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        n as f64 * 100.0 / total as f64
    }
}

/// Render summary as formatted terminal output
pub fn render(outcome: &Outcome) -> Result<String> {
    let mut out = String::new();

    out.push_str(&format!("\n{BOLD}{}{RESET}\n", outcome.title));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));

    out.push_str(&format!(
        "{BOLD}\x1b[40m\x1b[97m {:<10} {:>10} {:>8} {RESET}\n",
        "Severity", "Count", "Share"
    ));
    for (sev, n) in outcome.counts.iter() {
        out.push_str(&format!(
            "{BOLD}{} {:<10} {:>10} {:>7.1}% {RESET}\n",
            severity_color(sev),
            sev.label(),
            n,
            percent(n, outcome.total)
        ));
    }

    out.push_str(&format!(
        "\n  Total: {BOLD}{}{RESET}  {DIM}({} data rows, {} skipped){RESET}\n",
        outcome.total, outcome.data_rows, outcome.skipped_rows
    ));

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_outcome;

    #[test]
    fn test_text_render_has_title_and_rows() {
        let out = render(&test_outcome()).unwrap();
        assert!(out.contains("CORAL PEARL"));
        for label in ["Critical", "High", "Medium", "Low"] {
            assert!(out.contains(label), "missing {label}");
        }
        assert!(out.contains("143"));
        assert!(out.contains("Total: \x1b[1m210"));
    }

    #[test]
    fn test_text_rows_in_fixed_order() {
        let out = render(&test_outcome()).unwrap();
        let crit = out.find("Critical").unwrap();
        let high = out.find("High").unwrap();
        let med = out.find("Medium").unwrap();
        let low = out.find("Low").unwrap();
        assert!(crit < high && high < med && med < low);
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(0, 0), 0.0);
        assert!((percent(35, 210) - 16.666).abs() < 0.01);
    }

    #[test]
    fn test_severity_color_uses_palette() {
        assert_eq!(
            severity_color(Severity::Critical),
            "\x1b[48;2;192;0;0m\x1b[38;2;255;255;255m"
        );
    }
}
