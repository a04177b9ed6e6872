//! Markdown reporter for GitHub-flavored Markdown output
//!
//! Suitable for pasting into tickets, pull request comments or wikis.

use crate::dashboard::Outcome;
use crate::models::Severity;
use anyhow::Result;
use chrono::Local;

/// Render summary as GitHub-flavored Markdown
pub fn render(outcome: &Outcome) -> Result<String> {
    let mut md = String::new();

    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    md.push_str(&format!(
        "# {}\n\nGenerated: {}\n\n",
        md_escape(&outcome.title),
        timestamp
    ));

    md.push_str("| Severity | Count |\n");
    md.push_str("|----------|------:|\n");
    for (sev, n) in outcome.counts.iter() {
        md.push_str(&format!("| {} {} | {} |\n", severity_emoji(sev), sev.label(), n));
    }
    md.push_str(&format!("| **Total** | **{}** |\n\n", outcome.total));

    md.push_str(&format!(
        "*{} data rows parsed, {} lines skipped.*\n",
        outcome.data_rows, outcome.skipped_rows
    ));

    Ok(md)
}

/// Backslash-escape characters that Markdown would treat as formatting
fn md_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '`' | '*' | '_' | '|' | '#' | '[' | ']' | '<' | '>') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn severity_emoji(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "🔴",
        Severity::High => "🟥",
        Severity::Medium => "🟡",
        Severity::Low => "🟢",
    }
}
