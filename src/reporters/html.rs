//! HTML reporter with embedded styles and an inline SVG chart
//!
//! Generates a standalone page that can be opened in any browser or
//! attached to an email. Includes:
//! - Vessel name title
//! - Pie chart drawn as SVG paths, starting at 12 o'clock and running clockwise
//! - Severity/Count table in the severity colors

use crate::dashboard::Outcome;
use crate::models::{SeverityCounts, HEADER_FILL, HEADER_TEXT};
use anyhow::Result;
use chrono::Local;
use std::f64::consts::TAU;

const PIE_SIZE: f64 = 320.0;
const PIE_RADIUS: f64 = 120.0;
const LABEL_RADIUS: f64 = 140.0;

/// Render summary as standalone HTML
pub fn render(outcome: &Outcome) -> Result<String> {
    let mut html = String::new();

    html.push_str(&render_head(outcome));
    html.push_str("<body>\n<div class=\"container\">\n");
    html.push_str(&render_header(outcome));

    html.push_str("<div class=\"content\">\n");
    html.push_str("<div class=\"chart\">\n");
    html.push_str(&render_pie_svg(&outcome.counts));
    html.push_str(&render_legend());
    html.push_str("</div>\n");
    html.push_str(&render_table(&outcome.counts));
    html.push_str("</div>\n");

    html.push_str(&render_footer(outcome));
    html.push_str("</div>\n</body>\n</html>");

    Ok(html)
}

fn render_head(outcome: &Outcome) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - VAPT Summary</title>
    <style>
{CSS}
    </style>
</head>
"#,
        html_escape(&outcome.title)
    )
}

fn render_header(outcome: &Outcome) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    format!(
        r#"<div class="header">
    <h1>{}</h1>
    <p class="timestamp">Generated {}</p>
</div>
"#,
        html_escape(&outcome.title),
        timestamp
    )
}

/// Pie chart as an SVG element
pub(crate) fn render_pie_svg(counts: &SeverityCounts) -> String {
    let c = PIE_SIZE / 2.0;
    let total: f64 = counts.as_array().iter().map(|&n| n as f64).sum();
    let mut svg = format!(
        r#"<svg class="pie" width="{0}" height="{0}" viewBox="0 0 {0} {0}" xmlns="http://www.w3.org/2000/svg">
"#,
        PIE_SIZE
    );

    if total > 0.0 {
        let mut start = 0.0;
        for (sev, n) in counts.iter() {
            if n == 0 {
                continue;
            }
            let sweep = n as f64 / total * TAU;
            let fill = sev.style().fill.hex();

            if (sweep - TAU).abs() < 1e-9 {
                svg.push_str(&format!(
                    "  <circle cx=\"{c}\" cy=\"{c}\" r=\"{PIE_RADIUS}\" fill=\"{fill}\"><title>{}</title></circle>\n",
                    sev.label()
                ));
            } else {
                let (x0, y0) = point(c, PIE_RADIUS, start);
                let (x1, y1) = point(c, PIE_RADIUS, start + sweep);
                let large = if sweep > TAU / 2.0 { 1 } else { 0 };
                svg.push_str(&format!(
                    "  <path d=\"M {c} {c} L {x0:.2} {y0:.2} A {PIE_RADIUS} {PIE_RADIUS} 0 {large} 1 {x1:.2} {y1:.2} Z\" fill=\"{fill}\"><title>{}</title></path>\n",
                    sev.label()
                ));
            }

            let (lx, ly) = point(c, LABEL_RADIUS, start + sweep / 2.0);
            svg.push_str(&format!(
                "  <text x=\"{lx:.2}\" y=\"{ly:.2}\" class=\"slice-label\">{n}</text>\n"
            ));
            start += sweep;
        }
    }

    svg.push_str("</svg>\n");
    svg
}

/// Point on a circle at `angle` radians clockwise from the top
fn point(center: f64, radius: f64, angle: f64) -> (f64, f64) {
    (center + radius * angle.sin(), center - radius * angle.cos())
}

fn render_legend() -> String {
    let mut html = String::from(
        "<div class=\"legend\">\n    <div class=\"legend-title\">Severity</div>\n",
    );
    for style in crate::models::SEVERITY_PALETTE.iter() {
        html.push_str(&format!(
            "    <div class=\"legend-item\"><span class=\"swatch\" style=\"background: {}\"></span>{}</div>\n",
            style.fill.hex(),
            style.label
        ));
    }
    html.push_str("</div>\n");
    html
}

fn render_table(counts: &SeverityCounts) -> String {
    let mut html = format!(
        r#"<table class="summary">
    <thead>
        <tr style="background: {bg}; color: {fg}"><th>Severity</th><th>Count</th></tr>
    </thead>
    <tbody>
"#,
        bg = HEADER_FILL.hex(),
        fg = HEADER_TEXT.hex()
    );
    for (sev, n) in counts.iter() {
        let style = sev.style();
        html.push_str(&format!(
            "        <tr class=\"severity-{}\" style=\"background: {}; color: {}\"><td>{}</td><td>{}</td></tr>\n",
            sev,
            style.fill.hex(),
            style.text.hex(),
            style.label,
            n
        ));
    }
    html.push_str("    </tbody>\n</table>\n");
    html
}

fn render_footer(outcome: &Outcome) -> String {
    format!(
        r#"<div class="footer">
    <p>{} findings across {} data rows ({} lines skipped)</p>
</div>
"#,
        outcome.total, outcome.data_rows, outcome.skipped_rows
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// Embedded CSS
const CSS: &str = r#"
* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    line-height: 1.6;
    color: #1e293b;
    background: #f8fafc;
    padding: 2rem;
}

.container {
    max-width: 1100px;
    margin: 0 auto;
    background: white;
    border-radius: 12px;
    box-shadow: 0 4px 6px -1px rgba(0,0,0,0.1);
    overflow: hidden;
}

.header { padding: 2rem 2rem 0 2rem; }
.header h1 { font-size: 2rem; font-weight: bold; }
.header .timestamp { color: #64748b; font-size: 0.9rem; }

.content {
    display: flex;
    flex-wrap: wrap;
    align-items: center;
    justify-content: space-around;
    gap: 2rem;
    padding: 2rem;
}

.chart { display: flex; align-items: center; gap: 1rem; }

.slice-label {
    font-size: 14px;
    font-weight: bold;
    text-anchor: middle;
    dominant-baseline: middle;
}

.legend-title { font-weight: bold; margin-bottom: 0.25rem; }
.legend-item { display: flex; align-items: center; gap: 0.5rem; }
.swatch { display: inline-block; width: 14px; height: 14px; }

table.summary {
    border-collapse: collapse;
    min-width: 260px;
    text-align: center;
    font-weight: bold;
}

table.summary th { font-size: 1.1rem; padding: 0.75rem 1.5rem; }
table.summary td { font-size: 1rem; padding: 0.75rem 1.5rem; }
table.summary th, table.summary td { border: 2px solid white; }

.footer {
    text-align: center;
    padding: 1.5rem;
    color: #64748b;
    border-top: 1px solid #e2e8f0;
}

@media print {
    body { padding: 0; background: white; }
    .container { box-shadow: none; }
}
"#;
