//! PNG chart renderer
//!
//! Lays out the vessel dashboard on one image:
//! - Title (vessel name, uppercase) in the top-left corner
//! - Pie chart of the four severity totals with count labels
//! - Legend naming the severity levels
//! - Two-column Severity/Count table in the severity colors

mod canvas;

pub use canvas::Canvas;

use crate::dashboard::Outcome;
use crate::models::{Rgb, Severity, SeverityCounts, HEADER_FILL, HEADER_TEXT};
use image::{ImageFormat, RgbaImage};
use std::f64::consts::TAU;
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

/// Logical canvas size; pixel size is this times the scale factor
pub const WIDTH: u32 = 760;
pub const HEIGHT: u32 = 300;

/// Default scale factor (1520x600 px)
pub const DEFAULT_SCALE: u32 = 2;
pub const MAX_SCALE: u32 = 8;

const TITLE_POS: (u32, u32) = (20, 16);
const TITLE_SIZE: u32 = 3;
const TITLE_ELLIPSIS: &str = "...";

const PIE_CENTER: (u32, u32) = (160, 170);
const PIE_RADIUS: u32 = 95;
const LABEL_OFFSET: u32 = 16;
const LABEL_SIZE: u32 = 2;

const LEGEND_POS: (u32, u32) = (320, 110);
const LEGEND_ROW: u32 = 22;
const SWATCH: u32 = 12;

const TABLE_POS: (u32, u32) = (490, 70);
const TABLE_COLS: [u32; 2] = [150, 100];
const TABLE_ROW: u32 = 36;
const TABLE_BORDER: u32 = 1;
const TABLE_TEXT_SIZE: u32 = 2;

/// Errors from chart rendering or writing
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Invalid chart scale {0}: must be between 1 and {max}", max = MAX_SCALE)]
    InvalidScale(u32),

    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Chart rendering options
#[derive(Debug, Clone, Copy)]
pub struct ChartOptions {
    pub scale: u32,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
        }
    }
}

/// Render the dashboard for `outcome` into an image
pub fn render(outcome: &Outcome, options: ChartOptions) -> Result<RgbaImage, ChartError> {
    if options.scale == 0 || options.scale > MAX_SCALE {
        return Err(ChartError::InvalidScale(options.scale));
    }

    let mut canvas = Canvas::new(WIDTH, HEIGHT, options.scale, Rgb::WHITE);
    let (title, size) = fit_title(&outcome.title);
    canvas.draw_text(TITLE_POS.0, TITLE_POS.1, &title, size, Rgb::BLACK, true);
    draw_pie(&mut canvas, &outcome.counts);
    draw_legend(&mut canvas);
    draw_table(&mut canvas, &outcome.counts);

    Ok(canvas.into_image())
}

/// Encode an image as PNG bytes
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>, ChartError> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}

/// Render and write the chart PNG to `path`
pub fn save(outcome: &Outcome, options: ChartOptions, path: &Path) -> Result<(), ChartError> {
    let img = render(outcome, options)?;
    let bytes = encode_png(&img)?;
    std::fs::write(path, bytes)?;
    tracing::info!(
        "Wrote chart {} ({}x{})",
        path.display(),
        img.width(),
        img.height()
    );
    Ok(())
}

/// Largest glyph size (up to `TITLE_SIZE`) at which the title fits between
/// the side margins. Titles too long even at size 1 are cut and end in "...".
fn fit_title(title: &str) -> (String, u32) {
    let room = WIDTH - 2 * TITLE_POS.0;
    for size in (1..=TITLE_SIZE).rev() {
        if Canvas::text_width(title, size) <= room {
            return (title.to_string(), size);
        }
    }
    let max_chars = (room / Canvas::text_width("W", 1)) as usize;
    let keep = max_chars.saturating_sub(TITLE_ELLIPSIS.len());
    let mut cut: String = title.chars().take(keep).collect();
    cut.push_str(TITLE_ELLIPSIS);
    (cut, 1)
}

fn draw_pie(canvas: &mut Canvas, counts: &SeverityCounts) {
    let slices: Vec<(u64, Rgb)> = counts.iter().map(|(s, n)| (n, s.style().fill)).collect();
    let (cx, cy) = PIE_CENTER;
    canvas.fill_pie(cx, cy, PIE_RADIUS, &slices);

    for (value, mid) in slice_midpoints(counts) {
        let r = (PIE_RADIUS + LABEL_OFFSET) as f64;
        let x = cx as f64 + r * mid.sin();
        let y = cy as f64 - r * mid.cos();
        canvas.draw_text_centered(
            x.round().max(0.0) as u32,
            y.round().max(0.0) as u32,
            &value.to_string(),
            LABEL_SIZE,
            Rgb::BLACK,
            true,
        );
    }
}

/// Mid-angle (clockwise from the top) of each non-zero slice
fn slice_midpoints(counts: &SeverityCounts) -> Vec<(u64, f64)> {
    let total: f64 = counts.as_array().iter().map(|&n| n as f64).sum();
    if total <= 0.0 {
        return Vec::new();
    }
    let mut start = 0.0;
    let mut mids = Vec::new();
    for n in counts.as_array() {
        let sweep = n as f64 / total * TAU;
        if n > 0 {
            mids.push((n, start + sweep / 2.0));
        }
        start += sweep;
    }
    mids
}

fn draw_legend(canvas: &mut Canvas) {
    let (x, y) = LEGEND_POS;
    canvas.draw_text(x, y, "Severity", LABEL_SIZE, Rgb::BLACK, true);
    for (i, sev) in Severity::ALL.iter().enumerate() {
        let row_y = y + LEGEND_ROW * (i as u32 + 1);
        canvas.fill_rect(x, row_y + 2, SWATCH, SWATCH, sev.style().fill);
        canvas.draw_text(x + SWATCH + 6, row_y, sev.label(), LABEL_SIZE, Rgb::BLACK, false);
    }
}

fn draw_table(canvas: &mut Canvas, counts: &SeverityCounts) {
    let (x, y) = TABLE_POS;
    let width: u32 = TABLE_COLS.iter().sum();
    canvas.fill_rect(x, y, width, TABLE_ROW * 5, Rgb::WHITE);

    let mut rows: Vec<([String; 2], Rgb, Rgb)> = vec![(
        ["Severity".to_string(), "Count".to_string()],
        HEADER_FILL,
        HEADER_TEXT,
    )];
    for (sev, n) in counts.iter() {
        let style = sev.style();
        rows.push(([style.label.to_string(), n.to_string()], style.fill, style.text));
    }

    for (r, (cells, fill, text)) in rows.iter().enumerate() {
        let row_y = y + TABLE_ROW * r as u32;
        let mut col_x = x;
        for (cell, &col_w) in cells.iter().zip(TABLE_COLS.iter()) {
            canvas.fill_rect(
                col_x + TABLE_BORDER,
                row_y + TABLE_BORDER,
                col_w - 2 * TABLE_BORDER,
                TABLE_ROW - 2 * TABLE_BORDER,
                *fill,
            );
            canvas.draw_text_centered(
                col_x + col_w / 2,
                row_y + TABLE_ROW / 2,
                cell,
                TABLE_TEXT_SIZE,
                *text,
                true,
            );
            col_x += col_w;
        }
    }
}
