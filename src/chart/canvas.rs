//! Raster drawing primitives on top of `image::RgbaImage`
//!
//! Coordinates passed in are logical units; the canvas multiplies them by
//! its scale factor. Text uses the 8x8 glyphs from `font8x8`, so output is
//! identical on machines without any fonts installed.

use crate::models::Rgb;
use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{Rgba, RgbaImage};
use std::f64::consts::TAU;

/// Glyph cell size in font pixels
pub const GLYPH_SIZE: u32 = 8;

fn rgba(color: Rgb) -> Rgba<u8> {
    Rgba([color.0, color.1, color.2, 255])
}

pub struct Canvas {
    img: RgbaImage,
    scale: u32,
}

impl Canvas {
    /// New canvas of `width` x `height` logical units filled with `background`
    pub fn new(width: u32, height: u32, scale: u32, background: Rgb) -> Self {
        let img = RgbaImage::from_pixel(width * scale, height * scale, rgba(background));
        Self { img, scale }
    }

    pub fn into_image(self) -> RgbaImage {
        self.img
    }

    /// Fill a rectangle, clipped to the canvas
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgb) {
        let s = self.scale;
        self.fill_px(x * s, y * s, w * s, h * s, rgba(color));
    }

    fn fill_px(&mut self, x0: u32, y0: u32, w: u32, h: u32, color: Rgba<u8>) {
        let x1 = (x0 + w).min(self.img.width());
        let y1 = (y0 + h).min(self.img.height());
        for y in y0..y1 {
            for x in x0..x1 {
                self.img.put_pixel(x, y, color);
            }
        }
    }

    /// Draw a pie centered at (`cx`, `cy`).
    ///
    /// Slices start at 12 o'clock and run clockwise in the order given.
    /// Zero-valued slices take no area. Nothing is drawn if all values are zero.
    pub fn fill_pie(&mut self, cx: u32, cy: u32, radius: u32, slices: &[(u64, Rgb)]) {
        let total: f64 = slices.iter().map(|(v, _)| *v as f64).sum();
        if total <= 0.0 {
            return;
        }

        // Cumulative end angle of each slice, in radians clockwise from the top
        let mut bounds = Vec::with_capacity(slices.len());
        let mut acc = 0.0;
        for (value, color) in slices {
            acc += *value as f64 / total * TAU;
            bounds.push((acc, rgba(*color)));
        }

        let s = self.scale as f64;
        let (cx, cy, r) = (cx as f64 * s, cy as f64 * s, radius as f64 * s);
        let x_min = (cx - r).floor().max(0.0) as u32;
        let y_min = (cy - r).floor().max(0.0) as u32;
        let x_max = ((cx + r).ceil() as u32).min(self.img.width());
        let y_max = ((cy + r).ceil() as u32).min(self.img.height());

        for y in y_min..y_max {
            for x in x_min..x_max {
                let dx = x as f64 + 0.5 - cx;
                let dy = y as f64 + 0.5 - cy;
                if dx * dx + dy * dy > r * r {
                    continue;
                }
                let angle = clockwise_angle(dx, dy);
                let color = bounds
                    .iter()
                    .find(|(end, _)| angle < *end)
                    .or(bounds.last())
                    .map(|(_, c)| *c);
                if let Some(c) = color {
                    self.img.put_pixel(x, y, c);
                }
            }
        }
    }

    /// Width in logical units of `text` drawn at glyph `size`
    pub fn text_width(text: &str, size: u32) -> u32 {
        text.chars().count() as u32 * GLYPH_SIZE * size
    }

    /// Draw `text` with its top-left corner at (`x`, `y`).
    ///
    /// `size` is the number of logical units per font pixel. Characters
    /// outside the basic Latin set render as `?`.
    pub fn draw_text(&mut self, x: u32, y: u32, text: &str, size: u32, color: Rgb, bold: bool) {
        let unit = size * self.scale;
        let color = rgba(color);
        let mut pen_x = x * self.scale;
        let pen_y = y * self.scale;

        for ch in text.chars() {
            let glyph = BASIC_FONTS
                .get(ch)
                .or_else(|| BASIC_FONTS.get('?'))
                .unwrap_or([0; 8]);
            for (row, bits) in glyph.iter().enumerate() {
                for col in 0..GLYPH_SIZE {
                    if bits & (1 << col) == 0 {
                        continue;
                    }
                    let px = pen_x + col * unit;
                    let py = pen_y + row as u32 * unit;
                    self.fill_px(px, py, unit, unit, color);
                    if bold {
                        self.fill_px(px + self.scale, py, unit, unit, color);
                    }
                }
            }
            pen_x += GLYPH_SIZE * unit;
        }
    }

    /// Draw `text` centered on (`cx`, `cy`)
    pub fn draw_text_centered(&mut self, cx: u32, cy: u32, text: &str, size: u32, color: Rgb, bold: bool) {
        let w = Self::text_width(text, size);
        let h = GLYPH_SIZE * size;
        self.draw_text(
            cx.saturating_sub(w / 2),
            cy.saturating_sub(h / 2),
            text,
            size,
            color,
            bold,
        );
    }
}

/// Angle of (`dx`, `dy`) measured clockwise from straight up, in `[0, TAU)`.
/// Image y grows downward.
pub fn clockwise_angle(dx: f64, dy: f64) -> f64 {
    let a = dx.atan2(-dy);
    if a < 0.0 {
        a + TAU
    } else {
        a
    }
}
