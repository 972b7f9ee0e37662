//! Chart images
//!
//! Per-country stacked-bar thumbnails and the category legend, drawn as
//! SVG and embedded as base64 `data:` URIs.

use super::html::escape_markup;
use super::style::ColorMap;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fmt::Write as _;

/// Thumbnail canvas size in pixels
pub const THUMBNAIL_SIZE: (u32, u32) = (300, 200);

/// Legend canvas size in pixels
pub const LEGEND_SIZE: (u32, u32) = (400, 200);

// Plot area inside the thumbnail canvas
const PLOT_LEFT: f64 = 12.0;
const PLOT_RIGHT: f64 = 288.0;
const PLOT_TOP: f64 = 10.0;
const PLOT_BOTTOM: f64 = 186.0;

/// Autoscale headroom on each side of the data range
const MARGIN: f64 = 0.05;

/// Wrap SVG markup as an embeddable image URI.
pub fn svg_data_uri(svg: &str) -> String {
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg.as_bytes()))
}

/// One stacked bar of a country's metrics on a transparent canvas, axes
/// hidden. Segments stack in column order; positives grow up from zero and
/// negatives down. Missing values draw nothing.
pub fn stacked_bar_svg(values: &[Option<f64>], colors: &ColorMap) -> String {
    let (width, height) = THUMBNAIL_SIZE;
    let mut svg = svg_open(width, height);

    let finite = || values.iter().flatten().copied().filter(|v| v.is_finite());
    let positive: f64 = finite().filter(|v| *v > 0.0).sum();
    let negative: f64 = finite().filter(|v| *v < 0.0).sum();

    if positive > 0.0 || negative < 0.0 {
        let span = positive - negative;
        let y_max = if positive > 0.0 { positive + span * MARGIN } else { 0.0 };
        let y_min = if negative < 0.0 { negative - span * MARGIN } else { 0.0 };
        let scale = (PLOT_BOTTOM - PLOT_TOP) / (y_max - y_min);
        let to_px = |v: f64| PLOT_BOTTOM - (v - y_min) * scale;

        let plot_width = PLOT_RIGHT - PLOT_LEFT;
        let bar_px = plot_width / (1.0 + 2.0 * MARGIN);
        let bar_x = PLOT_LEFT + (plot_width - bar_px) / 2.0;

        let mut up = 0.0;
        let mut down = 0.0;
        for (idx, value) in values.iter().enumerate() {
            let Some(value) = value.filter(|v| *v != 0.0 && v.is_finite()) else {
                continue;
            };
            let color = colors.color(idx).unwrap_or("black");

            let (from, to) = if value > 0.0 {
                let base = up;
                up += value;
                (base, up)
            } else {
                let base = down;
                down += value;
                (down, base)
            };

            let top = to_px(to);
            let _ = writeln!(
                svg,
                r#"  <rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"/>"#,
                bar_x,
                top,
                bar_px,
                to_px(from) - top,
                color
            );
        }
    }

    svg.push_str("</svg>\n");
    svg
}

/// Legend of metric colors in two columns under a "Categories" title,
/// framed and centered on the canvas.
pub fn legend_svg(colors: &ColorMap) -> String {
    const FONT: f64 = 13.0;
    const CHAR_W: f64 = 7.2;
    const ROW_H: f64 = 22.0;
    const PATCH_W: f64 = 26.0;
    const PATCH_H: f64 = 10.0;
    const GAP: f64 = 8.0;
    const PAD: f64 = 10.0;

    let (width, height) = LEGEND_SIZE;
    let mut svg = svg_open(width, height);

    let rows = (colors.len() + 1) / 2;
    let label_w = colors
        .iter()
        .map(|(name, _)| name.chars().count() as f64 * CHAR_W)
        .fold(0.0, f64::max);
    let column_w = PATCH_W + GAP + label_w;
    let columns = if colors.len() > 1 { 2.0 } else { 1.0 };

    let title_h = ROW_H + 4.0;
    let box_w = (PAD * 2.0 + column_w * columns + GAP * 2.0 * (columns - 1.0))
        .max("Categories".len() as f64 * CHAR_W + PAD * 2.0);
    let box_h = PAD * 2.0 + title_h + rows as f64 * ROW_H;
    let box_x = (width as f64 - box_w) / 2.0;
    let box_y = (height as f64 - box_h) / 2.0;

    let _ = writeln!(
        svg,
        r##"  <rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" rx="4" fill="#ffffff" fill-opacity="0.8" stroke="#cccccc"/>"##,
        box_x, box_y, box_w, box_h
    );
    let _ = writeln!(
        svg,
        r#"  <text x="{:.2}" y="{:.2}" font-family="sans-serif" font-size="{}" text-anchor="middle">Categories</text>"#,
        box_x + box_w / 2.0,
        box_y + PAD + FONT,
        FONT
    );

    // Column-major, like a matplotlib legend with ncol=2.
    for (idx, (name, color)) in colors.iter().enumerate() {
        let col = (idx / rows) as f64;
        let row = (idx % rows) as f64;
        let x = box_x + PAD + col * (column_w + GAP * 2.0);
        let y = box_y + PAD + title_h + row * ROW_H;

        let _ = writeln!(
            svg,
            r#"  <rect x="{:.2}" y="{:.2}" width="{}" height="{}" fill="{}"/>"#,
            x,
            y + (ROW_H - PATCH_H) / 2.0 - 4.0,
            PATCH_W,
            PATCH_H,
            color
        );
        let _ = writeln!(
            svg,
            r#"  <text x="{:.2}" y="{:.2}" font-family="sans-serif" font-size="{}">{}</text>"#,
            x + PATCH_W + GAP,
            y + ROW_H / 2.0,
            FONT,
            escape_markup(name)
        );
    }

    svg.push_str("</svg>\n");
    svg
}

fn svg_open(width: u32, height: u32) -> String {
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
        w = width,
        h = height
    )
}
