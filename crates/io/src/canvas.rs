// Whiteboard row codec
//
// A canvas is stored as a list of base64 strings, one per pixel row, listed
// bottom row first. Each decoded byte is one pixel: 1 = foreground, anything
// else = background.

use base64::Engine;

use taskboard_config::Palette;
use taskboard_engine::canvas::{Ink, RasterCanvas, MAX_HEIGHT, MAX_WIDTH};

use crate::version::{CanvasEncoding, FormatVersion};

/// Encode every pixel row, bottom row first.
pub fn encode(canvas: &RasterCanvas) -> Vec<String> {
    let b64 = base64::engine::general_purpose::STANDARD;
    (0..canvas.height())
        .rev()
        .map(|y| {
            let bytes: Vec<u8> = canvas.row(y).iter().map(|ink| ink.bit()).collect();
            b64.encode(bytes)
        })
        .collect()
}

/// Build a canvas sized to the stored content, clamped to the canvas
/// bounds. The size is not snapped again: stored canvases were already laid
/// out on a grid, and snapping to a different unit would move them.
/// Content outside the bounds is dropped; missing area is background.
pub fn decode<S: AsRef<str>>(
    rows: &[S],
    version: &FormatVersion,
    grid_unit: f32,
    palette: Palette,
) -> RasterCanvas {
    let lines = expanded_lines(rows, version.canvas_encoding());
    let width = lines.iter().map(Vec::len).max().unwrap_or(0);
    let height = lines.len();

    let mut canvas = RasterCanvas::with_stored_size(width, height, grid_unit, palette);
    fill_from_lines(&mut canvas, &lines);
    canvas
}

/// Decode into an existing canvas, keeping its current size.
pub fn decode_into<S: AsRef<str>>(canvas: &mut RasterCanvas, rows: &[S], version: &FormatVersion) {
    let lines = expanded_lines(rows, version.canvas_encoding());
    fill_from_lines(canvas, &lines);
}

/// Decode stored rows into top-to-bottom pixel lines at canvas resolution.
///
/// Only the stored rows and bytes that can land inside the largest canvas
/// are decoded.
fn expanded_lines<S: AsRef<str>>(rows: &[S], encoding: CanvasEncoding) -> Vec<Vec<Ink>> {
    let scale = encoding.scale();
    let max_rows = MAX_HEIGHT as usize / scale;
    let max_bytes = MAX_WIDTH as usize / scale;
    if rows.len() > max_rows {
        log::debug!("canvas has {} stored rows; reading the top {}", rows.len(), max_rows);
    }

    let mut lines = Vec::with_capacity(rows.len().min(max_rows) * scale);
    for (stored_index, row) in rows.iter().enumerate().rev().take(max_rows) {
        let line: Vec<Ink> = decode_row(row.as_ref(), stored_index, max_bytes)
            .into_iter()
            .flat_map(|ink| std::iter::repeat(ink).take(scale))
            .collect();
        for _ in 1..scale {
            lines.push(line.clone());
        }
        lines.push(line);
    }

    lines
}

/// Decode at most `max_bytes` pixels of one stored row.
fn decode_row(encoded: &str, stored_index: usize, max_bytes: usize) -> Vec<Ink> {
    let b64 = base64::engine::general_purpose::STANDARD;
    let encoded = encoded.trim();
    // Whole 4-character groups decode independently, so a prefix is enough.
    let max_chars = max_bytes.div_ceil(3) * 4;
    let encoded = if encoded.len() > max_chars {
        encoded.get(..max_chars).unwrap_or(encoded)
    } else {
        encoded
    };

    match b64.decode(encoded) {
        Ok(bytes) => bytes.into_iter().take(max_bytes).map(Ink::from_bit).collect(),
        Err(e) => {
            log::warn!("canvas row {} is not valid base64 ({}); using background", stored_index, e);
            Vec::new()
        }
    }
}

fn fill_from_lines(canvas: &mut RasterCanvas, lines: &[Vec<Ink>]) {
    let width = canvas.width() as usize;
    let height = canvas.height() as usize;
    if lines.len() > height || lines.iter().any(|line| line.len() > width) {
        log::debug!(
            "stored canvas exceeds {}x{}; cropping to the top-left region",
            width,
            height
        );
    }

    let mut pixels = Vec::with_capacity(width * height);
    for y in 0..height {
        let line = lines.get(y).map(Vec::as_slice).unwrap_or(&[]);
        pixels.extend((0..width).map(|x| line.get(x).copied().unwrap_or(Ink::Background)));
    }
    canvas.load_pixels(pixels);
}
