//! Two-color raster canvas ("whiteboard") attached to a task.
//!
//! Pixels store an [`Ink`] index, not a color. The [`Palette`] is resolved
//! from the active theme at construction and on every reload, so a theme
//! switch recolors the canvas without rewriting its buffer.

use taskboard_config::{Color, Palette};

use crate::events::HostCallback;

pub const MIN_WIDTH: u32 = 128;
pub const MAX_WIDTH: u32 = 512;
pub const MIN_HEIGHT: u32 = 64;
pub const MAX_HEIGHT: u32 = 512;

/// Palette index of one pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Ink {
    #[default]
    Background,
    Foreground,
}

impl Ink {
    /// Persisted bit: `0 = Background`, `1 = Foreground`.
    #[inline]
    pub fn bit(self) -> u8 {
        match self {
            Ink::Background => 0,
            Ink::Foreground => 1,
        }
    }

    /// Any value other than `1` reads as background.
    #[inline]
    pub fn from_bit(bit: u8) -> Self {
        if bit == 1 { Ink::Foreground } else { Ink::Background }
    }

    #[inline]
    pub fn inverted(self) -> Self {
        match self {
            Ink::Background => Ink::Foreground,
            Ink::Foreground => Ink::Background,
        }
    }
}

/// Snap `value` to the nearest multiple of `unit`.
pub fn snap_to_grid(value: f32, unit: f32) -> f32 {
    let unit = if unit.is_finite() && unit >= 1.0 { unit } else { 1.0 };
    (value / unit).round() * unit
}

/// Snap then clamp a requested size to the canvas bounds.
pub fn fit_size(width: f32, height: f32, grid_unit: f32) -> (u32, u32) {
    let clamp = |v: f32, min: u32, max: u32| -> u32 {
        let snapped = snap_to_grid(v, grid_unit);
        if !snapped.is_finite() || snapped < min as f32 {
            min
        } else if snapped > max as f32 {
            max
        } else {
            snapped as u32
        }
    };
    (
        clamp(width, MIN_WIDTH, MAX_WIDTH),
        clamp(height, MIN_HEIGHT, MAX_HEIGHT),
    )
}

/// Clamp an already-laid-out size to the canvas bounds without snapping.
/// Stored canvases were snapped when they were sized, possibly to a
/// different grid unit, so snapping again could move them.
pub fn clamp_size(width: usize, height: usize) -> (u32, u32) {
    let clamp = |v: usize, min: u32, max: u32| v.clamp(min as usize, max as usize) as u32;
    (
        clamp(width, MIN_WIDTH, MAX_WIDTH),
        clamp(height, MIN_HEIGHT, MAX_HEIGHT),
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct RasterCanvas {
    width: u32,
    height: u32,
    grid_unit: f32,
    palette: Palette,
    /// Row-major, `width * height` entries
    pixels: Vec<Ink>,
}

impl RasterCanvas {
    /// Canvas at the minimum size, all background.
    pub fn new(grid_unit: f32, palette: Palette) -> Self {
        Self::with_size(0.0, 0.0, grid_unit, palette)
    }

    /// Canvas at the snapped and clamped size, all background.
    pub fn with_size(width: f32, height: f32, grid_unit: f32, palette: Palette) -> Self {
        let (width, height) = fit_size(width, height, grid_unit);
        Self::blank(width, height, grid_unit, palette)
    }

    /// Canvas for stored content: clamped to the bounds, never snapped.
    pub fn with_stored_size(width: usize, height: usize, grid_unit: f32, palette: Palette) -> Self {
        let (width, height) = clamp_size(width, height);
        Self::blank(width, height, grid_unit, palette)
    }

    fn blank(width: u32, height: u32, grid_unit: f32, palette: Palette) -> Self {
        Self {
            width,
            height,
            grid_unit,
            palette,
            pixels: vec![Ink::Background; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn grid_unit(&self) -> f32 {
        self.grid_unit
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    /// Re-resolve colors after a theme change. Content is untouched.
    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    pub fn pixels(&self) -> &[Ink] {
        &self.pixels
    }

    /// One pixel row, top to bottom. Panics if `y` is out of range.
    pub fn row(&self, y: u32) -> &[Ink] {
        let start = (y * self.width) as usize;
        &self.pixels[start..start + self.width as usize]
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| (y * self.width + x) as usize)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Ink> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Set one pixel; coordinates outside the canvas are clipped.
    pub fn set_pixel(&mut self, x: i64, y: i64, ink: Ink) {
        if x < 0 || y < 0 || x > u32::MAX as i64 || y > u32::MAX as i64 {
            return;
        }
        if let Some(i) = self.index(x as u32, y as u32) {
            self.pixels[i] = ink;
        }
    }

    /// Whether a canvas-local point falls on a pixel.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= 0.0 && y >= 0.0 && x <= (self.width - 1) as f32 && y <= (self.height - 1) as f32
    }

    /// Number of foreground pixels.
    pub fn ink_count(&self) -> usize {
        self.pixels.iter().filter(|p| **p == Ink::Foreground).count()
    }

    /// Buffer resolved against the palette, row-major, for rendering.
    pub fn rgba(&self) -> Vec<Color> {
        self.pixels
            .iter()
            .map(|ink| match ink {
                Ink::Background => self.palette.background,
                Ink::Foreground => self.palette.foreground,
            })
            .collect()
    }

    /// Resize to the snapped and clamped target, keeping the top-left
    /// overlap. Returns true when the size changed.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        let (new_width, new_height) = fit_size(width, height, self.grid_unit);
        if new_width == self.width && new_height == self.height {
            return false;
        }

        let mut pixels = vec![Ink::Background; (new_width * new_height) as usize];
        let copy_w = self.width.min(new_width) as usize;
        for y in 0..self.height.min(new_height) {
            let src = (y * self.width) as usize;
            let dst = (y * new_width) as usize;
            pixels[dst..dst + copy_w].copy_from_slice(&self.pixels[src..src + copy_w]);
        }

        log::debug!(
            "canvas resized {}x{} -> {}x{}",
            self.width, self.height, new_width, new_height
        );
        self.width = new_width;
        self.height = new_height;
        self.pixels = pixels;
        true
    }

    /// Replace the whole buffer. `pixels` must hold `width * height` entries
    /// for the current size; shorter input is padded with background.
    pub fn load_pixels(&mut self, pixels: impl IntoIterator<Item = Ink>) {
        let len = self.pixels.len();
        let mut next: Vec<Ink> = pixels.into_iter().take(len).collect();
        next.resize(len, Ink::Background);
        self.pixels = next;
    }

    pub fn fill(&mut self, ink: Ink) {
        self.pixels.fill(ink);
    }

    /// Wipe to background.
    pub fn clear(&mut self, host: &mut dyn HostCallback) {
        self.fill(Ink::Background);
        host.on_undo_worthy_change();
    }

    /// Swap foreground and background on every pixel.
    pub fn invert(&mut self, host: &mut dyn HostCallback) {
        for pixel in &mut self.pixels {
            *pixel = pixel.inverted();
        }
        host.on_undo_worthy_change();
    }

    /// Move the content by `(dx, dy)` pixels; exposed area becomes background.
    pub fn shift(&mut self, dx: i64, dy: i64) {
        let mut pixels = vec![Ink::Background; self.pixels.len()];
        for y in 0..self.height as i64 {
            let ty = y + dy;
            if ty < 0 || ty >= self.height as i64 {
                continue;
            }
            for x in 0..self.width as i64 {
                let tx = x + dx;
                if tx < 0 || tx >= self.width as i64 {
                    continue;
                }
                let src = (y * self.width as i64 + x) as usize;
                let dst = (ty * self.width as i64 + tx) as usize;
                pixels[dst] = self.pixels[src];
            }
        }
        self.pixels = pixels;
    }

    /// Take on `other`'s size and content. The palette stays this canvas's.
    pub fn copy_from(&mut self, other: &RasterCanvas) {
        self.resize(other.width as f32, other.height as f32);
        self.fill(Ink::Background);
        let copy_w = self.width.min(other.width) as usize;
        for y in 0..self.height.min(other.height) {
            let dst = (y * self.width) as usize;
            self.pixels[dst..dst + copy_w].copy_from_slice(&other.row(y)[..copy_w]);
        }
    }

    /// Paint a filled disk: every pixel whose coordinate lies within
    /// `radius` of `(cx, cy)`.
    pub fn fill_disk(&mut self, cx: f32, cy: f32, radius: f32, ink: Ink) {
        let r2 = radius * radius;
        let min_x = (cx - radius).floor() as i64;
        let max_x = (cx + radius).ceil() as i64;
        let min_y = (cy - radius).floor() as i64;
        let max_y = (cy + radius).ceil() as i64;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f32 - cx;
                let dy = y as f32 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.set_pixel(x, y, ink);
                }
            }
        }
    }
}
