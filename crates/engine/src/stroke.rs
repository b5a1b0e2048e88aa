//! Pencil strokes on a [`RasterCanvas`] and the per-frame editing state.
//!
//! The host feeds one [`PointerSample`] per frame. Between frames the only
//! state carried is the previous stroke point, so a fast pointer still
//! produces a continuous line: each frame paints disks along the segment
//! back to where the pointer was last frame.

use crate::canvas::{Ink, RasterCanvas};
use crate::events::HostCallback;

/// Pencil radii selectable by the cursor-size button.
pub const CURSOR_RADII: [f32; 3] = [1.0, 3.0, 8.0];

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Index into [`CURSOR_RADII`]; out-of-range indices wrap to the smallest size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorSize(usize);

impl CursorSize {
    pub fn from_index(index: usize) -> Self {
        if index < CURSOR_RADII.len() { Self(index) } else { Self(0) }
    }

    pub fn index(self) -> usize {
        self.0
    }

    pub fn radius(self) -> f32 {
        CURSOR_RADII[self.0]
    }

    pub fn next(self) -> Self {
        Self::from_index(self.0 + 1)
    }
}

/// Pointer state for one frame, in canvas-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerSample {
    pub position: Point,
    pub primary_down: bool,
    pub primary_released: bool,
    pub secondary_down: bool,
    /// Secondary release also paints, so the erase lands even when the host
    /// consumes the release for its context menu.
    pub secondary_released: bool,
}

/// Paint a stroke segment ending at `curr`.
///
/// Without a previous point this is a single disk. Otherwise
/// `ceil(|prev - curr| + 1)` disks are stepped one pixel apart from `curr`
/// toward `prev`, stopping at `prev`.
pub fn stroke_to(canvas: &mut RasterCanvas, prev: Option<Point>, curr: Point, ink: Ink, radius: f32) {
    let Some(prev) = prev else {
        canvas.fill_disk(curr.x, curr.y, radius, ink);
        return;
    };

    let length = curr.distance(prev);
    let steps = (length + 1.0).ceil() as usize;
    let (ux, uy) = if length > 0.0 {
        ((prev.x - curr.x) / length, (prev.y - curr.y) / length)
    } else {
        (0.0, 0.0)
    };

    for i in 0..steps {
        let t = (i as f32).min(length);
        canvas.fill_disk(curr.x + ux * t, curr.y + uy * t, radius, ink);
    }
}

/// Editing mode and in-progress stroke for one canvas.
#[derive(Debug, Clone, Default)]
pub struct StrokeRasterizer {
    editing: bool,
    cursor: CursorSize,
    prev: Option<Point>,
    /// Set once the current stroke has painted something
    stroke_dirty: bool,
}

impl StrokeRasterizer {
    pub fn new(cursor: CursorSize) -> Self {
        Self { cursor, ..Self::default() }
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn toggle_editing(&mut self) {
        self.set_editing(!self.editing);
    }

    /// Entering or leaving editing mode drops any stroke in progress.
    pub fn set_editing(&mut self, editing: bool) {
        if self.editing != editing {
            log::debug!("whiteboard editing {}", if editing { "on" } else { "off" });
        }
        self.editing = editing;
        self.cancel_stroke();
    }

    pub fn cursor(&self) -> CursorSize {
        self.cursor
    }

    pub fn cycle_cursor_size(&mut self) -> CursorSize {
        self.cursor = self.cursor.next();
        self.cursor
    }

    /// Previous point of the stroke in progress, if any.
    pub fn previous_point(&self) -> Option<Point> {
        self.prev
    }

    /// Forget the path so the next sample starts a fresh stroke.
    /// Pixels already painted stay.
    pub fn cancel_stroke(&mut self) {
        self.prev = None;
        self.stroke_dirty = false;
    }

    /// Process one frame of pointer input.
    ///
    /// `selected` is whether the owning task is the active selection; losing
    /// it leaves editing mode. A release of either button after something
    /// was painted raises exactly one undo-worthy change.
    pub fn update(
        &mut self,
        canvas: &mut RasterCanvas,
        sample: &PointerSample,
        selected: bool,
        host: &mut dyn HostCallback,
    ) {
        if !selected {
            if self.editing {
                self.set_editing(false);
            }
            return;
        }
        if !self.editing {
            return;
        }

        let pos = Point::new(sample.position.x.trunc(), sample.position.y.trunc());
        let ink = if !canvas.contains(pos.x, pos.y) {
            None
        } else if sample.primary_down {
            Some(Ink::Foreground)
        } else if sample.secondary_down || sample.secondary_released {
            Some(Ink::Background)
        } else {
            None
        };

        match ink {
            Some(ink) => {
                stroke_to(canvas, self.prev, pos, ink, self.cursor.radius());
                self.stroke_dirty = true;
                self.prev = Some(pos);
            }
            None => self.prev = None,
        }

        if (sample.primary_released || sample.secondary_released) && self.stroke_dirty {
            self.stroke_dirty = false;
            self.prev = None;
            host.on_undo_worthy_change();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{ChangeFlags, EventCollector};
    use taskboard_config::Palette;

    fn canvas() -> RasterCanvas {
        RasterCanvas::with_size(128.0, 64.0, 1.0, Palette::default())
    }

    fn down(x: f32, y: f32) -> PointerSample {
        PointerSample { position: Point::new(x, y), primary_down: true, ..Default::default() }
    }

    fn release(x: f32, y: f32) -> PointerSample {
        PointerSample { position: Point::new(x, y), primary_released: true, ..Default::default() }
    }

    #[test]
    fn test_stroke_without_previous_is_single_disk() {
        let mut canvas = canvas();
        stroke_to(&mut canvas, None, Point::new(20.0, 20.0), Ink::Foreground, 1.0);
        assert_eq!(canvas.ink_count(), 5);
    }

    #[test]
    fn test_horizontal_stroke_has_no_gaps() {
        let mut canvas = canvas();
        stroke_to(&mut canvas, Some(Point::new(0.0, 0.0)), Point::new(10.0, 0.0), Ink::Foreground, 1.0);

        for x in 0..=10 {
            assert_eq!(canvas.pixel(x, 0), Some(Ink::Foreground), "gap at x={}", x);
            assert_eq!(canvas.pixel(x, 1), Some(Ink::Foreground), "gap below x={}", x);
        }
        assert_eq!(canvas.pixel(12, 0), Some(Ink::Background));
    }

    #[test]
    fn test_diagonal_stroke_is_connected() {
        let mut canvas = canvas();
        stroke_to(&mut canvas, Some(Point::new(10.0, 10.0)), Point::new(40.0, 30.0), Ink::Foreground, 1.0);

        // Every column between the endpoints has ink
        for x in 10..=40 {
            assert!((0..64).any(|y| canvas.pixel(x, y) == Some(Ink::Foreground)), "column {} empty", x);
        }
    }

    #[test]
    fn test_cursor_size_cycles() {
        let mut rasterizer = StrokeRasterizer::default();
        assert_eq!(rasterizer.cursor().radius(), 1.0);
        assert_eq!(rasterizer.cycle_cursor_size().radius(), 3.0);
        assert_eq!(rasterizer.cycle_cursor_size().radius(), 8.0);
        assert_eq!(rasterizer.cycle_cursor_size().radius(), 1.0);
        assert_eq!(CursorSize::from_index(7).index(), 0);
    }

    #[test]
    fn test_idle_mode_paints_nothing() {
        let mut canvas = canvas();
        let mut rasterizer = StrokeRasterizer::default();
        let mut events = EventCollector::new();

        rasterizer.update(&mut canvas, &down(5.0, 5.0), true, &mut events);
        assert_eq!(canvas.ink_count(), 0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_stroke_connects_frames_and_signals_once() {
        let mut canvas = canvas();
        let mut rasterizer = StrokeRasterizer::default();
        let mut events = EventCollector::new();
        rasterizer.toggle_editing();

        rasterizer.update(&mut canvas, &down(10.0, 10.0), true, &mut events);
        rasterizer.update(&mut canvas, &down(30.0, 10.0), true, &mut events);
        rasterizer.update(&mut canvas, &down(50.0, 10.0), true, &mut events);
        assert_eq!(events.undo_count(), 0);

        for x in 10..=50 {
            assert_eq!(canvas.pixel(x, 10), Some(Ink::Foreground));
        }

        rasterizer.update(&mut canvas, &release(50.0, 10.0), true, &mut events);
        assert_eq!(events.undo_count(), 1);
        assert_eq!(rasterizer.previous_point(), None);

        // A stray release with no stroke does not add another undo step
        rasterizer.update(&mut canvas, &release(50.0, 10.0), true, &mut events);
        assert_eq!(events.undo_count(), 1);
    }

    #[test]
    fn test_secondary_erases() {
        let mut canvas = canvas();
        canvas.fill(Ink::Foreground);
        let mut rasterizer = StrokeRasterizer::default();
        rasterizer.set_editing(true);
        let mut flags = ChangeFlags::new();

        let erase = PointerSample {
            position: Point::new(20.0, 20.0),
            secondary_released: true,
            ..Default::default()
        };
        rasterizer.update(&mut canvas, &erase, true, &mut flags);

        assert_eq!(canvas.pixel(20, 20), Some(Ink::Background));
        assert!(flags.take_undo());
    }

    #[test]
    fn test_leaving_bounds_breaks_path() {
        let mut canvas = canvas();
        let mut rasterizer = StrokeRasterizer::default();
        rasterizer.set_editing(true);
        let mut flags = ChangeFlags::new();

        rasterizer.update(&mut canvas, &down(10.0, 10.0), true, &mut flags);
        rasterizer.update(&mut canvas, &down(-5.0, 10.0), true, &mut flags);
        assert_eq!(rasterizer.previous_point(), None);
        rasterizer.update(&mut canvas, &down(60.0, 10.0), true, &mut flags);

        assert_eq!(canvas.pixel(35, 10), Some(Ink::Background));
    }

    #[test]
    fn test_losing_selection_cancels_without_rollback() {
        let mut canvas = canvas();
        let mut rasterizer = StrokeRasterizer::default();
        rasterizer.set_editing(true);
        let mut events = EventCollector::new();

        rasterizer.update(&mut canvas, &down(10.0, 10.0), true, &mut events);
        let painted = canvas.ink_count();

        rasterizer.update(&mut canvas, &down(20.0, 10.0), false, &mut events);
        assert!(!rasterizer.is_editing());
        assert_eq!(rasterizer.previous_point(), None);
        assert_eq!(canvas.ink_count(), painted);

        // Release after cancellation does not finalize the partial stroke
        rasterizer.update(&mut canvas, &release(20.0, 10.0), true, &mut events);
        assert_eq!(events.undo_count(), 0);
    }

    #[test]
    fn test_toggle_editing_mid_stroke_cancels_without_undo() {
        let mut canvas = canvas();
        let mut rasterizer = StrokeRasterizer::default();
        rasterizer.set_editing(true);
        let mut events = EventCollector::new();

        rasterizer.update(&mut canvas, &down(10.0, 10.0), true, &mut events);
        rasterizer.update(&mut canvas, &down(20.0, 10.0), true, &mut events);
        assert!(rasterizer.previous_point().is_some());
        let painted = canvas.ink_count();
        assert!(painted > 0);

        rasterizer.toggle_editing();
        assert!(!rasterizer.is_editing());
        assert_eq!(rasterizer.previous_point(), None);
        assert_eq!(events.undo_count(), 0);
        // Pixels already drawn stay on the canvas
        assert_eq!(canvas.ink_count(), painted);

        // Turning editing back on starts fresh; the old release is not a stroke end
        rasterizer.toggle_editing();
        assert!(rasterizer.is_editing());
        assert_eq!(rasterizer.previous_point(), None);
        rasterizer.update(&mut canvas, &release(20.0, 10.0), true, &mut events);
        assert_eq!(events.undo_count(), 0);
    }
}
