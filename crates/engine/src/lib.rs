//! `taskboard-engine` — completion tables and whiteboard canvases embedded in
//! board tasks.
//!
//! Pure engine crate: no rendering, input devices, or file I/O. The host
//! drives it with discrete edit intents and per-frame pointer samples, and
//! receives notifications through [`events::HostCallback`].

pub mod canvas;
pub mod cell;
pub mod drag;
pub mod events;
pub mod grid;
pub mod matrix;
pub mod stroke;

pub use canvas::{Ink, RasterCanvas};
pub use cell::CellState;
pub use drag::DragMoved;
pub use events::{BoardEvent, ChangeFlags, EventCollector, HostCallback, NoopHost};
pub use grid::{AxisLabel, GridModel, LabelId};
pub use matrix::{Axis, CompletionMatrix, LineEdit};
pub use stroke::{CursorSize, Point, PointerSample, StrokeRasterizer};
