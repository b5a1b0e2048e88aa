//! Snapshot I/O for board tasks: the completion table as JSON, the
//! whiteboard as base64 pixel rows, and the version tag that decides how
//! older whiteboards are read back.

pub mod canvas;
pub mod error;
pub mod grid;
mod lenient;
pub mod task;
pub mod version;

pub use error::SnapshotError;
pub use grid::GridSnapshot;
pub use task::{load, save, TaskSnapshot};
pub use version::{CanvasEncoding, FormatVersion, FORMAT_VERSION, LEGACY_CANVAS_THRESHOLD};
