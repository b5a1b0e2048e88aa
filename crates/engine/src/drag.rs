//! Drag-to-reorder resolution.
//!
//! The host owns the widgets and pointer; once per frame it reports where the
//! dragged label currently is. This module turns that continuous coordinate
//! into a discrete target index without touching any widget state.

use crate::grid::LabelId;
use crate::matrix::Axis;

/// Emitted by the host once per frame while a label is being dragged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragMoved {
    pub element: LabelId,
    pub axis: Axis,
    /// Pointer coordinate along the list's layout direction.
    pub live_coordinate: f32,
}

/// Index the dragged line should occupy.
///
/// Equivalent to a stable sort of the lines by layout position with the
/// dragged line's position replaced by `live`: every other line whose
/// position is smaller, or equal but already ahead of the dragged line,
/// ends up before it.
pub fn drop_index(positions: &[f32], dragged: usize, live: f32) -> usize {
    positions
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != dragged)
        .filter(|(i, pos)| **pos < live || (**pos == live && *i < dragged))
        .count()
}
