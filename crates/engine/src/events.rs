//! Host notifications for board edits.
//!
//! Models never hold a pointer back to their owning task or board. Instead
//! every mutating call takes a `&mut dyn HostCallback`, and the host decides
//! what a structure change or an undo-worthy change means (rebuilding the
//! edit panel, recording an undo step).

use crate::matrix::Axis;

/// Capability handed to mutating operations.
pub trait HostCallback {
    /// Rows or columns were added, removed, reordered, or transposed.
    /// `None` means both axes changed at once.
    fn on_structure_changed(&mut self, _axis: Option<Axis>) {}

    /// Something changed that the host should record as one undo step.
    fn on_undo_worthy_change(&mut self) {}
}

/// Callback that ignores everything, for load paths and tests that
/// don't care about notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHost;

impl HostCallback for NoopHost {}

/// Boolean change signals the host polls once per frame.
///
/// The host must clear the undo flag after consuming it; `take_undo` does
/// both in one step.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ChangeFlags {
    pub undo: bool,
    pub structure: bool,
}

impl ChangeFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and clear the undo-worthy signal.
    pub fn take_undo(&mut self) -> bool {
        std::mem::take(&mut self.undo)
    }

    /// Read and clear the structure-changed signal.
    pub fn take_structure(&mut self) -> bool {
        std::mem::take(&mut self.structure)
    }
}

impl HostCallback for ChangeFlags {
    fn on_structure_changed(&mut self, _axis: Option<Axis>) {
        self.structure = true;
    }

    fn on_undo_worthy_change(&mut self) {
        self.undo = true;
    }
}

/// Events recorded by [`EventCollector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardEvent {
    StructureChanged(Option<Axis>),
    UndoWorthyChange,
}

/// Simple event collector for testing.
#[derive(Debug, Default)]
pub struct EventCollector {
    events: Vec<BoardEvent>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn events(&self) -> &[BoardEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of undo steps the host would have recorded.
    pub fn undo_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, BoardEvent::UndoWorthyChange))
            .count()
    }

    /// Axes reported by structure-change events, in order.
    pub fn structure_changes(&self) -> Vec<Option<Axis>> {
        self.events
            .iter()
            .filter_map(|e| match e {
                BoardEvent::StructureChanged(axis) => Some(*axis),
                _ => None,
            })
            .collect()
    }
}

impl HostCallback for EventCollector {
    fn on_structure_changed(&mut self, axis: Option<Axis>) {
        self.events.push(BoardEvent::StructureChanged(axis));
    }

    fn on_undo_worthy_change(&mut self) {
        self.events.push(BoardEvent::UndoWorthyChange);
    }
}
