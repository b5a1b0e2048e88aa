//! Task table: ordered row and column labels plus their completion matrix.
//!
//! Invariants held after every public call:
//! - at least one row and one column exist;
//! - the matrix shape is exactly `rows.len() x columns.len()`.
//!
//! Edits that would break the first invariant are refused as no-ops. The
//! second is restored by `reconcile`, the only place the shape is decided.

use crate::cell::CellState;
use crate::drag::{drop_index, DragMoved};
use crate::events::HostCallback;
use crate::matrix::{Axis, CompletionMatrix, LineEdit};

/// Identity of one row or column label, stable across reorders.
/// Never reused within a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LabelId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisLabel {
    pub id: LabelId,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct GridModel {
    rows: Vec<AxisLabel>,
    columns: Vec<AxisLabel>,
    matrix: CompletionMatrix,
    next_id: u64,
}

impl Default for GridModel {
    fn default() -> Self {
        Self::new()
    }
}

impl GridModel {
    /// New table with one unnamed row and one unnamed column.
    pub fn new() -> Self {
        let mut grid = Self {
            rows: Vec::new(),
            columns: Vec::new(),
            matrix: CompletionMatrix::default(),
            next_id: 1,
        };
        grid.seed_missing_lines();
        grid.reconcile();
        grid
    }

    /// Build from loaded data. A stale or mismatched matrix is reconciled to
    /// the label counts; an axis with no labels gets one seeded line.
    pub fn from_parts(columns: Vec<String>, rows: Vec<String>, matrix: CompletionMatrix) -> Self {
        let mut grid = Self {
            rows: Vec::new(),
            columns: Vec::new(),
            matrix,
            next_id: 1,
        };
        grid.columns = columns.into_iter().map(|text| grid.make_label(text)).collect();
        grid.rows = rows.into_iter().map(|text| grid.make_label(text)).collect();
        grid.seed_missing_lines();

        if !grid.matrix.has_shape(grid.rows.len(), grid.columns.len()) {
            log::warn!(
                "completion matrix {}x{} does not match {} rows x {} columns; repairing",
                grid.matrix.row_count(),
                grid.matrix.col_count(),
                grid.rows.len(),
                grid.columns.len()
            );
        }
        grid.reconcile();
        grid
    }

    /// Replace this table's content with a deep copy of `other`.
    /// Labels get fresh ids from this model.
    pub fn copy_from(&mut self, other: &GridModel) {
        self.rows = other.rows.iter().map(|l| self.make_label(l.text.clone())).collect();
        self.columns = other.columns.iter().map(|l| self.make_label(l.text.clone())).collect();
        self.matrix = other.matrix.clone();
        self.reconcile();
    }

    fn make_label(&mut self, text: String) -> AxisLabel {
        let id = LabelId(self.next_id);
        self.next_id += 1;
        AxisLabel { id, text }
    }

    fn seed_missing_lines(&mut self) {
        if self.columns.is_empty() {
            let label = self.make_label(String::new());
            self.columns.push(label);
        }
        if self.rows.is_empty() {
            let label = self.make_label(String::new());
            self.rows.push(label);
        }
    }

    fn labels_mut(&mut self, axis: Axis) -> &mut Vec<AxisLabel> {
        match axis {
            Axis::Row => &mut self.rows,
            Axis::Column => &mut self.columns,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn rows(&self) -> &[AxisLabel] {
        &self.rows
    }

    pub fn columns(&self) -> &[AxisLabel] {
        &self.columns
    }

    pub fn labels(&self, axis: Axis) -> &[AxisLabel] {
        match axis {
            Axis::Row => &self.rows,
            Axis::Column => &self.columns,
        }
    }

    pub fn matrix(&self) -> &CompletionMatrix {
        &self.matrix
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Current position of the label with `id` on `axis`.
    pub fn index_of(&self, axis: Axis, id: LabelId) -> Option<usize> {
        self.labels(axis).iter().position(|l| l.id == id)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<CellState> {
        self.matrix.get(row, col)
    }

    // =========================================================================
    // Structural edits
    // =========================================================================

    /// Append an empty line at the end of `axis` and return its label.
    pub fn add_line(&mut self, axis: Axis, host: &mut dyn HostCallback) -> &AxisLabel {
        let label = self.make_label(String::new());
        self.labels_mut(axis).push(label);
        self.reconcile();
        log::debug!("added {:?}, table is now {}x{}", axis, self.rows.len(), self.columns.len());

        host.on_structure_changed(Some(axis));
        host.on_undo_worthy_change();

        let labels = self.labels(axis);
        &labels[labels.len() - 1]
    }

    pub fn add_row(&mut self, host: &mut dyn HostCallback) -> &AxisLabel {
        self.add_line(Axis::Row, host)
    }

    pub fn add_column(&mut self, host: &mut dyn HostCallback) -> &AxisLabel {
        self.add_line(Axis::Column, host)
    }

    /// Whether deleting a line on `axis` would be accepted.
    pub fn can_delete(&self, axis: Axis) -> bool {
        self.labels(axis).len() > 1
    }

    /// Delete line `index` on `axis`.
    ///
    /// Returns the index the host should move focus to, or `None` when the
    /// delete was refused (last remaining line, or index out of range).
    pub fn delete_line(&mut self, axis: Axis, index: usize, host: &mut dyn HostCallback) -> Option<usize> {
        if !self.can_delete(axis) {
            log::debug!("refusing to delete the last {:?}", axis);
            return None;
        }
        if index >= self.labels(axis).len() {
            log::debug!("ignoring delete of {:?} {} (out of range)", axis, index);
            return None;
        }

        self.labels_mut(axis).remove(index);
        self.matrix = self.matrix.remap(axis, LineEdit::Delete(index));
        self.reconcile();
        log::debug!("deleted {:?} {}", axis, index);

        host.on_structure_changed(Some(axis));
        host.on_undo_worthy_change();

        Some(index.saturating_sub(1))
    }

    pub fn delete_row(&mut self, index: usize, host: &mut dyn HostCallback) -> Option<usize> {
        self.delete_line(Axis::Row, index, host)
    }

    pub fn delete_column(&mut self, index: usize, host: &mut dyn HostCallback) -> Option<usize> {
        self.delete_line(Axis::Column, index, host)
    }

    /// Move line `from` to position `to` on `axis`, carrying its cells along.
    /// Returns false when nothing moved.
    pub fn move_line(&mut self, axis: Axis, from: usize, to: usize, host: &mut dyn HostCallback) -> bool {
        let len = self.labels(axis).len();
        if from == to || from >= len || to >= len {
            return false;
        }

        let labels = self.labels_mut(axis);
        let label = labels.remove(from);
        labels.insert(to, label);

        self.matrix = self.matrix.remap(axis, LineEdit::Move { from, to });
        self.reconcile();
        log::debug!("moved {:?} {} -> {}", axis, from, to);

        host.on_structure_changed(Some(axis));
        host.on_undo_worthy_change();
        true
    }

    pub fn move_row(&mut self, from: usize, to: usize, host: &mut dyn HostCallback) -> bool {
        self.move_line(Axis::Row, from, to, host)
    }

    pub fn move_column(&mut self, from: usize, to: usize, host: &mut dyn HostCallback) -> bool {
        self.move_line(Axis::Column, from, to, host)
    }

    /// Consume one frame's drag report.
    ///
    /// `positions[i]` is the laid-out coordinate of label `i` on the drag's
    /// axis. Returns `(from, to)` when the dragged label changed slots.
    pub fn apply_drag(
        &mut self,
        drag: &DragMoved,
        positions: &[f32],
        host: &mut dyn HostCallback,
    ) -> Option<(usize, usize)> {
        let from = self.index_of(drag.axis, drag.element)?;
        if positions.len() != self.labels(drag.axis).len() {
            log::debug!(
                "stale drag layout: {} positions for {} labels",
                positions.len(),
                self.labels(drag.axis).len()
            );
            return None;
        }

        let to = drop_index(positions, from, drag.live_coordinate);
        self.move_line(drag.axis, from, to, host).then_some((from, to))
    }

    /// Swap rows and columns wholesale.
    pub fn transpose(&mut self, host: &mut dyn HostCallback) {
        let rows: Vec<AxisLabel> = self.columns.iter().cloned().collect();
        let columns: Vec<AxisLabel> = self.rows.iter().cloned().collect();
        self.rows = rows;
        self.columns = columns;
        self.matrix = self.matrix.transpose();
        self.reconcile();
        log::debug!("transposed, table is now {}x{}", self.rows.len(), self.columns.len());

        host.on_structure_changed(None);
        host.on_undo_worthy_change();
    }

    /// Rebuild the matrix to the current label counts.
    pub fn reconcile(&mut self) {
        let (rows, cols) = (self.rows.len(), self.columns.len());
        if !self.matrix.has_shape(rows, cols) {
            self.matrix = self.matrix.reconcile(rows, cols);
        }
    }

    // =========================================================================
    // Content edits
    // =========================================================================

    /// Rename a line. Returns false when `index` is out of range.
    pub fn set_label(&mut self, axis: Axis, index: usize, text: impl Into<String>) -> bool {
        match self.labels_mut(axis).get_mut(index) {
            Some(label) => {
                label.text = text.into();
                true
            }
            None => false,
        }
    }

    pub fn set_row_label(&mut self, index: usize, text: impl Into<String>) -> bool {
        self.set_label(Axis::Row, index, text)
    }

    pub fn set_column_label(&mut self, index: usize, text: impl Into<String>) -> bool {
        self.set_label(Axis::Column, index, text)
    }

    /// Set one cell. Out-of-range coordinates are ignored.
    pub fn set_cell(&mut self, row: usize, col: usize, state: CellState, host: &mut dyn HostCallback) -> bool {
        if self.matrix.get(row, col) == Some(state) {
            return false;
        }
        let changed = self.matrix.set(row, col, state);
        if changed {
            host.on_undo_worthy_change();
        }
        changed
    }

    /// Advance a cell Empty -> Done -> NotApplicable -> Empty.
    pub fn cycle_cell(&mut self, row: usize, col: usize, host: &mut dyn HostCallback) -> Option<CellState> {
        let next = self.matrix.get(row, col)?.cycled();
        self.set_cell(row, col, next, host);
        Some(next)
    }

    // =========================================================================
    // Completion
    // =========================================================================

    pub fn completion_count(&self) -> usize {
        self.matrix.completion_count()
    }

    pub fn completion_max(&self) -> usize {
        self.matrix.completion_max()
    }

    pub fn is_complete(&self) -> bool {
        self.completion_count() >= self.completion_max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{ChangeFlags, EventCollector, NoopHost};
    use crate::cell::CellState::{Done as D, Empty as E, NotApplicable as N};

    fn texts(labels: &[AxisLabel]) -> Vec<&str> {
        labels.iter().map(|l| l.text.as_str()).collect()
    }

    /// 3 rows x 2 columns, each row tagged with a distinct pattern
    fn sample() -> GridModel {
        GridModel::from_parts(
            vec!["Mon".into(), "Tue".into()],
            vec!["a".into(), "b".into(), "c".into()],
            CompletionMatrix::from_rows(vec![vec![D, E], vec![N, N], vec![E, D]]),
        )
    }

    #[test]
    fn test_new_seeds_one_row_and_column() {
        let grid = GridModel::new();
        assert_eq!(grid.row_count(), 1);
        assert_eq!(grid.column_count(), 1);
        assert!(grid.matrix().has_shape(1, 1));
        assert_eq!(grid.cell(0, 0), Some(E));
    }

    #[test]
    fn test_add_row_and_column_grow_shape() {
        let mut grid = sample();
        let mut events = EventCollector::new();

        let id = grid.add_row(&mut events).id;
        assert_eq!(grid.index_of(Axis::Row, id), Some(3));
        assert!(grid.matrix().has_shape(4, 2));
        assert_eq!(grid.matrix().rows()[3], vec![E, E]);

        grid.add_column(&mut events);
        assert!(grid.matrix().has_shape(4, 3));
        assert_eq!(events.structure_changes(), vec![Some(Axis::Row), Some(Axis::Column)]);
        assert_eq!(events.undo_count(), 2);
    }

    #[test]
    fn test_delete_row_removes_label_and_cells() {
        let mut grid = sample();
        let focus = grid.delete_row(1, &mut NoopHost);

        assert_eq!(focus, Some(0));
        assert_eq!(texts(grid.rows()), vec!["a", "c"]);
        assert_eq!(grid.matrix().rows(), &[vec![D, E], vec![E, D]]);
    }

    #[test]
    fn test_delete_first_row_focuses_new_first() {
        let mut grid = sample();
        assert_eq!(grid.delete_row(0, &mut NoopHost), Some(0));
        assert_eq!(texts(grid.rows()), vec!["b", "c"]);
    }

    #[test]
    fn test_delete_column_removes_label_and_cells() {
        let mut grid = sample();
        grid.delete_column(0, &mut NoopHost);
        assert_eq!(texts(grid.columns()), vec!["Tue"]);
        assert_eq!(grid.matrix().rows(), &[vec![E], vec![N], vec![D]]);
    }

    #[test]
    fn test_delete_last_line_is_refused() {
        let mut grid = GridModel::new();
        let mut flags = ChangeFlags::new();

        assert!(!grid.can_delete(Axis::Row));
        assert_eq!(grid.delete_row(0, &mut flags), None);
        assert_eq!(grid.delete_column(0, &mut flags), None);
        assert_eq!((grid.row_count(), grid.column_count()), (1, 1));
        assert!(!flags.take_undo());
    }

    #[test]
    fn test_delete_out_of_range_is_ignored() {
        let mut grid = sample();
        assert_eq!(grid.delete_row(7, &mut NoopHost), None);
        assert_eq!(grid.row_count(), 3);
    }

    #[test]
    fn test_move_row_carries_cells_with_label() {
        let mut grid = sample();
        assert!(grid.move_row(0, 2, &mut NoopHost));

        assert_eq!(texts(grid.rows()), vec!["b", "c", "a"]);
        assert_eq!(grid.matrix().rows(), &[vec![N, N], vec![E, D], vec![D, E]]);
    }

    #[test]
    fn test_move_column_carries_cells_with_label() {
        let mut grid = sample();
        assert!(grid.move_column(1, 0, &mut NoopHost));

        assert_eq!(texts(grid.columns()), vec!["Tue", "Mon"]);
        assert_eq!(grid.matrix().rows(), &[vec![E, D], vec![N, N], vec![D, E]]);
    }

    #[test]
    fn test_move_noop_does_not_signal() {
        let mut grid = sample();
        let mut events = EventCollector::new();
        assert!(!grid.move_row(1, 1, &mut events));
        assert!(!grid.move_row(1, 5, &mut events));
        assert!(events.is_empty());
    }

    #[test]
    fn test_apply_drag_reorders() {
        let mut grid = sample();
        let dragged = grid.rows()[2].id;
        let drag = DragMoved { element: dragged, axis: Axis::Row, live_coordinate: -5.0 };

        let moved = grid.apply_drag(&drag, &[0.0, 16.0, 32.0], &mut NoopHost);
        assert_eq!(moved, Some((2, 0)));
        assert_eq!(texts(grid.rows()), vec!["c", "a", "b"]);
        assert_eq!(grid.matrix().rows(), &[vec![E, D], vec![D, E], vec![N, N]]);

        // Same frame again: already in place
        assert_eq!(grid.apply_drag(&drag, &[0.0, 16.0, 32.0], &mut NoopHost), None);
    }

    #[test]
    fn test_apply_drag_with_stale_layout_is_ignored() {
        let mut grid = sample();
        let drag = DragMoved { element: grid.rows()[0].id, axis: Axis::Row, live_coordinate: 99.0 };
        assert_eq!(grid.apply_drag(&drag, &[0.0, 16.0], &mut NoopHost), None);
        assert_eq!(texts(grid.rows()), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_transpose_swaps_labels_and_matrix() {
        let mut grid = sample();
        let mut events = EventCollector::new();
        grid.transpose(&mut events);

        assert_eq!(texts(grid.rows()), vec!["Mon", "Tue"]);
        assert_eq!(texts(grid.columns()), vec!["a", "b", "c"]);
        assert_eq!(grid.matrix().rows(), &[vec![D, N, E], vec![E, N, D]]);
        assert_eq!(events.structure_changes(), vec![None]);

        grid.transpose(&mut events);
        assert_eq!(grid.matrix(), sample().matrix());
        assert_eq!(texts(grid.rows()), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_from_parts_repairs_shape() {
        let grid = GridModel::from_parts(
            vec!["x".into(), "y".into()],
            vec!["r".into()],
            CompletionMatrix::from_rows(vec![vec![D], vec![D, D]]),
        );
        assert!(grid.matrix().has_shape(1, 2));
        assert_eq!(grid.matrix().rows(), &[vec![D, E]]);
    }

    #[test]
    fn test_from_parts_seeds_empty_axes() {
        let grid = GridModel::from_parts(Vec::new(), Vec::new(), CompletionMatrix::default());
        assert_eq!((grid.row_count(), grid.column_count()), (1, 1));
    }

    #[test]
    fn test_completion_metrics() {
        let mut grid = GridModel::new();
        grid.add_row(&mut NoopHost);
        grid.add_column(&mut NoopHost);
        assert_eq!((grid.completion_count(), grid.completion_max()), (0, 4));
        assert!(!grid.is_complete());

        grid.set_cell(0, 0, D, &mut NoopHost);
        grid.set_cell(0, 1, N, &mut NoopHost);
        assert_eq!((grid.completion_count(), grid.completion_max()), (1, 3));
        assert!(!grid.is_complete());

        grid.set_cell(1, 0, D, &mut NoopHost);
        grid.set_cell(1, 1, D, &mut NoopHost);
        assert_eq!(grid.completion_count(), grid.completion_max());
        assert!(grid.is_complete());
    }

    #[test]
    fn test_cycle_cell_signals_undo() {
        let mut grid = GridModel::new();
        let mut flags = ChangeFlags::new();

        assert_eq!(grid.cycle_cell(0, 0, &mut flags), Some(D));
        assert!(flags.take_undo());
        assert_eq!(grid.cycle_cell(0, 0, &mut flags), Some(N));
        assert_eq!(grid.cycle_cell(3, 3, &mut flags), None);
    }

    #[test]
    fn test_copy_from_is_deep() {
        let source = sample();
        let mut copy = GridModel::new();
        copy.copy_from(&source);

        assert_eq!(texts(copy.rows()), texts(source.rows()));
        assert_eq!(copy.matrix(), source.matrix());

        copy.set_row_label(0, "changed");
        copy.set_cell(0, 0, N, &mut NoopHost);
        assert_eq!(source.rows()[0].text, "a");
        assert_eq!(source.cell(0, 0), Some(D));
    }

    #[test]
    fn test_label_ids_are_unique() {
        let mut grid = sample();
        let first = grid.add_row(&mut NoopHost).id;
        grid.delete_row(3, &mut NoopHost);
        let second = grid.add_row(&mut NoopHost).id;
        assert_ne!(first, second);
    }
}
