//! Completion matrix and the index remapping applied when one line moves or
//! is deleted.
//!
//! The matrix is row-major: `cells[row][col]`. It never knows about labels;
//! `GridModel` owns both and calls `reconcile` after every structural edit so
//! the shape always matches the label sequences.

use crate::cell::CellState;

/// Direction a grid is edited along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Row,
    Column,
}

/// One structural edit along an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEdit {
    /// Line at `from` now lives at `to`; lines in between shift by one.
    Move { from: usize, to: usize },
    /// Line was removed. The caller has already dropped its label.
    Delete(usize),
}

impl LineEdit {
    /// Build an edit from the `(old, new)` index pair used by drag and delete
    /// handlers, where a negative `new` means the line was deleted.
    pub fn from_indices(old: usize, new: isize) -> Self {
        if new < 0 {
            LineEdit::Delete(old)
        } else {
            LineEdit::Move { from: old, to: new as usize }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionMatrix {
    cells: Vec<Vec<CellState>>,
}

impl CompletionMatrix {
    /// All-`Empty` matrix of the given shape.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            cells: vec![vec![CellState::Empty; cols]; rows],
        }
    }

    /// Wrap raw rows as loaded. The result may be ragged until reconciled.
    pub fn from_rows(cells: Vec<Vec<CellState>>) -> Self {
        Self { cells }
    }

    pub fn rows(&self) -> &[Vec<CellState>] {
        &self.cells
    }

    pub fn into_rows(self) -> Vec<Vec<CellState>> {
        self.cells
    }

    pub fn row_count(&self) -> usize {
        self.cells.len()
    }

    /// Widest row. Equal to every row's length once reconciled.
    pub fn col_count(&self) -> usize {
        self.cells.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Number of lines along `axis`.
    pub fn len(&self, axis: Axis) -> usize {
        match axis {
            Axis::Row => self.row_count(),
            Axis::Column => self.col_count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Vec::is_empty)
    }

    /// True when every row has exactly `cols` cells and there are `rows` rows.
    pub fn has_shape(&self, rows: usize, cols: usize) -> bool {
        self.cells.len() == rows && self.cells.iter().all(|r| r.len() == cols)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<CellState> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Set a cell; returns false (and changes nothing) when out of range.
    pub fn set(&mut self, row: usize, col: usize, state: CellState) -> bool {
        match self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(cell) => {
                *cell = state;
                true
            }
            None => false,
        }
    }

    /// Cell lookup that treats missing coordinates of a ragged matrix as `Empty`.
    #[inline]
    fn at(&self, row: usize, col: usize) -> CellState {
        self.get(row, col).unwrap_or_default()
    }

    /// Apply a move or delete along `axis`, producing a fresh matrix.
    ///
    /// A move is a single-slot insertion shift, not a swap: the line at `to`
    /// receives the content of `from`, and every line in between slides one
    /// slot toward the vacated position. Moves with an index outside the
    /// axis, and moves onto the same index, leave the matrix unchanged.
    pub fn remap(&self, axis: Axis, edit: LineEdit) -> Self {
        match edit {
            LineEdit::Move { from, to } => {
                let len = self.len(axis);
                if from == to {
                    return self.clone();
                }
                if from >= len || to >= len {
                    log::warn!(
                        "ignoring {:?} move {} -> {} outside {} lines",
                        axis, from, to, len
                    );
                    return self.clone();
                }
                self.remap_move(axis, from, to)
            }
            LineEdit::Delete(index) => self.remap_delete(axis, index),
        }
    }

    fn remap_move(&self, axis: Axis, from: usize, to: usize) -> Self {
        let lower = from.min(to);
        let upper = from.max(to);

        // Where the content now at `i` came from.
        let source = |i: usize| -> usize {
            if i == to {
                from
            } else if i >= lower && i <= upper {
                if to < from { i - 1 } else { i + 1 }
            } else {
                i
            }
        };

        let cells = self
            .cells
            .iter()
            .enumerate()
            .map(|(y, row)| {
                (0..row.len())
                    .map(|x| match axis {
                        Axis::Row => self.at(source(y), x),
                        Axis::Column => self.at(y, source(x)),
                    })
                    .collect()
            })
            .collect();

        Self { cells }
    }

    fn remap_delete(&self, axis: Axis, index: usize) -> Self {
        let cells = match axis {
            Axis::Row => self
                .cells
                .iter()
                .enumerate()
                .filter(|(y, _)| *y != index)
                .map(|(_, row)| row.clone())
                .collect(),
            Axis::Column => self
                .cells
                .iter()
                .map(|row| {
                    row.iter()
                        .enumerate()
                        .filter(|(x, _)| *x != index)
                        .map(|(_, cell)| *cell)
                        .collect()
                })
                .collect(),
        };

        Self { cells }
    }

    /// Swap rows and columns: `new[y][x] = old[x][y]`.
    pub fn transpose(&self) -> Self {
        let rows = self.row_count();
        let cols = self.col_count();

        let cells = (0..cols)
            .map(|y| (0..rows).map(|x| self.at(x, y)).collect())
            .collect();

        Self { cells }
    }

    /// Rebuild to exactly `rows x cols`, carrying over every cell whose
    /// coordinate exists in the old shape and filling the rest with `Empty`.
    pub fn reconcile(&self, rows: usize, cols: usize) -> Self {
        let cells = (0..rows)
            .map(|y| (0..cols).map(|x| self.at(y, x)).collect())
            .collect();

        Self { cells }
    }

    /// Cells marked `Done`.
    pub fn completion_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| **cell == CellState::Done)
            .count()
    }

    /// Cells that can be completed, i.e. everything but `NotApplicable`.
    pub fn completion_max(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.is_applicable())
            .count()
    }
}
