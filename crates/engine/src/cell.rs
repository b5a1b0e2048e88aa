/// Completion state of one (row, column) cell in a task table.
///
/// Persisted as an integer code: `0 = Empty`, `1 = Done`,
/// `2 = NotApplicable`. Unknown codes read back as `Empty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    #[default]
    Empty,
    Done,
    /// Excluded from completion totals entirely.
    NotApplicable,
}

impl CellState {
    pub fn code(self) -> u8 {
        match self {
            CellState::Empty => 0,
            CellState::Done => 1,
            CellState::NotApplicable => 2,
        }
    }

    /// Lenient decode used by snapshot loading; out-of-range codes repair to `Empty`.
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => CellState::Done,
            2 => CellState::NotApplicable,
            _ => CellState::Empty,
        }
    }

    /// Next state when the user clicks the cell.
    pub fn cycled(self) -> Self {
        match self {
            CellState::Empty => CellState::Done,
            CellState::Done => CellState::NotApplicable,
            CellState::NotApplicable => CellState::Empty,
        }
    }

    /// Whether this cell counts toward the completion maximum.
    #[inline]
    pub fn is_applicable(self) -> bool {
        self != CellState::NotApplicable
    }
}
