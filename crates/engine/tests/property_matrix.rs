// Property-based tests for table reordering.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use proptest::prelude::*;
use taskboard_engine::{Axis, CellState, CompletionMatrix, GridModel, LineEdit, NoopHost};

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

fn arb_state() -> impl Strategy<Value = CellState> {
    prop_oneof![
        2 => Just(CellState::Empty),
        2 => Just(CellState::Done),
        1 => Just(CellState::NotApplicable),
    ]
}

/// Rectangular matrix, 1..6 rows by 1..6 columns.
fn arb_matrix() -> impl Strategy<Value = CompletionMatrix> {
    (1usize..6, 1usize..6).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(prop::collection::vec(arb_state(), cols), rows)
            .prop_map(CompletionMatrix::from_rows)
    })
}

/// Grid whose row labels are their original indices, so identity can be tracked.
fn grid_from(matrix: &CompletionMatrix) -> GridModel {
    GridModel::from_parts(
        (0..matrix.col_count()).map(|c| format!("c{c}")).collect(),
        (0..matrix.row_count()).map(|r| format!("r{r}")).collect(),
        matrix.clone(),
    )
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn transpose_twice_is_identity(matrix in arb_matrix()) {
        let once = matrix.transpose();
        prop_assert!(once.has_shape(matrix.col_count(), matrix.row_count()));
        prop_assert_eq!(once.transpose(), matrix);
    }

    #[test]
    fn moved_rows_keep_their_cells(matrix in arb_matrix(), a in 0usize..6, b in 0usize..6) {
        let rows = matrix.row_count();
        let (a, b) = (a % rows, b % rows);
        let mut grid = grid_from(&matrix);

        grid.move_row(a, b, &mut NoopHost);

        prop_assert!(grid.matrix().has_shape(rows, matrix.col_count()));
        for (pos, label) in grid.rows().iter().enumerate() {
            let original: usize = label.text[1..].parse().unwrap();
            prop_assert_eq!(&grid.matrix().rows()[pos], &matrix.rows()[original]);
        }
    }

    #[test]
    fn rows_between_shift_by_one(matrix in arb_matrix(), a in 0usize..6, b in 0usize..6) {
        let rows = matrix.row_count();
        let (a, b) = (a % rows, b % rows);
        let moved = matrix.remap(Axis::Row, LineEdit::Move { from: a, to: b });

        for i in 0..rows {
            let expected = if i == b {
                a
            } else if a < b && i >= a && i < b {
                i + 1
            } else if b < a && i > b && i <= a {
                i - 1
            } else {
                i
            };
            prop_assert_eq!(&moved.rows()[i], &matrix.rows()[expected]);
        }
    }

    #[test]
    fn delete_keeps_shape_consistent(matrix in arb_matrix(), i in 0usize..6, column in any::<bool>()) {
        let mut grid = grid_from(&matrix);
        let axis = if column { Axis::Column } else { Axis::Row };
        let before = grid.labels(axis).len();

        let accepted = grid.delete_line(axis, i, &mut NoopHost).is_some();

        prop_assert_eq!(accepted, before > 1 && i < before);
        let after = if accepted { before - 1 } else { before };
        prop_assert_eq!(grid.labels(axis).len(), after);
        prop_assert!(grid.matrix().has_shape(grid.row_count(), grid.column_count()));
        prop_assert!(grid.row_count() >= 1 && grid.column_count() >= 1);
    }

    #[test]
    fn completion_totals_bound(matrix in arb_matrix()) {
        let grid = grid_from(&matrix);
        prop_assert!(grid.completion_count() <= grid.completion_max());
        prop_assert_eq!(grid.is_complete(), grid.completion_count() >= grid.completion_max());
    }
}
