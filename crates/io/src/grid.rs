// Task table snapshot
//
// {"Columns": [...], "Rows": [...], "Completion": [[0, 1, 2], ...]}
//
// Completion is row-major with one inner list per row; codes are
// 0 = empty, 1 = done, 2 = not applicable.

use serde::{Deserialize, Serialize};

use taskboard_engine::{CellState, CompletionMatrix, GridModel};

use crate::lenient;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    #[serde(rename = "Columns", default, deserialize_with = "lenient::strings")]
    pub columns: Vec<String>,
    #[serde(rename = "Rows", default, deserialize_with = "lenient::strings")]
    pub rows: Vec<String>,
    #[serde(rename = "Completion", default, deserialize_with = "lenient::int_rows")]
    pub completion: Vec<Vec<i64>>,
}

impl GridSnapshot {
    pub fn capture(grid: &GridModel) -> Self {
        Self {
            columns: grid.columns().iter().map(|l| l.text.clone()).collect(),
            rows: grid.rows().iter().map(|l| l.text.clone()).collect(),
            completion: grid
                .matrix()
                .rows()
                .iter()
                .map(|row| row.iter().map(|cell| cell.code() as i64).collect())
                .collect(),
        }
    }

    /// Rebuild the model. Unknown cell codes become `Empty` and the matrix is
    /// reconciled to the label counts.
    pub fn restore(&self) -> GridModel {
        let matrix = CompletionMatrix::from_rows(
            self.completion
                .iter()
                .map(|row| row.iter().map(|code| CellState::from_code(*code)).collect())
                .collect(),
        );
        GridModel::from_parts(self.columns.clone(), self.rows.clone(), matrix)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
