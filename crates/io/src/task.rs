// Task snapshot file
//
// {
//   "Version": "0.7.0",
//   "Table": {"Columns": [...], "Rows": [...], "Completion": [[...]]},
//   "Whiteboard": ["<base64 row>", ...]
// }
//
// A task may carry a table, a whiteboard, both or neither. Whiteboard rows
// are listed bottom row first; their layout depends on "Version".

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use taskboard_config::Palette;
use taskboard_engine::{GridModel, RasterCanvas};

use crate::canvas;
use crate::error::SnapshotError;
use crate::grid::GridSnapshot;
use crate::lenient;
use crate::version::{FormatVersion, FORMAT_VERSION};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSnapshot {
    #[serde(rename = "Version", default = "current_version", deserialize_with = "lenient::version_tag")]
    pub version: String,
    #[serde(
        rename = "Table",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::optional_section"
    )]
    pub table: Option<GridSnapshot>,
    #[serde(
        rename = "Whiteboard",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::encoded_rows"
    )]
    pub whiteboard: Option<Vec<String>>,
}

fn current_version() -> String {
    FORMAT_VERSION.to_string()
}

impl Default for TaskSnapshot {
    fn default() -> Self {
        Self {
            version: current_version(),
            table: None,
            whiteboard: None,
        }
    }
}

impl TaskSnapshot {
    /// Snapshot the given parts at the current format version.
    pub fn capture(grid: Option<&GridModel>, whiteboard: Option<&RasterCanvas>) -> Self {
        Self {
            version: current_version(),
            table: grid.map(GridSnapshot::capture),
            whiteboard: whiteboard.map(canvas::encode),
        }
    }

    /// Stored version tag; unreadable tags count as the current format.
    pub fn format_version(&self) -> FormatVersion {
        FormatVersion::parse_lenient(&self.version)
    }

    pub fn is_current(&self) -> bool {
        self.format_version() == FormatVersion::current()
    }

    pub fn restore_grid(&self) -> Option<GridModel> {
        self.table.as_ref().map(GridSnapshot::restore)
    }

    /// Decode the whiteboard with the layout its version implies.
    pub fn restore_canvas(&self, grid_unit: f32, palette: Palette) -> Option<RasterCanvas> {
        let rows = self.whiteboard.as_ref()?;
        Some(canvas::decode(rows.as_slice(), &self.format_version(), grid_unit, palette))
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(SnapshotError::Parse)
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self).map_err(SnapshotError::Serialize)
    }
}

pub fn load(path: &Path) -> Result<TaskSnapshot, SnapshotError> {
    let content = fs::read_to_string(path)?;
    let snapshot = TaskSnapshot::from_json(&content)?;
    log::debug!(
        "loaded {} (version {}, table: {}, whiteboard: {})",
        path.display(),
        snapshot.version,
        snapshot.table.is_some(),
        snapshot.whiteboard.is_some()
    );
    Ok(snapshot)
}

pub fn save(snapshot: &TaskSnapshot, path: &Path) -> Result<(), SnapshotError> {
    let json = snapshot.to_json()?;
    fs::write(path, json)?;
    log::debug!("saved {}", path.display());
    Ok(())
}
