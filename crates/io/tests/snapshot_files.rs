// File-backed snapshot tests.

use std::fs;

use taskboard_config::Palette;
use taskboard_engine::{CellState, GridModel, Ink, NoopHost, RasterCanvas};
use taskboard_io::{load, save, SnapshotError, TaskSnapshot, FORMAT_VERSION};

#[test]
fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("task.json");

    let mut grid = GridModel::new();
    grid.set_row_label(0, "Water plants");
    grid.set_column_label(0, "Mon");
    grid.add_column(&mut NoopHost);
    grid.set_column_label(1, "Thu");
    grid.set_cell(0, 1, CellState::Done, &mut NoopHost);

    let mut canvas = RasterCanvas::with_size(256.0, 128.0, 16.0, Palette::default());
    canvas.fill_disk(30.0, 30.0, 8.0, Ink::Foreground);

    save(&TaskSnapshot::capture(Some(&grid), Some(&canvas)), &path).unwrap();
    let snapshot = load(&path).unwrap();

    assert_eq!(snapshot.version, FORMAT_VERSION);
    let grid_back = snapshot.restore_grid().unwrap();
    assert_eq!(grid_back.columns()[1].text, "Thu");
    assert_eq!(grid_back.rows()[0].text, "Water plants");
    assert_eq!(grid_back.completion_count(), 1);
    assert_eq!(snapshot.restore_canvas(16.0, Palette::default()).unwrap(), canvas);
}

#[test]
fn test_legacy_file_upgrades_on_resave() {
    let dir = tempfile::tempdir().unwrap();
    let old = dir.path().join("old.json");
    let new = dir.path().join("new.json");

    // 64 x 32 stored pixels, all foreground, written by a half-resolution build
    let row = base64_row(&[1; 64]);
    let rows: Vec<String> = (0..32).map(|_| format!("\"{row}\"")).collect();
    fs::write(
        &old,
        format!(r#"{{"Version": "0.6.1-3", "Whiteboard": [{}]}}"#, rows.join(",")),
    )
    .unwrap();

    let snapshot = load(&old).unwrap();
    let canvas = snapshot.restore_canvas(16.0, Palette::default()).unwrap();
    assert_eq!((canvas.width(), canvas.height()), (128, 64));
    assert_eq!(canvas.ink_count(), 128 * 64);

    save(&TaskSnapshot::capture(None, Some(&canvas)), &new).unwrap();
    let upgraded = load(&new).unwrap();
    assert!(upgraded.is_current());
    assert_eq!(upgraded.whiteboard.as_ref().map(Vec::len), Some(64));
    assert_eq!(upgraded.restore_canvas(16.0, Palette::default()).unwrap(), canvas);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, SnapshotError::Io(_)));
}

#[test]
fn test_garbage_file_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, "{ this is not json").unwrap();
    assert!(matches!(load(&path).unwrap_err(), SnapshotError::Parse(_)));
}

fn base64_row(bits: &[u8]) -> String {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD.encode(bits)
}
