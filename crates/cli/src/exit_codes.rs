//! CLI Exit Code Registry
//!
//! Single source of truth for `tboard` exit codes. Scripts rely on them.
//!
//! | Code | Meaning                                            |
//! |------|----------------------------------------------------|
//! | 0    | Success                                            |
//! | 1    | General error                                      |
//! | 2    | Usage error (bad arguments, missing task part)     |
//! | 3    | I/O error (unreadable input, unwritable output)    |
//! | 4    | Parse error (input is not a task snapshot)         |

use taskboard_io::SnapshotError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, or the snapshot lacks the part a command
/// operates on.
pub const EXIT_USAGE: u8 = 2;

/// Reading or writing a snapshot file failed.
pub const EXIT_IO: u8 = 3;

/// The input file is not a task snapshot.
pub const EXIT_PARSE: u8 = 4;

/// Map a snapshot error to its exit code.
pub fn snapshot_exit_code(err: &SnapshotError) -> u8 {
    match err {
        SnapshotError::Io(_) => EXIT_IO,
        SnapshotError::Parse(_) => EXIT_PARSE,
        SnapshotError::Serialize(_) => EXIT_ERROR,
    }
}
