//! stderr logging for the `tboard` binary.

use flexi_logger::{Logger, LoggerHandle};

/// Start the logger. `RUST_LOG` wins over `level` when set.
///
/// The returned handle must stay alive for the life of the process.
pub fn init(level: &str) -> Result<LoggerHandle, String> {
    Logger::try_with_env_or_str(level)
        .map_err(|err| format!("invalid log level `{level}`: {err}"))?
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))
}
