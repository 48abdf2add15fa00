//! Process-wide logging bootstrap
//!
//! Logs go to stderr: stdout carries the MCP stream. Initialization happens
//! at most once per process.

use flexi_logger::{Logger, LoggerHandle};
use once_cell::sync::OnceCell;

const SUPPORTED_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    level: &'static str,
    _logger: LoggerHandle,
}

/// Initializes logging at `level`.
///
/// Calling again with the same level is a no-op; a different level is
/// rejected. `RUST_LOG` takes precedence over `level` when set.
///
/// # Errors
/// - Returns an error when `level` is unsupported.
/// - Returns an error when the logger backend cannot start.
pub fn init_logging(level: &str) -> Result<(), String> {
    let level = normalize_level(level)?;

    if let Some(state) = LOGGING_STATE.get() {
        if state.level != level {
            return Err(format!(
                "logging already initialized with level `{}`; refusing to switch to `{}`",
                state.level, level
            ));
        }
        return Ok(());
    }

    let state = LOGGING_STATE.get_or_try_init(|| -> Result<LoggingState, String> {
        let logger = Logger::try_with_env_or_str(level)
            .map_err(|err| format!("invalid log specification `{level}`: {err}"))?
            .log_to_stderr()
            .start()
            .map_err(|err| format!("failed to start logger: {err}"))?;
        Ok(LoggingState {
            level,
            _logger: logger,
        })
    })?;

    log::info!("logging initialized at level `{}`", state.level);
    Ok(())
}

fn normalize_level(level: &str) -> Result<&'static str, String> {
    let lowered = level.trim().to_ascii_lowercase();
    SUPPORTED_LEVELS
        .iter()
        .find(|candidate| **candidate == lowered)
        .copied()
        .ok_or_else(|| {
            format!(
                "unsupported log level `{}`; expected one of: {}",
                level,
                SUPPORTED_LEVELS.join(", ")
            )
        })
}
