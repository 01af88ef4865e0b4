//! tracing subscriber setup.
//!
//! The filter comes from `TB_LOG` (e.g. `TB_LOG=debug`), defaulting to `warn`.
//! CLI runs log to stderr. The TUI owns the terminal, so it logs to
//! `.todoboard/tb.log` instead.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "TB_LOG";
pub const LOG_FILE: &str = "tb.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Log to stderr. A second call (or a subscriber set elsewhere) is ignored.
pub fn init_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Log to `<board_dir>/tb.log`. Keep the guard alive until exit so
/// buffered lines are flushed.
pub fn init_file(board_dir: &Path) -> Option<WorkerGuard> {
    let appender = tracing_appender::rolling::never(board_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(writer)
        .try_init()
        .ok()
        .map(|_| guard)
}
