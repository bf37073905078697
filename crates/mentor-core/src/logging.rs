//! Logging configuration using tracing
//!
//! Everything goes to a daily-rolling file: the TUI owns the terminal and
//! headless mode owns stdout, so nothing may be written to either.

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Environment variable holding an `EnvFilter` directive
pub const LOG_ENV: &str = "MENTOR_LOG";

/// Filter used when `MENTOR_LOG` is unset or unparsable
pub const DEFAULT_FILTER: &str = "code_mentor=info,mentor_app=info,mentor_client=info,warn";

const LOG_FILE_PREFIX: &str = "mentor.log";

/// Initialize the logging subsystem; returns the log directory
///
/// # Examples
/// ```bash
/// MENTOR_LOG=debug mentor
/// MENTOR_LOG=mentor_client=trace mentor --headless --repo https://github.com/user/repo
/// ```
pub fn init() -> Result<PathBuf> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_PREFIX);

    tracing_subscriber::registry()
        .with(env_filter(std::env::var(LOG_ENV).ok().as_deref()))
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    Ok(log_dir)
}

/// `<data_local_dir>/code-mentor/logs`, or `./code-mentor/logs` without a home
pub fn log_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("code-mentor")
        .join("logs")
}

/// Build the filter from a `MENTOR_LOG` value, falling back to [`DEFAULT_FILTER`]
fn env_filter(directive: Option<&str>) -> EnvFilter {
    directive
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}
