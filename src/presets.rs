//! Ready-made logger configurations

use crate::core::{Level, Logger, Result, BASIC_FORMAT, RICH_FORMAT};
use crate::sinks::Sink;
use std::path::Path;

/// File written by [`rich_logger`]
pub const DEFAULT_FILE_NAME: &str = "logging.log";

/// Stdout, `WARNING` and above, [`BASIC_FORMAT`], synchronized
pub fn simple_logger(name: impl Into<String>) -> Logger {
    Logger::new(name, Level::Warning, BASIC_FORMAT, Sink::stdout(), true)
}

/// Same configuration as [`simple_logger`]
pub fn basic_logger(name: impl Into<String>) -> Logger {
    simple_logger(name)
}

/// Everything, [`RICH_FORMAT`], written to [`DEFAULT_FILE_NAME`] in the
/// working directory
pub fn rich_logger(name: impl Into<String>) -> Result<Logger> {
    file_logger(name, Level::Notset, RICH_FORMAT, DEFAULT_FILE_NAME, true)
}

/// Logger writing to a freshly created (or truncated) file
///
/// Returns [`LoggerError::SinkOpen`](crate::LoggerError::SinkOpen) when the
/// file cannot be created; no logger is built in that case.
pub fn file_logger(
    name: impl Into<String>,
    level: Level,
    format: impl Into<String>,
    path: impl AsRef<Path>,
    sync: bool,
) -> Result<Logger> {
    let sink = Sink::create_file(path)?;
    Ok(Logger::new(name, level, format, sink, sync))
}
