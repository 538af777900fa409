//! File sinks

use super::Sink;
use crate::core::{LoggerError, Result};
use std::fs::{File, OpenOptions};
use std::path::Path;

impl Sink {
    /// Create (or truncate) the file at `path`
    ///
    /// Writes are not buffered, so every emitted line reaches the file as soon
    /// as the log call returns.
    pub fn create_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)
            .map_err(|e| LoggerError::sink_open(path.display().to_string(), e))?;
        Ok(Sink::from_writer(path.display().to_string(), file))
    }

    /// Open the file at `path` for appending, creating it if needed
    pub fn append_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| LoggerError::sink_open(path.display().to_string(), e))?;
        Ok(Sink::from_writer(path.display().to_string(), file))
    }
}
