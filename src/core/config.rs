//! Logger configuration
//!
//! [`LoggerBuilder`] is the fluent way to assemble a logger in code.
//! [`LoggerConfig`] is the same information as plain data, deserializable with
//! serde from whatever configuration source the application already uses.

use super::{
    error::{LoggerError, Result},
    formatter::BASIC_FORMAT,
    level::Level,
    logger::Logger,
    timestamp::TimestampFormat,
};
use crate::sinks::Sink;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use seqlog::prelude::*;
///
/// let memory = MemorySink::new();
/// let logger = Logger::builder()
///     .name("worker")
///     .level(Level::Debug)
///     .format("%(seqid) %(levelname) %(message)")
///     .sink(memory.sink())
///     .sync(false)
///     .build();
///
/// logger.debug("ready", &[]);
/// assert_eq!(memory.contents(), "0 DEBUG ready\n");
/// ```
pub struct LoggerBuilder {
    name: String,
    level: Level,
    format: String,
    sink: Option<Sink>,
    sync: bool,
    timestamp_format: TimestampFormat,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            name: String::new(),
            level: Level::Warning,
            format: BASIC_FORMAT.to_string(),
            sink: None,
            sync: true,
            timestamp_format: TimestampFormat::default(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Set the sink; stdout is used when none is given
    #[must_use = "builder methods return a new value"]
    pub fn sink(mut self, sink: Sink) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Serialize whole emissions under the logger lock (default `true`)
    #[must_use = "builder methods return a new value"]
    pub fn sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn build(self) -> Logger {
        let sink = self.sink.unwrap_or_else(Sink::stdout);
        let logger = Logger::new(self.name, self.level, self.format, sink, self.sync);
        logger.set_timestamp_format(self.timestamp_format);
        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

/// Where a configured logger writes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    #[default]
    Stdout,
    Stderr,
    /// Created (or truncated) when the logger is built
    File { path: PathBuf },
}

impl Destination {
    pub fn open(&self) -> Result<Sink> {
        match self {
            Destination::Stdout => Ok(Sink::stdout()),
            Destination::Stderr => Ok(Sink::stderr()),
            Destination::File { path } => Sink::create_file(path),
        }
    }
}

/// Serializable logger configuration
///
/// Every field, `name` included, is optional when deserializing; missing
/// fields take their [`LoggerConfig::default`] values.
///
/// # Example
///
/// ```
/// use seqlog::{Level, LoggerConfig};
///
/// let config: LoggerConfig = serde_json::from_str(
///     r#"{ "name": "api", "level": "ERROR", "destination": "stderr" }"#,
/// ).unwrap();
///
/// let logger = config.build().unwrap();
/// assert_eq!(logger.level(), Level::Error);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub name: String,
    pub level: Level,
    pub format: String,
    pub destination: Destination,
    pub sync: bool,
    pub timestamp_format: TimestampFormat,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            level: Level::Warning,
            format: BASIC_FORMAT.to_string(),
            destination: Destination::default(),
            sync: true,
            timestamp_format: TimestampFormat::default(),
        }
    }
}

impl LoggerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.format.is_empty() {
            return Err(LoggerError::config("LoggerConfig", "format must not be empty"));
        }
        if let Destination::File { path } = &self.destination {
            if path.as_os_str().is_empty() {
                return Err(LoggerError::config("LoggerConfig", "file path must not be empty"));
            }
        }
        Ok(())
    }

    /// Open the destination and build the logger
    ///
    /// Fails without returning a logger if the destination cannot be opened.
    pub fn build(&self) -> Result<Logger> {
        self.validate()?;
        let sink = self.destination.open()?;
        Ok(Logger::builder()
            .name(self.name.clone())
            .level(self.level)
            .format(self.format.clone())
            .sink(sink)
            .sync(self.sync)
            .timestamp_format(self.timestamp_format.clone())
            .build())
    }
}
