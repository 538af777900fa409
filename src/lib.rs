//! # seqlog
//!
//! Leveled, template-formatted logging with per-logger sequence ids.
//!
//! ## Features
//!
//! - **Levels**: `NOTSET < DEBUG < INFO < WARNING < ERROR < CRITICAL`
//! - **Templates**: `%(asctime) [%(levelname)] %(name) - %(message)` style formats
//! - **Sequence ids**: every emitted message gets the next id; filtered calls cost nothing
//! - **Thread Safe**: concurrent writes never interleave within a line
//! - **Observable failures**: sink errors are counted instead of panicking
//!
//! ```
//! use seqlog::prelude::*;
//!
//! let memory = MemorySink::new();
//! let logger = Logger::new("disk", Level::Warning, BASIC_FORMAT, memory.sink(), true);
//!
//! logger.info("ignored", &[]);
//! logger.warning("disk at %d%%", &[&90]);
//!
//! assert!(memory.contents().contains("[WARNING] disk - disk at 90%"));
//! ```

pub mod core;
pub mod macros;
pub mod presets;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        Arg, Destination, Emission, Level, Logger, LoggerBuilder, LoggerConfig, LoggerError,
        LoggerMetrics, Result, TimestampFormat, BASIC_FORMAT, RICH_FORMAT,
    };
    pub use crate::presets::{basic_logger, file_logger, rich_logger, simple_logger};
    pub use crate::sinks::{MemorySink, Sink};
}

pub use crate::core::{
    interpolate, level_name, level_of, Arg, CallSite, Destination, Emission, Field, Formatter,
    Level, LogRecord, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, Result,
    TimestampFormat, BASIC_FORMAT, RICH_FORMAT,
};
pub use presets::{basic_logger, file_logger, rich_logger, simple_logger, DEFAULT_FILE_NAME};
pub use sinks::{MemorySink, Sink};
