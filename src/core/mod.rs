//! Core logger types

pub mod config;
pub mod error;
pub mod formatter;
pub mod interpolate;
pub mod level;
pub mod logger;
pub mod metrics;
pub mod record;
pub mod timestamp;

pub use config::{Destination, LoggerBuilder, LoggerConfig};
pub use error::{LoggerError, Result};
pub use formatter::{Field, Formatter, BASIC_FORMAT, RICH_FORMAT};
pub use interpolate::{interpolate, Arg};
pub use level::{level_name, level_of, Level};
pub use logger::{Emission, Logger};
pub use metrics::LoggerMetrics;
pub use record::{CallSite, LogRecord};
pub use timestamp::TimestampFormat;
