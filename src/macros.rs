//! Logging macros that record the caller's module path.
//!
//! Arguments after the template are interpolated printf-style.
//!
//! # Examples
//!
//! ```
//! use seqlog::prelude::*;
//! use seqlog::{info, warning};
//!
//! let memory = MemorySink::new();
//! let logger = Logger::new("server", Level::Info, "%(module) %(message)", memory.sink(), true);
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! warning!(logger, "Port %d already in use, trying %d", port, port + 1);
//!
//! assert!(memory.contents().contains("Port 8080 already in use, trying 8081"));
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use seqlog::prelude::*;
/// # let logger = seqlog::simple_logger("doc");
/// use seqlog::log;
/// log!(logger, Level::Info, "Simple message");
/// log!(logger, Level::Error, "Error code: %d", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $logger.log_at(
            $level,
            ::core::option::Option::Some($crate::CallSite::new(
                ::core::file!(),
                ::core::line!(),
                ::core::option::Option::Some(::core::module_path!()),
            )),
            $template,
            &[$(&$arg as &dyn $crate::Arg),*],
        )
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Warning, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use seqlog::prelude::*;
/// # let logger = seqlog::simple_logger("doc");
/// use seqlog::error;
/// let path = "/etc/app.conf";
/// error!(logger, "Failed to read %s: %s", path, "permission denied");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Error, $($arg)+)
    };
}

/// Log a critical-level message.
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Critical, $($arg)+)
    };
}
