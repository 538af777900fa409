//! Main logger implementation
//!
//! A [`Logger`] owns its configuration behind one mutex and hands out
//! sequence ids from a lock-free counter. Each emitted message is filtered,
//! numbered, rendered and written as a single line.
//!
//! In sync mode the whole emission (id allocation, rendering and the write)
//! runs under the configuration lock, so output lines appear in sequence-id
//! order. Otherwise only the configuration snapshot is taken under the lock;
//! rendering happens outside it and the write is serialized by the sink.

use super::{
    error::Result,
    formatter::Formatter,
    interpolate::{interpolate, Arg},
    level::Level,
    metrics::LoggerMetrics,
    record::{CallSite, LogRecord},
    timestamp::TimestampFormat,
};
use crate::sinks::Sink;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Alert on the first write failure and then every this many failures
const WRITE_FAILURE_ALERT_INTERVAL: u64 = 1000;

/// Outcome of a single log call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emission {
    /// Below the logger's level; nothing happened
    Filtered,
    /// Rendered and written to the sink
    Written { seqid: u64 },
    /// Rendered, but the sink rejected the write
    Failed { seqid: u64 },
}

impl Emission {
    pub fn seqid(&self) -> Option<u64> {
        match self {
            Emission::Filtered => None,
            Emission::Written { seqid } | Emission::Failed { seqid } => Some(*seqid),
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self, Emission::Written { .. })
    }

    pub fn is_filtered(&self) -> bool {
        matches!(self, Emission::Filtered)
    }
}

struct LoggerState {
    name: Arc<str>,
    level: Level,
    format: Arc<str>,
    sink: Sink,
    sync: bool,
    timestamp_format: Arc<TimestampFormat>,
}

/// The parts of the configuration a render needs
struct Layout<'a> {
    name: &'a str,
    format: &'a str,
    timestamp_format: &'a TimestampFormat,
}

/// One log call's inputs
struct Call<'a> {
    level: Level,
    call_site: Option<CallSite>,
    template: &'a str,
    args: &'a [&'a dyn Arg],
}

pub struct Logger {
    seqid: AtomicU64,
    state: Mutex<LoggerState>,
    start_instant: Instant,
    start_time: DateTime<Utc>,
    metrics: LoggerMetrics,
}

impl Logger {
    /// Create a logger writing to `sink`
    ///
    /// # Example
    ///
    /// ```
    /// use seqlog::{Level, Logger, MemorySink, BASIC_FORMAT};
    ///
    /// let memory = MemorySink::new();
    /// let logger = Logger::new("app", Level::Warning, BASIC_FORMAT, memory.sink(), true);
    ///
    /// logger.info("x", &[]);
    /// logger.error("y %d", &[&5]);
    ///
    /// assert_eq!(memory.lines().len(), 1);
    /// assert!(memory.contents().contains("y 5"));
    /// ```
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        level: Level,
        format: impl Into<String>,
        sink: Sink,
        sync: bool,
    ) -> Self {
        Self {
            seqid: AtomicU64::new(0),
            state: Mutex::new(LoggerState {
                name: Arc::from(name.into()),
                level,
                format: Arc::from(format.into()),
                sink,
                sync,
                timestamp_format: Arc::new(TimestampFormat::default()),
            }),
            start_instant: Instant::now(),
            start_time: Utc::now(),
            metrics: LoggerMetrics::new(),
        }
    }

    // Configuration

    pub fn name(&self) -> String {
        self.state.lock().name.to_string()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.state.lock().name = Arc::from(name.into());
    }

    pub fn level(&self) -> Level {
        self.state.lock().level
    }

    pub fn set_level(&self, level: Level) {
        self.state.lock().level = level;
    }

    pub fn level_name(&self) -> &'static str {
        self.level().name()
    }

    /// Set the level by its canonical name
    ///
    /// Unknown names leave the current level untouched. Returns whether the
    /// level was changed.
    pub fn set_level_name(&self, name: &str) -> bool {
        match name.parse::<Level>() {
            Ok(level) => {
                self.set_level(level);
                true
            }
            Err(_) => false,
        }
    }

    pub fn format(&self) -> String {
        self.state.lock().format.to_string()
    }

    pub fn set_format(&self, format: impl Into<String>) {
        self.state.lock().format = Arc::from(format.into());
    }

    /// Handle to the current sink
    pub fn writer(&self) -> Sink {
        self.state.lock().sink.clone()
    }

    /// Replace the sink, returning the previous one to the caller
    pub fn set_writer(&self, sink: Sink) -> Sink {
        std::mem::replace(&mut self.state.lock().sink, sink)
    }

    pub fn is_sync(&self) -> bool {
        self.state.lock().sync
    }

    pub fn set_sync(&self, sync: bool) {
        self.state.lock().sync = sync;
    }

    pub fn timestamp_format(&self) -> TimestampFormat {
        self.state.lock().timestamp_format.as_ref().clone()
    }

    pub fn set_timestamp_format(&self, format: TimestampFormat) {
        self.state.lock().timestamp_format = Arc::new(format);
    }

    /// Wall-clock time at construction
    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn elapsed(&self) -> Duration {
        self.start_instant.elapsed()
    }

    /// Number of sequence ids handed out so far
    pub fn sequence_id(&self) -> u64 {
        self.seqid.load(Ordering::SeqCst)
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Flush the current sink
    pub fn flush(&self) -> Result<()> {
        self.writer().flush()?;
        Ok(())
    }

    // Emission

    /// Log `template` interpolated with `args` at `level`
    #[track_caller]
    pub fn log(&self, level: Level, template: &str, args: &[&dyn Arg]) -> Emission {
        self.log_at(level, Some(CallSite::caller()), template, args)
    }

    /// Log with an explicit call site (used by the logging macros)
    pub fn log_at(
        &self,
        level: Level,
        call_site: Option<CallSite>,
        template: &str,
        args: &[&dyn Arg],
    ) -> Emission {
        let call = Call {
            level,
            call_site,
            template,
            args,
        };

        let state = self.state.lock();
        if !level.is_enabled_for(state.level) {
            return Emission::Filtered;
        }

        if state.sync {
            let seqid = self.next_seqid();
            let layout = Layout {
                name: &state.name,
                format: &state.format,
                timestamp_format: &state.timestamp_format,
            };
            let line = self.render(&layout, seqid, &call);
            return self.write_line(&state.sink, seqid, line);
        }

        let name = Arc::clone(&state.name);
        let format = Arc::clone(&state.format);
        let timestamp_format = Arc::clone(&state.timestamp_format);
        let sink = state.sink.clone();
        drop(state);

        let seqid = self.next_seqid();
        let layout = Layout {
            name: &name,
            format: &format,
            timestamp_format: &timestamp_format,
        };
        let line = self.render(&layout, seqid, &call);
        self.write_line(&sink, seqid, line)
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, template: &str, args: &[&dyn Arg]) -> Emission {
        self.log(Level::Debug, template, args)
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, template: &str, args: &[&dyn Arg]) -> Emission {
        self.log(Level::Info, template, args)
    }

    #[inline]
    #[track_caller]
    pub fn warning(&self, template: &str, args: &[&dyn Arg]) -> Emission {
        self.log(Level::Warning, template, args)
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, template: &str, args: &[&dyn Arg]) -> Emission {
        self.log(Level::Warning, template, args)
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, template: &str, args: &[&dyn Arg]) -> Emission {
        self.log(Level::Error, template, args)
    }

    #[inline]
    #[track_caller]
    pub fn critical(&self, template: &str, args: &[&dyn Arg]) -> Emission {
        self.log(Level::Critical, template, args)
    }

    /// Same as [`Logger::critical`]; does not terminate the process
    #[inline]
    #[track_caller]
    pub fn fatal(&self, template: &str, args: &[&dyn Arg]) -> Emission {
        self.log(Level::Critical, template, args)
    }

    /// Log at `NOTSET`, only emitted by loggers configured at `NOTSET`
    #[inline]
    #[track_caller]
    pub fn notset(&self, template: &str, args: &[&dyn Arg]) -> Emission {
        self.log(Level::Notset, template, args)
    }

    fn next_seqid(&self) -> u64 {
        self.metrics.record_emitted();
        self.seqid.fetch_add(1, Ordering::SeqCst)
    }

    fn render(&self, layout: &Layout<'_>, seqid: u64, call: &Call<'_>) -> String {
        let message = interpolate(call.template, call.args);
        let record = LogRecord::new(seqid, call.level, layout.name, &message)
            .with_elapsed(self.start_instant.elapsed())
            .with_call_site(call.call_site);
        Formatter::render(layout.format, &record, layout.timestamp_format)
    }

    fn write_line(&self, sink: &Sink, seqid: u64, mut line: String) -> Emission {
        line.push('\n');
        match sink.write_all(line.as_bytes()) {
            Ok(()) => {
                self.metrics.record_written(line.len());
                Emission::Written { seqid }
            }
            Err(e) => {
                let failed = self.metrics.record_write_failure() + 1;
                if failed == 1 || failed % WRITE_FAILURE_ALERT_INTERVAL == 0 {
                    eprintln!(
                        "[LOGGER ERROR] Write to sink '{}' failed: {} ({} failed writes so far)",
                        sink.label(),
                        e,
                        failed
                    );
                }
                Emission::Failed { seqid }
            }
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Logger")
            .field("name", &state.name)
            .field("level", &state.level)
            .field("format", &state.format)
            .field("sink", &state.sink)
            .field("sync", &state.sync)
            .field("seqid", &self.seqid.load(Ordering::Relaxed))
            .finish()
    }
}
