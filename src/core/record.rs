//! Log record structure

use super::level::Level;
use chrono::{DateTime, Utc};
use std::cell::RefCell;
use std::panic::Location;
use std::time::Duration;

// Thread-local caches for thread information to avoid repeated allocations
thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
    static THREAD_NAME_CACHE: RefCell<Option<Option<String>>> = const { RefCell::new(None) };
}

/// Get cached thread ID, computing and caching it on first access
fn get_thread_id() -> String {
    THREAD_ID_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| format!("{:?}", std::thread::current().id()))
            .clone()
    })
}

/// Get cached thread name, computing and caching it on first access
fn get_thread_name() -> Option<String> {
    THREAD_NAME_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| std::thread::current().name().map(String::from))
            .clone()
    })
}

/// Where a log call was made from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    pub file: &'static str,
    pub line: u32,
    pub module_path: Option<&'static str>,
}

impl CallSite {
    pub fn new(file: &'static str, line: u32, module_path: Option<&'static str>) -> Self {
        Self {
            file,
            line,
            module_path,
        }
    }

    /// Capture the location of the outermost `#[track_caller]` frame
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self::new(location.file(), location.line(), None)
    }

    #[must_use]
    pub fn with_module_path(mut self, module_path: &'static str) -> Self {
        self.module_path = Some(module_path);
        self
    }

    /// Final path component of the source file
    pub fn file_name(&self) -> &'static str {
        self.file
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(self.file)
    }
}

/// Snapshot of everything known about one emitted message
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub seqid: u64,
    pub level: Level,
    pub name: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    /// Time since the owning logger was constructed
    pub elapsed: Duration,
    pub call_site: Option<CallSite>,
    pub thread_id: String,
    pub thread_name: Option<String>,
    pub process_id: u32,
}

impl LogRecord {
    /// Sanitize text to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// so that one record always renders as exactly one line. Applied to
    /// the message and to the logger and thread names.
    fn sanitize(text: String) -> String {
        if !text.contains(['\n', '\r', '\t']) {
            return text;
        }
        text.replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(seqid: u64, level: Level, name: impl Into<String>, message: &str) -> Self {
        Self {
            seqid,
            level,
            name: Self::sanitize(name.into()),
            message: Self::sanitize(message.to_string()),
            timestamp: Utc::now(),
            elapsed: Duration::ZERO,
            call_site: None,
            thread_id: get_thread_id(),
            thread_name: get_thread_name().map(Self::sanitize),
            process_id: std::process::id(),
        }
    }

    #[must_use]
    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed = elapsed;
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    #[must_use]
    pub fn with_call_site(mut self, call_site: Option<CallSite>) -> Self {
        self.call_site = call_site;
        self
    }

    /// Thread name if the thread has one, otherwise its id
    pub fn thread_label(&self) -> &str {
        self.thread_name.as_deref().unwrap_or(&self.thread_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_is_sanitized() {
        let record = LogRecord::new(0, Level::Info, "app", "line one\nERROR fake\tentry\r");
        assert_eq!(record.message, "line one\\nERROR fake\\tentry\\r");
    }

    #[test]
    fn test_name_is_sanitized() {
        let record = LogRecord::new(0, Level::Info, "app\nCRITICAL forged", "ok");
        assert_eq!(record.name, "app\\nCRITICAL forged");
        assert_eq!(record.message, "ok");
    }

    #[test]
    fn test_call_site_file_name() {
        let site = CallSite::new("src/core/record.rs", 10, None);
        assert_eq!(site.file_name(), "record.rs");

        let site = CallSite::new("C:\\work\\main.rs", 1, None);
        assert_eq!(site.file_name(), "main.rs");

        let site = CallSite::new("main.rs", 1, None);
        assert_eq!(site.file_name(), "main.rs");
    }

    #[test]
    fn test_caller_captures_this_file() {
        let site = CallSite::caller();
        assert!(site.file.ends_with("record.rs"));
        assert!(site.line > 0);
    }

    #[test]
    fn test_thread_label_falls_back_to_id() {
        let handle = std::thread::Builder::new()
            .name("worker-7".to_string())
            .spawn(|| LogRecord::new(1, Level::Debug, "app", "named").thread_label().to_string())
            .unwrap();
        assert_eq!(handle.join().unwrap(), "worker-7");

        let handle = std::thread::spawn(|| {
            let record = LogRecord::new(1, Level::Debug, "app", "unnamed");
            (record.thread_label().to_string(), record.thread_id.clone())
        });
        let (label, id) = handle.join().unwrap();
        assert_eq!(label, id);
    }
}
