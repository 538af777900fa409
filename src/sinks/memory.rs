//! In-memory sink

use super::Sink;
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

/// A cloneable in-memory byte buffer
///
/// All clones share the same buffer, so a test can hand [`MemorySink::sink`]
/// to a logger and read the output back afterwards.
///
/// # Example
///
/// ```
/// use seqlog::{Level, Logger, MemorySink, BASIC_FORMAT};
///
/// let memory = MemorySink::new();
/// let logger = Logger::new("app", Level::Info, BASIC_FORMAT, memory.sink(), true);
/// logger.info("started", &[]);
///
/// assert!(memory.contents().ends_with("[INFO] app - started\n"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink handle writing into this buffer
    pub fn sink(&self) -> Sink {
        Sink::from_writer("memory", self.clone())
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(String::from).collect()
    }

    pub fn len(&self) -> usize {
        self.buffer.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.lock().is_empty()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

impl Write for MemorySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_roundtrip() {
        let memory = MemorySink::new();
        assert!(memory.is_empty());

        memory.sink().write_all(b"one\ntwo\n").unwrap();
        assert_eq!(memory.len(), 8);
        assert_eq!(memory.lines(), vec!["one", "two"]);

        memory.clear();
        assert!(memory.is_empty());
        assert_eq!(memory.contents(), "");
    }
}
