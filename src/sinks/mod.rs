//! Sink implementations
//!
//! A [`Sink`] is a shared handle to a byte-stream destination. Cloning the
//! handle shares the destination; the logger only ever writes through it and
//! leaves opening, flushing and closing to whoever created it.

pub mod console;
pub mod file;
pub mod memory;

pub use memory::MemorySink;

use parking_lot::Mutex;
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

#[derive(Clone)]
pub struct Sink {
    label: Arc<str>,
    writer: Arc<Mutex<dyn Write + Send>>,
}

impl Sink {
    /// Wrap any writer as a sink
    ///
    /// # Example
    ///
    /// ```
    /// use seqlog::Sink;
    ///
    /// let sink = Sink::from_writer("buffer", Vec::<u8>::new());
    /// assert_eq!(sink.label(), "buffer");
    /// ```
    pub fn from_writer<W>(label: impl Into<String>, writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            label: Arc::from(label.into()),
            writer: Arc::new(Mutex::new(writer)),
        }
    }

    /// Share a writer the caller keeps a handle to
    pub fn from_shared<W>(label: impl Into<String>, writer: Arc<Mutex<W>>) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            label: Arc::from(label.into()),
            writer,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Write the whole buffer while holding the sink's lock
    ///
    /// Concurrent writers never interleave within one call.
    pub fn write_all(&self, bytes: &[u8]) -> io::Result<()> {
        self.writer.lock().write_all(bytes)
    }

    pub fn flush(&self) -> io::Result<()> {
        self.writer.lock().flush()
    }

    /// Whether both handles point at the same destination
    pub fn same_destination(&self, other: &Sink) -> bool {
        Arc::ptr_eq(&self.writer, &other.writer)
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink").field("label", &self.label).finish()
    }
}
