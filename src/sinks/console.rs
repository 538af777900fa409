//! Console sinks

use super::Sink;

impl Sink {
    pub fn stdout() -> Self {
        Sink::from_writer("stdout", std::io::stdout())
    }

    pub fn stderr() -> Self {
        Sink::from_writer("stderr", std::io::stderr())
    }
}
