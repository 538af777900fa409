//! Logger metrics for observability
//!
//! Counters for emitted messages and for sink writes, so that write failures
//! are visible even though log calls never return an error.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// Filtered calls never touch these counters.
///
/// # Example
///
/// ```
/// use seqlog::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_emitted();
/// metrics.record_written(12);
///
/// assert_eq!(metrics.total_emitted(), 1);
/// assert_eq!(metrics.bytes_written(), 12);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Messages that passed the level filter
    total_emitted: AtomicU64,

    /// Messages whose write to the sink succeeded
    total_written: AtomicU64,

    /// Messages whose write to the sink failed
    write_failures: AtomicU64,

    bytes_written: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            total_emitted: AtomicU64::new(0),
            total_written: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
            bytes_written: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn total_emitted(&self) -> u64 {
        self.total_emitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn total_written(&self) -> u64 {
        self.total_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written.load(Ordering::Relaxed)
    }

    /// Record a message that passed the filter; returns the previous count
    #[inline]
    pub fn record_emitted(&self) -> u64 {
        self.total_emitted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_written(&self, bytes: usize) -> u64 {
        self.bytes_written.fetch_add(bytes as u64, Ordering::Relaxed);
        self.total_written.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a failed sink write; returns the previous failure count
    #[inline]
    pub fn record_write_failure(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Failed writes as a percentage of attempted writes (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing has been written yet.
    pub fn failure_rate(&self) -> f64 {
        let failed = self.write_failures() as f64;
        let total = self.total_written() as f64 + failed;
        if total == 0.0 {
            0.0
        } else {
            (failed / total) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.total_emitted.store(0, Ordering::Relaxed);
        self.total_written.store(0, Ordering::Relaxed);
        self.write_failures.store(0, Ordering::Relaxed);
        self.bytes_written.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            total_emitted: AtomicU64::new(self.total_emitted()),
            total_written: AtomicU64::new(self.total_written()),
            write_failures: AtomicU64::new(self.write_failures()),
            bytes_written: AtomicU64::new(self.bytes_written()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.total_emitted(), 0);
        assert_eq!(metrics.total_written(), 0);
        assert_eq!(metrics.write_failures(), 0);
        assert_eq!(metrics.bytes_written(), 0);
    }

    #[test]
    fn test_record_returns_previous_value() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.record_write_failure(), 0);
        assert_eq!(metrics.record_write_failure(), 1);
        assert_eq!(metrics.write_failures(), 2);
    }

    #[test]
    fn test_written_accumulates_bytes() {
        let metrics = LoggerMetrics::new();
        metrics.record_written(10);
        metrics.record_written(5);
        assert_eq!(metrics.total_written(), 2);
        assert_eq!(metrics.bytes_written(), 15);
    }

    #[test]
    fn test_failure_rate() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.failure_rate(), 0.0);

        for _ in 0..90 {
            metrics.record_written(1);
        }
        for _ in 0..10 {
            metrics.record_write_failure();
        }

        let rate = metrics.failure_rate();
        assert!((9.9..=10.1).contains(&rate), "Failure rate was {}", rate);
    }

    #[test]
    fn test_reset_and_snapshot() {
        let metrics = LoggerMetrics::new();
        metrics.record_emitted();
        metrics.record_written(3);

        let snapshot = metrics.clone();
        metrics.reset();

        assert_eq!(metrics.total_emitted(), 0);
        assert_eq!(snapshot.total_emitted(), 1);
        assert_eq!(snapshot.bytes_written(), 3);
    }
}
