//! Stress tests for concurrent emission
//!
//! These tests verify:
//! - Sync mode produces whole lines in sequence id order
//! - Unsynchronized mode never tears lines and never duplicates ids
//! - Reconfiguring a logger while other threads emit stays consistent

use seqlog::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn seqid_of(line: &str) -> u64 {
    line.split(' ')
        .next()
        .and_then(|id| id.parse().ok())
        .unwrap_or_else(|| panic!("malformed line: {:?}", line))
}

#[test]
fn test_sync_mode_one_line_per_thread() {
    const THREADS: usize = 32;

    let memory = MemorySink::new();
    let logger = Arc::new(Logger::new(
        "stress",
        Level::Notset,
        "%(seqid) %(thread) %(message)",
        memory.sink(),
        true,
    ));

    // Consume a few ids first so the run does not start at zero
    for _ in 0..3 {
        logger.debug("warmup", &[]);
    }
    memory.clear();
    let start = logger.sequence_id();

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                logger.info("payload from thread %d", &[&t]);
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    let lines = memory.lines();
    assert_eq!(lines.len(), THREADS);

    let ids: Vec<u64> = lines.iter().map(|l| seqid_of(l)).collect();
    let expected: Vec<u64> = (start..start + THREADS as u64).collect();
    assert_eq!(ids, expected, "sync mode writes lines in id order");

    for line in &lines {
        assert!(line.contains("payload from thread "));
    }
}

#[test]
fn test_sync_mode_file_sink_under_load() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("stress.log");

    let logger = Arc::new(
        file_logger("file-stress", Level::Info, "%(seqid) %(message) <end>", &log_file, true)
            .expect("Failed to create logger"),
    );

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..250 {
                    logger.info("thread %d message %04d", &[&t, &i]);
                    logger.debug("filtered %d", &[&i]);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    let content = std::fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2000);
    for (expected, line) in lines.iter().enumerate() {
        assert!(line.ends_with(" <end>"), "torn line: {}", line);
        assert_eq!(seqid_of(line), expected as u64);
    }
    assert_eq!(logger.sequence_id(), 2000);
    assert_eq!(logger.metrics().total_written(), 2000);
}

#[test]
fn test_unsynced_mode_distinct_ids() {
    let memory = MemorySink::new();
    let logger = Arc::new(Logger::new(
        "async-ish",
        Level::Info,
        "%(seqid) %(message) <end>",
        memory.sink(),
        false,
    ));

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                (0..200)
                    .filter_map(|i| logger.info("t%d-%d", &[&t, &i]).seqid())
                    .collect::<Vec<u64>>()
            })
        })
        .collect();

    let mut returned = HashSet::new();
    for handle in handles {
        for id in handle.join().expect("Thread panicked") {
            assert!(returned.insert(id), "duplicate id {}", id);
        }
    }

    let lines = memory.lines();
    assert_eq!(lines.len(), 1600);
    let written: HashSet<u64> = lines
        .iter()
        .inspect(|line| assert!(line.ends_with(" <end>"), "torn line: {}", line))
        .map(|line| seqid_of(line))
        .collect();

    assert_eq!(written, returned);
    assert_eq!(written, (0..1600).collect::<HashSet<u64>>());
}

#[test]
fn test_reconfiguration_during_emission() {
    let memory = MemorySink::new();
    let logger = Arc::new(Logger::new(
        "reconfig",
        Level::Info,
        "%(seqid) A %(message)",
        memory.sink(),
        true,
    ));

    let writers: Vec<_> = (0..4)
        .map(|_| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..500 {
                    logger.info("%d", &[&i]);
                }
            })
        })
        .collect();

    let configurator = {
        let logger = Arc::clone(&logger);
        thread::spawn(move || {
            for i in 0..200 {
                if i % 2 == 0 {
                    logger.set_format("%(seqid) B %(message)");
                    logger.set_name("even");
                } else {
                    logger.set_format("%(seqid) A %(message)");
                    logger.set_name("odd");
                }
                logger.set_sync(i % 3 != 0);
            }
        })
    };

    for handle in writers {
        handle.join().expect("Thread panicked");
    }
    configurator.join().expect("Configurator panicked");

    let lines = memory.lines();
    assert_eq!(lines.len(), 2000);
    for line in &lines {
        let mut parts = line.split(' ');
        let _id = parts.next().expect("id");
        let marker = parts.next().expect("marker");
        assert!(marker == "A" || marker == "B", "unexpected line {}", line);
        assert!(parts.next().is_some());
        assert!(parts.next().is_none());
    }

    let ids: HashSet<u64> = lines.iter().map(|l| seqid_of(l)).collect();
    assert_eq!(ids.len(), 2000);
}
