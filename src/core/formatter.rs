//! Template rendering for log records
//!
//! A format is a plain string with `%(field)` placeholders:
//!
//! | Placeholder     | Value                                           |
//! |-----------------|-------------------------------------------------|
//! | `%(name)`       | logger name                                     |
//! | `%(seqid)`      | sequence id                                     |
//! | `%(padseqid)`   | sequence id, zero-padded to 10 digits           |
//! | `%(levelname)`  | level name (`WARNING`)                          |
//! | `%(levelno)`    | level value (`30`)                              |
//! | `%(asctime)`    | timestamp in the logger's [`TimestampFormat`]   |
//! | `%(created)`    | unix time in seconds with microseconds          |
//! | `%(elapsed)`    | seconds since the logger was created            |
//! | `%(relative)`   | milliseconds since the logger was created       |
//! | `%(filename)`   | source file name of the call                    |
//! | `%(pathname)`   | source file path of the call                    |
//! | `%(lineno)`     | source line of the call                         |
//! | `%(module)`     | module path of the call                         |
//! | `%(thread)`     | thread name, or thread id for unnamed threads   |
//! | `%(process)`    | process id                                      |
//! | `%(message)`    | the interpolated message                        |
//!
//! Caller fields that were not captured render as `?`. Unknown placeholders
//! are copied through unchanged.

use super::record::LogRecord;
use super::timestamp::TimestampFormat;
use std::fmt::Write;

/// Timestamp, level, name and message
pub const BASIC_FORMAT: &str = "%(asctime) [%(levelname)] %(name) - %(message)";

/// Adds sequence id, elapsed time and the caller's location
pub const RICH_FORMAT: &str = "%(asctime) [%(levelname)] #%(padseqid) +%(elapsed)s %(name) \
                               %(filename):%(lineno) (%(module)) - %(message)";

const UNKNOWN: &str = "?";

/// Fields that can appear in a format template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    SeqId,
    PaddedSeqId,
    LevelName,
    LevelNo,
    AscTime,
    Created,
    Elapsed,
    Relative,
    FileName,
    PathName,
    LineNo,
    Module,
    Thread,
    Process,
    Message,
}

impl Field {
    pub fn from_key(key: &str) -> Option<Self> {
        let field = match key {
            "name" => Field::Name,
            "seqid" => Field::SeqId,
            "padseqid" => Field::PaddedSeqId,
            "levelname" => Field::LevelName,
            "levelno" => Field::LevelNo,
            "asctime" => Field::AscTime,
            "created" => Field::Created,
            "elapsed" => Field::Elapsed,
            "relative" => Field::Relative,
            "filename" => Field::FileName,
            "pathname" => Field::PathName,
            "lineno" => Field::LineNo,
            "module" => Field::Module,
            "thread" => Field::Thread,
            "process" => Field::Process,
            "message" => Field::Message,
            _ => return None,
        };
        Some(field)
    }

    fn write_to(self, out: &mut String, record: &LogRecord, timestamp_format: &TimestampFormat) {
        let site = record.call_site.as_ref();
        // Writing into a String cannot fail
        let _ = match self {
            Field::Name => write!(out, "{}", record.name),
            Field::SeqId => write!(out, "{}", record.seqid),
            Field::PaddedSeqId => write!(out, "{:010}", record.seqid),
            Field::LevelName => write!(out, "{}", record.level.name()),
            Field::LevelNo => write!(out, "{}", record.level.value()),
            Field::AscTime => write!(out, "{}", timestamp_format.format(&record.timestamp)),
            Field::Created => write!(
                out,
                "{}.{:06}",
                record.timestamp.timestamp(),
                record.timestamp.timestamp_subsec_micros()
            ),
            Field::Elapsed => write!(out, "{:.6}", record.elapsed.as_secs_f64()),
            Field::Relative => write!(out, "{}", record.elapsed.as_millis()),
            Field::FileName => write!(out, "{}", site.map_or(UNKNOWN, |s| s.file_name())),
            Field::PathName => write!(out, "{}", site.map_or(UNKNOWN, |s| s.file)),
            Field::LineNo => match site {
                Some(site) => write!(out, "{}", site.line),
                None => write!(out, "{}", UNKNOWN),
            },
            Field::Module => write!(
                out,
                "{}",
                site.and_then(|s| s.module_path).unwrap_or(UNKNOWN)
            ),
            Field::Thread => write!(out, "{}", record.thread_label()),
            Field::Process => write!(out, "{}", record.process_id),
            Field::Message => write!(out, "{}", record.message),
        };
    }
}

/// Renders records into text
///
/// Rendering is a pure function of the template, the record and the
/// timestamp format.
#[derive(Debug, Clone, Copy, Default)]
pub struct Formatter;

impl Formatter {
    pub fn render(template: &str, record: &LogRecord, timestamp_format: &TimestampFormat) -> String {
        let mut out = String::with_capacity(template.len() + record.message.len() + 32);
        let mut rest = template;

        while let Some(start) = rest.find("%(") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];

            let Some(end) = after.find(')') else {
                // Unterminated placeholder, keep as literal text
                out.push_str(&rest[start..]);
                return out;
            };

            let key = &after[..end];
            match Field::from_key(key) {
                Some(field) => field.write_to(&mut out, record, timestamp_format),
                None => out.push_str(&rest[start..start + 2 + end + 1]),
            }
            rest = &after[end + 1..];
        }

        out.push_str(rest);
        out
    }
}
