//! Registry Log Entity
//!
//! Bounded in-memory buffer of registry output and host lifecycle messages.

use std::collections::VecDeque;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub const MAX_LOG_ENTRIES: usize = 1000;

/// Tag of a buffered line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSource {
    Info,
    Error,
    Stdout,
    Stderr,
}

impl LogSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogSource::Info => "INFO",
            LogSource::Error => "ERROR",
            LogSource::Stdout => "STDOUT",
            LogSource::Stderr => "STDERR",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Position in the buffer's history; unique and increasing, survives eviction and clear
    pub seq: u64,
    pub timestamp: String,
    pub level: String,
    pub message: String,
}

/// Ring buffer holding the newest [`MAX_LOG_ENTRIES`] lines
#[derive(Debug, Default)]
pub struct LogBuffer {
    entries: VecDeque<LogEntry>,
    next_seq: u64,
}

impl LogBuffer {
    pub fn push(&mut self, source: LogSource, message: &str) {
        self.next_seq += 1;
        self.entries.push_back(LogEntry {
            seq: self.next_seq,
            timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
            level: source.as_str().to_string(),
            message: strip_ansi(message),
        });
        while self.entries.len() > MAX_LOG_ENTRIES {
            self.entries.pop_front();
        }
    }

    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Remove terminal color and cursor sequences
pub fn strip_ansi(text: &str) -> String {
    static ANSI: OnceLock<Option<Regex>> = OnceLock::new();
    match ANSI.get_or_init(|| Regex::new(r"\x1b\[[0-9;?]*[A-Za-z]").ok()) {
        Some(re) => re.replace_all(text, "").into_owned(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_ansi() {
        assert_eq!(strip_ansi("\x1b[32minfo\x1b[39m --- http address"), "info --- http address");
        assert_eq!(strip_ansi("\x1b[1;31mfatal\x1b[0m"), "fatal");
        assert_eq!(strip_ansi("plain"), "plain");
    }

    #[test]
    fn test_buffer_keeps_newest_entries() {
        let mut buffer = LogBuffer::default();
        for i in 0..(MAX_LOG_ENTRIES + 25) {
            buffer.push(LogSource::Stdout, &format!("line {}", i));
        }
        let entries = buffer.snapshot();
        assert_eq!(entries.len(), MAX_LOG_ENTRIES);
        assert_eq!(entries[0].message, "line 25");
        assert_eq!(entries.last().unwrap().level, "STDOUT");

        buffer.clear();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_sequence_outlives_eviction_and_clear() {
        let mut buffer = LogBuffer::default();
        for _ in 0..(MAX_LOG_ENTRIES + 3) {
            buffer.push(LogSource::Stdout, "same text, same millisecond");
        }
        let entries = buffer.snapshot();
        assert_eq!(entries[0].seq, 4);
        assert!(entries.windows(2).all(|w| w[1].seq == w[0].seq + 1));

        let last = entries.last().unwrap().seq;
        buffer.clear();
        buffer.push(LogSource::Info, "after clear");
        assert_eq!(buffer.snapshot()[0].seq, last + 1);
    }
}
