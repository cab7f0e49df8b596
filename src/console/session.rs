//! Console session: the ordered transcript of server output and operator
//! commands.
//!
//! A capped ring buffer. Sequence numbers are assigned at append, stay
//! strictly increasing across eviction, and entries are never reordered.

use std::collections::VecDeque;

use crate::models::{LogEntry, Origin, Severity};

pub struct ConsoleSession {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    next_sequence: u64,
}

impl ConsoleSession {
    /// Create a session retaining at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        ConsoleSession {
            entries: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
            next_sequence: 0,
        }
    }

    /// Append one entry, evicting the oldest if the session is full.
    /// Severity is derived from the text; entries are immutable afterwards.
    pub fn append(&mut self, text: String, origin: Origin) -> &LogEntry {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.next_sequence += 1;
        let severity = Severity::classify(&text);
        self.entries.push_back(LogEntry {
            sequence: self.next_sequence,
            text,
            severity,
            origin,
        });
        self.entries.back().expect("entry just pushed")
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_numbers_strictly_increase() {
        let mut session = ConsoleSession::new(10);
        for i in 0..5 {
            session.append(format!("line {}", i), Origin::Remote);
        }
        let sequences: Vec<u64> = session.iter().map(|e| e.sequence).collect();
        assert_eq!(sequences, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_eviction_keeps_newest_and_sequences() {
        let mut session = ConsoleSession::new(3);
        for i in 1..=5 {
            session.append(format!("line {}", i), Origin::Remote);
        }
        assert_eq!(session.len(), 3);
        let texts: Vec<&str> = session.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["line 3", "line 4", "line 5"]);
        // Sequence numbers keep counting past evicted entries.
        assert_eq!(session.last().unwrap().sequence, 5);
    }

    #[test]
    fn test_severity_derived_at_append() {
        let mut session = ConsoleSession::new(10);
        let entry = session.append("ERROR: disk full".to_string(), Origin::Remote);
        assert_eq!(entry.severity, Severity::Error);
        assert_eq!(entry.origin, Origin::Remote);
    }
}
