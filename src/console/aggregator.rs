//! Log aggregator: turns the raw output stream into session entries.
//!
//! Compares each received line against the immediately preceding accepted
//! line only, so duplicate suppression stays O(1) per line. Non-adjacent
//! duplicates pass through. Surviving lines are appended in receipt order
//! with origin Remote; the aggregator never reorders or batches.

use crate::console::ConsoleSession;
use crate::models::{LogEntry, Origin};

#[derive(Default)]
pub struct LogAggregator {
    last_accepted: Option<String>,
}

impl LogAggregator {
    pub fn new() -> Self {
        LogAggregator::default()
    }

    /// Feed one received line into the session. Returns the appended entry,
    /// or `None` if the line was an adjacent duplicate and was dropped.
    pub fn ingest<'s>(
        &mut self,
        session: &'s mut ConsoleSession,
        line: String,
    ) -> Option<&'s LogEntry> {
        if self.last_accepted.as_deref() == Some(line.as_str()) {
            return None;
        }
        self.last_accepted = Some(line.clone());
        Some(session.append(line, Origin::Remote))
    }
}
