//! # MemorySink: bounded in-memory buffer
//!
//! Keeps the most recent events for in-app log viewers. Entries are stored
//! newest first; once `capacity` is reached the oldest entry is evicted.
//!
//! ```text
//! log(e3) ──► [e3, e2, e1]   (capacity 3)
//! log(e4) ──► [e4, e3, e2]   e1 evicted
//! ```

use std::collections::VecDeque;
use std::time::SystemTime;

use parking_lot::Mutex;

use crate::error::SinkError;
use crate::severity::Severity;

use super::{ErrorRef, Sink};

/// Default number of retained entries.
pub const DEFAULT_MEMORY_CAPACITY: usize = 100;

/// One buffered event.
#[derive(Debug, Clone)]
pub struct MemoryEntry {
    /// Event level.
    pub severity: Severity,
    /// Resolved tag.
    pub tag: String,
    /// Event text.
    pub message: String,
    /// Attached error, if any.
    pub error: Option<ErrorRef>,
    /// Wall-clock time the sink received the event.
    pub at: SystemTime,
}

/// Newest-first ring buffer sink.
#[derive(Debug)]
pub struct MemorySink {
    capacity: usize,
    min_severity: Severity,
    entries: Mutex<VecDeque<MemoryEntry>>,
}

impl MemorySink {
    /// Buffer with [`DEFAULT_MEMORY_CAPACITY`] that accepts every severity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MEMORY_CAPACITY)
    }

    /// Buffer holding at most `capacity` entries (min 1).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            min_severity: Severity::Verbose,
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Only keep events at or above `min`.
    #[must_use]
    pub fn with_min_severity(mut self, min: Severity) -> Self {
        self.min_severity = min;
        self
    }

    /// Maximum number of retained entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Copy of the buffer, newest first.
    pub fn entries(&self) -> Vec<MemoryEntry> {
        self.entries.lock().iter().cloned().collect()
    }

    /// Most recent entry, if any.
    pub fn latest(&self) -> Option<MemoryEntry> {
        self.entries.lock().front().cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Drops all buffered entries.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for MemorySink {
    fn tear_down(&self) {
        self.clear();
    }

    fn is_loggable(&self, _tag: Option<&str>, severity: Severity) -> bool {
        severity >= self.min_severity
    }

    fn log(
        &self,
        severity: Severity,
        tag: &str,
        message: &str,
        error: Option<&ErrorRef>,
    ) -> Result<(), SinkError> {
        let entry = MemoryEntry {
            severity,
            tag: tag.to_string(),
            message: message.to_string(),
            error: error.cloned(),
            at: SystemTime::now(),
        };

        let mut entries = self.entries.lock();
        entries.push_front(entry);
        entries.truncate(self.capacity);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(sink: &MemorySink) -> Vec<String> {
        sink.entries().into_iter().map(|e| e.message).collect()
    }

    #[test]
    fn test_newest_first_with_eviction() {
        let sink = MemorySink::with_capacity(3);
        for i in 1..=4 {
            sink.log(Severity::Info, "t", &format!("e{i}"), None).unwrap();
        }

        assert_eq!(messages(&sink), vec!["e4", "e3", "e2"]);
        assert_eq!(sink.latest().unwrap().message, "e4");
        assert_eq!(sink.len(), 3);
    }

    #[test]
    fn test_capacity_clamped() {
        let sink = MemorySink::with_capacity(0);
        assert_eq!(sink.capacity(), 1);
        sink.log(Severity::Info, "t", "a", None).unwrap();
        sink.log(Severity::Info, "t", "b", None).unwrap();
        assert_eq!(messages(&sink), vec!["b"]);
    }

    #[test]
    fn test_min_severity_and_tear_down() {
        let sink = MemorySink::new().with_min_severity(Severity::Warning);
        assert_eq!(sink.capacity(), DEFAULT_MEMORY_CAPACITY);
        assert!(!sink.is_loggable(None, Severity::Info));
        assert!(sink.is_loggable(None, Severity::Warning));

        sink.log(Severity::Warning, "t", "w", None).unwrap();
        assert!(!sink.is_empty());
        sink.tear_down();
        assert!(sink.is_empty());
    }
}
