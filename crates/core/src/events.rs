//! Narrative event log
//!
//! Human-readable messages for UI feedback ("Tetris complete", "Mission
//! paused", ...). The log is bounded: pushing past capacity drops the oldest
//! message. Collaborators drain it in one call.

use std::collections::VecDeque;

use crate::types::EVENT_LOG_CAPACITY;

#[derive(Debug, Clone)]
pub struct EventLog {
    messages: VecDeque<String>,
    capacity: usize,
}

impl EventLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            messages: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, message: impl Into<String>) {
        if self.messages.len() == self.capacity {
            self.messages.pop_front();
        }
        self.messages.push_back(message.into());
    }

    /// Take every queued message, oldest first, leaving the log empty
    pub fn drain(&mut self) -> Vec<String> {
        self.messages.drain(..).collect()
    }

    /// Most recent message, if any
    pub fn last(&self) -> Option<&str> {
        self.messages.back().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(EVENT_LOG_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_empties() {
        let mut log = EventLog::default();
        log.push("one");
        log.push(String::from("two"));
        assert_eq!(log.drain(), vec!["one", "two"]);
        assert!(log.is_empty());
        assert!(log.drain().is_empty());
    }

    #[test]
    fn test_oldest_dropped_at_capacity() {
        let mut log = EventLog::new(3);
        for i in 0..5 {
            log.push(format!("event {i}"));
        }
        assert_eq!(log.len(), 3);
        assert_eq!(log.last(), Some("event 4"));
        assert_eq!(log.drain(), vec!["event 2", "event 3", "event 4"]);
    }

    #[test]
    fn test_zero_capacity_keeps_latest() {
        let mut log = EventLog::new(0);
        log.push("a");
        log.push("b");
        assert_eq!(log.drain(), vec!["b"]);
    }
}
