use std::collections::VecDeque;

use wirelog_types::LogMessage;

pub const DEFAULT_CAPACITY: usize = 500;

/// Insertion-ordered ring of received messages.
///
/// This is the session-lifetime record of "what has been seen"; the
/// rendered view is a disposable projection over it. On overflow the
/// oldest message is evicted before the new one lands, so insertion order
/// is preserved and length never exceeds capacity.
#[derive(Debug)]
pub struct MessageBuffer {
    messages: VecDeque<LogMessage>,
    capacity: usize,
}

impl MessageBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            messages: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn append(&mut self, msg: LogMessage) {
        if self.messages.len() == self.capacity {
            self.messages.pop_front();
        }
        self.messages.push_back(msg);
    }

    /// Full ordered sequence, oldest first. Used by the rebuild path.
    pub fn iter(&self) -> impl Iterator<Item = &LogMessage> {
        self.messages.iter()
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
}

impl Default for MessageBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(topic: &str) -> LogMessage {
        LogMessage {
            topic: topic.to_string(),
            payload: serde_json::Value::Null,
            timestamp: String::new(),
        }
    }

    #[test]
    fn test_append_within_capacity_keeps_order() {
        let mut buffer = MessageBuffer::new(10);
        for i in 0..5 {
            buffer.append(msg(&format!("t{}", i)));
        }
        let topics: Vec<_> = buffer.iter().map(|m| m.topic.as_str()).collect();
        assert_eq!(topics, ["t0", "t1", "t2", "t3", "t4"]);
    }

    #[test]
    fn test_overflow_evicts_oldest_first() {
        let mut buffer = MessageBuffer::new(3);
        for i in 0..5 {
            buffer.append(msg(&format!("t{}", i)));
        }
        assert_eq!(buffer.len(), 3);
        let topics: Vec<_> = buffer.iter().map(|m| m.topic.as_str()).collect();
        assert_eq!(topics, ["t2", "t3", "t4"]);
    }

    #[test]
    fn test_length_never_exceeds_capacity() {
        let mut buffer = MessageBuffer::new(DEFAULT_CAPACITY);
        for i in 0..DEFAULT_CAPACITY + 100 {
            buffer.append(msg(&format!("t{}", i)));
            assert!(buffer.len() <= DEFAULT_CAPACITY);
        }
        // Retained elements are exactly the most recent 500, in order.
        assert_eq!(buffer.len(), DEFAULT_CAPACITY);
        assert_eq!(buffer.iter().next().unwrap().topic, "t100");
        assert_eq!(buffer.iter().last().unwrap().topic, "t599");
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut buffer = MessageBuffer::new(0);
        buffer.append(msg("only"));
        assert_eq!(buffer.len(), 1);
        buffer.append(msg("next"));
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.iter().next().unwrap().topic, "next");
    }
}
