//! Recency Tracking
//!
//! Keeps cache keys ordered by last access so a full cache can drop the
//! least recently used one.

use std::collections::VecDeque;

// == Recency Tracker ==
/// Access order of cache keys.
///
/// Front holds the most recently used key, back the least recently used.
#[derive(Debug, Default)]
pub struct RecencyTracker {
    order: VecDeque<String>,
}

impl RecencyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `key` as just used.
    pub fn touch(&mut self, key: &str) {
        self.forget(key);
        self.order.push_front(key.to_string());
    }

    /// Stops tracking `key`.
    pub fn forget(&mut self, key: &str) {
        self.order.retain(|k| k != key);
    }

    /// Removes and returns the least recently used key.
    pub fn pop_least_recent(&mut self) -> Option<String> {
        self.order.pop_back()
    }

    pub fn clear(&mut self) {
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_follows_insertion_order() {
        let mut tracker = RecencyTracker::new();
        tracker.touch("GET /duties?page=1");
        tracker.touch("GET /duties?page=2");

        assert_eq!(
            tracker.pop_least_recent(),
            Some("GET /duties?page=1".to_string())
        );
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_touch_moves_key_to_front() {
        let mut tracker = RecencyTracker::new();
        tracker.touch("a");
        tracker.touch("b");
        tracker.touch("c");

        // [c, b, a] -> touch(a) -> [a, c, b]
        tracker.touch("a");

        assert_eq!(tracker.pop_least_recent(), Some("b".to_string()));
        assert_eq!(tracker.pop_least_recent(), Some("c".to_string()));
        assert_eq!(tracker.pop_least_recent(), Some("a".to_string()));
        assert_eq!(tracker.pop_least_recent(), None);
    }

    #[test]
    fn test_repeated_touch_keeps_single_entry() {
        let mut tracker = RecencyTracker::new();
        tracker.touch("k");
        tracker.touch("k");

        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_forget_and_clear() {
        let mut tracker = RecencyTracker::new();
        tracker.touch("a");
        tracker.touch("b");

        tracker.forget("a");
        tracker.forget("missing");
        assert_eq!(tracker.len(), 1);

        tracker.clear();
        assert_eq!(tracker.len(), 0);
    }
}
