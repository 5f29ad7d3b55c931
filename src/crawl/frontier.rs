// src/crawl/frontier.rs
// =============================================================================
// The frontier: URLs waiting to be fetched, in FIFO order.
//
// A VecDeque gives breadth-first order (push_back / pop_front). A HashSet
// mirrors its contents so "is this URL already queued?" is O(1) instead of a
// scan over the whole queue.
// =============================================================================

use std::collections::{HashSet, VecDeque};

/// A URL waiting to be fetched, with its link distance from the seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    pub url: String,
    pub depth: usize,
}

#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<FrontierEntry>,
    queued: HashSet<String>,
}

impl Frontier {
    /// Appends an entry unless its URL is already queued (at any depth).
    /// Returns whether it was added.
    pub fn push(&mut self, entry: FrontierEntry) -> bool {
        if !self.queued.insert(entry.url.clone()) {
            return false;
        }
        self.queue.push_back(entry);
        true
    }

    /// Removes the earliest-enqueued entry.
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        let entry = self.queue.pop_front()?;
        self.queued.remove(&entry.url);
        Some(entry)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.queued.contains(url)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &FrontierEntry> {
        self.queue.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(url: &str, depth: usize) -> FrontierEntry {
        FrontierEntry {
            url: url.to_string(),
            depth,
        }
    }

    #[test]
    fn test_fifo_order() {
        let mut frontier = Frontier::default();
        frontier.push(entry("a", 0));
        frontier.push(entry("b", 1));
        frontier.push(entry("c", 1));

        assert_eq!(frontier.pop(), Some(entry("a", 0)));
        assert_eq!(frontier.pop(), Some(entry("b", 1)));
        assert_eq!(frontier.pop(), Some(entry("c", 1)));
        assert_eq!(frontier.pop(), None);
    }

    #[test]
    fn test_duplicate_rejected_at_any_depth() {
        let mut frontier = Frontier::default();
        assert!(frontier.push(entry("a", 1)));
        assert!(!frontier.push(entry("a", 1)));
        assert!(!frontier.push(entry("a", 2)));
        assert_eq!(frontier.len(), 1);
    }

    #[test]
    fn test_url_can_be_queued_again_after_pop() {
        // the visited set, not the frontier, prevents refetching
        let mut frontier = Frontier::default();
        frontier.push(entry("a", 0));
        frontier.pop();
        assert!(!frontier.contains("a"));
        assert!(frontier.push(entry("a", 1)));
    }

    #[test]
    fn test_empty() {
        let mut frontier = Frontier::default();
        assert!(frontier.is_empty());
        frontier.push(entry("a", 0));
        assert!(!frontier.is_empty());
        assert_eq!(frontier.iter().count(), 1);
    }
}
