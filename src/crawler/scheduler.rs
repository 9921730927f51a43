//! Work-list scheduling and politeness pacing
//!
//! This module handles:
//! - The depth-first work-list of (URL, depth) pairs still to visit
//! - The fixed politeness delay between fetches to the target host
//!
//! Traversal uses an explicit stack instead of recursion so a wide or deep
//! site cannot exhaust the call stack.

use crate::url::CanonicalUrl;
use std::time::Duration;

/// A URL queued for a visit at a given depth
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedUrl {
    /// The canonical URL to visit
    pub url: CanonicalUrl,

    /// Depth of the visit; the seed is depth 1
    pub depth: u32,
}

/// Scheduler manages the work-list and request pacing
///
/// The work-list is last-in first-out. Children of a page are pushed in
/// reverse so the first child is popped next, and its whole subtree is
/// finished before its next sibling comes off the stack.
#[derive(Debug)]
pub struct Scheduler {
    /// Pending visits, top of stack is next
    stack: Vec<QueuedUrl>,

    /// Pause taken before each link-discovery fetch
    politeness_delay: Duration,
}

impl Scheduler {
    /// Creates an empty scheduler
    ///
    /// # Arguments
    ///
    /// * `politeness_delay` - Fixed pause between fetches to the target host
    pub fn new(politeness_delay: Duration) -> Self {
        Self {
            stack: Vec::new(),
            politeness_delay,
        }
    }

    /// Queues a single URL
    pub fn push(&mut self, url: CanonicalUrl, depth: u32) {
        self.stack.push(QueuedUrl { url, depth });
    }

    /// Queues the children of a page so they pop in the given order
    ///
    /// # Returns
    ///
    /// The number of URLs queued
    pub fn push_children<I>(&mut self, children: I, depth: u32) -> usize
    where
        I: IntoIterator<Item = CanonicalUrl>,
        I::IntoIter: DoubleEndedIterator,
    {
        let before = self.stack.len();
        for url in children.into_iter().rev() {
            self.stack.push(QueuedUrl { url, depth });
        }
        self.stack.len() - before
    }

    /// Takes the next URL to visit
    pub fn next_url(&mut self) -> Option<QueuedUrl> {
        self.stack.pop()
    }

    /// Waits out the politeness delay
    pub async fn pause(&self) {
        if !self.politeness_delay.is_zero() {
            tokio::time::sleep(self.politeness_delay).await;
        }
    }

    /// Returns the number of pending visits
    pub fn pending(&self) -> usize {
        self.stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::url::canonicalize;
    use std::time::Instant;

    fn url(path: &str) -> CanonicalUrl {
        canonicalize(&format!("https://example.com/{}", path), None).unwrap()
    }

    #[test]
    fn test_children_pop_in_order() {
        let mut scheduler = Scheduler::new(Duration::ZERO);
        let queued = scheduler.push_children(vec![url("a"), url("b"), url("c")], 2);
        assert_eq!(queued, 3);

        let order: Vec<String> = std::iter::from_fn(|| scheduler.next_url())
            .map(|q| q.url.path().to_string())
            .collect();
        assert_eq!(order, vec!["/a", "/b", "/c"]);
    }

    #[test]
    fn test_depth_first_order() {
        let mut scheduler = Scheduler::new(Duration::ZERO);
        scheduler.push_children(vec![url("a"), url("b")], 2);

        // Visiting /a discovers /a/x, which must come before /b
        let first = scheduler.next_url().unwrap();
        assert_eq!(first.url.path(), "/a");
        scheduler.push_children(vec![url("a/x")], first.depth + 1);

        let second = scheduler.next_url().unwrap();
        assert_eq!(second.url.path(), "/a/x");
        assert_eq!(second.depth, 3);

        let third = scheduler.next_url().unwrap();
        assert_eq!(third.url.path(), "/b");
        assert!(scheduler.next_url().is_none());
    }

    #[test]
    fn test_pending() {
        let mut scheduler = Scheduler::new(Duration::ZERO);
        assert_eq!(scheduler.pending(), 0);
        scheduler.push(url(""), 1);
        assert_eq!(scheduler.pending(), 1);
        scheduler.next_url();
        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test]
    async fn test_pause_waits_for_delay() {
        let scheduler = Scheduler::new(Duration::from_millis(50));
        let start = Instant::now();
        scheduler.pause().await;
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_zero_delay_returns_immediately() {
        let scheduler = Scheduler::new(Duration::ZERO);
        let start = Instant::now();
        scheduler.pause().await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }
}
