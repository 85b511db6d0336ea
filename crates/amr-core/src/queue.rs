//! Work queue of URLs still to mirror.
//!
//! Built once from the deduplicated extraction set and only ever drained.
//! `take_next` is atomic, so concurrent callers never receive the same URL.

use std::collections::{BTreeSet, VecDeque};
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct WorkQueue {
    pending: Mutex<VecDeque<String>>,
}

impl WorkQueue {
    /// Builds the queue from unique URLs, in the set's order.
    pub fn new(urls: BTreeSet<String>) -> Self {
        Self {
            pending: Mutex::new(urls.into_iter().collect()),
        }
    }

    /// Removes and returns the next URL, or `None` once drained.
    pub fn take_next(&self) -> Option<String> {
        self.lock().pop_front()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic while holding the lock cannot leave the deque half-updated.
    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<String>> {
        self.pending.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl FromIterator<String> for WorkQueue {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        WorkQueue::new(iter.into_iter().collect())
    }
}
