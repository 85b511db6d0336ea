//! Completed/error counters shared between the scheduler and the reporter.

use std::sync::atomic::{AtomicU64, Ordering};

use super::progress::RunStats;

/// Monotonic run counters. Only ever incremented.
#[derive(Debug, Default)]
pub struct RunCounters {
    done: AtomicU64,
    errors: AtomicU64,
}

impl RunCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a mirrored URL; returns the new completed count.
    pub fn record_done(&self) -> u64 {
        self.done.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Record a skipped or failed URL; returns the new error count.
    pub fn record_error(&self) -> u64 {
        self.errors.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn done(&self) -> u64 {
        self.done.load(Ordering::Relaxed)
    }

    pub fn errors(&self) -> u64 {
        self.errors.load(Ordering::Relaxed)
    }

    /// Snapshot with the number of URLs still queued.
    pub fn snapshot(&self, remaining: usize) -> RunStats {
        RunStats {
            done: self.done(),
            errors: self.errors(),
            remaining,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn counters_increment_independently() {
        let c = RunCounters::new();
        assert_eq!(c.record_done(), 1);
        assert_eq!(c.record_done(), 2);
        assert_eq!(c.record_error(), 1);
        let s = c.snapshot(7);
        assert_eq!((s.done, s.errors, s.remaining), (2, 1, 7));
    }

    #[test]
    fn concurrent_increments_are_not_lost() {
        let c = Arc::new(RunCounters::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let c = Arc::clone(&c);
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        c.record_done();
                        c.record_error();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(c.done(), 8000);
        assert_eq!(c.errors(), 8000);
    }
}
