//! Process-wide sequence counter.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic counter shared by every worker in the process.
///
/// `next` is a single atomic read-modify-write, so no two callers ever
/// observe the same value.
#[derive(Debug, Default)]
pub struct SequenceCounter {
    next: AtomicU64,
}

impl SequenceCounter {
    /// Create a counter starting at zero.
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// Create a counter whose first issued value is `start`.
    pub fn starting_at(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }

    /// Take the next value, returning the value before the increment.
    pub fn next(&self) -> u64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }

    /// The value the next call to [`SequenceCounter::next`] will return.
    pub fn current(&self) -> u64 {
        self.next.load(Ordering::SeqCst)
    }
}
