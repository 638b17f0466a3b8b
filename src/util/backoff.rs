//! Backoff for busy-poll loops on the queue head.

use std::hint::spin_loop;
use std::thread;

/// Spin-then-yield backoff.
///
/// A consumer that finds the head owned by the other role must re-poll
/// without holding the lock; this keeps repeated misses from hammering
/// the lock at full rate. Call `wait` after each miss, `reset` after a hit.
#[derive(Debug)]
pub struct Backoff {
    step: usize,
}

impl Backoff {
    const SPIN_LIMIT: usize = 6;

    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn reset(&mut self) {
        self.step = 0;
    }

    /// One step of backoff: brief exponential spinning at first, then
    /// yielding the processor on every subsequent miss.
    pub fn wait(&mut self) {
        if self.step < Self::SPIN_LIMIT {
            for _ in 0..(1 << self.step) {
                spin_loop();
            }
            self.step += 1;
        } else {
            thread::yield_now();
        }
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new()
    }
}
