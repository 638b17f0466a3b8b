//! Shared aggregate statistics.

use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

// Running totals. min/max start at the representable extremes and collapse
// toward real inputs as values are recorded.
#[derive(Debug)]
struct AggregateState {
    sum: i64,
    odd: u64,
    min: i64,
    max: i64,
}

impl AggregateState {
    fn new() -> Self {
        Self {
            sum: 0,
            odd: 0,
            min: i64::MAX,
            max: i64::MIN,
        }
    }
}

/// Process-wide numeric state folded over every processed compute task.
///
/// All four fields live behind one lock and are updated as a group per
/// task, so no reader ever sees a partial update. Cloning yields another
/// handle to the same state.
pub struct Aggregates {
    inner: Arc<Mutex<AggregateState>>,
}

impl Aggregates {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(AggregateState::new())),
        }
    }

    /// Fold one processed input and its square into the totals.
    ///
    /// The square is computed by the caller, outside this lock; the critical
    /// section here is just the four read-modify-writes.
    pub fn record(&self, value: i64, square: i64) {
        let mut state = self.inner.lock();

        state.sum += square;
        if value % 2 != 0 {
            state.odd += 1;
        }
        if value < state.min {
            state.min = value;
        }
        if value > state.max {
            state.max = value;
        }
    }

    /// Copy the current totals out.
    ///
    /// Idempotent once all writers have stopped.
    pub fn snapshot(&self) -> Snapshot {
        let state = self.inner.lock();

        // A max below the min means nothing was ever recorded.
        let (min, max) = if state.max < state.min {
            (None, None)
        } else {
            (Some(state.min), Some(state.max))
        };

        Snapshot {
            sum: state.sum,
            odd_count: state.odd,
            min,
            max,
        }
    }
}

impl Default for Aggregates {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Aggregates {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl fmt::Debug for Aggregates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aggregates")
            .field("snapshot", &self.snapshot())
            .finish()
    }
}

/// Point-in-time copy of the aggregates.
///
/// `min`/`max` are `None` when no compute task was ever recorded, so the
/// initialization sentinels never leak to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub sum: i64,
    pub odd_count: u64,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ", self.sum, self.odd_count)?;
        match self.min {
            Some(min) => write!(f, "{} ", min)?,
            None => write!(f, "undefined ")?,
        }
        match self.max {
            Some(max) => write!(f, "{}", max),
            None => write!(f, "undefined"),
        }
    }
}
