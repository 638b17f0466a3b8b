//! Observation hooks for a processing run.
//!
//! Consumers hand the coordinator a channel sender and receive one event
//! per consumed task, in consumption order per producer. Useful for tests
//! that assert ordering properties, and for progress reporting.

use crate::pool::WorkerId;

/// One consumed task, reported by whichever thread consumed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A worker recorded a compute task's contribution.
    ComputeRecorded { worker: WorkerId, value: i64 },
    /// The coordinator removed a wait task from the head (sent before the
    /// pause elapses).
    WaitDrained { value: i64 },
    /// The coordinator dropped a compute task because the pool is empty.
    ComputeDiscarded { value: i64 },
}

/// Where events are delivered. Send failures are ignored: a dropped
/// receiver just means nobody is listening anymore.
pub type EventSink = crossbeam_channel::Sender<Event>;

pub(crate) fn emit(sink: &Option<EventSink>, event: Event) {
    if let Some(sink) = sink {
        let _ = sink.send(event);
    }
}
