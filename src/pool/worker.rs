// worker thread loop

use crate::config::Config;
use crate::queue::{Popped, SharedQueue};
use crate::stats::Aggregates;
use crate::task::{Task, TaskKind};
use crate::telemetry::{self, Event, EventSink};
use crate::util::Backoff;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;

pub type WorkerId = usize;

// per-worker counters
#[derive(Debug)]
pub struct WorkerState {
    pub tasks_executed: AtomicU64,
    pub head_blocked_polls: AtomicU64,
}

impl WorkerState {
    pub(crate) fn new() -> Self {
        Self {
            tasks_executed: AtomicU64::new(0),
            head_blocked_polls: AtomicU64::new(0),
        }
    }
}

pub(crate) struct Worker {
    pub id: WorkerId,
    pub queue: SharedQueue,
    pub stats: Aggregates,
    pub config: Config,
    pub events: Option<EventSink>,
    pub state: Arc<WorkerState>,
}

impl Worker {
    // main loop: claim compute tasks from the head until the queue drains.
    // A wait task at the head is the coordinator's to remove; this thread
    // backs off and re-polls without holding the lock. An empty queue is
    // terminal: the load phase completed before any worker existed, so no
    // task can arrive later.
    pub fn run(&self) -> u64 {
        let mut backoff = Backoff::new();

        loop {
            match self.queue.pop_if(TaskKind::Compute) {
                Popped::Task(task) => {
                    backoff.reset();
                    self.process(task);
                }
                Popped::HeadMismatch(_) => {
                    self.state.head_blocked_polls.fetch_add(1, Ordering::Relaxed);
                    backoff.wait();
                }
                Popped::Empty => break,
            }
        }

        self.state.tasks_executed.load(Ordering::Relaxed)
    }

    fn process(&self, task: Task) {
        let value = task.value();
        let square = value * value;

        // The simulated cost runs outside both locks.
        thread::sleep(self.config.cost_of(value));

        self.stats.record(value, square);
        self.state.tasks_executed.fetch_add(1, Ordering::Relaxed);

        telemetry::emit(
            &self.events,
            Event::ComputeRecorded {
                worker: self.id,
                value,
            },
        );
    }
}
