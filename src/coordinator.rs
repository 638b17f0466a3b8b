//! Run orchestration.
//!
//! The coordinator owns the run protocol: pre-load the queue, start the
//! pool, drain wait tasks from the head, wait for the queue to empty, join
//! every worker, then report. Wait tasks are scheduling gates: while one
//! sits at the head, no compute task behind it can be claimed by a worker.

use crate::config::Config;
use crate::error::Result;
use crate::loader;
use crate::pool::WorkerPool;
use crate::queue::{Popped, SharedQueue};
use crate::stats::{Aggregates, Snapshot};
use crate::task::TaskKind;
use crate::telemetry::{self, Event, EventSink};
use crate::util::Backoff;
use std::fmt;
use std::io::BufRead;
use std::thread;

pub struct Coordinator {
    config: Config,
    queue: SharedQueue,
    stats: Aggregates,
    events: Option<EventSink>,
}

impl Coordinator {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            queue: SharedQueue::new(),
            stats: Aggregates::new(),
            events: None,
        })
    }

    /// Attach an event tap; every consumed task is reported to it.
    pub fn with_events(mut self, sink: EventSink) -> Self {
        self.events = Some(sink);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Another handle to the run's aggregates, usable to observe progress
    /// while the run is in flight or to re-read the totals after it ends.
    pub fn aggregates(&self) -> Aggregates {
        self.stats.clone()
    }

    /// Number of tasks currently pending.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Load phase: parse every record from `input` into the queue.
    ///
    /// Must complete before `run` starts the pool; no worker exists yet, so
    /// pushes never race pops.
    pub fn load<R: BufRead>(&self, input: R) -> Result<usize> {
        loader::load_into(input, &self.queue)
    }

    /// Launch the pool, drain wait tasks, join, and report.
    pub fn run(self) -> Result<Report> {
        let pool = WorkerPool::spawn(
            &self.config,
            self.queue.clone(),
            self.stats.clone(),
            self.events.clone(),
        )?;
        let pool_is_empty = pool.is_empty();

        let mut backoff = Backoff::new();
        loop {
            match self.queue.pop_if(TaskKind::Wait) {
                Popped::Task(task) => {
                    backoff.reset();
                    telemetry::emit(&self.events, Event::WaitDrained { value: task.value() });
                    // The pause itself happens outside the queue lock, so
                    // workers keep draining anything already past the gate.
                    thread::sleep(self.config.cost_of(task.value()));
                }
                Popped::HeadMismatch(_) if pool_is_empty => {
                    // No worker will ever claim the head; drop it unprocessed
                    // so the run still terminates.
                    if let Some(task) = self.queue.pop() {
                        telemetry::emit(
                            &self.events,
                            Event::ComputeDiscarded { value: task.value() },
                        );
                    }
                }
                Popped::HeadMismatch(_) => {
                    // A worker will claim it; re-poll.
                    backoff.wait();
                }
                Popped::Empty => break,
            }
        }

        let outcome = pool.join();

        Ok(Report {
            stats: self.stats.snapshot(),
            workers: outcome.workers,
            tasks_executed: outcome.tasks_executed,
            workers_failed: outcome.failed,
        })
    }
}

impl fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coordinator")
            .field("config", &self.config)
            .field("pending", &self.pending())
            .finish()
    }
}

/// Final outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    /// Aggregates at the time every worker had joined.
    pub stats: Snapshot,
    /// Workers the pool was started with.
    pub workers: usize,
    /// Compute tasks actually processed.
    pub tasks_executed: u64,
    /// Workers whose join reported failure.
    pub workers_failed: usize,
}

impl Report {
    pub fn all_workers_ok(&self) -> bool {
        self.workers_failed == 0
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.stats, f)
    }
}
