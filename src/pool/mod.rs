//! The fixed-size worker pool.
//!
//! Workers consume compute tasks from the shared queue and fold their
//! results into the aggregates; they exit once the queue is observed
//! empty. The pool is sized exactly once, at spawn.

pub mod worker;

pub use worker::{WorkerId, WorkerState};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::queue::SharedQueue;
use crate::stats::Aggregates;
use crate::telemetry::EventSink;
use self::worker::Worker;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

#[derive(Debug)]
pub struct WorkerPool {
    workers: Vec<WorkerHandle>,
}

#[derive(Debug)]
struct WorkerHandle {
    id: WorkerId,
    thread: Option<JoinHandle<u64>>,
    state: Arc<WorkerState>,
}

impl WorkerPool {
    /// Spawn exactly `config.worker_count()` worker threads against the
    /// given queue and aggregates. Zero workers yields an empty pool.
    pub fn spawn(
        config: &Config,
        queue: SharedQueue,
        stats: Aggregates,
        events: Option<EventSink>,
    ) -> Result<Self> {
        let count = config.worker_count();
        let mut workers = Vec::with_capacity(count);

        for id in 0..count {
            let state = Arc::new(WorkerState::new());
            let worker = Worker {
                id,
                queue: queue.clone(),
                stats: stats.clone(),
                config: config.clone(),
                events: events.clone(),
                state: state.clone(),
            };

            let mut builder =
                thread::Builder::new().name(format!("{}-{}", config.thread_name_prefix, id));

            if let Some(stack_size) = config.stack_size {
                builder = builder.stack_size(stack_size);
            }

            let thread = builder
                .spawn(move || worker.run())
                .map_err(|e| Error::executor(format!("spawn failed: {}", e)))?;

            workers.push(WorkerHandle {
                id,
                thread: Some(thread),
                state,
            });
        }

        Ok(Self { workers })
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    /// Join every worker in spawn order and collect the outcome.
    ///
    /// A failed join (a worker that panicked) is counted, not propagated;
    /// the aggregates gathered so far still get reported.
    pub fn join(mut self) -> PoolOutcome {
        let mut outcome = PoolOutcome {
            workers: self.workers.len(),
            ..PoolOutcome::default()
        };

        for handle in &mut self.workers {
            match handle.thread.take() {
                Some(thread) => match thread.join() {
                    Ok(executed) => outcome.tasks_executed += executed,
                    Err(_) => {
                        eprintln!("worker {} exited abnormally", handle.id);
                        outcome.failed += 1;
                    }
                },
                None => outcome.failed += 1,
            }
        }

        outcome
    }

    /// Per-worker counter handles, in worker id order.
    pub fn worker_states(&self) -> Vec<Arc<WorkerState>> {
        self.workers.iter().map(|w| w.state.clone()).collect()
    }
}

/// What joining the pool observed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PoolOutcome {
    pub workers: usize,
    pub tasks_executed: u64,
    pub failed: usize,
}

impl PoolOutcome {
    pub fn all_ok(&self) -> bool {
        self.failed == 0
    }
}
