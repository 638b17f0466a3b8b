//! SUMSQ - concurrent sum-of-squares task processor
//!
//! A fixed-size worker pool drains a shared FIFO of typed tasks: compute
//! tasks are squared and folded into global aggregates (sum of squares,
//! odd-count, min, max) by the workers, wait tasks gate the queue's head
//! until the coordinator pauses for them. Tasks are consumed strictly in
//! load order; a wait task at the head blocks everything behind it.
//!
//! # Quick Start
//!
//! ```
//! use std::io::Cursor;
//! use std::time::Duration;
//! use sumsq::{Config, Coordinator};
//!
//! let config = Config::builder()
//!     .workers(2)
//!     .time_unit(Duration::from_millis(1))
//!     .build()
//!     .unwrap();
//!
//! let coord = Coordinator::new(config).unwrap();
//! coord.load(Cursor::new("p 3\np 4\nw 0\np 5\n")).unwrap();
//!
//! let report = coord.run().unwrap();
//! assert_eq!(report.stats.sum, 50);
//! assert_eq!(report.stats.odd_count, 2);
//! assert_eq!(report.stats.min, Some(3));
//! assert_eq!(report.stats.max, Some(5));
//! ```
//!
//! # Concurrency model
//!
//! Two independent locks: one over the queue structure, one over the
//! aggregate fields. No thread ever holds both at once, and all blocking
//! work (the simulated compute cost, wait-task pauses) happens outside
//! them. Worker termination is driven purely by observed queue emptiness;
//! the load phase completes before the pool exists, so no task arrives
//! late.

#![warn(missing_debug_implementations)]

pub mod config;
pub mod coordinator;
pub mod error;
pub mod loader;
pub mod pool;
pub mod prelude;
pub mod queue;
pub mod stats;
pub mod task;
pub mod telemetry;
pub mod util;

pub use config::{Config, ConfigBuilder};
pub use coordinator::{Coordinator, Report};
pub use error::{Error, Result};
pub use task::{Task, TaskKind};
