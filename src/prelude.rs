pub use crate::config::{Config, ConfigBuilder};
pub use crate::coordinator::{Coordinator, Report};
pub use crate::error::{Error, Result};
pub use crate::queue::{Popped, SharedQueue};
pub use crate::stats::{Aggregates, Snapshot};
pub use crate::task::{Task, TaskKind};
pub use crate::telemetry::{Event, EventSink};
