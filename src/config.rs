use crate::error::{Error, Result};
use std::time::Duration;

/// Runtime configuration for a processing run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Worker thread count. `None` uses one worker per logical CPU.
    /// Zero is valid: compute tasks are then discarded unprocessed.
    pub workers: Option<usize>,

    /// Cost of one unit of task value: a compute task sleeps
    /// `value * time_unit` before recording, a wait task stalls the
    /// coordinator for the same. Negative values cost nothing.
    pub time_unit: Duration,

    pub thread_name_prefix: String,
    pub stack_size: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workers: None,
            time_unit: Duration::from_secs(1),
            thread_name_prefix: "sumsq-worker".to_string(),
            stack_size: None,
        }
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(n) = self.workers {
            if n > 1024 {
                return Err(Error::config("workers too large (max 1024)"));
            }
        }

        if self.thread_name_prefix.is_empty() {
            return Err(Error::config("thread_name_prefix must not be empty"));
        }

        Ok(())
    }

    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get)
    }

    /// Simulated cost of a task of `value`, clamped at zero for negatives.
    pub fn cost_of(&self, value: i64) -> Duration {
        let units = u32::try_from(value.max(0)).unwrap_or(u32::MAX);
        self.time_unit.checked_mul(units).unwrap_or(Duration::MAX)
    }
}

#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn workers(mut self, n: usize) -> Self {
        self.config.workers = Some(n);
        self
    }

    pub fn time_unit(mut self, unit: Duration) -> Self {
        self.config.time_unit = unit;
        self
    }

    pub fn thread_name_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.config.thread_name_prefix = prefix.into();
        self
    }

    pub fn stack_size(mut self, size: usize) -> Self {
        self.config.stack_size = Some(size);
        self
    }

    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = Config::builder()
            .workers(4)
            .time_unit(Duration::from_millis(10))
            .build()
            .unwrap();

        assert_eq!(config.worker_count(), 4);
        assert_eq!(config.time_unit, Duration::from_millis(10));
    }

    #[test]
    fn test_zero_workers_is_valid() {
        let config = Config::builder().workers(0).build().unwrap();
        assert_eq!(config.worker_count(), 0);
    }

    #[test]
    fn test_worker_cap() {
        assert!(Config::builder().workers(2048).build().is_err());
    }

    #[test]
    fn test_default_worker_count_tracks_cpus() {
        let config = Config::default();
        assert_eq!(config.worker_count(), num_cpus::get());
    }

    #[test]
    fn test_cost_scales_with_value() {
        let config = Config::builder()
            .time_unit(Duration::from_millis(5))
            .build()
            .unwrap();

        assert_eq!(config.cost_of(3), Duration::from_millis(15));
        assert_eq!(config.cost_of(0), Duration::ZERO);
        assert_eq!(config.cost_of(-7), Duration::ZERO);
    }
}
