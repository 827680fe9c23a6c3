//! Scheduler and cost-model options.

use std::num::NonZeroUsize;

use serde::Serialize;

use crate::constants::{DEFAULT_UNIT_COST, DEFAULT_WORKER_COUNT};
use crate::error::SimError;

/// Options for the simulated worker pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SchedulerOptions {
    /// Number of simulated workers (must be at least 1).
    pub worker_count: usize,
    /// Whether operations are replayed in staged batches (`false` = sequential mode).
    pub parallel_enabled: bool,
    /// Cost charged for one relaxation check.
    pub unit_cost: u64,
}

impl Default for SchedulerOptions {
    fn default() -> Self {
        Self {
            worker_count: DEFAULT_WORKER_COUNT,
            parallel_enabled: true,
            unit_cost: DEFAULT_UNIT_COST,
        }
    }
}

impl SchedulerOptions {
    /// Check the options, returning the worker count as a non-zero value.
    pub fn validate(&self) -> Result<NonZeroUsize, SimError> {
        NonZeroUsize::new(self.worker_count)
            .ok_or_else(|| SimError::Config("worker count must be at least 1".into()))
    }

    /// Validated worker count.
    ///
    /// Only meaningful on options that passed [`SchedulerOptions::validate`];
    /// a zero count is reported as one worker.
    #[must_use]
    pub fn workers(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.worker_count).unwrap_or(NonZeroUsize::MIN)
    }
}
