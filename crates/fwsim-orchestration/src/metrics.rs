//! Synthetic performance model.
//!
//! Costs are counted in abstract units, never measured: a sequential run
//! pays `unit_cost` per operation, a parallel run pays `unit_cost` per round
//! of `W` operations.

use std::num::NonZeroUsize;

use serde::Serialize;

use fwsim_core::SchedulerOptions;

/// Modelled costs of one iteration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceRecord {
    /// Iteration number (1-based).
    pub iteration: usize,
    /// Pivot vertex of the iteration.
    pub pivot: usize,
    /// Number of relaxation checks.
    pub operations: usize,
    /// Worker count the costs were modelled with.
    pub workers: usize,
    /// `operations × unit_cost`.
    pub sequential_cost: u64,
    /// `ceil(operations / workers) × unit_cost`.
    pub parallel_cost: u64,
    /// `sequential_cost / parallel_cost`, `None` when the parallel cost is zero.
    pub speedup: Option<f64>,
    /// `100 × speedup / workers`, `None` when the speedup is undefined.
    pub efficiency: Option<f64>,
}

/// Cost model parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostModel {
    workers: NonZeroUsize,
    unit_cost: u64,
}

impl CostModel {
    /// Create a cost model.
    #[must_use]
    pub fn new(workers: NonZeroUsize, unit_cost: u64) -> Self {
        Self { workers, unit_cost }
    }

    /// Cost model described by scheduler options.
    #[must_use]
    pub fn from_options(opts: &SchedulerOptions) -> Self {
        Self::new(opts.workers(), opts.unit_cost)
    }

    /// Cost of running `count` operations one after another.
    #[must_use]
    pub fn sequential_cost(&self, count: usize) -> u64 {
        (count as u64).saturating_mul(self.unit_cost)
    }

    /// Cost of running `count` operations in rounds of `workers`.
    #[must_use]
    pub fn parallel_cost(&self, count: usize) -> u64 {
        (count.div_ceil(self.workers.get()) as u64).saturating_mul(self.unit_cost)
    }

    /// Model one iteration of `count` operations.
    #[must_use]
    pub fn evaluate(&self, iteration: usize, pivot: usize, count: usize) -> PerformanceRecord {
        let sequential_cost = self.sequential_cost(count);
        let parallel_cost = self.parallel_cost(count);
        let speedup = speedup(sequential_cost, parallel_cost);
        PerformanceRecord {
            iteration,
            pivot,
            operations: count,
            workers: self.workers.get(),
            sequential_cost,
            parallel_cost,
            speedup,
            efficiency: efficiency(speedup, self.workers),
        }
    }
}

/// Ratio of sequential to parallel cost, `None` if the parallel cost is zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn speedup(sequential_cost: u64, parallel_cost: u64) -> Option<f64> {
    (parallel_cost > 0).then(|| sequential_cost as f64 / parallel_cost as f64)
}

/// Speedup normalised by worker count, in percent.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn efficiency(speedup: Option<f64>, workers: NonZeroUsize) -> Option<f64> {
    speedup.map(|s| 100.0 * s / workers.get() as f64)
}

/// Cumulative metrics as exposed to presenters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    /// One record per completed iteration, in order.
    pub per_iteration_history: Vec<PerformanceRecord>,
    /// Sum of sequential costs.
    pub cumulative_sequential: u64,
    /// Sum of parallel costs.
    pub cumulative_parallel: u64,
    /// `cumulative_sequential / cumulative_parallel`.
    pub overall_speedup: Option<f64>,
    /// Overall speedup normalised by the current worker count.
    pub overall_efficiency: Option<f64>,
}

/// Accumulates performance records across iterations.
#[derive(Debug, Clone, Default)]
pub struct PerformanceTracker {
    history: Vec<PerformanceRecord>,
    cumulative_sequential: u64,
    cumulative_parallel: u64,
}

impl PerformanceTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and add its costs to the running totals.
    pub fn record(&mut self, record: PerformanceRecord) {
        self.cumulative_sequential = self
            .cumulative_sequential
            .saturating_add(record.sequential_cost);
        self.cumulative_parallel = self
            .cumulative_parallel
            .saturating_add(record.parallel_cost);
        self.history.push(record);
    }

    /// Drop all records and totals.
    pub fn reset(&mut self) {
        self.history.clear();
        self.cumulative_sequential = 0;
        self.cumulative_parallel = 0;
    }

    /// Recorded iterations, in order.
    #[must_use]
    pub fn history(&self) -> &[PerformanceRecord] {
        &self.history
    }

    /// Snapshot of the totals, with efficiency normalised by `workers`.
    #[must_use]
    pub fn snapshot(&self, workers: NonZeroUsize) -> MetricsSnapshot {
        let overall_speedup = speedup(self.cumulative_sequential, self.cumulative_parallel);
        MetricsSnapshot {
            per_iteration_history: self.history.clone(),
            cumulative_sequential: self.cumulative_sequential,
            cumulative_parallel: self.cumulative_parallel,
            overall_speedup,
            overall_efficiency: efficiency(overall_speedup, workers),
        }
    }
}
