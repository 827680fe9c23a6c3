//! Simulator facade: stepper, scheduler options and performance history.

use rand::Rng;
use serde::Serialize;
use tracing::info;

use fwsim_core::{
    AlgorithmStepper, DistanceMatrix, DistanceStore, RandomGraph, SchedulerOptions, SimError,
    StepReport, StepperState, UpdateOperation, VertexBounds,
};

use crate::batch::{BatchPlan, ExecutionMode};
use crate::metrics::{CostModel, MetricsSnapshot, PerformanceRecord, PerformanceTracker};

/// Result of [`Simulator::step`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationStep {
    /// What the stepper did.
    pub report: StepReport,
    /// Modelled costs, `None` when the call did not advance.
    pub performance: Option<PerformanceRecord>,
}

/// Drives one graph through Floyd-Warshall and models each iteration's cost.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    stepper: AlgorithmStepper,
    options: SchedulerOptions,
    tracker: PerformanceTracker,
}

impl Simulator {
    /// Create a simulator with default vertex bounds.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] if `options` are invalid.
    pub fn new(options: SchedulerOptions) -> Result<Self, SimError> {
        Self::with_bounds(options, VertexBounds::default())
    }

    /// Create a simulator accepting graphs within `bounds`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] if `options` are invalid.
    pub fn with_bounds(options: SchedulerOptions, bounds: VertexBounds) -> Result<Self, SimError> {
        options.validate()?;
        Ok(Self {
            stepper: AlgorithmStepper::new(DistanceStore::new(bounds)),
            options,
            tracker: PerformanceTracker::new(),
        })
    }

    /// Load `matrix` and clear the performance history.
    ///
    /// # Errors
    ///
    /// Returns an input error if `matrix` fails validation; nothing changes then.
    pub fn initialize(&mut self, matrix: &DistanceMatrix) -> Result<(), SimError> {
        self.stepper.initialize(matrix)?;
        self.tracker.reset();
        Ok(())
    }

    /// Generate a random graph, load it, and return it.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] for invalid generator parameters, or an
    /// input error if the vertex count is outside the simulator's bounds.
    pub fn initialize_random<R: Rng + ?Sized>(
        &mut self,
        graph: &RandomGraph,
        rng: &mut R,
    ) -> Result<DistanceMatrix, SimError> {
        let bounds = self.store().bounds();
        if !bounds.contains(graph.vertices) {
            return Err(SimError::InvalidSize {
                size: graph.vertices,
                min: bounds.min,
                max: bounds.max,
            });
        }
        let matrix = graph.generate(rng)?;
        self.initialize(&matrix)?;
        Ok(matrix)
    }

    /// Advance one iteration and record its modelled costs.
    pub fn step(&mut self) -> SimulationStep {
        let report = self.stepper.step();
        let performance = report.pivot.map(|pivot| {
            let record = CostModel::from_options(&self.options).evaluate(
                report.iteration,
                pivot,
                report.operations.len(),
            );
            self.tracker.record(record.clone());
            record
        });
        SimulationStep {
            report,
            performance,
        }
    }

    /// Return to the last initialized graph and clear the performance history.
    pub fn reset(&mut self) {
        self.stepper.reset();
        self.tracker.reset();
    }

    /// Replace the scheduler options.
    ///
    /// Recorded history is kept; later iterations use the new options.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] if `options` are invalid; the previous
    /// options stay in effect.
    pub fn configure(&mut self, options: SchedulerOptions) -> Result<(), SimError> {
        options.validate()?;
        self.options = options;
        info!(
            workers = options.worker_count,
            parallel = options.parallel_enabled,
            unit_cost = options.unit_cost,
            "Scheduler configured"
        );
        Ok(())
    }

    /// Current scheduler options.
    #[must_use]
    pub fn options(&self) -> &SchedulerOptions {
        &self.options
    }

    /// Cumulative metrics, with overall efficiency normalised by the
    /// current worker count.
    #[must_use]
    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.tracker.snapshot(self.options.workers())
    }

    /// Batch plan for `operations` under the current options.
    #[must_use]
    pub fn batch_plan<'a>(&self, operations: &'a [UpdateOperation]) -> BatchPlan<'a> {
        BatchPlan::new(operations, ExecutionMode::from_options(&self.options))
    }

    /// The underlying stepper.
    #[must_use]
    pub fn stepper(&self) -> &AlgorithmStepper {
        &self.stepper
    }

    /// The distance store.
    #[must_use]
    pub fn store(&self) -> &DistanceStore {
        self.stepper.store()
    }

    /// Whether every pivot has been processed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.stepper.is_complete()
    }

    /// Current stepper state.
    #[must_use]
    pub fn state(&self) -> StepperState {
        self.stepper.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn options(workers: usize) -> SchedulerOptions {
        SchedulerOptions {
            worker_count: workers,
            parallel_enabled: true,
            unit_cost: 10,
        }
    }

    fn ring() -> DistanceMatrix {
        DistanceMatrix::from_rows([[0u32, 1, 999], [999, 0, 1], [1, 999, 0]]).unwrap()
    }

    #[test]
    fn three_vertex_example() {
        let mut sim = Simulator::new(options(2)).unwrap();
        sim.initialize(&ring()).unwrap();

        let first = sim.step();
        assert_eq!(first.report.operations.len(), 6);
        let perf = first.performance.unwrap();
        assert_eq!(perf.iteration, 1);
        assert_eq!(perf.pivot, 0);
        assert_eq!(perf.sequential_cost, 60);
        assert_eq!(perf.parallel_cost, 30);
        assert_eq!(perf.speedup, Some(2.0));
        assert_eq!(perf.efficiency, Some(100.0));

        while !sim.is_complete() {
            sim.step();
        }
        let expected = DistanceMatrix::from_rows([[0u32, 1, 2], [2, 0, 1], [1, 2, 0]]).unwrap();
        assert_eq!(sim.store().working_matrix(), &expected);

        let metrics = sim.metrics_snapshot();
        assert_eq!(metrics.per_iteration_history.len(), 3);
        assert_eq!(metrics.cumulative_sequential, 180);
        assert_eq!(metrics.cumulative_parallel, 90);
        assert_eq!(metrics.overall_speedup, Some(2.0));
    }

    #[test]
    fn single_vertex_metrics_are_undefined() {
        let mut sim = Simulator::new(options(4)).unwrap();
        sim.initialize(&DistanceMatrix::from_rows([[0u32]]).unwrap()).unwrap();
        let step = sim.step();
        assert!(step.report.complete);
        assert!(step.report.operations.is_empty());
        let perf = step.performance.unwrap();
        assert_eq!(perf.sequential_cost, 0);
        assert_eq!(perf.speedup, None);

        let metrics = sim.metrics_snapshot();
        assert_eq!(metrics.cumulative_parallel, 0);
        assert_eq!(metrics.overall_speedup, None);
        assert_eq!(metrics.overall_efficiency, None);
    }

    #[test]
    fn steps_past_completion_record_nothing() {
        let mut sim = Simulator::new(options(2)).unwrap();
        sim.initialize(&ring()).unwrap();
        while !sim.is_complete() {
            sim.step();
        }
        let extra = sim.step();
        assert!(extra.performance.is_none());
        assert_eq!(sim.metrics_snapshot().per_iteration_history.len(), 3);
    }

    #[test]
    fn reset_clears_metrics() {
        let mut sim = Simulator::new(options(2)).unwrap();
        sim.initialize(&ring()).unwrap();
        sim.step();
        sim.reset();
        assert_eq!(sim.state(), StepperState::NotStarted);
        assert!(sim.metrics_snapshot().per_iteration_history.is_empty());
        assert_eq!(sim.store().working_matrix(), &ring());
    }

    #[test]
    fn configure_rejects_zero_workers() {
        let mut sim = Simulator::new(options(2)).unwrap();
        let err = sim.configure(options(0)).unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
        assert_eq!(sim.options().worker_count, 2);
        assert!(Simulator::new(options(0)).is_err());
    }

    #[test]
    fn configure_keeps_history_and_changes_model() {
        let mut sim = Simulator::new(options(2)).unwrap();
        sim.initialize(&ring()).unwrap();
        sim.step();
        sim.configure(options(6)).unwrap();
        let perf = sim.step().performance.unwrap();
        assert_eq!(perf.workers, 6);
        assert_eq!(perf.parallel_cost, 10);
        assert_eq!(sim.metrics_snapshot().per_iteration_history.len(), 2);
    }

    #[test]
    fn sequential_mode_keeps_cost_model() {
        let mut sim = Simulator::new(SchedulerOptions {
            parallel_enabled: false,
            ..options(2)
        })
        .unwrap();
        sim.initialize(&ring()).unwrap();
        let step = sim.step();
        assert_eq!(step.performance.unwrap().parallel_cost, 30);
        let plan = sim.batch_plan(&step.report.operations);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.mode(), ExecutionMode::Sequential);
    }

    #[test]
    fn initialize_failure_keeps_state() {
        let mut sim = Simulator::new(options(2)).unwrap();
        sim.initialize(&ring()).unwrap();
        sim.step();
        let bad = DistanceMatrix::from_rows([[0u32, 1], [1, 3]]).unwrap();
        assert!(matches!(
            sim.initialize(&bad),
            Err(SimError::InvalidDiagonal { index: 1, .. })
        ));
        assert_eq!(sim.metrics_snapshot().per_iteration_history.len(), 1);
        assert_eq!(sim.store().vertex_count(), 3);
    }

    #[test]
    fn random_initialization_is_seeded() {
        let graph = RandomGraph::with_vertices(6);
        let mut a = Simulator::default();
        let mut b = Simulator::default();
        let ma = a
            .initialize_random(&graph, &mut ChaCha8Rng::seed_from_u64(7))
            .unwrap();
        let mb = b
            .initialize_random(&graph, &mut ChaCha8Rng::seed_from_u64(7))
            .unwrap();
        assert_eq!(ma, mb);
        assert_eq!(a.store().original_matrix(), &ma);
    }

    #[test]
    fn random_initialization_respects_bounds() {
        let mut sim = Simulator::with_bounds(options(2), VertexBounds::INTERACTIVE).unwrap();
        let err = sim
            .initialize_random(&RandomGraph::with_vertices(2), &mut ChaCha8Rng::seed_from_u64(1))
            .unwrap_err();
        assert!(matches!(err, SimError::InvalidSize { size: 2, .. }));
    }

    #[test]
    fn random_initialization_checks_bounds_before_generating() {
        let mut sim = Simulator::with_bounds(options(2), VertexBounds::INTERACTIVE).unwrap();
        sim.initialize(&ring()).unwrap();
        let err = sim
            .initialize_random(
                &RandomGraph::with_vertices(usize::MAX),
                &mut ChaCha8Rng::seed_from_u64(1),
            )
            .unwrap_err();
        assert!(matches!(err, SimError::InvalidSize { min: 3, max: 10, .. }));
        assert_eq!(sim.store().working_matrix(), &ring());
    }
}
