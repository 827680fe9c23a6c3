//! Floyd-Warshall stepper: one pivot vertex per call.
//!
//! Each [`AlgorithmStepper::step`] evaluates every off-diagonal pair against
//! the distances as they stood before the call, then commits all relaxations
//! at once and advances the pivot. Calling it after completion is a no-op.

use serde::Serialize;
use tracing::{debug, info};

use crate::error::SimError;
use crate::matrix::DistanceMatrix;
use crate::operation::UpdateOperation;
use crate::store::DistanceStore;

/// Lifecycle of a stepper over an `n`-vertex graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StepperState {
    /// No iteration has run (`k = -1`).
    NotStarted,
    /// Pivots `0..=pivot` have been processed and more remain.
    Running {
        /// Last processed pivot.
        pivot: usize,
    },
    /// Every pivot has been processed.
    Complete,
}

/// Outcome of one [`AlgorithmStepper::step`] call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepReport {
    /// Number of iterations completed so far.
    pub iteration: usize,
    /// Pivot processed by this call, `None` if the call was a no-op.
    pub pivot: Option<usize>,
    /// All relaxation checks of the pass, row-major over `(i, j)`.
    pub operations: Vec<UpdateOperation>,
    /// Whether the algorithm is complete after this call.
    pub complete: bool,
}

impl StepReport {
    /// Whether this call advanced the algorithm.
    #[must_use]
    pub fn advanced(&self) -> bool {
        self.pivot.is_some()
    }

    /// Number of operations that shortened a distance.
    #[must_use]
    pub fn relaxed_count(&self) -> usize {
        self.operations.iter().filter(|op| op.updated).count()
    }
}

/// Drives Floyd-Warshall over a [`DistanceStore`] one pivot at a time.
#[derive(Debug, Clone)]
pub struct AlgorithmStepper {
    store: DistanceStore,
    pivot: Option<usize>,
}

impl AlgorithmStepper {
    /// Create a stepper over `store`, not yet started.
    #[must_use]
    pub fn new(store: DistanceStore) -> Self {
        Self { store, pivot: None }
    }

    /// Load a new graph and return to [`StepperState::NotStarted`].
    ///
    /// On error neither the store nor the cursor change.
    pub fn initialize(&mut self, matrix: &DistanceMatrix) -> Result<(), SimError> {
        self.store.initialize(matrix)?;
        self.pivot = None;
        Ok(())
    }

    /// Restore the last initialized graph and return to [`StepperState::NotStarted`].
    pub fn reset(&mut self) {
        self.store.restore();
        self.pivot = None;
        info!(vertices = self.store.vertex_count(), "Stepper reset");
    }

    /// Process the next pivot vertex.
    pub fn step(&mut self) -> StepReport {
        if self.is_complete() {
            return StepReport {
                iteration: self.iteration(),
                pivot: None,
                operations: Vec::new(),
                complete: true,
            };
        }

        let k = self.pivot.map_or(0, |p| p + 1);
        let operations = self.relaxation_pass(k);
        let relaxed = operations.iter().filter_map(UpdateOperation::cell_update);
        self.store.apply_updates(relaxed);
        self.pivot = Some(k);

        let report = StepReport {
            iteration: self.iteration(),
            pivot: Some(k),
            operations,
            complete: self.is_complete(),
        };
        debug!(
            pivot = k,
            operations = report.operations.len(),
            relaxed = report.relaxed_count(),
            complete = report.complete,
            "Iteration committed"
        );
        report
    }

    /// Step until complete, returning the number of iterations run.
    pub fn run_to_completion(&mut self) -> usize {
        let mut steps = 0;
        while !self.is_complete() {
            self.step();
            steps += 1;
        }
        steps
    }

    /// Evaluate every off-diagonal pair through pivot `k` without writing.
    fn relaxation_pass(&self, k: usize) -> Vec<UpdateOperation> {
        let dist = self.store.working_matrix();
        let n = dist.len();
        let mut operations = Vec::with_capacity(n * n - n);
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                operations.push(UpdateOperation::evaluate(
                    i,
                    j,
                    k,
                    dist.get(i, j),
                    (dist.get(i, k), dist.get(k, j)),
                ));
            }
        }
        operations
    }

    /// Current state of the state machine.
    #[must_use]
    pub fn state(&self) -> StepperState {
        if self.is_complete() {
            StepperState::Complete
        } else {
            match self.pivot {
                None => StepperState::NotStarted,
                Some(pivot) => StepperState::Running { pivot },
            }
        }
    }

    /// Whether every pivot has been processed.
    ///
    /// A store without vertices is complete from the start.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        let n = self.store.vertex_count();
        n == 0 || self.pivot == Some(n - 1)
    }

    /// Last processed pivot, `None` before the first step.
    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.pivot
    }

    /// Number of iterations completed so far.
    #[must_use]
    pub fn iteration(&self) -> usize {
        self.pivot.map_or(0, |p| p + 1)
    }

    /// The underlying distance store.
    #[must_use]
    pub fn store(&self) -> &DistanceStore {
        &self.store
    }
}

impl Default for AlgorithmStepper {
    fn default() -> Self {
        Self::new(DistanceStore::default())
    }
}
