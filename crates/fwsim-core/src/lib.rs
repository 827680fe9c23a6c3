//! # fwsim-core
//!
//! Core library for the Floyd-Warshall parallelization simulator.
//! Holds the distance store, the one-pivot-at-a-time stepper, and the
//! progress/observer plumbing shared with the scheduler.

pub mod constants;
pub mod distance;
pub mod error;
pub mod generator;
pub mod matrix;
pub mod observer;
pub mod observers;
pub mod operation;
pub mod options;
pub mod progress;
pub mod stepper;
pub mod store;

// Re-exports
pub use constants::{exit_codes, DEFAULT_UNIT_COST, DEFAULT_WORKER_COUNT, PROGRESS_FRAMES};
pub use distance::Distance;
pub use error::SimError;
pub use generator::RandomGraph;
pub use matrix::{DistanceMatrix, VertexBounds};
pub use observer::{ObserverSubject, ReplayObserver};
pub use operation::UpdateOperation;
pub use options::SchedulerOptions;
pub use progress::{CancellationToken, ProgressUpdate};
pub use stepper::{AlgorithmStepper, StepReport, StepperState};
pub use store::{CellUpdate, DistanceStore};

/// Run Floyd-Warshall to completion and return the shortest distances.
///
/// Convenience wrapper for callers that only want the final matrix.
///
/// # Example
/// ```
/// let inf = u32::MAX;
/// let graph = fwsim_core::DistanceMatrix::from_rows([[0, 1, inf], [inf, 0, 1], [1, inf, 0]]).unwrap();
/// let shortest = fwsim_core::shortest_paths(&graph).unwrap();
/// assert_eq!(shortest.get(1, 0), fwsim_core::Distance::new(2));
/// ```
pub fn shortest_paths(graph: &DistanceMatrix) -> Result<DistanceMatrix, SimError> {
    let mut stepper = AlgorithmStepper::default();
    stepper.initialize(graph)?;
    stepper.run_to_completion();
    Ok(stepper.store().working_matrix().clone())
}
