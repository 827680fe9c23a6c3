//! Constants for the simulator's cost model, vertex bounds, and random graphs.

/// Default number of simulated workers.
pub const DEFAULT_WORKER_COUNT: usize = 4;

/// Default cost charged for one relaxation check.
pub const DEFAULT_UNIT_COST: u64 = 10;

/// Smallest vertex count accepted by default.
pub const MIN_VERTICES: usize = 1;

/// Largest vertex count accepted by default.
pub const MAX_VERTICES: usize = 10;

/// Smallest vertex count of the interactive bounds.
pub const MIN_INTERACTIVE_VERTICES: usize = 3;

/// Default vertex count for random graphs.
pub const DEFAULT_RANDOM_VERTICES: usize = 5;

/// Default probability that a random graph has an edge between two vertices.
pub const DEFAULT_EDGE_PROBABILITY: f64 = 0.7;

/// Default lightest random edge weight.
pub const DEFAULT_MIN_WEIGHT: u32 = 1;

/// Default heaviest random edge weight.
pub const DEFAULT_MAX_WEIGHT: u32 = 15;

/// Progress percentages emitted for each batch during a staged replay.
///
/// Frame 0 marks the batch as dispatched, the five following frames are the
/// 20% ticks of its simulated completion.
pub const PROGRESS_FRAMES: [u8; 6] = [0, 20, 40, 60, 80, 100];

/// Percentage of a completed batch.
pub const PROGRESS_DONE: u8 = 100;

/// Process exit codes.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error.
    pub const ERROR_GENERIC: i32 = 1;
    /// Input matrix rejected (shape, size, or diagonal).
    pub const ERROR_INPUT: i32 = 2;
    /// Invalid configuration.
    pub const ERROR_CONFIG: i32 = 4;
    /// Replay cancelled by user (Ctrl+C).
    pub const ERROR_CANCELED: i32 = 130;
}
