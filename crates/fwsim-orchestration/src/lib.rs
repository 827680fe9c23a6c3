//! # fwsim-orchestration
//!
//! Simulated worker-pool scheduling on top of `fwsim-core`: batch
//! partitioning and replay, the synthetic cost model, and the
//! [`Simulator`] facade a driver calls into.

pub mod batch;
pub mod interfaces;
pub mod metrics;
pub mod pacing;
pub mod replay;
pub mod simulator;

pub use batch::{Batch, BatchPlan, ExecutionMode, ReplayFrame, ThreadAssignment};
pub use interfaces::{IterationPresenter, NullPresenter};
pub use metrics::{CostModel, MetricsSnapshot, PerformanceRecord, PerformanceTracker};
pub use pacing::{FixedDelay, NoPacing, Pacer};
pub use replay::{replay_iteration, ReplaySummary};
pub use simulator::{SimulationStep, Simulator};
