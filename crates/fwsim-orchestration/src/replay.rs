//! Driving a batch replay: observers, pacing and cancellation.

use tracing::{trace, warn};

use fwsim_core::{CancellationToken, ProgressUpdate, ReplayObserver, SimError};

use crate::batch::BatchPlan;
use crate::pacing::Pacer;

/// What a finished replay went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Batches replayed.
    pub batches: usize,
    /// Frames delivered, excluding the final completion update.
    pub frames: usize,
}

/// Replay the batches of `plan` as iteration `iteration`.
///
/// Each frame is sent to `observer`, then paced. Once every frame has been
/// delivered a final [`ProgressUpdate::done`] follows. The replay is purely
/// visual: the distances were already committed by the stepper.
///
/// # Errors
///
/// Returns [`SimError::Cancelled`] if `cancel` fires before the replay ends.
pub fn replay_iteration(
    plan: &BatchPlan<'_>,
    iteration: usize,
    pacer: &dyn Pacer,
    observer: &dyn ReplayObserver,
    cancel: &CancellationToken,
) -> Result<ReplaySummary, SimError> {
    let mut frames = 0;
    for frame in plan.replay() {
        if cancel.is_cancelled() {
            warn!(iteration, batch = frame.batch.index(), "Replay cancelled");
            return Err(SimError::Cancelled);
        }
        trace!(
            iteration,
            batch = frame.batch.index(),
            percent = frame.percent,
            "Replay frame"
        );
        observer.on_progress(&frame.to_update(iteration));
        pacer.pause(&frame);
        frames += 1;
    }
    observer.on_progress(&ProgressUpdate::done(iteration, plan.len()));
    Ok(ReplaySummary {
        batches: plan.len(),
        frames,
    })
}
