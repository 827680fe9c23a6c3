//! Wall-clock pacing of replay frames.

use std::thread;
use std::time::Duration;

use fwsim_core::PROGRESS_FRAMES;

use crate::batch::ReplayFrame;

/// Decides how long a replay lingers on each frame.
pub trait Pacer: Send + Sync {
    /// Called after a frame has been delivered to observers.
    fn pause(&self, frame: &ReplayFrame<'_>);
}

/// Replays as fast as possible.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

impl Pacer for NoPacing {
    fn pause(&self, _frame: &ReplayFrame<'_>) {}
}

/// Sleeps a fixed tick after every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay {
    tick: Duration,
}

impl FixedDelay {
    /// Pause `tick` after every frame.
    #[must_use]
    pub fn new(tick: Duration) -> Self {
        Self { tick }
    }

    /// Pacing where one parallel batch takes `speed` in total.
    ///
    /// The batch's progress ticks (20% each) are spread evenly over `speed`.
    #[must_use]
    pub fn from_speed(speed: Duration) -> Self {
        let ticks = u32::try_from(PROGRESS_FRAMES.len() - 1).unwrap_or(1);
        Self::new(speed / ticks)
    }

    /// Delay applied per frame.
    #[must_use]
    pub fn tick(&self) -> Duration {
        self.tick
    }
}

impl Pacer for FixedDelay {
    fn pause(&self, frame: &ReplayFrame<'_>) {
        // The final frame of a batch needs no trailing delay.
        if !self.tick.is_zero() && !frame.is_batch_done() {
            thread::sleep(self.tick);
        }
    }
}
