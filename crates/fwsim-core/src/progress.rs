//! Replay progress updates and cooperative cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::constants::PROGRESS_DONE;
use crate::error::SimError;

/// Progress of a batch replay, sent to observers once per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpdate {
    /// Iteration being replayed (1-based).
    pub iteration: usize,
    /// Index of the current batch.
    pub batch_index: usize,
    /// Number of batches in the iteration.
    pub total_batches: usize,
    /// Simulated completion of the current batch, in percent.
    pub percent: u8,
    /// Whether this is the final update of the iteration.
    pub done: bool,
}

impl ProgressUpdate {
    /// Create a progress update.
    #[must_use]
    pub fn new(iteration: usize, batch_index: usize, total_batches: usize, percent: u8) -> Self {
        Self {
            iteration,
            batch_index,
            total_batches,
            percent,
            done: false,
        }
    }

    /// Create the completion update of an iteration.
    #[must_use]
    pub fn done(iteration: usize, total_batches: usize) -> Self {
        Self {
            iteration,
            batch_index: total_batches.saturating_sub(1),
            total_batches,
            percent: PROGRESS_DONE,
            done: true,
        }
    }

    /// Fraction of the whole iteration replayed, in `[0.0, 1.0]`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(&self) -> f64 {
        if self.done || self.total_batches == 0 {
            return 1.0;
        }
        let batch = f64::from(self.percent) / f64::from(PROGRESS_DONE);
        (self.batch_index as f64 + batch) / self.total_batches as f64
    }
}

/// Cooperative cancellation token using an atomic flag.
///
/// # Example
/// ```
/// use fwsim_core::progress::CancellationToken;
///
/// let token = CancellationToken::new();
/// assert!(!token.is_cancelled());
///
/// token.cancel();
/// assert!(token.is_cancelled());
/// assert!(token.check_cancelled().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a new cancellation token.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Check if cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Check for cancellation, returning an error if cancelled.
    pub fn check_cancelled(&self) -> Result<(), SimError> {
        if self.is_cancelled() {
            Err(SimError::Cancelled)
        } else {
            Ok(())
        }
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}
