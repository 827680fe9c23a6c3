//! Concrete observer implementations.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crossbeam_channel::Sender;
use tracing::{debug, info};

use crate::observer::ReplayObserver;
use crate::progress::ProgressUpdate;

/// Observer that forwards updates through a channel (non-blocking).
///
/// Updates are dropped when a bounded channel is full, so a slow renderer
/// never stalls the replay.
pub struct ChannelObserver {
    sender: Sender<ProgressUpdate>,
}

impl ChannelObserver {
    /// Create a new channel observer.
    #[must_use]
    pub fn new(sender: Sender<ProgressUpdate>) -> Self {
        Self { sender }
    }
}

impl ReplayObserver for ChannelObserver {
    fn on_progress(&self, update: &ProgressUpdate) {
        let _ = self.sender.try_send(update.clone());
    }
}

/// Observer that logs progress with temporal throttling.
///
/// Completion updates are always logged.
pub struct LoggingObserver {
    min_interval_ms: u64,
    last_time: AtomicU64,
}

impl LoggingObserver {
    /// Create a new logging observer with the given minimum interval.
    #[must_use]
    pub fn new(min_interval_ms: u64) -> Self {
        Self {
            min_interval_ms,
            last_time: AtomicU64::new(0),
        }
    }
}

impl ReplayObserver for LoggingObserver {
    #[allow(clippy::cast_possible_truncation)]
    fn on_progress(&self, update: &ProgressUpdate) {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;

        let last_time = self.last_time.load(Ordering::Relaxed);
        if now.saturating_sub(last_time) < self.min_interval_ms && !update.done {
            return;
        }

        if update.done {
            info!(
                iteration = update.iteration,
                batches = update.total_batches,
                "Iteration replay complete"
            );
        } else {
            debug!(
                iteration = update.iteration,
                batch = update.batch_index,
                total = update.total_batches,
                progress = format!("{:.1}%", update.fraction() * 100.0),
                "Replay progress"
            );
        }
        self.last_time.store(now, Ordering::Relaxed);
    }
}

/// Null object pattern: ignores every update.
pub struct NoOpObserver;

impl NoOpObserver {
    /// Create a new no-op observer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplayObserver for NoOpObserver {
    fn on_progress(&self, _update: &ProgressUpdate) {}
}
