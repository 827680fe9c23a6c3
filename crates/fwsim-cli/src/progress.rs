//! Replay progress bar.

use indicatif::{ProgressBar, ProgressStyle};

use fwsim_core::{ProgressUpdate, ReplayObserver};

/// Resolution of the bar; one iteration spans this many positions.
const BAR_LENGTH: u64 = 1000;

/// Observer that renders replay progress with `indicatif`.
pub struct ReplayProgressBar {
    bar: ProgressBar,
}

impl ReplayProgressBar {
    /// Bar drawn to stderr.
    #[must_use]
    pub fn new() -> Self {
        Self::with_bar(ProgressBar::new(BAR_LENGTH))
    }

    /// Bar that never draws.
    #[must_use]
    pub fn hidden() -> Self {
        Self::with_bar(ProgressBar::hidden())
    }

    fn with_bar(bar: ProgressBar) -> Self {
        bar.set_length(BAR_LENGTH);
        let style = ProgressStyle::with_template("{prefix:>14} [{bar:40.cyan/blue}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        bar.set_style(style);
        Self { bar }
    }

    /// Current bar position.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Remove the bar from the terminal.
    pub fn clear(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for ReplayProgressBar {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplayObserver for ReplayProgressBar {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn on_progress(&self, update: &ProgressUpdate) {
        self.bar.set_prefix(format!("iteration {}", update.iteration));
        self.bar
            .set_position((update.fraction() * BAR_LENGTH as f64).round() as u64);
        if update.done {
            self.bar.set_message(format!("{} batches", update.total_batches));
        } else {
            self.bar.set_message(format!(
                "batch {}/{} {}%",
                update.batch_index + 1,
                update.total_batches,
                update.percent
            ));
        }
    }
}
