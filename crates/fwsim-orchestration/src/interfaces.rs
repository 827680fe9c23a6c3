//! Presentation interfaces.

use fwsim_core::{DistanceStore, StepReport};

use crate::metrics::{MetricsSnapshot, PerformanceRecord};

/// Presents simulator output to the user.
pub trait IterationPresenter {
    /// Present one committed iteration together with its modelled costs.
    fn present_iteration(
        &self,
        report: &StepReport,
        performance: Option<&PerformanceRecord>,
        store: &DistanceStore,
    );

    /// Present the cumulative metrics of a run.
    fn present_metrics(&self, metrics: &MetricsSnapshot);

    /// Present an error.
    fn present_error(&self, error: &str);
}

/// Presenter that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresenter;

impl IterationPresenter for NullPresenter {
    fn present_iteration(
        &self,
        _report: &StepReport,
        _performance: Option<&PerformanceRecord>,
        _store: &DistanceStore,
    ) {
    }

    fn present_metrics(&self, _metrics: &MetricsSnapshot) {}

    fn present_error(&self, _error: &str) {}
}
