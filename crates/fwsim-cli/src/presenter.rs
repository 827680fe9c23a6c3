//! CLI presenter.

use fwsim_core::{DistanceStore, StepReport};
use fwsim_orchestration::{IterationPresenter, MetricsSnapshot, PerformanceRecord};

use crate::output::{format_matrix, format_metrics, format_percent, format_ratio};
use crate::ui::{highlight_improved, print_error, print_header};

/// Prints iterations and metrics to stdout.
pub struct CliPresenter {
    verbose: bool,
    quiet: bool,
}

impl CliPresenter {
    #[must_use]
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Text shown for one iteration, empty in quiet mode or for a no-op step.
    ///
    /// The matrix is left unhighlighted; [`IterationPresenter::present_iteration`]
    /// adds colour when printing.
    #[must_use]
    pub fn render_iteration(
        &self,
        report: &StepReport,
        performance: Option<&PerformanceRecord>,
        store: &DistanceStore,
    ) -> String {
        let Some(pivot) = report.pivot.filter(|_| !self.quiet) else {
            return String::new();
        };

        let mut out = format!(
            "Relaxed {} of {} pairs through vertex {pivot}\n",
            report.relaxed_count(),
            report.operations.len()
        );
        if let Some(perf) = performance {
            out.push_str(&format!(
                "Sequential {} | Parallel {} ({} workers) | Speedup {} | Efficiency {}\n",
                perf.sequential_cost,
                perf.parallel_cost,
                perf.workers,
                format_ratio(perf.speedup),
                format_percent(perf.efficiency),
            ));
        }
        if self.verbose {
            for op in report.operations.iter().filter(|op| op.updated) {
                out.push_str(&format!(
                    "  d[{}][{}]: {} -> {} via {}\n",
                    op.i, op.j, op.old_dist, op.new_dist, op.k
                ));
            }
        }
        out.push_str(&format_matrix(store));
        out
    }
}

impl IterationPresenter for CliPresenter {
    fn present_iteration(
        &self,
        report: &StepReport,
        performance: Option<&PerformanceRecord>,
        store: &DistanceStore,
    ) {
        let body = self.render_iteration(report, performance, store);
        if body.is_empty() {
            return;
        }
        print_header(&format!(
            "Iteration {} (k = {})",
            report.iteration,
            report.pivot.unwrap_or_default()
        ));
        print!("{}", highlight_improved(&body));
    }

    fn present_metrics(&self, metrics: &MetricsSnapshot) {
        if self.quiet {
            return;
        }
        print_header("Performance");
        print!("{}", format_metrics(metrics));
    }

    fn present_error(&self, error: &str) {
        print_error(error);
    }
}
