//! CLI output formatting.

use std::io::{self, Write};

use fwsim_core::DistanceStore;
use tracing::debug;
use fwsim_orchestration::{MetricsSnapshot, PerformanceRecord};

/// Format a ratio such as a speedup, `n/a` when undefined.
#[must_use]
pub fn format_ratio(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}x"))
}

/// Format a percentage such as an efficiency, `n/a` when undefined.
#[must_use]
pub fn format_percent(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.1}%"))
}

/// Format the working matrix of `store` as an aligned grid.
///
/// Cells shorter than their original value are suffixed with `*`.
#[must_use]
pub fn format_matrix(store: &DistanceStore) -> String {
    let n = store.vertex_count();
    let label = n.saturating_sub(1).to_string().len();
    let width = store
        .working_matrix()
        .rows()
        .flatten()
        .map(|d| d.to_string().chars().count())
        .max()
        .unwrap_or(1)
        .max(label);

    let mut lines = Vec::with_capacity(n + 1);
    let mut header = format!("{:>label$} ", "");
    for j in 0..n {
        header.push_str(&format!(" {j:>width$} "));
    }
    lines.push(header);

    for i in 0..n {
        let mut line = format!("{i:>label$} ");
        for j in 0..n {
            let marker = if store.is_improved(i, j) { '*' } else { ' ' };
            line.push_str(&format!(" {:>width$}{marker}", store.cell(i, j)));
        }
        lines.push(line);
    }

    let mut out = String::new();
    for line in lines {
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// One row of the per-iteration metrics table.
#[must_use]
pub fn format_record(record: &PerformanceRecord) -> String {
    format!(
        "{:>5} {:>6} {:>6} {:>9} {:>9} {:>8} {:>11}",
        record.iteration,
        record.pivot,
        record.operations,
        record.sequential_cost,
        record.parallel_cost,
        format_ratio(record.speedup),
        format_percent(record.efficiency),
    )
}

/// Per-iteration metrics table followed by the overall figures.
#[must_use]
pub fn format_metrics(metrics: &MetricsSnapshot) -> String {
    let mut out = format!(
        "{:>5} {:>6} {:>6} {:>9} {:>9} {:>8} {:>11}\n",
        "iter", "pivot", "ops", "seq cost", "par cost", "speedup", "efficiency"
    );
    for record in &metrics.per_iteration_history {
        out.push_str(&format_record(record));
        out.push('\n');
    }
    out.push_str(&format!(
        "Overall: sequential {} | parallel {} | speedup {} | efficiency {}\n",
        metrics.cumulative_sequential,
        metrics.cumulative_parallel,
        format_ratio(metrics.overall_speedup),
        format_percent(metrics.overall_efficiency),
    ));
    out
}

/// Write a report to a file.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be created or written.
pub fn write_to_file(path: &str, contents: &str) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(contents.as_bytes())?;
    if !contents.ends_with('\n') {
        file.write_all(b"\n")?;
    }
    debug!(path, bytes = contents.len(), "Report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroUsize;

    use fwsim_core::{AlgorithmStepper, DistanceMatrix};
    use fwsim_orchestration::{CostModel, PerformanceTracker};

    const INF: u32 = u32::MAX;

    #[test]
    fn ratios() {
        assert_eq!(format_ratio(Some(2.0)), "2.00x");
        assert_eq!(format_ratio(None), "n/a");
        assert_eq!(format_percent(Some(75.0)), "75.0%");
        assert_eq!(format_percent(None), "n/a");
    }

    #[test]
    fn matrix_grid() {
        let matrix = DistanceMatrix::from_rows([[0u32, 4], [1, 0]]).unwrap();
        let store = DistanceStore::with_matrix(&matrix).unwrap();
        assert_eq!(format_matrix(&store), "   0  1\n0  0  4\n1  1  0\n");
    }

    #[test]
    fn matrix_marks_improved_cells() {
        let matrix =
            DistanceMatrix::from_rows([[0, 1, INF], [INF, 0, 1], [1, INF, 0]]).unwrap();
        let mut stepper = AlgorithmStepper::new(DistanceStore::with_matrix(&matrix).unwrap());
        let before = format_matrix(stepper.store());
        assert!(before.contains('\u{221e}'));
        assert!(!before.contains('*'));

        stepper.step();
        let after = format_matrix(stepper.store());
        let row = after.lines().nth(3).unwrap();
        assert_eq!(row, "2  1  2* 0");
    }

    #[test]
    fn empty_matrix() {
        let store = DistanceStore::default();
        assert_eq!(format_matrix(&store), "\n");
    }

    #[test]
    fn metrics_table() {
        let mut tracker = PerformanceTracker::new();
        let workers = NonZeroUsize::new(2).unwrap();
        tracker.record(CostModel::new(workers, 10).evaluate(1, 0, 6));
        let table = format_metrics(&tracker.snapshot(workers));
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("speedup"));
        assert!(lines[1].contains("2.00x"));
        assert!(lines[1].contains("100.0%"));
        assert!(lines[2].starts_with("Overall: sequential 60 | parallel 30"));
    }

    #[test]
    fn metrics_table_undefined() {
        let workers = NonZeroUsize::new(4).unwrap();
        let mut tracker = PerformanceTracker::new();
        tracker.record(CostModel::new(workers, 10).evaluate(1, 0, 0));
        let table = format_metrics(&tracker.snapshot(workers));
        assert!(table.contains("n/a"));
    }
}
