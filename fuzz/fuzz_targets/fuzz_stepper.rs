#![no_main]

use libfuzzer_sys::fuzz_target;

use fwsim_core::{Distance, DistanceMatrix, SchedulerOptions, VertexBounds};
use fwsim_orchestration::Simulator;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    // First byte: vertex count (1..=10), second: worker count (1..=16).
    let n = usize::from(data[0] % 10) + 1;
    let workers = usize::from(data[1] % 16) + 1;
    let weights = &data[2..];

    let rows = (0..n).map(|i| {
        (0..n)
            .map(|j| {
                if i == j {
                    return Distance::ZERO;
                }
                match weights.get(i * n + j) {
                    // 0 marks a missing edge.
                    Some(0) | None => Distance::INFINITY,
                    Some(&w) => Distance::new(u32::from(w)),
                }
            })
            .collect::<Vec<_>>()
    });
    let matrix = DistanceMatrix::from_rows(rows).unwrap();

    let options = SchedulerOptions {
        worker_count: workers,
        ..SchedulerOptions::default()
    };
    let mut sim = Simulator::with_bounds(options, VertexBounds::default()).unwrap();
    sim.initialize(&matrix).unwrap();

    while !sim.is_complete() {
        let before = sim.store().working_matrix().clone();
        let step = sim.step();
        assert_eq!(step.report.operations.len(), n * n - n);
        for op in &step.report.operations {
            assert_eq!(op.old_dist, before.get(op.i, op.j));
            assert!(sim.store().cell(op.i, op.j) <= op.old_dist);
        }
        let plan = sim.batch_plan(&step.report.operations);
        let total: usize = plan.batches().map(|b| b.len()).sum();
        assert_eq!(total, step.report.operations.len());
    }
});
