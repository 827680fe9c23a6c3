//! Golden-file tests: full simulator runs over fixed scenarios.

use serde::Deserialize;

use fwsim_core::{shortest_paths, DistanceMatrix, SchedulerOptions};
use fwsim_orchestration::{SimulationStep, Simulator};

#[derive(Debug, Deserialize)]
struct GoldenCase {
    name: String,
    workers: usize,
    unit_cost: u64,
    matrix: DistanceMatrix,
    shortest: DistanceMatrix,
    relaxed_per_iteration: Vec<usize>,
    sequential_cost_per_iteration: u64,
    parallel_cost_per_iteration: u64,
    cumulative_sequential: u64,
    cumulative_parallel: u64,
}

fn load_golden() -> Vec<GoldenCase> {
    let data = include_str!("testdata/shortest_paths_golden.json");
    serde_json::from_str(data).expect("failed to parse golden file")
}

fn simulator_for(case: &GoldenCase) -> Simulator {
    let mut sim = Simulator::new(SchedulerOptions {
        worker_count: case.workers,
        parallel_enabled: true,
        unit_cost: case.unit_cost,
    })
    .unwrap();
    sim.initialize(&case.matrix).unwrap();
    sim
}

fn run_all(sim: &mut Simulator) -> Vec<SimulationStep> {
    let mut steps = Vec::new();
    while !sim.is_complete() {
        steps.push(sim.step());
    }
    steps
}

#[test]
fn golden_shortest_paths() {
    for case in load_golden() {
        let result = shortest_paths(&case.matrix).unwrap();
        assert_eq!(result, case.shortest, "{}", case.name);
    }
}

#[test]
fn golden_relaxations_per_iteration() {
    for case in load_golden() {
        let mut sim = simulator_for(&case);
        let mut relaxed = Vec::new();
        while !sim.is_complete() {
            relaxed.push(sim.step().report.relaxed_count());
        }
        assert_eq!(relaxed, case.relaxed_per_iteration, "{}", case.name);
        assert_eq!(sim.store().working_matrix(), &case.shortest, "{}", case.name);
    }
}

#[test]
fn golden_cost_model() {
    for case in load_golden() {
        let mut sim = simulator_for(&case);
        while !sim.is_complete() {
            let perf = sim.step().performance.unwrap();
            assert_eq!(
                perf.sequential_cost, case.sequential_cost_per_iteration,
                "{}",
                case.name
            );
            assert_eq!(
                perf.parallel_cost, case.parallel_cost_per_iteration,
                "{}",
                case.name
            );
        }
        let metrics = sim.metrics_snapshot();
        assert_eq!(metrics.cumulative_sequential, case.cumulative_sequential, "{}", case.name);
        assert_eq!(metrics.cumulative_parallel, case.cumulative_parallel, "{}", case.name);
        assert_eq!(metrics.per_iteration_history.len(), case.matrix.len());
    }
}

#[test]
fn golden_reset_replays_identically() {
    for case in load_golden() {
        let mut sim = simulator_for(&case);
        let first = run_all(&mut sim);
        sim.reset();
        assert_eq!(sim.store().working_matrix(), &case.matrix, "{}", case.name);
        let second = run_all(&mut sim);
        assert_eq!(first, second, "{}", case.name);
    }
}
