//! Application entry point and run loop.

use std::fs;
use std::sync::Arc;

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{info, warn};

use fwsim_cli::output::{format_matrix, write_to_file};
use fwsim_cli::presenter::CliPresenter;
use fwsim_cli::progress::ReplayProgressBar;
use fwsim_cli::ui::{print_header, print_success, print_warning};
use fwsim_core::observers::LoggingObserver;
use fwsim_core::{
    CancellationToken, Distance, DistanceMatrix, ObserverSubject, SchedulerOptions, SimError,
};
use fwsim_orchestration::{
    replay_iteration, FixedDelay, IterationPresenter, MetricsSnapshot, NoPacing, Pacer, Simulator,
};

use crate::config::AppConfig;

/// Minimum interval between throttled progress log lines.
const LOG_INTERVAL_MS: u64 = 250;

/// Serialisable summary of a run, printed with `--json`.
#[derive(Debug, Serialize)]
pub struct RunReport {
    /// Seed of the random graph, `None` for a matrix file.
    pub seed: Option<u64>,
    /// Scheduler options in effect.
    pub options: SchedulerOptions,
    /// Iterations run.
    pub iterations: usize,
    /// Whether every pivot was processed.
    pub complete: bool,
    /// Input distances.
    pub original: DistanceMatrix,
    /// Working distances at the end of the run.
    pub distances: DistanceMatrix,
    /// Cost model history and totals.
    pub metrics: MetricsSnapshot,
}

/// Where the input graph came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GraphSource {
    File,
    Random(u64),
}

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        fwsim_cli::completion::generate_completion(&mut cmd, shell, &mut std::io::stdout());
        return Ok(());
    }

    let pace = config.pace_duration()?;
    let mut sim = Simulator::new(config.scheduler_options())?;
    let source = load_graph(config, &mut sim)?;

    let cancel = CancellationToken::new();
    ctrlc_handler(cancel.clone());

    let text = !config.json && !config.quiet;
    let presenter = CliPresenter::new(config.verbose, !text);
    let pacer: Box<dyn Pacer> = if pace.is_zero() {
        Box::new(NoPacing)
    } else {
        Box::new(FixedDelay::from_speed(pace))
    };
    let logging = Arc::new(LoggingObserver::new(LOG_INTERVAL_MS));

    if text {
        print_header(&format!("Input graph ({} vertices)", sim.store().vertex_count()));
        print!("{}", format_matrix(sim.store()));
    }

    let mut iterations = 0;
    while !sim.is_complete() {
        if config.max_steps.is_some_and(|max| iterations >= max) {
            info!(iterations, "Step limit reached");
            break;
        }
        cancel.check_cancelled()?;

        let step = sim.step();
        let plan = sim.batch_plan(&step.report.operations);

        let observers = ObserverSubject::new();
        observers.register(logging.clone());
        let bar = (text && !pace.is_zero()).then(|| Arc::new(ReplayProgressBar::new()));
        if let Some(bar) = &bar {
            observers.register(bar.clone());
        }
        let replayed = replay_iteration(
            &plan,
            step.report.iteration,
            pacer.as_ref(),
            &observers,
            &cancel,
        );
        if let Some(bar) = &bar {
            bar.clear();
        }
        if let Err(err) = replayed {
            warn!(iteration = step.report.iteration, "Run interrupted during replay");
            if text {
                print_warning(&format!(
                    "Replay of iteration {} interrupted",
                    step.report.iteration
                ));
            }
            return Err(err.into());
        }

        presenter.present_iteration(&step.report, step.performance.as_ref(), sim.store());
        iterations += 1;
    }

    let metrics = sim.metrics_snapshot();
    presenter.present_metrics(&metrics);
    if text {
        let n = sim.store().vertex_count();
        if sim.is_complete() {
            print_success(&format!("All {n} pivots processed"));
        } else {
            print_warning(&format!("Stopped after {iterations} of {n} iterations"));
        }
    }
    if config.quiet && !config.json {
        print!("{}", format_matrix(sim.store()));
    }

    let report = RunReport {
        seed: match source {
            GraphSource::File => None,
            GraphSource::Random(seed) => Some(seed),
        },
        options: *sim.options(),
        iterations,
        complete: sim.is_complete(),
        original: sim.store().original_matrix().clone(),
        distances: sim.store().working_matrix().clone(),
        metrics,
    };
    emit_report(config, &report)
}

/// Load the input graph into `sim`, from a file or a seeded generator.
fn load_graph(config: &AppConfig, sim: &mut Simulator) -> Result<GraphSource> {
    if let Some(path) = &config.matrix {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading matrix file {}", path.display()))?;
        let matrix = parse_matrix(&text)
            .with_context(|| format!("loading matrix file {}", path.display()))?;
        sim.initialize(&matrix)?;
        info!(path = %path.display(), vertices = matrix.len(), "Loaded matrix");
        return Ok(GraphSource::File);
    }

    let seed = config.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    sim.initialize_random(&config.random_graph(), &mut rng)?;
    info!(seed, vertices = config.vertices, "Generated random graph");
    Ok(GraphSource::Random(seed))
}

/// Parse a JSON matrix: an array of rows, `null` for missing edges.
///
/// Only `null` means "no edge"; a number equal to the infinity sentinel is
/// rejected rather than read as a missing edge.
pub fn parse_matrix(text: &str) -> Result<DistanceMatrix, SimError> {
    let rows: Vec<Vec<Option<u32>>> =
        serde_json::from_str(text).map_err(|e| SimError::InvalidInput(e.to_string()))?;
    for (i, row) in rows.iter().enumerate() {
        for (j, cell) in row.iter().enumerate() {
            if let Some(value) = *cell {
                if Distance::new(value).is_infinite() {
                    return Err(SimError::InvalidInput(format!(
                        "distance {value} at [{i}][{j}] is too large, use null for a missing edge"
                    )));
                }
            }
        }
    }
    DistanceMatrix::from_rows(rows)
}

fn emit_report(config: &AppConfig, report: &RunReport) -> Result<()> {
    if !config.json && config.output.is_none() {
        return Ok(());
    }
    let json = serde_json::to_string_pretty(report).context("serialising run report")?;
    if let Some(path) = &config.output {
        write_to_file(path, &json).with_context(|| format!("writing report to {path}"))?;
    } else {
        println!("{json}");
    }
    Ok(())
}

fn ctrlc_handler(cancel: CancellationToken) {
    if let Err(err) = ctrlc::set_handler(move || cancel.cancel()) {
        warn!(%err, "Could not install Ctrl+C handler");
    }
}
