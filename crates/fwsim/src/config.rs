//! Application configuration from CLI flags and environment.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use fwsim_core::constants::{
    DEFAULT_EDGE_PROBABILITY, DEFAULT_MAX_WEIGHT, DEFAULT_MIN_WEIGHT, DEFAULT_RANDOM_VERTICES,
};
use fwsim_core::{RandomGraph, SchedulerOptions, SimError, DEFAULT_UNIT_COST, DEFAULT_WORKER_COUNT};

/// fwsim: step through Floyd-Warshall and model its parallel speedup.
#[derive(Parser, Debug)]
#[command(name = "fwsim", version, about)]
#[allow(clippy::struct_excessive_bools)]
pub struct AppConfig {
    /// Number of vertices of the random graph.
    #[arg(short = 'n', long, default_value_t = DEFAULT_RANDOM_VERTICES, env = "FWSIM_VERTICES")]
    pub vertices: usize,

    /// Seed for the random graph (random if omitted).
    #[arg(long, env = "FWSIM_SEED")]
    pub seed: Option<u64>,

    /// Probability that a directed edge exists.
    #[arg(long, default_value_t = DEFAULT_EDGE_PROBABILITY, env = "FWSIM_EDGE_PROBABILITY")]
    pub edge_probability: f64,

    /// Smallest random edge weight.
    #[arg(long, default_value_t = DEFAULT_MIN_WEIGHT, env = "FWSIM_MIN_WEIGHT")]
    pub min_weight: u32,

    /// Largest random edge weight.
    #[arg(long, default_value_t = DEFAULT_MAX_WEIGHT, env = "FWSIM_MAX_WEIGHT")]
    pub max_weight: u32,

    /// JSON file holding the distance matrix (rows of numbers, null for no edge).
    #[arg(short, long, env = "FWSIM_MATRIX", conflicts_with = "seed")]
    pub matrix: Option<PathBuf>,

    /// Number of simulated workers.
    #[arg(short, long, default_value_t = DEFAULT_WORKER_COUNT, env = "FWSIM_WORKERS")]
    pub workers: usize,

    /// Cost charged for one relaxation check.
    #[arg(long, default_value_t = DEFAULT_UNIT_COST, env = "FWSIM_UNIT_COST")]
    pub unit_cost: u64,

    /// Replay every iteration as one sequential batch.
    #[arg(long, env = "FWSIM_SEQUENTIAL")]
    pub sequential: bool,

    /// Wall-clock duration of one replayed batch (e.g. "500ms", "1s"; 0 disables pacing).
    #[arg(long, default_value = "0", env = "FWSIM_PACE")]
    pub pace: String,

    /// Stop after this many iterations.
    #[arg(long)]
    pub max_steps: Option<usize>,

    /// Print a JSON run report instead of text.
    #[arg(long)]
    pub json: bool,

    /// Write the JSON run report to this file.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Verbose output (list every relaxation).
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Quiet mode (only print the final distances).
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Scheduler options selected by the flags.
    #[must_use]
    pub fn scheduler_options(&self) -> SchedulerOptions {
        SchedulerOptions {
            worker_count: self.workers,
            parallel_enabled: !self.sequential,
            unit_cost: self.unit_cost,
        }
    }

    /// Random graph parameters selected by the flags.
    #[must_use]
    pub fn random_graph(&self) -> RandomGraph {
        RandomGraph {
            vertices: self.vertices,
            edge_probability: self.edge_probability,
            weights: self.min_weight..=self.max_weight,
        }
    }

    /// Parse the pace string into a duration.
    pub fn pace_duration(&self) -> Result<Duration, SimError> {
        parse_duration(&self.pace)
            .ok_or_else(|| SimError::Config(format!("invalid pace {:?}", self.pace)))
    }
}

/// Parse a duration string like "500ms", "2s", "1m".
fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if let Some(ms) = s.strip_suffix("ms") {
        let n: u64 = ms.parse().ok()?;
        Some(Duration::from_millis(n))
    } else if let Some(mins) = s.strip_suffix('m') {
        let n: u64 = mins.parse().ok()?;
        Some(Duration::from_secs(n.checked_mul(60)?))
    } else if let Some(secs) = s.strip_suffix('s') {
        let n: u64 = secs.parse().ok()?;
        Some(Duration::from_secs(n))
    } else {
        let n: u64 = s.parse().ok()?;
        Some(Duration::from_millis(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_duration_formats() {
        assert_eq!(parse_duration("500ms"), Some(Duration::from_millis(500)));
        assert_eq!(parse_duration("2s"), Some(Duration::from_secs(2)));
        assert_eq!(parse_duration("1m"), Some(Duration::from_secs(60)));
        assert_eq!(parse_duration("250"), Some(Duration::from_millis(250)));
        assert_eq!(parse_duration("0"), Some(Duration::ZERO));
        assert_eq!(parse_duration("fast"), None);
    }

    #[test]
    fn parse_duration_overflowing_minutes() {
        assert_eq!(parse_duration("999999999999999999m"), None);
        let config =
            AppConfig::try_parse_from(["fwsim", "--pace", "999999999999999999m"]).unwrap();
        assert!(matches!(config.pace_duration(), Err(SimError::Config(_))));
    }

    #[test]
    fn defaults() {
        let config = AppConfig::try_parse_from(["fwsim"]).unwrap();
        assert_eq!(config.vertices, 5);
        assert_eq!(config.scheduler_options(), SchedulerOptions::default());
        assert_eq!(config.random_graph(), RandomGraph::default());
        assert_eq!(config.pace_duration().unwrap(), Duration::ZERO);
    }

    #[test]
    fn sequential_flag() {
        let config =
            AppConfig::try_parse_from(["fwsim", "--sequential", "-w", "2", "--unit-cost", "5"])
                .unwrap();
        let opts = config.scheduler_options();
        assert!(!opts.parallel_enabled);
        assert_eq!(opts.worker_count, 2);
        assert_eq!(opts.unit_cost, 5);
    }

    #[test]
    fn invalid_pace_is_config_error() {
        let config = AppConfig::try_parse_from(["fwsim", "--pace", "soon"]).unwrap();
        assert!(matches!(config.pace_duration(), Err(SimError::Config(_))));
    }

    #[test]
    fn matrix_conflicts_with_seed() {
        assert!(AppConfig::try_parse_from(["fwsim", "--matrix", "m.json", "--seed", "1"]).is_err());
    }
}
