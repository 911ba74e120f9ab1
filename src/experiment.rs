//! Timing harness: generates the datasets, runs an algorithm repeatedly over fresh copies and
//! reports the average wall clock time per run.

use std::error::Error;
use std::fmt;
use std::hint::black_box;
use std::io::{self, Write};
use std::str::FromStr;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use rand::{thread_rng, Rng};

use crate::patterns;
use crate::{Algorithm, SortError};

pub const DEFAULT_SIZES: [usize; 7] = [1_000, 5_000, 10_000, 50_000, 100_000, 500_000, 1_000_000];
pub const DEFAULT_ITERATIONS: usize = 10;
pub const DEFAULT_QUADRATIC_MAX: usize = 100_000;

// --- Datasets ---

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Dataset {
    Ascending,
    Descending,
    Random,
    PartiallySorted,
}

impl Dataset {
    pub const ALL: [Dataset; 4] = [
        Dataset::Ascending,
        Dataset::Descending,
        Dataset::Random,
        Dataset::PartiallySorted,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Dataset::Ascending => "Sorted array (ascending)",
            Dataset::Descending => "Sorted array (descending)",
            Dataset::Random => "Random array",
            Dataset::PartiallySorted => "Partially sorted array",
        }
    }

    pub fn generate<R: Rng>(self, size: usize, rng: &mut R) -> Vec<i32> {
        match self {
            Dataset::Ascending => patterns::ascending(size),
            Dataset::Descending => patterns::descending(size),
            Dataset::Random => patterns::random(size, rng),
            Dataset::PartiallySorted => patterns::partially_sorted(size, rng),
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// --- Reports ---

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExperimentReport {
    pub algorithm: Algorithm,
    pub dataset: Dataset,
    pub size: usize,
    pub iterations: usize,
    /// Sum over all runs, copying the input is not included.
    pub total: Duration,
}

impl ExperimentReport {
    /// Mean time per run, zero for a report without runs.
    pub fn average(&self) -> Duration {
        if self.iterations == 0 {
            return Duration::ZERO;
        }

        Duration::from_secs_f64(self.total.as_secs_f64() / self.iterations as f64)
    }
}

impl fmt::Display for ExperimentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Dataset: {}, Size: {}, Average execution time ({} runs): {:.6} seconds",
            self.dataset.label(),
            self.size,
            self.iterations,
            self.average().as_secs_f64()
        )
    }
}

// --- Errors ---

#[derive(Debug)]
pub enum ExperimentError {
    Sort(SortError),
    /// The algorithm returned without sorting its input.
    Unsorted {
        algorithm: Algorithm,
        dataset: Dataset,
        size: usize,
    },
    NoIterations,
    Io(io::Error),
}

impl fmt::Display for ExperimentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperimentError::Sort(err) => write!(f, "sort failed: {err}"),
            ExperimentError::Unsorted {
                algorithm,
                dataset,
                size,
            } => write!(
                f,
                "{algorithm} left the dataset '{dataset}' of size {size} unsorted"
            ),
            ExperimentError::NoIterations => f.write_str("an experiment needs at least one run"),
            ExperimentError::Io(err) => write!(f, "failed to write report: {err}"),
        }
    }
}

impl Error for ExperimentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ExperimentError::Sort(err) => Some(err),
            ExperimentError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SortError> for ExperimentError {
    fn from(err: SortError) -> Self {
        ExperimentError::Sort(err)
    }
}

impl From<io::Error> for ExperimentError {
    fn from(err: io::Error) -> Self {
        ExperimentError::Io(err)
    }
}

// --- Running ---

/// Sorts a fresh copy of `data` `iterations` times and records the time spent sorting.
pub fn run_experiment(
    algorithm: Algorithm,
    dataset: Dataset,
    data: &[i32],
    iterations: usize,
) -> Result<ExperimentReport, ExperimentError> {
    if iterations == 0 {
        return Err(ExperimentError::NoIterations);
    }

    let mut total = Duration::ZERO;
    for _ in 0..iterations {
        let mut copy = data.to_vec();

        let start = Instant::now();
        algorithm.sort(black_box(copy.as_mut_slice()))?;
        total += start.elapsed();

        if !copy.windows(2).all(|w| w[0] <= w[1]) {
            return Err(ExperimentError::Unsorted {
                algorithm,
                dataset,
                size: data.len(),
            });
        }
    }

    Ok(ExperimentReport {
        algorithm,
        dataset,
        size: data.len(),
        iterations,
        total,
    })
}

/// Runs every configured algorithm over every dataset and size, writing the banner and report
/// lines to `out`.
pub fn run<W: Write>(
    config: &ExperimentConfig,
    out: &mut W,
) -> Result<Vec<ExperimentReport>, ExperimentError> {
    info!(
        "running {} algorithm(s) over sizes {:?}, {} runs each, seed {}",
        config.algorithms.len(),
        config.sizes,
        config.iterations,
        config.seed
    );

    let mut rng = patterns::rng_from_seed(config.seed);
    let mut reports = Vec::new();

    for &size in &config.sizes {
        writeln!(out, "\n----- Testing with input size: {size} -----")?;

        // Every algorithm sees the same data for a given size.
        let datasets: Vec<(Dataset, Vec<i32>)> = Dataset::ALL
            .into_iter()
            .map(|dataset| (dataset, dataset.generate(size, &mut rng)))
            .collect();

        for &algorithm in &config.algorithms {
            if algorithm.has_quadratic_worst_case() && size > config.quadratic_max {
                warn!(
                    "skipping {algorithm} for size {size}, above the quadratic limit of {}",
                    config.quadratic_max
                );
                continue;
            }

            writeln!(out, "Algorithm: {}", algorithm.registry_name())?;
            for (dataset, data) in &datasets {
                let report = run_experiment(algorithm, *dataset, data, config.iterations)?;
                debug!("{algorithm}: {report}");
                writeln!(out, "{report}")?;
                reports.push(report);
            }
        }
    }

    Ok(reports)
}

// --- Configuration ---

/// Harness settings, read from the environment:
///
/// - `SORT_SIZES`: comma separated input sizes.
/// - `SORT_ITERATIONS`: runs per dataset, at least one.
/// - `OVERRIDE_SEED`: seed for the generated data, random if unset.
/// - `SORT_ALGORITHMS`: comma separated algorithm names, all if unset.
/// - `SORT_QUADRATIC_MAX`: largest size quadratic algorithms are run on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExperimentConfig {
    pub sizes: Vec<usize>,
    pub iterations: usize,
    pub seed: u64,
    pub algorithms: Vec<Algorithm>,
    pub quadratic_max: usize,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_SIZES.to_vec(),
            iterations: DEFAULT_ITERATIONS,
            seed: thread_rng().gen(),
            algorithms: Algorithm::ALL.to_vec(),
            quadratic_max: DEFAULT_QUADRATIC_MAX,
        }
    }
}

impl ExperimentConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the config from `lookup`, which maps a variable name to its value if set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup("SORT_SIZES") {
            config.sizes = parse_list("SORT_SIZES", &value)?;
        }

        if let Some(value) = lookup("SORT_ITERATIONS") {
            config.iterations = parse_value("SORT_ITERATIONS", &value)?;
            if config.iterations == 0 {
                return Err(ConfigError::new(
                    "SORT_ITERATIONS",
                    &value,
                    "must be at least 1",
                ));
            }
        }

        if let Some(value) = lookup("OVERRIDE_SEED") {
            config.seed = parse_value("OVERRIDE_SEED", &value)?;
        }

        if let Some(value) = lookup("SORT_ALGORITHMS") {
            config.algorithms = parse_list("SORT_ALGORITHMS", &value)?;
        }

        if let Some(value) = lookup("SORT_QUADRATIC_MAX") {
            config.quadratic_max = parse_value("SORT_QUADRATIC_MAX", &value)?;
        }

        Ok(config)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

impl ConfigError {
    fn new(var: &'static str, value: &str, reason: impl Into<String>) -> Self {
        Self {
            var,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}='{}': {}", self.var, self.value, self.reason)
    }
}

impl Error for ConfigError {}

fn parse_value<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|err: T::Err| ConfigError::new(var, value, err.to_string()))
}

fn parse_list<T>(var: &'static str, value: &str) -> Result<Vec<T>, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value.split(',').map(|item| parse_value(var, item)).collect()
}
