//! Times every algorithm on the four classic datasets.
//!
//! Algorithms can be picked on the command line, e.g. `run_experiments tim introsort`, otherwise
//! `SORT_ALGORITHMS` or all of them are used. See `ExperimentConfig` for the other variables.

use std::env;
use std::error::Error;
use std::io::{self, Write};

use log::info;

use sort_classics::experiment::{self, ExperimentConfig};
use sort_classics::Algorithm;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = ExperimentConfig::from_env()?;

    let args = env::args().skip(1).collect::<Vec<_>>();
    if !args.is_empty() {
        config.algorithms = args
            .iter()
            .map(|arg| arg.parse::<Algorithm>())
            .collect::<Result<_, _>>()?;
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let reports = experiment::run(&config, &mut out)?;
    out.flush()?;

    info!("finished {} experiment(s)", reports.len());

    Ok(())
}
