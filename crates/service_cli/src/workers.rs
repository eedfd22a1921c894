//! Parallel worker execution.
//!
//! Each worker owns one [`SampleEngine`] and one output file. Engines are
//! allocated before the pool starts and moved into their workers; nothing
//! is shared between workers.

use std::fmt::Display;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use sampler_engine::{worker_engines, SampleEngine};
use tracing::{debug, info};

use crate::config::SamplerConfig;
use crate::{CliError, Result};

/// Header line written at the top of every worker file.
pub const FILE_HEADER: &str = "#random_numbers";

/// Summary of one worker's run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerReport {
    /// Worker index
    pub worker: usize,
    /// Seed applied to the worker's engine, if any
    pub seed: Option<u32>,
    /// Number of values written
    pub draws: usize,
    /// Output file
    pub path: PathBuf,
}

/// Output file for a worker.
pub fn worker_file(output_dir: &Path, worker: usize) -> PathBuf {
    output_dir.join(format!("randomz_{}.dat", worker))
}

/// Number of draws assigned to `worker` when `total` draws are split across
/// `workers`. The remainder goes to the lowest-numbered workers.
pub fn draws_for_worker(total: usize, workers: usize, worker: usize) -> usize {
    total / workers + usize::from(worker < total % workers)
}

/// Runs one closure per worker on a pool sized to `workers`.
fn run_pool<T, F>(workers: usize, seed: Option<u32>, job: F) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(usize, SampleEngine) -> Result<T> + Sync,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| CliError::ThreadPool(e.to_string()))?;

    let engines = worker_engines(workers, seed);
    pool.install(|| {
        engines
            .into_par_iter()
            .enumerate()
            .map(|(worker, engine)| job(worker, engine))
            .collect()
    })
}

/// Samples `config.draws` values across `config.workers` workers, writing
/// one value per line to each worker's file.
pub fn write_samples<T, F>(config: &SamplerConfig, sample: F) -> Result<Vec<WorkerReport>>
where
    T: Display,
    F: Fn(&mut SampleEngine) -> Result<T> + Sync,
{
    std::fs::create_dir_all(&config.output_dir)?;

    let reports = run_pool(config.workers, config.seed, |worker, mut engine| {
        let draws = draws_for_worker(config.draws, config.workers, worker);
        let path = worker_file(&config.output_dir, worker);
        let mut out = BufWriter::new(File::create(&path)?);
        writeln!(out, "{}", FILE_HEADER)?;
        for _ in 0..draws {
            writeln!(out, "{}", sample(&mut engine)?)?;
        }
        out.flush()?;

        debug!(worker, draws, path = %path.display(), "worker finished");
        Ok(WorkerReport {
            worker,
            seed: engine.seed(),
            draws,
            path,
        })
    })?;

    info!(
        workers = reports.len(),
        draws = config.draws,
        output_dir = %config.output_dir.display(),
        "sampling complete"
    );
    Ok(reports)
}

/// Runs `trials` across the configured workers and returns how many
/// satisfied `trial`.
pub fn count_hits<F>(config: &SamplerConfig, trials: usize, trial: F) -> Result<usize>
where
    F: Fn(&mut SampleEngine) -> bool + Sync,
{
    let counts = run_pool(config.workers, config.seed, |worker, mut engine| {
        let share = draws_for_worker(trials, config.workers, worker);
        Ok((0..share).filter(|_| trial(&mut engine)).count())
    })?;
    Ok(counts.into_iter().sum())
}
