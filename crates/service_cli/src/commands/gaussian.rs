//! Gaussian command implementation

use tracing::info;

use crate::config::SamplerConfig;
use crate::workers::{write_samples, WorkerReport};
use crate::Result;

/// Run the gaussian command
pub fn run(config: &SamplerConfig, mean: f64, variance: f64) -> Result<Vec<WorkerReport>> {
    info!(mean, variance, "Sampling Gaussian variates");
    write_samples(config, |engine| Ok(engine.gaussian(mean, variance)?))
}
