//! Weighted command implementation
//!
//! Writes category indices in `[0, len(weights) - 1]` drawn in proportion to
//! the weights. Weights need not sum to one.

use sampler_engine::WeightedSampler;
use tracing::info;

use crate::config::SamplerConfig;
use crate::workers::{write_samples, WorkerReport};
use crate::Result;

/// Run the weighted command
pub fn run(config: &SamplerConfig, weights: Vec<f64>) -> Result<Vec<WorkerReport>> {
    info!(categories = weights.len(), "Sampling weighted categories");
    // Built once and validated before any worker starts.
    let sampler = WeightedSampler::new(weights)?;
    write_samples(config, |engine| Ok(sampler.sample(engine)))
}
