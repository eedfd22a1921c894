//! Custom command implementation
//!
//! Writes values drawn from user-supplied (probability, value) pairs.

use sampler_engine::CustomProb;
use tracing::info;

use crate::config::SamplerConfig;
use crate::workers::{write_samples, WorkerReport};
use crate::Result;

/// Run the custom command
pub fn run(config: &SamplerConfig, probs: Vec<f64>, values: Vec<f64>) -> Result<Vec<WorkerReport>> {
    let custom = CustomProb::load(probs, values)?;
    info!(pairs = custom.len(), "Sampling custom distribution");
    write_samples(config, |engine| Ok(*engine.sample_custom(&custom)?))
}
