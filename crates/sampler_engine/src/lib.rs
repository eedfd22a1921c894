//! # Sampler Engine
//!
//! A seeded pseudo-random sampling facade. One [`SampleEngine`] owns one
//! generator and exposes:
//!
//! - uniform integers over an inclusive range and uniform reals in [0, 1)
//! - Gaussian variates parameterised by mean and variance
//! - Bernoulli trials
//! - weighted categorical indices
//! - inverse-CDF sampling over a cumulative table, optionally restricted to
//!   a sub-range of the table
//! - sampling from custom (probability, value) pairs
//!
//! ## Concurrency Model
//!
//! Engines are never shared. Every sampling method takes `&mut self`, so a
//! parallel caller allocates one engine per worker (see [`worker_engines`])
//! and moves each engine into its worker. There is no internal locking.
//!
//! ## Usage Example
//!
//! ```rust
//! use sampler_engine::{CustomProb, SampleEngine};
//!
//! let mut engine = SampleEngine::from_seed(232323);
//!
//! let die = engine.uniform_int(1u32, 6).unwrap();
//! assert!((1..=6).contains(&die));
//!
//! let category = engine.weighted_index(&[0.1, 0.5, 0.5, 0.1]).unwrap();
//! assert!(category < 4);
//!
//! let custom = CustomProb::load(vec![0.25, 0.75], vec!["tails", "heads"]).unwrap();
//! let side = engine.sample_custom(&custom).unwrap();
//! assert!(*side == "tails" || *side == "heads");
//! ```
//!
//! ## British English Convention
//!
//! Documentation follows the workspace convention of British English
//! spelling ("initialise", "behaviour", "normalise").

pub mod distributions;
pub mod engine;
pub mod error;

pub use distributions::{CumulativeDistribution, CustomProb, SearchStrategy, WeightedSampler};
pub use engine::{worker_engines, worker_seed, SampleEngine};
pub use error::{SamplerError, SamplerResult};

/// Library version, reported by the CLI.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
