//! Distribution helpers used by [`SampleEngine`](crate::SampleEngine).
//!
//! ## Module Structure
//!
//! - [`cumulative`]: cumulative tables and the inverse-CDF search
//! - [`weighted`]: reusable weighted categorical sampler
//! - [`custom`]: (probability, value) pairs over arbitrary values

pub mod cumulative;
pub mod custom;
pub mod weighted;

pub use cumulative::{CumulativeDistribution, SearchStrategy};
pub use custom::CustomProb;
pub use weighted::WeightedSampler;
