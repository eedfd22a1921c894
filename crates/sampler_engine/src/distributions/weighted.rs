//! Reusable weighted categorical sampler.
//!
//! [`SampleEngine::weighted_index`](crate::SampleEngine::weighted_index)
//! rebuilds its categorical structure on every call. When the same weights
//! are sampled many times, [`WeightedSampler`] builds the structure once and
//! keeps it in step with its weights: every mutation rebuilds it.

use rand::distributions::{Distribution, WeightedIndex};

use crate::engine::SampleEngine;
use crate::error::{validate_weights, SamplerError, SamplerResult};

/// Builds a categorical structure from validated weights.
pub(crate) fn build_index(weights: &[f64]) -> SamplerResult<WeightedIndex<f64>> {
    validate_weights(weights, "weights")?;
    WeightedIndex::new(weights.iter()).map_err(|e| SamplerError::invalid_argument(e.to_string()))
}

/// Weighted categorical sampler over a fixed weight vector.
///
/// Index `i` is drawn with probability `weights[i] / sum(weights)`.
///
/// # Examples
///
/// ```rust
/// use sampler_engine::{SampleEngine, WeightedSampler};
///
/// let mut engine = SampleEngine::from_seed(7);
/// let mut sampler = WeightedSampler::new(vec![1.0, 0.0, 0.0]).unwrap();
/// assert_eq!(sampler.sample(&mut engine), 0);
///
/// sampler.set_weights(vec![0.0, 0.0, 1.0]).unwrap();
/// assert_eq!(sampler.sample(&mut engine), 2);
/// ```
#[derive(Debug, Clone)]
pub struct WeightedSampler {
    weights: Vec<f64>,
    index: WeightedIndex<f64>,
}

impl WeightedSampler {
    /// Creates a sampler for `weights`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `weights` is empty, contains a negative or
    /// non-finite entry, or is all zero.
    pub fn new(weights: Vec<f64>) -> SamplerResult<Self> {
        let index = build_index(&weights)?;
        Ok(Self { weights, index })
    }

    /// Draws one category index.
    #[inline]
    pub fn sample(&self, engine: &mut SampleEngine) -> usize {
        self.index.sample(engine.rng())
    }

    /// The weights the sampler currently draws from.
    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Number of categories.
    #[inline]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Always `false`; construction rejects empty weights.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Replaces the weights and rebuilds the categorical structure.
    ///
    /// On error the sampler keeps its previous weights.
    pub fn set_weights(&mut self, weights: Vec<f64>) -> SamplerResult<()> {
        self.index = build_index(&weights)?;
        self.weights = weights;
        Ok(())
    }

    /// Changes a single weight and rebuilds the categorical structure.
    ///
    /// On error the sampler keeps its previous weights.
    pub fn update_weight(&mut self, category: usize, weight: f64) -> SamplerResult<()> {
        if category >= self.weights.len() {
            return Err(SamplerError::invalid_argument(format!(
                "category {} out of bounds for {} weights",
                category,
                self.weights.len()
            )));
        }
        let mut weights = self.weights.clone();
        weights[category] = weight;
        self.set_weights(weights)
    }
}
