//! Custom discrete distributions over arbitrary values.

#[cfg(feature = "serde")]
use serde::Serialize;

use super::cumulative::CumulativeDistribution;
use crate::error::{validate_weights, SamplerError, SamplerResult};

/// Paired (probability, value) entries describing a discrete distribution.
///
/// Probabilities need not sum to one; value `i` is drawn with probability
/// `probs[i] / sum(probs)`. The cumulative table is derived once at load
/// time and the pairs cannot be changed afterwards, so the table always
/// matches the probabilities.
///
/// # Examples
///
/// ```rust
/// use sampler_engine::{CustomProb, SampleEngine};
///
/// let probs = vec![0.1, 0.2, 0.3, 0.2, 0.1, 0.1];
/// let vals = vec![1.5, 2.5, 3.0, 3.5, 4.5, 5.5];
/// let custom = CustomProb::load(probs, vals.clone()).unwrap();
///
/// let mut engine = SampleEngine::from_seed(42);
/// let value = engine.sample_custom(&custom).unwrap();
/// assert!(vals.contains(value));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct CustomProb<V> {
    probabilities: Vec<f64>,
    values: Vec<V>,
    #[cfg_attr(feature = "serde", serde(skip))]
    cumulative: CumulativeDistribution,
}

impl<V> CustomProb<V> {
    /// Loads paired probabilities and values.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the lengths differ, the sequences are empty, a
    /// probability is negative or non-finite, or all probabilities are zero.
    pub fn load(probabilities: Vec<f64>, values: Vec<V>) -> SamplerResult<Self> {
        if probabilities.len() != values.len() {
            return Err(SamplerError::invalid_argument(format!(
                "{} probabilities supplied for {} values",
                probabilities.len(),
                values.len()
            )));
        }
        validate_weights(&probabilities, "probabilities")?;
        let cumulative = CumulativeDistribution::from_weights(&probabilities)?;
        Ok(Self {
            probabilities,
            values,
            cumulative,
        })
    }

    /// Probability column, as supplied.
    #[inline]
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Value column, as supplied.
    #[inline]
    pub fn values(&self) -> &[V] {
        &self.values
    }

    /// Cumulative table derived from the probability column.
    #[inline]
    pub fn cumulative(&self) -> &CumulativeDistribution {
        &self.cumulative
    }

    /// Number of (probability, value) pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; loading rejects empty input.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over (probability, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, &V)> {
        self.probabilities.iter().copied().zip(self.values.iter())
    }

    /// Splits back into the probability and value columns.
    pub fn into_parts(self) -> (Vec<f64>, Vec<V>) {
        (self.probabilities, self.values)
    }
}
