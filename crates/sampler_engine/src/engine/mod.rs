//! Seeded sampling engine.
//!
//! This module provides [`SampleEngine`], the single owner of a pseudo-random
//! generator, together with [`worker_engines`] for allocating one engine per
//! parallel worker.

use std::fmt;

use num_traits::PrimInt;
use rand::distributions::uniform::SampleUniform;
use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Normal, StandardNormal};
use tracing::trace;

use crate::distributions::cumulative::{self, SearchStrategy};
use crate::distributions::custom::CustomProb;
use crate::distributions::weighted;
use crate::error::{SamplerError, SamplerResult};

/// Pseudo-random sampling engine.
///
/// Owns exactly one generator. Every sampling call advances the generator
/// and has no other observable effect. Engines are `Send` so they can be
/// moved into worker threads, but all methods take `&mut self`: an engine is
/// used by one caller at a time and is never shared between workers.
///
/// # Examples
///
/// ```rust
/// use sampler_engine::SampleEngine;
///
/// let mut a = SampleEngine::from_seed(12345);
/// let mut b = SampleEngine::new();
/// b.reseed(12345);
///
/// // Same seed produces identical sequences
/// assert_eq!(a.uniform_real(), b.uniform_real());
/// assert_eq!(a.uniform_int(0u32, 99).unwrap(), b.uniform_int(0u32, 99).unwrap());
/// ```
pub struct SampleEngine {
    /// The underlying PRNG instance.
    inner: StdRng,
    /// The seed last applied, or `None` when initialised from entropy.
    seed: Option<u32>,
}

impl SampleEngine {
    /// Creates an engine initialised from the operating system's entropy
    /// source.
    ///
    /// Output is not reproducible until [`reseed`](Self::reseed) is called.
    pub fn new() -> Self {
        trace!("initialising sample engine from entropy");
        Self {
            inner: StdRng::from_entropy(),
            seed: None,
        }
    }

    /// Creates an engine whose output is a pure function of `seed`.
    #[inline]
    pub fn from_seed(seed: u32) -> Self {
        Self {
            inner: StdRng::seed_from_u64(u64::from(seed)),
            seed: Some(seed),
        }
    }

    /// Resets the generator to the deterministic sequence for `seed`.
    ///
    /// Any output drawn before the call is irrelevant to what follows.
    pub fn reseed(&mut self, seed: u32) {
        trace!(seed, "reseeding sample engine");
        self.inner = StdRng::seed_from_u64(u64::from(seed));
        self.seed = Some(seed);
    }

    /// Returns the seed last applied, or `None` for an entropy-initialised
    /// engine.
    #[inline]
    pub fn seed(&self) -> Option<u32> {
        self.seed
    }

    /// Mutable access to the generator for distribution helpers.
    #[inline]
    pub(crate) fn rng(&mut self) -> &mut StdRng {
        &mut self.inner
    }

    // ------------------------------------------------------------------
    // Uniform
    // ------------------------------------------------------------------

    /// Returns an integer uniformly distributed over `[from, thru]`.
    ///
    /// Any primitive integer type is accepted, up to the full width of the
    /// type. Floating-point bounds do not compile:
    ///
    /// ```compile_fail
    /// use sampler_engine::SampleEngine;
    ///
    /// let mut engine = SampleEngine::from_seed(42);
    /// let _ = engine.uniform_int(0.0f64, 1.0);
    /// ```
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `from > thru`. The range is never wrapped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sampler_engine::SampleEngine;
    ///
    /// let mut engine = SampleEngine::from_seed(42);
    /// let value = engine.uniform_int(0u32, 99).unwrap();
    /// assert!(value <= 99);
    ///
    /// assert!(engine.uniform_int(10i64, -10).is_err());
    /// ```
    pub fn uniform_int<T>(&mut self, from: T, thru: T) -> SamplerResult<T>
    where
        T: PrimInt + SampleUniform + fmt::Display,
    {
        if from > thru {
            return Err(SamplerError::invalid_argument(format!(
                "uniform range lower bound {} exceeds upper bound {}",
                from, thru
            )));
        }
        Ok(self.inner.gen_range(from..=thru))
    }

    /// Returns a value uniformly distributed over `[0, 1)`.
    #[inline]
    pub fn uniform_real(&mut self) -> f64 {
        self.inner.gen()
    }

    /// Fills the buffer with uniform values in `[0, 1)`.
    ///
    /// Equivalent to calling [`uniform_real`](Self::uniform_real) once per
    /// element. Empty buffers are a no-op.
    #[inline]
    pub fn fill_uniform(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = self.inner.gen();
        }
    }

    // ------------------------------------------------------------------
    // Gaussian
    // ------------------------------------------------------------------

    /// Returns a normal variate with the given mean and **variance**.
    ///
    /// A variance of zero returns `mean`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the mean is not finite or the variance is
    /// negative or not finite.
    pub fn gaussian(&mut self, mean: f64, variance: f64) -> SamplerResult<f64> {
        if !mean.is_finite() {
            return Err(SamplerError::invalid_argument(format!(
                "gaussian mean must be finite, got {}",
                mean
            )));
        }
        if !variance.is_finite() || variance < 0.0 {
            return Err(SamplerError::invalid_argument(format!(
                "gaussian variance must be finite and non-negative, got {}",
                variance
            )));
        }
        let normal = Normal::new(mean, variance.sqrt())
            .map_err(|e| SamplerError::invalid_argument(e.to_string()))?;
        Ok(normal.sample(&mut self.inner))
    }

    /// Returns a standard normal variate (mean 0, variance 1).
    ///
    /// Uses the Ziggurat algorithm via `rand_distr::StandardNormal`.
    #[inline]
    pub fn standard_normal(&mut self) -> f64 {
        StandardNormal.sample(&mut self.inner)
    }

    // ------------------------------------------------------------------
    // Bernoulli
    // ------------------------------------------------------------------

    /// Returns `true` with probability `prob`.
    ///
    /// Draws one [`uniform_real`](Self::uniform_real) value and compares it
    /// against `prob`. No clamping is applied: `prob <= 0` (or NaN) always
    /// yields `false` and `prob >= 1` always yields `true`.
    #[inline]
    pub fn bernoulli(&mut self, prob: f64) -> bool {
        self.uniform_real() < prob
    }

    // ------------------------------------------------------------------
    // Weighted categorical
    // ------------------------------------------------------------------

    /// Returns an index in `[0, weights.len())` drawn with probability
    /// proportional to its weight.
    ///
    /// The categorical structure is rebuilt on every call, so varying the
    /// weights between calls is always safe. Use
    /// [`WeightedSampler`](crate::WeightedSampler) to reuse it.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `weights` is empty, contains a negative or
    /// non-finite entry, or is all zero.
    pub fn weighted_index(&mut self, weights: &[f64]) -> SamplerResult<usize> {
        let index = weighted::build_index(weights)?;
        Ok(index.sample(&mut self.inner))
    }

    // ------------------------------------------------------------------
    // Cumulative tables
    // ------------------------------------------------------------------

    /// Samples an index over the full range of a cumulative table.
    ///
    /// A one-element table is degenerate: its stored value is returned as
    /// the index, without consuming generator output.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sampler_engine::SampleEngine;
    ///
    /// let mut engine = SampleEngine::from_seed(1);
    /// assert_eq!(engine.sample_from_cumulative(&[5.0]).unwrap(), 5);
    ///
    /// let index = engine.sample_from_cumulative(&[1.0, 3.0, 6.0, 10.0]).unwrap();
    /// assert!(index <= 3);
    /// ```
    pub fn sample_from_cumulative(&mut self, dist: &[f64]) -> SamplerResult<usize> {
        if dist.is_empty() {
            return Err(SamplerError::invalid_argument(
                "cumulative distribution must not be empty",
            ));
        }
        self.sample_from_cumulative_range(dist, 0, dist.len() - 1)
    }

    /// Samples an index in `[min, max]` from a cumulative table indexed over
    /// the whole original sequence, using the linear scan.
    ///
    /// When `min == max` the stored value `dist[min]` is returned as the
    /// index, without consuming generator output.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` for an empty table, `min > max`, `max` out of
    ///   bounds, or a degenerate stored value that is not a valid index
    /// - `DistributionOverflow` if the table is not non-decreasing over the
    ///   range and the draw falls beyond `dist[max]`
    pub fn sample_from_cumulative_range(
        &mut self,
        dist: &[f64],
        min: usize,
        max: usize,
    ) -> SamplerResult<usize> {
        self.sample_from_cumulative_with(dist, min, max, SearchStrategy::Linear)
    }

    /// As [`sample_from_cumulative_range`](Self::sample_from_cumulative_range),
    /// with an explicit search strategy.
    pub fn sample_from_cumulative_with(
        &mut self,
        dist: &[f64],
        min: usize,
        max: usize,
        strategy: SearchStrategy,
    ) -> SamplerResult<usize> {
        cumulative::check_range(dist, min, max)?;
        if min == max {
            return cumulative::stored_index(dist[min]);
        }
        self.draw_cumulative(dist, min, max, strategy)
    }

    /// Draws `r` in `[lower, dist[max])` and locates it in the table.
    fn draw_cumulative(
        &mut self,
        dist: &[f64],
        min: usize,
        max: usize,
        strategy: SearchStrategy,
    ) -> SamplerResult<usize> {
        let lower = cumulative::lower_bound(dist, min);
        let drawn = lower + (dist[max] - lower) * self.uniform_real();
        cumulative::locate(dist, drawn, min, max, strategy)
    }

    // ------------------------------------------------------------------
    // Custom (probability, value) pairs
    // ------------------------------------------------------------------

    /// Returns one value from `custom`, drawn with probability proportional
    /// to its paired probability.
    ///
    /// Every call draws from the generator, including for single-entry
    /// distributions.
    pub fn sample_custom<'a, V>(&mut self, custom: &'a CustomProb<V>) -> SamplerResult<&'a V> {
        let table = custom.cumulative().as_slice();
        let index = self.draw_cumulative(table, 0, table.len() - 1, SearchStrategy::Linear)?;
        Ok(&custom.values()[index])
    }
}

impl Default for SampleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SampleEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SampleEngine")
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}

/// Multiplier for spreading worker indices across the seed space.
const WORKER_SEED_STRIDE: u32 = 0x9E37_79B9;

/// Derives the seed for `worker` from a base seed.
///
/// Distinct workers always receive distinct seeds for the same base.
#[inline]
pub fn worker_seed(base: u32, worker: usize) -> u32 {
    base ^ (worker as u32).wrapping_mul(WORKER_SEED_STRIDE)
}

/// Allocates one engine per worker.
///
/// With a base seed, worker `j` is seeded with [`worker_seed`]`(base, j)`
/// and the whole set is reproducible. Without one, every engine is
/// initialised from entropy.
///
/// # Examples
///
/// ```rust
/// use sampler_engine::worker_engines;
///
/// let engines = worker_engines(3, Some(232323));
/// assert_eq!(engines.len(), 3);
/// assert_eq!(engines[0].seed(), Some(232323));
/// ```
pub fn worker_engines(count: usize, base_seed: Option<u32>) -> Vec<SampleEngine> {
    (0..count)
        .map(|worker| match base_seed {
            Some(base) => SampleEngine::from_seed(worker_seed(base, worker)),
            None => SampleEngine::new(),
        })
        .collect()
}
