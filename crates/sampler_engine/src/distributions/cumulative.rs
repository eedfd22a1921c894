//! Cumulative distribution tables and the inverse-CDF search.
//!
//! A cumulative table stores, at index `i`, the total weight of outcomes
//! `0..=i`. Sampling over a sub-range `[min, max]` draws a uniform value in
//! `[table[min - 1], table[max])` (with a lower bound of zero when
//! `min == 0`) and returns the first index at or after `min` whose entry is
//! not below the draw. The table never needs rebuilding to sample a
//! different sub-range.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{validate_weights, SamplerError, SamplerResult};

/// Strategy used to locate a draw inside a cumulative table.
///
/// Both strategies return the same index for the same draw when the table
/// is monotonically non-decreasing over the searched range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchStrategy {
    /// Forward scan from `min`. O(k) in the range width; fastest for the
    /// handful of categories typical callers use.
    #[default]
    Linear,
    /// Binary search over `[min, max]`. O(log k); use for large tables.
    Bisection,
}

/// An owned, non-empty cumulative weight table.
///
/// # Examples
///
/// ```rust
/// use sampler_engine::CumulativeDistribution;
///
/// let dist = CumulativeDistribution::from_weights(&[1.0, 2.0, 3.0, 4.0]).unwrap();
/// assert_eq!(dist.as_slice(), &[1.0, 3.0, 6.0, 10.0]);
/// assert_eq!(dist.total(), 10.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<f64>", into = "Vec<f64>"))]
pub struct CumulativeDistribution {
    table: Vec<f64>,
}

impl CumulativeDistribution {
    /// Wraps a precomputed cumulative table.
    ///
    /// The table must be non-empty with finite, non-negative entries.
    /// Monotonicity is not enforced here; see [`is_monotone`](Self::is_monotone).
    pub fn new(table: Vec<f64>) -> SamplerResult<Self> {
        if table.is_empty() {
            return Err(SamplerError::invalid_argument(
                "cumulative distribution must not be empty",
            ));
        }
        if let Some(i) = table.iter().position(|c| !c.is_finite() || *c < 0.0) {
            return Err(SamplerError::invalid_argument(format!(
                "cumulative distribution entry {} at index {} must be finite and non-negative",
                table[i], i
            )));
        }
        Ok(Self { table })
    }

    /// Builds the cumulative table of a weight vector by prefix summation.
    ///
    /// Weights follow the same rules as
    /// [`SampleEngine::weighted_index`](crate::SampleEngine::weighted_index).
    pub fn from_weights(weights: &[f64]) -> SamplerResult<Self> {
        validate_weights(weights, "weights")?;
        let table = weights
            .iter()
            .scan(0.0, |acc, &w| {
                *acc += w;
                Some(*acc)
            })
            .collect();
        Ok(Self { table })
    }

    /// Returns the underlying table.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.table
    }

    /// Number of outcomes in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Always `false`; construction rejects empty tables.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Total weight, i.e. the last table entry.
    #[inline]
    pub fn total(&self) -> f64 {
        self.table[self.table.len() - 1]
    }

    /// Weight of a single outcome, recovered from adjacent entries.
    pub fn weight_of(&self, index: usize) -> Option<f64> {
        let upper = *self.table.get(index)?;
        Some(upper - lower_bound(&self.table, index))
    }

    /// Returns `true` if no entry is smaller than its predecessor.
    pub fn is_monotone(&self) -> bool {
        self.table.windows(2).all(|w| w[0] <= w[1])
    }
}

impl AsRef<[f64]> for CumulativeDistribution {
    fn as_ref(&self) -> &[f64] {
        &self.table
    }
}

impl TryFrom<Vec<f64>> for CumulativeDistribution {
    type Error = SamplerError;

    fn try_from(table: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(table)
    }
}

impl From<CumulativeDistribution> for Vec<f64> {
    fn from(dist: CumulativeDistribution) -> Self {
        dist.table
    }
}

/// Validates a `[min, max]` request against a table.
///
/// Every entry the search may read, `table[..=max]`, must be finite and
/// non-negative.
pub(crate) fn check_range(table: &[f64], min: usize, max: usize) -> SamplerResult<()> {
    if table.is_empty() {
        return Err(SamplerError::invalid_argument(
            "cumulative distribution must not be empty",
        ));
    }
    if min > max {
        return Err(SamplerError::invalid_argument(format!(
            "range lower bound {} exceeds upper bound {}",
            min, max
        )));
    }
    if max >= table.len() {
        return Err(SamplerError::invalid_argument(format!(
            "range upper bound {} out of bounds for table of length {}",
            max,
            table.len()
        )));
    }
    if let Some(i) = table[..=max]
        .iter()
        .position(|c| !c.is_finite() || *c < 0.0)
    {
        return Err(SamplerError::invalid_argument(format!(
            "cumulative distribution entry {} at index {} must be finite and non-negative",
            table[i], i
        )));
    }
    Ok(())
}

/// Cumulative weight below `min`.
#[inline]
pub(crate) fn lower_bound(table: &[f64], min: usize) -> f64 {
    if min == 0 {
        0.0
    } else {
        table[min - 1]
    }
}

/// Interprets a stored table entry as an index (truncating towards zero).
///
/// Used by the degenerate single-outcome cases, which return the stored
/// value rather than sampling. Values outside `usize` are rejected rather
/// than saturated.
pub(crate) fn stored_index(value: f64) -> SamplerResult<usize> {
    if !value.is_finite() || value < 0.0 || value >= usize::MAX as f64 {
        return Err(SamplerError::invalid_argument(format!(
            "stored value {} cannot be returned as an index",
            value
        )));
    }
    Ok(value as usize)
}

/// Locates `drawn` in `table[min..=max]`.
///
/// Returns the first index `value >= min` with `drawn <= table[value]`, or
/// [`SamplerError::DistributionOverflow`] if no entry up to `max` covers the
/// draw.
pub(crate) fn locate(
    table: &[f64],
    drawn: f64,
    min: usize,
    max: usize,
    strategy: SearchStrategy,
) -> SamplerResult<usize> {
    let found = match strategy {
        SearchStrategy::Linear => {
            let mut value = min;
            while value <= max && drawn > table[value] {
                value += 1;
            }
            value
        }
        SearchStrategy::Bisection => min + table[min..=max].partition_point(|&c| drawn > c),
    };

    if found > max {
        return Err(SamplerError::DistributionOverflow { drawn, bound: max });
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TABLE: [f64; 4] = [1.0, 3.0, 6.0, 10.0];

    #[test]
    fn test_from_weights_prefix_sums() {
        let dist = CumulativeDistribution::from_weights(&[0.1, 0.5, 0.5, 0.1]).unwrap();
        assert_eq!(dist.len(), 4);
        assert_relative_eq!(dist.total(), 1.2, epsilon = 1e-12);
        assert_relative_eq!(dist.weight_of(2).unwrap(), 0.5, epsilon = 1e-12);
        assert_eq!(dist.weight_of(4), None);
        assert!(dist.is_monotone());
    }

    #[test]
    fn test_new_rejects_empty_and_non_finite() {
        assert!(CumulativeDistribution::new(vec![]).is_err());
        assert!(CumulativeDistribution::new(vec![1.0, f64::NAN]).is_err());
        assert!(CumulativeDistribution::new(vec![-1.0, 3.0]).is_err());
        assert!(CumulativeDistribution::new(vec![2.0, 1.0]).is_ok());
        assert!(!CumulativeDistribution::new(vec![2.0, 1.0]).unwrap().is_monotone());
    }

    #[test]
    fn test_from_weights_rejects_bad_weights() {
        assert!(CumulativeDistribution::from_weights(&[]).is_err());
        assert!(CumulativeDistribution::from_weights(&[0.0, 0.0]).is_err());
        assert!(CumulativeDistribution::from_weights(&[1.0, -1.0]).is_err());
    }

    #[test]
    fn test_check_range() {
        assert!(check_range(&TABLE, 0, 3).is_ok());
        assert!(check_range(&TABLE, 2, 2).is_ok());
        assert!(check_range(&TABLE, 3, 2).unwrap_err().is_invalid_argument());
        assert!(check_range(&TABLE, 0, 4).unwrap_err().is_invalid_argument());
        assert!(check_range(&[], 0, 0).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_check_range_rejects_bad_entries() {
        assert!(check_range(&[f64::NAN, 1.0, 2.0], 0, 2).unwrap_err().is_invalid_argument());
        assert!(check_range(&[1.0, 2.0, f64::NAN], 0, 2).is_err());
        assert!(check_range(&[-1.0, 3.0], 1, 1).is_err());
        assert!(check_range(&[1.0, f64::INFINITY], 0, 1).is_err());
        // Entries past max are never read.
        assert!(check_range(&[1.0, 2.0, f64::NAN], 0, 1).is_ok());
    }

    #[test]
    fn test_lower_bound() {
        assert_eq!(lower_bound(&TABLE, 0), 0.0);
        assert_eq!(lower_bound(&TABLE, 1), 1.0);
        assert_eq!(lower_bound(&TABLE, 3), 6.0);
    }

    #[test]
    fn test_stored_index() {
        assert_eq!(stored_index(5.0).unwrap(), 5);
        assert_eq!(stored_index(2.9).unwrap(), 2);
        assert!(stored_index(-1.0).is_err());
        assert!(stored_index(f64::INFINITY).is_err());
        assert!(stored_index(1e300).unwrap_err().is_invalid_argument());
        assert!(stored_index(usize::MAX as f64).is_err());
    }

    #[test]
    fn test_locate_boundaries() {
        for strategy in [SearchStrategy::Linear, SearchStrategy::Bisection] {
            assert_eq!(locate(&TABLE, 0.0, 0, 3, strategy).unwrap(), 0);
            // Draws equal to an entry belong to that entry.
            assert_eq!(locate(&TABLE, 1.0, 0, 3, strategy).unwrap(), 0);
            assert_eq!(locate(&TABLE, 1.5, 0, 3, strategy).unwrap(), 1);
            assert_eq!(locate(&TABLE, 6.0, 0, 3, strategy).unwrap(), 2);
            assert_eq!(locate(&TABLE, 9.99, 0, 3, strategy).unwrap(), 3);
            // Sub-range search starts at min.
            assert_eq!(locate(&TABLE, 3.5, 2, 3, strategy).unwrap(), 2);
        }
    }

    #[test]
    fn test_locate_overflow() {
        for strategy in [SearchStrategy::Linear, SearchStrategy::Bisection] {
            let err = locate(&TABLE, 7.0, 0, 2, strategy).unwrap_err();
            assert_eq!(
                err,
                SamplerError::DistributionOverflow {
                    drawn: 7.0,
                    bound: 2
                }
            );
        }
    }

    #[test]
    fn test_locate_unsorted_table_overflows_linear_scan() {
        // Entry 2 dips below the draw, so the scan runs off the range.
        let table = [1.0, 5.0, 2.0];
        let err = locate(&table, 4.0, 2, 2, SearchStrategy::Linear).unwrap_err();
        assert!(matches!(err, SamplerError::DistributionOverflow { bound: 2, .. }));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip_revalidates() {
        let dist = CumulativeDistribution::from_weights(&[1.0, 2.0, 3.0]).unwrap();
        let json = serde_json::to_string(&dist).unwrap();
        assert_eq!(json, "[1.0,3.0,6.0]");
        let back: CumulativeDistribution = serde_json::from_str(&json).unwrap();
        assert_eq!(back, dist);

        assert!(serde_json::from_str::<CumulativeDistribution>("[]").is_err());
        assert!(serde_json::from_str::<CumulativeDistribution>("[1.0, -2.0]").is_err());
    }
}
