//! Error types for sampling operations.
//!
//! Every failure is reported synchronously through [`SamplerError`]; the
//! engine never retries and never falls back to a different distribution.

use thiserror::Error;

/// Categorised sampling errors.
///
/// # Variants
/// - `InvalidArgument`: malformed caller input (empty or all-zero weights,
///   mismatched probability/value lengths, inverted ranges)
/// - `DistributionOverflow`: the cumulative search ran past the requested
///   range, which means the table was not monotonically non-decreasing
///
/// # Examples
/// ```
/// use sampler_engine::SamplerError;
///
/// let err = SamplerError::InvalidArgument("empty weight vector".to_string());
/// assert_eq!(format!("{}", err), "Invalid argument: empty weight vector");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SamplerError {
    /// Malformed input supplied by the caller.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Cumulative search exceeded the upper bound of the requested range.
    #[error("Distribution overflow: draw {drawn} not covered by table up to index {bound}")]
    DistributionOverflow {
        /// The uniform value that could not be located.
        drawn: f64,
        /// Last index the search was allowed to inspect.
        bound: usize,
    },
}

impl SamplerError {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Returns `true` for errors caused by caller input rather than a
    /// corrupted distribution table.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

/// Result alias for sampling operations.
pub type SamplerResult<T> = Result<T, SamplerError>;

/// Checks that a probability or weight sequence is non-empty, that every
/// entry is finite and non-negative, and that the running total stays finite.
pub(crate) fn validate_weights(weights: &[f64], what: &str) -> SamplerResult<()> {
    if weights.is_empty() {
        return Err(SamplerError::invalid_argument(format!("{} must not be empty", what)));
    }
    if let Some((i, w)) = weights
        .iter()
        .enumerate()
        .find(|(_, w)| !w.is_finite() || **w < 0.0)
    {
        return Err(SamplerError::invalid_argument(format!(
            "{} must be finite and non-negative, found {} at index {}",
            what, w, i
        )));
    }
    let mut total = 0.0;
    for (i, w) in weights.iter().enumerate() {
        total += w;
        if !total.is_finite() {
            return Err(SamplerError::invalid_argument(format!(
                "{} total overflows at index {}",
                what, i
            )));
        }
    }
    if total == 0.0 {
        return Err(SamplerError::invalid_argument(format!(
            "{} must contain at least one positive entry",
            what
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SamplerError::DistributionOverflow {
            drawn: 0.5,
            bound: 3,
        };
        assert_eq!(
            err.to_string(),
            "Distribution overflow: draw 0.5 not covered by table up to index 3"
        );
        assert!(!err.is_invalid_argument());
    }

    #[test]
    fn test_validate_weights() {
        assert!(validate_weights(&[0.1, 0.0, 2.0], "weights").is_ok());
        assert!(validate_weights(&[], "weights").unwrap_err().is_invalid_argument());
        assert!(validate_weights(&[0.0, 0.0], "weights").is_err());
        assert!(validate_weights(&[1.0, -0.5], "weights").is_err());
        assert!(validate_weights(&[1.0, f64::NAN], "weights").is_err());
        assert!(validate_weights(&[f64::INFINITY], "weights").is_err());
    }

    #[test]
    fn test_validate_weights_rejects_overflowing_total() {
        let err = validate_weights(&[f64::MAX, f64::MAX], "weights").unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("total overflows at index 1"));
        assert!(validate_weights(&[f64::MAX, 0.0], "weights").is_ok());
    }

    #[test]
    fn test_validate_weights_message_names_input() {
        let err = validate_weights(&[1.0, -2.0], "probabilities").unwrap_err();
        assert!(err.to_string().contains("probabilities"));
        assert!(err.to_string().contains("index 1"));
    }
}
