//! Mutation command implementation
//!
//! Estimates how often a zero bit string of length `L` becomes non-zero
//! under two mutation schemes, run in parallel over per-worker engines:
//!
//! - whole-string: with probability `p` every bit is flipped at once
//! - point: each bit is flipped independently with probability `q`
//!
//! `q` is derived from `p` so that both schemes change the string with the
//! same probability, `1 - (1 - q)^L = p * (1 - 0.5^L)`.

use sampler_engine::SampleEngine;
use tracing::info;

use crate::config::SamplerConfig;
use crate::workers::count_hits;
use crate::{CliError, Result};

/// Longest supported bit string.
pub const MAX_GENE_LENGTH: u32 = 64;

/// Outcome of a mutation experiment.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationReport {
    pub trials: usize,
    pub whole_probability: f64,
    pub point_probability: f64,
    /// Fraction of trials changed by point mutation
    pub point_fraction: f64,
    /// Fraction of trials changed by whole-string mutation
    pub whole_fraction: f64,
}

/// Converts a whole-string mutation probability into the per-bit
/// probability with the same chance of changing a string of `gene_length`
/// bits.
pub fn whole_to_point_probability(whole: f64, gene_length: u32) -> f64 {
    let bits = f64::from(gene_length);
    1.0 - ((1.0 / bits) * (1.0 - whole * (1.0 - 0.5f64.powf(bits))).ln()).exp()
}

fn mask(gene_length: u32) -> u64 {
    if gene_length >= 64 {
        u64::MAX
    } else {
        (1u64 << gene_length) - 1
    }
}

/// Flips each of the low `gene_length` bits independently with probability
/// `prob`.
pub fn mutate_point(bits: u64, gene_length: u32, prob: f64, engine: &mut SampleEngine) -> u64 {
    (0..gene_length).fold(bits, |acc, i| {
        if engine.bernoulli(prob) {
            acc ^ (1u64 << i)
        } else {
            acc
        }
    })
}

/// Flips all of the low `gene_length` bits with probability `prob`.
pub fn mutate_whole(bits: u64, gene_length: u32, prob: f64, engine: &mut SampleEngine) -> u64 {
    if engine.bernoulli(prob) {
        bits ^ mask(gene_length)
    } else {
        bits
    }
}

/// Run the mutation command
pub fn run(
    config: &SamplerConfig,
    trials: usize,
    gene_length: u32,
    whole_probability: f64,
) -> Result<MutationReport> {
    if gene_length == 0 || gene_length > MAX_GENE_LENGTH {
        return Err(CliError::invalid_argument(format!(
            "gene length {} must be between 1 and {}",
            gene_length, MAX_GENE_LENGTH
        )));
    }
    if !(0.0..=1.0).contains(&whole_probability) {
        return Err(CliError::invalid_argument(format!(
            "mutation probability {} must be within [0, 1]",
            whole_probability
        )));
    }
    if trials == 0 {
        return Err(CliError::invalid_argument("trials must be at least 1"));
    }

    let point_probability = whole_to_point_probability(whole_probability, gene_length);
    info!(
        trials,
        gene_length, whole_probability, point_probability, "Running mutation experiment"
    );

    let point_hits = count_hits(config, trials, |engine| {
        mutate_point(0, gene_length, point_probability, engine) != 0
    })?;
    let whole_hits = count_hits(config, trials, |engine| {
        mutate_whole(0, gene_length, whole_probability, engine) != 0
    })?;

    Ok(MutationReport {
        trials,
        whole_probability,
        point_probability,
        point_fraction: point_hits as f64 / trials as f64,
        whole_fraction: whole_hits as f64 / trials as f64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_point_probability_matches_whole() {
        for (p, len) in [(0.0001, 16), (0.3, 8), (0.9, 1), (0.5, 64)] {
            let q = whole_to_point_probability(p, len);
            let lhs = 1.0 - (1.0 - q).powi(len as i32);
            let rhs = p * (1.0 - 0.5f64.powi(len as i32));
            assert_relative_eq!(lhs, rhs, max_relative = 1e-9);
        }
        assert_eq!(whole_to_point_probability(0.0, 16), 0.0);
    }

    #[test]
    fn test_mutate_whole_flips_all_bits() {
        let mut engine = SampleEngine::from_seed(1);
        assert_eq!(mutate_whole(0, 16, 1.0, &mut engine), 0xFFFF);
        assert_eq!(mutate_whole(0, 64, 1.0, &mut engine), u64::MAX);
        assert_eq!(mutate_whole(0b1010, 4, 0.0, &mut engine), 0b1010);
    }

    #[test]
    fn test_mutate_point_stays_in_gene() {
        let mut engine = SampleEngine::from_seed(2);
        assert_eq!(mutate_point(0, 12, 1.0, &mut engine), 0xFFF);
        assert_eq!(mutate_point(0xABC, 12, 0.0, &mut engine), 0xABC);
        for _ in 0..1000 {
            assert_eq!(mutate_point(0, 5, 0.5, &mut engine) & !0x1F, 0);
        }
    }

    #[test]
    fn test_run_fractions_agree() {
        let dir = tempfile::tempdir().unwrap();
        let config = SamplerConfig {
            workers: 3,
            seed: Some(232323),
            output_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        let report = run(&config, 200_000, 8, 0.2).unwrap();
        // Both schemes change the string with probability 0.2 * (1 - 1/256).
        let expected = 0.2 * (1.0 - 1.0 / 256.0);
        assert!((report.point_fraction - expected).abs() < 0.01, "{:?}", report);
        assert!((report.whole_fraction - 0.2).abs() < 0.01, "{:?}", report);
    }

    #[test]
    fn test_run_rejects_bad_arguments() {
        let config = SamplerConfig::default();
        assert!(run(&config, 10, 0, 0.1).is_err());
        assert!(run(&config, 10, 65, 0.1).is_err());
        assert!(run(&config, 10, 8, 1.5).is_err());
        assert!(run(&config, 0, 8, 0.1).is_err());
    }
}
