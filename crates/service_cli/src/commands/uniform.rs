//! Uniform command implementation
//!
//! Writes integers drawn uniformly from an inclusive range.

use tracing::info;

use crate::config::SamplerConfig;
use crate::workers::{write_samples, WorkerReport};
use crate::{CliError, Result};

/// Run the uniform command
pub fn run(config: &SamplerConfig, from: i64, thru: i64) -> Result<Vec<WorkerReport>> {
    if from > thru {
        return Err(CliError::invalid_argument(format!(
            "--from {} must not exceed --thru {}",
            from, thru
        )));
    }
    info!(from, thru, "Sampling uniform integers");
    write_samples(config, |engine| Ok(engine.uniform_int(from, thru)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverted_range_rejected_before_sampling() {
        let dir = tempfile::tempdir().unwrap();
        let config = SamplerConfig {
            workers: 1,
            output_dir: dir.path().join("never"),
            ..Default::default()
        };
        assert!(matches!(run(&config, 9, 0), Err(CliError::InvalidArgument(_))));
        assert!(!config.output_dir.exists());
    }

    #[test]
    fn test_values_in_range() {
        let dir = tempfile::tempdir().unwrap();
        let config = SamplerConfig {
            workers: 2,
            seed: Some(1),
            draws: 200,
            output_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        for report in run(&config, -5, 5).unwrap() {
            let content = std::fs::read_to_string(&report.path).unwrap();
            for line in content.lines().skip(1) {
                let v: i64 = line.parse().unwrap();
                assert!((-5..=5).contains(&v));
            }
        }
    }
}
