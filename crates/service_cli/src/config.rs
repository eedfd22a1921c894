//! Run configuration management
//!
//! Configuration is layered: defaults, then an optional TOML file, then
//! `RANDOMZ_*` environment variables, then command-line flags.

use clap::ValueEnum;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;

/// Default configuration file, read only if present.
pub const DEFAULT_CONFIG_FILE: &str = "randomz.toml";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid worker count: {0}. Must be at least 1")]
    InvalidWorkers(usize),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Verbosity of the run log, shared by `--log-level`, `RANDOMZ_LOG_LEVEL`
/// and the `log_level` file key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parse a level name, ignoring case
    pub fn parse(name: &str) -> Result<Self, ConfigError> {
        <Self as ValueEnum>::from_str(name.trim(), true)
            .map_err(|_| ConfigError::InvalidLogLevel(name.to_string()))
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

/// Sampling run configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Number of parallel workers, each with its own engine and output file
    pub workers: usize,
    /// Base seed; `None` seeds every engine from entropy
    pub seed: Option<u32>,
    /// Total number of draws, split across workers
    pub draws: usize,
    /// Directory receiving `randomz_<worker>.dat` files
    pub output_dir: PathBuf,
    /// Log level
    pub log_level: LogLevel,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            workers: num_cpus::get(),
            seed: None,
            draws: 10_000,
            output_dir: PathBuf::from("."),
            log_level: LogLevel::Info,
        }
    }
}

impl SamplerConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::FileError(e.to_string()))
    }

    /// Apply `RANDOMZ_*` environment variable overrides
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.apply_env(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(workers) = lookup("RANDOMZ_WORKERS") {
            self.workers = parse_env("RANDOMZ_WORKERS", &workers)?;
        }
        if let Some(seed) = lookup("RANDOMZ_SEED") {
            self.seed = Some(parse_env("RANDOMZ_SEED", &seed)?);
        }
        if let Some(draws) = lookup("RANDOMZ_DRAWS") {
            self.draws = parse_env("RANDOMZ_DRAWS", &draws)?;
        }
        if let Some(output_dir) = lookup("RANDOMZ_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(output_dir);
        }
        if let Some(log_level) = lookup("RANDOMZ_LOG_LEVEL") {
            self.log_level = LogLevel::parse(&log_level)?;
        }
        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::InvalidWorkers(self.workers));
        }
        Ok(())
    }
}

fn parse_env<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::EnvError(format!("{}={} is not a valid value", key, value)))
}

/// Command-line overrides applied on top of file and environment settings
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub config_file: Option<PathBuf>,
    pub workers: Option<usize>,
    pub seed: Option<u32>,
    pub draws: Option<usize>,
    pub output_dir: Option<PathBuf>,
    pub log_level: Option<LogLevel>,
}

/// Build the effective configuration from all layers
///
/// An explicitly named configuration file must exist; the default file is
/// used only when present.
pub fn build_config(args: &CliArgs) -> Result<SamplerConfig, ConfigError> {
    let config = match &args.config_file {
        Some(path) => SamplerConfig::load(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            SamplerConfig::load(Path::new(DEFAULT_CONFIG_FILE))?
        }
        None => SamplerConfig::default(),
    };
    let config = config.with_env_override()?;
    apply_cli(config, args)
}

/// Apply command-line overrides and validate
pub fn apply_cli(mut config: SamplerConfig, args: &CliArgs) -> Result<SamplerConfig, ConfigError> {
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(draws) = args.draws {
        config.draws = draws;
    }
    if let Some(output_dir) = &args.output_dir {
        config.output_dir = output_dir.clone();
    }
    if let Some(log_level) = args.log_level {
        config.log_level = log_level;
    }
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = SamplerConfig::default();
        assert!(config.workers >= 1);
        assert_eq!(config.seed, None);
        assert_eq!(config.draws, 10_000);
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = SamplerConfig::from_toml(
            r#"
            workers = 3
            seed = 232323
            log_level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.workers, 3);
        assert_eq!(config.seed, Some(232323));
        assert_eq!(config.draws, 10_000);
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_from_toml_rejects_bad_values() {
        assert!(SamplerConfig::from_toml("workers = -1").is_err());
        assert!(SamplerConfig::from_toml("log_level = \"loud\"").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = SamplerConfig::load(Path::new("/nonexistent/randomz.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileError(_)));
    }

    #[test]
    fn test_env_override() {
        let config = SamplerConfig::default()
            .apply_env(lookup(&[
                ("RANDOMZ_WORKERS", "5"),
                ("RANDOMZ_SEED", "42"),
                ("RANDOMZ_DRAWS", " 900 "),
                ("RANDOMZ_OUTPUT_DIR", "/tmp/out"),
                ("RANDOMZ_LOG_LEVEL", "WARN"),
            ]))
            .unwrap();
        assert_eq!(config.workers, 5);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.draws, 900);
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_env_override_invalid() {
        let err = SamplerConfig::default()
            .apply_env(lookup(&[("RANDOMZ_SEED", "-3")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::EnvError(_)));
    }

    #[test]
    fn test_cli_overrides_and_validation() {
        let base = SamplerConfig::default();
        let args = CliArgs {
            workers: Some(2),
            seed: Some(7),
            log_level: Some(LogLevel::Trace),
            ..Default::default()
        };
        let config = apply_cli(base.clone(), &args).unwrap();
        assert_eq!(config.workers, 2);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.log_level, LogLevel::Trace);

        let args = CliArgs {
            workers: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            apply_cli(base, &args),
            Err(ConfigError::InvalidWorkers(0))
        ));
    }

    #[test]
    fn test_build_config_with_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "workers = 4\ndraws = 12\n").unwrap();
        let args = CliArgs {
            config_file: Some(path),
            draws: Some(20),
            ..Default::default()
        };
        let config = build_config(&args).unwrap();
        // Environment variables may add overrides on a developer machine,
        // but the explicit CLI draw count always wins.
        assert_eq!(config.draws, 20);
    }

    #[test]
    fn test_log_level_parse_and_filter() {
        assert_eq!(LogLevel::parse("Debug").unwrap(), LogLevel::Debug);
        assert!(matches!(
            LogLevel::parse("verbose"),
            Err(ConfigError::InvalidLogLevel(_))
        ));
        assert_eq!(LevelFilter::from(LogLevel::Warn), LevelFilter::WARN);
        assert_eq!(LevelFilter::from(LogLevel::default()), LevelFilter::INFO);
    }

    #[test]
    fn test_log_level_value_names() {
        let names: Vec<String> = LogLevel::value_variants()
            .iter()
            .filter_map(|level| level.to_possible_value())
            .map(|value| value.get_name().to_string())
            .collect();
        assert_eq!(names, ["trace", "debug", "info", "warn", "error"]);
    }
}
