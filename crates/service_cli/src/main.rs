//! randomz - Parallel Random Sample Writer
//!
//! Spawns a fixed number of workers, each owning one seeded
//! [`SampleEngine`](sampler_engine::SampleEngine), and writes sampled values
//! to per-worker files `randomz_<worker>.dat`.
//!
//! # Commands
//!
//! - `randomz uniform --from 0 --thru 99` - uniform integers
//! - `randomz weighted --weights 0.1,0.5,0.5,0.1` - weighted category indices
//! - `randomz custom --probs 0.1,0.9 --values 1.5,2.5` - custom distribution
//! - `randomz gaussian --mean 0 --variance 1` - Gaussian variates
//! - `randomz mutation` - bit-string mutation experiment (stdout only)

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod workers;

pub use error::{CliError, Result};

use config::{build_config, CliArgs, LogLevel};
use workers::WorkerReport;

/// Parallel pseudo-random sample writer
#[derive(Parser)]
#[command(name = "randomz")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, env = "RANDOMZ_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of parallel workers
    #[arg(short, long, global = true)]
    workers: Option<usize>,

    /// Base seed; omit to seed every worker from entropy
    #[arg(short, long, global = true)]
    seed: Option<u32>,

    /// Total number of draws across all workers
    #[arg(short = 'n', long, global = true)]
    draws: Option<usize>,

    /// Directory for worker output files
    #[arg(short, long, global = true, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Log level
    #[arg(long, global = true, value_enum)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Uniform integers over an inclusive range
    Uniform {
        /// Lower bound (inclusive)
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        from: i64,

        /// Upper bound (inclusive)
        #[arg(long, default_value = "99", allow_negative_numbers = true)]
        thru: i64,
    },

    /// Category indices drawn in proportion to weights
    Weighted {
        /// Comma-separated non-negative weights
        #[arg(long, value_delimiter = ',', required = true)]
        weights: Vec<f64>,
    },

    /// Values drawn from (probability, value) pairs
    Custom {
        /// Comma-separated probabilities
        #[arg(long, value_delimiter = ',', required = true)]
        probs: Vec<f64>,

        /// Comma-separated values, one per probability
        #[arg(long, value_delimiter = ',', required = true, allow_negative_numbers = true)]
        values: Vec<f64>,
    },

    /// Gaussian variates
    Gaussian {
        /// Mean
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        mean: f64,

        /// Variance
        #[arg(long, default_value = "1")]
        variance: f64,
    },

    /// Compare point and whole-string bit mutation rates
    Mutation {
        /// Number of trials per scheme
        #[arg(long, default_value = "1000000")]
        trials: usize,

        /// Bit-string length (1-64)
        #[arg(long, default_value = "16")]
        gene_length: u32,

        /// Whole-string mutation probability
        #[arg(long, default_value = "0.0001")]
        probability: f64,
    },
}

impl From<&Cli> for CliArgs {
    fn from(cli: &Cli) -> Self {
        CliArgs {
            config_file: cli.config.clone(),
            workers: cli.workers,
            seed: cli.seed,
            draws: cli.draws,
            output_dir: cli.output_dir.clone(),
            log_level: cli.log_level,
        }
    }
}

fn init_tracing(log_level: LogLevel) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::default().add_directive(LevelFilter::from(log_level).into())
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn print_reports(reports: &[WorkerReport]) {
    for report in reports {
        println!(
            "worker {:>3}  seed {:>10}  draws {:>8}  {}",
            report.worker,
            report
                .seed
                .map_or_else(|| "entropy".to_string(), |s| s.to_string()),
            report.draws,
            report.path.display()
        );
    }
    println!("Done! Check the 'randomz_*.dat' files for output.");
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = build_config(&CliArgs::from(&cli)).context("failed to load configuration")?;

    init_tracing(config.log_level);

    info!("randomz v{}", sampler_engine::VERSION);
    info!(
        workers = config.workers,
        seed = ?config.seed,
        draws = config.draws,
        output_dir = %config.output_dir.display(),
        log_level = ?config.log_level,
        "Configuration loaded"
    );

    let reports = match cli.command {
        Commands::Uniform { from, thru } => commands::uniform::run(&config, from, thru),
        Commands::Weighted { weights } => commands::weighted::run(&config, weights),
        Commands::Custom { probs, values } => commands::custom::run(&config, probs, values),
        Commands::Gaussian { mean, variance } => commands::gaussian::run(&config, mean, variance),
        Commands::Mutation {
            trials,
            gene_length,
            probability,
        } => {
            let report = commands::mutation::run(&config, trials, gene_length, probability)
                .context("mutation experiment failed")?;
            println!("Number of trials: {}", report.trials);
            println!("Whole mutation prob. is: {}", report.whole_probability);
            println!("Point mutation prob. is: {}", report.point_probability);
            println!("The fraction of mutated in 'point mut.': {}", report.point_fraction);
            println!("The fraction of mutated in 'whole mut.': {}", report.whole_fraction);
            return Ok(());
        }
    }
    .context("sampling run failed")?;

    print_reports(&reports);
    Ok(())
}
