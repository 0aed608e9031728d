//! Estimates the percolation threshold of an n-by-n grid.
//!
//! Prints the sample mean, the sample standard deviation, and the
//! confidence interval to stdout. Logs go to stderr, filtered by
//! `RUST_LOG` (default `warn`).

use anyhow::Context;
use clap::Parser;
use percolation::{PercolationStats, SimulationConfig};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Grid side length
    n: usize,

    /// Number of independent trials
    trials: usize,

    /// Seed for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Worker threads; 0 uses every available core
    #[arg(short, long, default_value_t = 1)]
    workers: usize,

    /// Confidence level of the reported interval
    #[arg(short, long, default_value_t = SimulationConfig::DEFAULT_CONFIDENCE)]
    confidence: f64,
}

impl Args {
    fn config(&self) -> SimulationConfig {
        let mut config =
            SimulationConfig::new(self.n, self.trials).with_confidence(self.confidence);
        config = match self.workers {
            0 => config.with_all_cores(),
            workers => config.with_workers(workers),
        };
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.config();
    tracing::debug!(?config, "starting experiment");

    let stats = PercolationStats::from_config(&config).with_context(|| {
        format!(
            "cannot run {} trials on a {n}x{n} grid",
            config.trials,
            n = config.n
        )
    })?;
    let summary = stats.summary(config.confidence)?;
    println!("{summary}");
    Ok(())
}
