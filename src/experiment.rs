//! Monte Carlo estimation of the percolation threshold.
//!
//! Each trial opens uniformly random blocked sites of a fresh grid until
//! it percolates and records the fraction of open sites at that moment.
//! [`PercolationStats`] keeps one such sample per trial and derives the
//! sample mean, standard deviation, and a normal-approximation confidence
//! interval from them on demand.
//!
//! Trials can be spread over worker threads with
//! [`PercolationStats::from_config`]: the sample array is split into
//! disjoint chunks, each filled by one worker with its own grid and RNG,
//! and all workers are joined before any statistic is read.

use std::fmt;

use rand::Rng;

use crate::config::{validate_confidence, SimulationConfig};
use crate::error::PercolationError;
use crate::grid::Percolation;
use crate::random::{create_rng, entropy_rng, uniform_site};
use crate::special::{two_sided_z, Z_95};
use crate::stats;

/// Draws sites until one is blocked. Terminates as long as the grid has a
/// blocked site, which holds for any grid that does not yet percolate.
fn next_blocked_site<R: Rng>(
    grid: &Percolation,
    rng: &mut R,
) -> Result<(usize, usize), PercolationError> {
    loop {
        let (row, col) = uniform_site(grid.size(), rng);
        if !grid.is_open(row, col)? {
            return Ok((row, col));
        }
    }
}

/// Runs one trial on a fresh n-by-n grid and returns the open-site
/// fraction at the moment it first percolates.
pub fn run_trial<R: Rng>(n: usize, rng: &mut R) -> Result<f64, PercolationError> {
    let mut grid = Percolation::new(n)?;
    while !grid.percolates() {
        let (row, col) = next_blocked_site(&grid, rng)?;
        grid.open(row, col)?;
    }
    Ok(grid.number_of_open_sites() as f64 / (n * n) as f64)
}

fn fill_samples<R: Rng>(
    n: usize,
    samples: &mut [f64],
    first_trial: usize,
    rng: &mut R,
) -> Result<(), PercolationError> {
    for (offset, slot) in samples.iter_mut().enumerate() {
        *slot = run_trial(n, rng)?;
        tracing::debug!(trial = first_trial + offset, n, threshold = *slot, "trial done");
    }
    Ok(())
}

/// Threshold samples from `trials` independent experiments on an
/// n-by-n grid.
///
/// # Examples
/// ```
/// use percolation::experiment::PercolationStats;
/// use percolation::random::create_rng;
///
/// let stats = PercolationStats::with_rng(10, 40, &mut create_rng(1)).unwrap();
/// assert!(stats.mean() > 0.4 && stats.mean() < 0.8);
/// assert!(stats.confidence_lo() <= stats.mean());
/// assert!(stats.mean() <= stats.confidence_hi());
/// ```
#[derive(Debug, Clone)]
pub struct PercolationStats {
    n: usize,
    samples: Vec<f64>,
}

impl PercolationStats {
    /// Runs the experiment single-threaded with an OS-seeded RNG.
    ///
    /// # Errors
    /// [`PercolationError::InvalidArgument`] if `n == 0` or `trials == 0`.
    pub fn new(n: usize, trials: usize) -> Result<Self, PercolationError> {
        Self::with_rng(n, trials, &mut entropy_rng())
    }

    /// Runs the experiment single-threaded, drawing sites from `rng`.
    pub fn with_rng<R: Rng>(
        n: usize,
        trials: usize,
        rng: &mut R,
    ) -> Result<Self, PercolationError> {
        SimulationConfig::new(n, trials).validate()?;
        let mut samples = vec![0.0; trials];
        fill_samples(n, &mut samples, 0, rng)?;
        let stats = Self { n, samples };
        tracing::info!(n, trials, workers = 1, mean = stats.mean(), "experiment finished");
        Ok(stats)
    }

    /// Runs the experiment described by `config`, in parallel when
    /// `config.workers > 1`.
    ///
    /// Worker RNGs are seeded from a master RNG, so a seeded config gives
    /// the same samples for the same worker count.
    pub fn from_config(config: &SimulationConfig) -> Result<Self, PercolationError> {
        config.validate()?;
        let mut master = match config.seed {
            Some(seed) => create_rng(seed),
            None => entropy_rng(),
        };
        let (n, trials) = (config.n, config.trials);
        let workers = config.workers.min(trials);
        if workers == 1 {
            return Self::with_rng(n, trials, &mut master);
        }

        let chunk = trials.div_ceil(workers);
        let seeds: Vec<u64> = (0..workers).map(|_| master.random()).collect();
        let mut samples = vec![0.0; trials];

        std::thread::scope(|scope| {
            let handles: Vec<_> = samples
                .chunks_mut(chunk)
                .zip(seeds)
                .enumerate()
                .map(|(worker, (slice, seed))| {
                    scope.spawn(move || {
                        tracing::debug!(worker, trials = slice.len(), "worker started");
                        fill_samples(n, slice, worker * chunk, &mut create_rng(seed))
                    })
                })
                .collect();
            handles.into_iter().try_for_each(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
            })
        })?;

        let stats = Self { n, samples };
        tracing::info!(n, trials, workers, mean = stats.mean(), "experiment finished");
        Ok(stats)
    }

    /// Grid side length.
    pub fn grid_size(&self) -> usize {
        self.n
    }

    pub fn trials(&self) -> usize {
        self.samples.len()
    }

    /// Per-trial open-site fractions, in trial order.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Sample mean of the percolation threshold.
    pub fn mean(&self) -> f64 {
        stats::mean(&self.samples).unwrap_or(f64::NAN)
    }

    /// Sample standard deviation of the percolation threshold; NaN for a
    /// single trial.
    pub fn stddev(&self) -> f64 {
        stats::std_dev(&self.samples).unwrap_or(f64::NAN)
    }

    fn half_width(&self, z: f64) -> f64 {
        z * self.stddev() / (self.trials() as f64).sqrt()
    }

    /// Low endpoint of the 95% confidence interval.
    pub fn confidence_lo(&self) -> f64 {
        self.mean() - self.half_width(Z_95)
    }

    /// High endpoint of the 95% confidence interval.
    pub fn confidence_hi(&self) -> f64 {
        self.mean() + self.half_width(Z_95)
    }

    /// `(lo, hi)` of the two-sided confidence interval at `level`.
    ///
    /// # Errors
    /// [`PercolationError::InvalidArgument`] if `level` is not in `(0, 1)`.
    pub fn confidence_interval(&self, level: f64) -> Result<(f64, f64), PercolationError> {
        validate_confidence(level)?;
        let half = self.half_width(two_sided_z(level));
        let mean = self.mean();
        Ok((mean - half, mean + half))
    }

    /// Snapshot of the derived statistics at confidence `level`.
    pub fn summary(&self, level: f64) -> Result<Summary, PercolationError> {
        let (lo, hi) = self.confidence_interval(level)?;
        Ok(Summary {
            mean: self.mean(),
            stddev: self.stddev(),
            level,
            lo,
            hi,
        })
    }
}

/// Derived statistics of a finished experiment; `Display` renders the
/// three-line report printed by the command-line tool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub mean: f64,
    pub stddev: f64,
    pub level: f64,
    pub lo: f64,
    pub hi: f64,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let percent = (self.level * 1000.0).round() / 10.0;
        writeln!(f, "mean                    = {}", self.mean)?;
        writeln!(f, "stddev                  = {}", self.stddev)?;
        write!(
            f,
            "{:<24}= [{}, {}]",
            format!("{percent}% confidence interval"),
            self.lo,
            self.hi
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_site_single_trial() {
        let stats = PercolationStats::with_rng(1, 1, &mut create_rng(3)).unwrap();
        assert_eq!(stats.grid_size(), 1);
        assert_eq!(stats.samples(), &[1.0]);
        assert_eq!(stats.mean(), 1.0);
        assert!(stats.stddev().is_nan());
        assert!(stats.confidence_lo().is_nan());
        assert!(stats.confidence_hi().is_nan());
    }

    #[test]
    fn test_single_site_many_trials() {
        // n == 1 with several trials still has a defined (zero) stddev
        let stats = PercolationStats::with_rng(1, 5, &mut create_rng(3)).unwrap();
        assert_eq!(stats.mean(), 1.0);
        assert_eq!(stats.stddev(), 0.0);
        assert_eq!(stats.confidence_lo(), 1.0);
        assert_eq!(stats.confidence_hi(), 1.0);
    }

    #[test]
    fn test_invalid_arguments() {
        for (n, trials) in [(0, 5), (5, 0), (0, 0)] {
            assert!(matches!(
                PercolationStats::with_rng(n, trials, &mut create_rng(0)),
                Err(PercolationError::InvalidArgument(_))
            ));
        }
        assert!(PercolationStats::new(5, 0).is_err());
    }

    #[test]
    fn test_trial_threshold_bounds() {
        let mut rng = create_rng(11);
        for n in [2, 3, 8, 20] {
            let p = run_trial(n, &mut rng).unwrap();
            // a spanning path needs at least n open sites
            assert!(p >= 1.0 / n as f64 && p <= 1.0, "n={n} p={p}");
        }
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let a = PercolationStats::with_rng(8, 10, &mut create_rng(99)).unwrap();
        let b = PercolationStats::with_rng(8, 10, &mut create_rng(99)).unwrap();
        assert_eq!(a.samples(), b.samples());
    }

    #[test]
    fn test_parallel_matches_config() {
        let config = SimulationConfig::new(10, 13).with_seed(5).with_workers(4);
        let a = PercolationStats::from_config(&config).unwrap();
        let b = PercolationStats::from_config(&config).unwrap();
        assert_eq!(a.trials(), 13);
        assert_eq!(a.samples(), b.samples());
        assert!(a.samples().iter().all(|&p| p > 0.0 && p <= 1.0));
    }

    #[test]
    fn test_more_workers_than_trials() {
        let config = SimulationConfig::new(4, 2).with_seed(1).with_workers(16);
        let stats = PercolationStats::from_config(&config).unwrap();
        assert_eq!(stats.trials(), 2);
        assert!(stats.samples().iter().all(|&p| p > 0.0));
    }

    #[test]
    fn test_from_config_validates() {
        let config = SimulationConfig::new(4, 2).with_workers(0);
        assert!(PercolationStats::from_config(&config).is_err());
    }

    #[test]
    fn test_confidence_interval_levels() {
        let stats = PercolationStats::with_rng(10, 30, &mut create_rng(21)).unwrap();
        let (lo95, hi95) = stats.confidence_interval(0.95).unwrap();
        assert_eq!(lo95, stats.confidence_lo());
        assert_eq!(hi95, stats.confidence_hi());
        let (lo99, hi99) = stats.confidence_interval(0.99).unwrap();
        assert!(lo99 < lo95 && hi95 < hi99);
        assert!(stats.confidence_interval(1.0).is_err());
    }

    #[test]
    fn test_summary_display() {
        let summary = Summary {
            mean: 0.5,
            stddev: 0.25,
            level: 0.95,
            lo: 0.25,
            hi: 0.75,
        };
        assert_eq!(
            summary.to_string(),
            "mean                    = 0.5\n\
             stddev                  = 0.25\n\
             95% confidence interval = [0.25, 0.75]"
        );
    }
}
