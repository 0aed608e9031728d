//! Experiment configuration.

use std::num::NonZeroUsize;

use crate::error::PercolationError;

/// Parameters of a Monte Carlo threshold experiment.
///
/// # Examples
/// ```
/// use percolation::config::SimulationConfig;
///
/// let config = SimulationConfig::new(20, 50).with_seed(7).with_workers(4);
/// assert!(config.validate().is_ok());
/// assert!(SimulationConfig::new(20, 0).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Grid side length.
    pub n: usize,
    /// Number of independent trials.
    pub trials: usize,
    /// Master seed; `None` draws one from the OS.
    pub seed: Option<u64>,
    /// Worker threads the trials are split across.
    pub workers: usize,
    /// Confidence level of the reported interval.
    pub confidence: f64,
}

impl SimulationConfig {
    pub const DEFAULT_CONFIDENCE: f64 = 0.95;

    /// Single-threaded, unseeded, 95% confidence.
    pub fn new(n: usize, trials: usize) -> Self {
        Self {
            n,
            trials,
            seed: None,
            workers: 1,
            confidence: Self::DEFAULT_CONFIDENCE,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Uses every available core, falling back to one.
    pub fn with_all_cores(self) -> Self {
        let cores = std::thread::available_parallelism().map_or(1, NonZeroUsize::get);
        self.with_workers(cores)
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// Checks every field, reporting the first bad one.
    pub fn validate(&self) -> Result<(), PercolationError> {
        if self.n == 0 {
            return Err(PercolationError::InvalidArgument(
                "grid size n must be positive".into(),
            ));
        }
        if self.trials == 0 {
            return Err(PercolationError::InvalidArgument(
                "trials must be positive".into(),
            ));
        }
        if self.workers == 0 {
            return Err(PercolationError::InvalidArgument(
                "workers must be positive".into(),
            ));
        }
        validate_confidence(self.confidence)
    }
}

pub(crate) fn validate_confidence(level: f64) -> Result<(), PercolationError> {
    if level > 0.0 && level < 1.0 {
        Ok(())
    } else {
        Err(PercolationError::InvalidArgument(format!(
            "confidence level {level} is not in (0, 1)"
        )))
    }
}
