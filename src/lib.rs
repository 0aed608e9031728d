//! # percolation
//!
//! Monte Carlo estimation of the site percolation threshold on an
//! n-by-n grid.
//!
//! ## Modules
//!
//! - [`collections`]: weighted quick-union with path compression
//! - [`grid`]: the [`Percolation`] grid model
//! - [`experiment`]: [`PercolationStats`], the trial driver
//! - [`stats`]: descriptive statistics over threshold samples
//! - [`special`]: normal quantiles for confidence intervals
//! - [`random`]: seeded RNG construction and site draws
//! - [`config`]: experiment configuration
//!
//! ## Design Notes
//!
//! - **No backwash**: fullness is tracked with per-root top/bottom tags
//!   instead of virtual top and bottom nodes.
//! - **Reproducible**: every random choice flows from an injectable `Rng`.
//! - **Property-based testing**: grid and union-find invariants are
//!   checked with proptest.

pub mod collections;
pub mod config;
pub mod error;
pub mod experiment;
pub mod grid;
pub mod random;
pub mod special;
pub mod stats;

pub use config::SimulationConfig;
pub use error::PercolationError;
pub use experiment::{PercolationStats, Summary};
pub use grid::Percolation;
