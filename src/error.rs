//! Error type shared by the grid model and the experiment driver.

use std::ops::Range;

use crate::collections::union_find::ElementOutOfRange;

/// Errors raised by [`Percolation`](crate::grid::Percolation) and
/// [`PercolationStats`](crate::experiment::PercolationStats).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PercolationError {
    /// A constructor or configuration value is out of its domain
    /// (non-positive grid size, trial count, worker count, or a
    /// confidence level outside `(0, 1)`).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A row, column, or element index falls outside its valid range.
    #[error("index {index} out of range {range:?}")]
    IndexOutOfRange { index: usize, range: Range<usize> },
}

impl From<ElementOutOfRange> for PercolationError {
    fn from(err: ElementOutOfRange) -> Self {
        PercolationError::IndexOutOfRange {
            index: err.index,
            range: 0..err.len,
        }
    }
}
