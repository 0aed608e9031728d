//! The n-by-n site percolation model.
//!
//! Sites are addressed by 1-based `(row, col)` in `[1, n]` and stored at
//! linear index `(row - 1) * n + (col - 1)`. Open sites that are grid
//! neighbours share a union-find component.
//!
//! # Boundary tags
//!
//! Rather than wiring virtual top and bottom nodes into the union-find
//! (which makes every bottom-row site look full once the system
//! percolates, the "backwash" effect), each component root carries a
//! [`Boundary`] recording whether the component touches the top row
//! and/or the bottom row. Tags are OR-ed together on every union, so:
//!
//! - a site is full iff it is open and its root touches the top;
//! - the system percolates the moment some root touches both.

use crate::collections::UnionFind;
use crate::error::PercolationError;

/// Which grid edges a component reaches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Boundary {
    pub top: bool,
    pub bottom: bool,
}

impl Boundary {
    /// Union of two tag sets.
    pub fn merge(self, other: Boundary) -> Boundary {
        Boundary {
            top: self.top || other.top,
            bottom: self.bottom || other.bottom,
        }
    }

    /// Returns `true` if the component links the top row to the bottom row.
    pub fn spans(self) -> bool {
        self.top && self.bottom
    }
}

/// An n-by-n grid of sites, each either open or blocked.
///
/// # Examples
/// ```
/// use percolation::grid::Percolation;
///
/// let mut grid = Percolation::new(3).unwrap();
/// grid.open(1, 2).unwrap();
/// grid.open(2, 2).unwrap();
/// assert!(!grid.percolates());
/// grid.open(3, 2).unwrap();
/// assert!(grid.percolates());
/// assert!(grid.is_full(3, 2).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct Percolation {
    n: usize,
    open: Vec<bool>,
    /// Indexed by union-find root; entries of non-root sites are stale.
    boundary: Vec<Boundary>,
    uf: UnionFind,
    open_count: usize,
    percolated: bool,
}

impl Percolation {
    /// Creates an n-by-n grid with every site blocked.
    ///
    /// # Errors
    /// [`PercolationError::InvalidArgument`] if `n == 0` or `n * n`
    /// overflows `usize`.
    pub fn new(n: usize) -> Result<Self, PercolationError> {
        if n == 0 {
            return Err(PercolationError::InvalidArgument(
                "grid size n must be positive".into(),
            ));
        }
        let sites = n.checked_mul(n).ok_or_else(|| {
            PercolationError::InvalidArgument(format!("grid size {n} is too large"))
        })?;
        Ok(Self {
            n,
            open: vec![false; sites],
            boundary: vec![Boundary::default(); sites],
            uf: UnionFind::new(sites),
            open_count: 0,
            percolated: false,
        })
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.n
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, PercolationError> {
        for value in [row, col] {
            if value < 1 || value > self.n {
                return Err(PercolationError::IndexOutOfRange {
                    index: value,
                    range: 1..self.n + 1,
                });
            }
        }
        Ok((row - 1) * self.n + (col - 1))
    }

    /// Linear indices of the in-bounds neighbours of `(row, col)`, which
    /// must already be validated.
    fn neighbours(&self, row: usize, col: usize) -> [Option<usize>; 4] {
        let n = self.n;
        let up = (row > 1).then(|| (row - 2) * n + (col - 1));
        let down = (row < n).then(|| row * n + (col - 1));
        let left = (col > 1).then(|| (row - 1) * n + (col - 2));
        let right = (col < n).then(|| (row - 1) * n + col);
        [up, down, left, right]
    }

    /// Opens the site at `(row, col)` if it is not open already.
    ///
    /// Re-opening an open site does not change the open count, but the
    /// boundary tags and neighbour unions are still re-applied.
    ///
    /// # Errors
    /// [`PercolationError::IndexOutOfRange`] if `row` or `col` is outside
    /// `[1, n]`.
    pub fn open(&mut self, row: usize, col: usize) -> Result<(), PercolationError> {
        let p = self.index(row, col)?;
        if !self.open[p] {
            self.open[p] = true;
            self.open_count += 1;
        }

        let root = self.uf.find(p)?;
        if row == 1 {
            self.boundary[root].top = true;
        }
        if row == self.n {
            self.boundary[root].bottom = true;
        }

        for q in self.neighbours(row, col).into_iter().flatten() {
            if !self.open[q] {
                continue;
            }
            let root_p = self.uf.find(p)?;
            let root_q = self.uf.find(q)?;
            let tags = self.boundary[root_p].merge(self.boundary[root_q]);
            self.uf.union(p, q)?;
            self.boundary[root_p] = tags;
            self.boundary[root_q] = tags;
        }

        let root = self.uf.find(p)?;
        if !self.percolated && self.boundary[root].spans() {
            self.percolated = true;
            tracing::trace!(n = self.n, row, col, open = self.open_count, "grid percolates");
        }
        Ok(())
    }

    /// Is the site at `(row, col)` open?
    pub fn is_open(&self, row: usize, col: usize) -> Result<bool, PercolationError> {
        let p = self.index(row, col)?;
        Ok(self.open[p])
    }

    /// Is the site at `(row, col)` full, i.e. open and joined to the top
    /// row through a chain of open sites?
    ///
    /// Takes `&mut self` because the root lookup compresses paths.
    pub fn is_full(&mut self, row: usize, col: usize) -> Result<bool, PercolationError> {
        let p = self.index(row, col)?;
        if !self.open[p] {
            return Ok(false);
        }
        let root = self.uf.find(p)?;
        Ok(self.boundary[root].top)
    }

    /// Number of open sites.
    pub fn number_of_open_sites(&self) -> usize {
        self.open_count
    }

    /// Does the system percolate? Once `true`, stays `true`.
    pub fn percolates(&self) -> bool {
        self.percolated
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn full_implies_open_and_percolation_is_monotonic(
            n in 1_usize..8,
            sites in proptest::collection::vec((1_usize..8, 1_usize..8), 0..80),
        ) {
            let mut grid = Percolation::new(n).unwrap();
            let mut was_percolating = false;
            for &(row, col) in &sites {
                if row > n || col > n {
                    continue;
                }
                grid.open(row, col).unwrap();
                prop_assert!(!was_percolating || grid.percolates());
                was_percolating = grid.percolates();
            }
            let mut open = 0;
            for row in 1..=n {
                for col in 1..=n {
                    let is_open = grid.is_open(row, col).unwrap();
                    if grid.is_full(row, col).unwrap() {
                        prop_assert!(is_open);
                    }
                    open += usize::from(is_open);
                }
            }
            prop_assert_eq!(open, grid.number_of_open_sites());
        }

        #[test]
        fn fully_open_grid_percolates(n in 1_usize..10) {
            let mut grid = Percolation::new(n).unwrap();
            for row in 1..=n {
                for col in 1..=n {
                    grid.open(row, col).unwrap();
                }
            }
            prop_assert!(grid.percolates());
            prop_assert_eq!(grid.number_of_open_sites(), n * n);
        }
    }
}
