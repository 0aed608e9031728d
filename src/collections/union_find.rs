//! Disjoint-set (Union-Find) data structure.
//!
//! Maintains a collection of disjoint sets over elements `0..n` with
//! near-constant-time union and find operations.
//!
//! # Algorithm
//!
//! Weighted quick-union: `union` hangs the root of the smaller tree under
//! the root of the larger one (by element count). `find` applies **path
//! compression**, pointing every node it visits directly at the root.
//! Together they give amortized O(α(n)) per operation.
//!
//! # References
//!
//! - Tarjan (1975), "Efficiency of a Good but Not Linear Set Union Algorithm"
//! - Sedgewick & Wayne (2011), *Algorithms* 4th ed., §1.5

/// An element index passed to [`UnionFind`] was not in `0..len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("element {index} out of range for union-find of {len} elements")]
pub struct ElementOutOfRange {
    pub index: usize,
    pub len: usize,
}

/// Disjoint-set forest with path compression and union by size.
///
/// Every operation validates its arguments and returns
/// [`ElementOutOfRange`] instead of panicking.
///
/// # Examples
/// ```
/// use percolation::collections::UnionFind;
///
/// let mut uf = UnionFind::new(5);
/// uf.union(0, 1).unwrap();
/// uf.union(2, 3).unwrap();
/// assert!(uf.connected(0, 1).unwrap());
/// assert!(!uf.connected(0, 2).unwrap());
/// assert_eq!(uf.component_count(), 3);
/// assert!(uf.find(7).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
    components: usize,
}

impl UnionFind {
    /// Creates `n` singleton sets `{0}, {1}, ..., {n-1}`.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
            components: n,
        }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns `true` if there are no elements.
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    fn check(&self, x: usize) -> Result<(), ElementOutOfRange> {
        if x < self.parent.len() {
            Ok(())
        } else {
            Err(ElementOutOfRange {
                index: x,
                len: self.parent.len(),
            })
        }
    }

    /// Returns the representative (root) of the set containing `x`.
    ///
    /// Two passes: walk up to the root, then walk again re-pointing every
    /// visited node at it. Iterative, so deep chains cannot overflow the
    /// stack on large grids.
    pub fn find(&mut self, x: usize) -> Result<usize, ElementOutOfRange> {
        self.check(x)?;
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        Ok(root)
    }

    /// Merges the sets containing `x` and `y`.
    ///
    /// The smaller set's root is attached under the larger set's root; on
    /// a tie `x`'s root absorbs `y`'s.
    ///
    /// # Returns
    /// `true` if the sets were distinct and are now merged, `false` if
    /// `x` and `y` already shared a root.
    pub fn union(&mut self, x: usize, y: usize) -> Result<bool, ElementOutOfRange> {
        let root_x = self.find(x)?;
        let root_y = self.find(y)?;

        if root_x == root_y {
            return Ok(false);
        }

        let (small, large) = if self.size[root_x] < self.size[root_y] {
            (root_x, root_y)
        } else {
            (root_y, root_x)
        };
        self.parent[small] = large;
        self.size[large] += self.size[small];

        self.components -= 1;
        Ok(true)
    }

    /// Returns `true` if `x` and `y` are in the same set.
    pub fn connected(&mut self, x: usize, y: usize) -> Result<bool, ElementOutOfRange> {
        Ok(self.find(x)? == self.find(y)?)
    }

    /// Returns the number of disjoint sets.
    pub fn component_count(&self) -> usize {
        self.components
    }

    /// Returns the size of the set containing `x`.
    pub fn component_size(&mut self, x: usize) -> Result<usize, ElementOutOfRange> {
        let root = self.find(x)?;
        Ok(self.size[root])
    }
}
