//! General-purpose data structures.

pub mod union_find;

pub use union_find::{ElementOutOfRange, UnionFind};
