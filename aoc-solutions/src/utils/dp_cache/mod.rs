//! Memoizing cache for dynamic programming over a dependency DAG
//!
//! A [`DpProblem`] names, for every index, the indices it depends on and how
//! to combine their values. [`DpCache`] resolves dependencies on demand and
//! computes every index at most once.
//!
//! # Backends
//!
//! - [`VecBackend`]: dense `usize` indices, grows as needed
//! - [`HashMapBackend`]: any `Hash + Eq` index, for sparse or composite keys
//!
//! # Cycles
//!
//! There is no cycle detection. A dependency cycle recurses until the stack
//! overflows, so callers must only use this for acyclic dependency graphs.
//!
//! # Example
//!
//! ```rust
//! use aoc_solutions::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};
//!
//! /// Monotone lattice paths from (0, 0) to (r, c)
//! struct GridPaths;
//!
//! impl DpProblem<(usize, usize), u64> for GridPaths {
//!     fn deps(&self, &(r, c): &(usize, usize)) -> Vec<(usize, usize)> {
//!         match (r, c) {
//!             (0, _) | (_, 0) => vec![],
//!             _ => vec![(r - 1, c), (r, c - 1)],
//!         }
//!     }
//!
//!     fn compute(&self, _: &(usize, usize), deps: Vec<u64>) -> u64 {
//!         if deps.is_empty() { 1 } else { deps.iter().sum() }
//!     }
//! }
//!
//! let cache = DpCache::with_problem(HashMapBackend::new(), GridPaths);
//! assert_eq!(cache.get(&(4, 4)), 70);
//! ```

mod backend;
mod cache;
mod problem;

pub use backend::{Backend, HashMapBackend, VecBackend};
pub use cache::DpCache;
pub use problem::{ClosureProblem, DpProblem};

#[cfg(test)]
mod tests;
