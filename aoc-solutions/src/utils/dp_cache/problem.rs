//! Problem definitions for [`DpCache`](super::DpCache).

use std::marker::PhantomData;

/// Dependency structure and combine step of a DP problem.
///
/// `I` is the index type, `K` the value stored per index.
pub trait DpProblem<I, K> {
    /// Indices `index` depends on; empty for base cases.
    fn deps(&self, index: &I) -> Vec<I>;

    /// Value for `index`, given the values of `deps(index)` in the same order.
    fn compute(&self, index: &I, deps: Vec<K>) -> K;
}

/// Adapts a pair of closures to [`DpProblem`].
///
/// ```rust
/// use aoc_solutions::utils::dp_cache::{ClosureProblem, DpCache, VecBackend};
///
/// let fib = ClosureProblem::new(
///     |n: &usize| if *n < 2 { vec![] } else { vec![n - 1, n - 2] },
///     |n: &usize, deps: Vec<u64>| if *n < 2 { *n as u64 } else { deps[0] + deps[1] },
/// );
/// let cache = DpCache::with_problem(VecBackend::new(), fib);
/// assert_eq!(cache.get(&20), 6765);
/// ```
pub struct ClosureProblem<I, K, D, C>
where
    D: Fn(&I) -> Vec<I>,
    C: Fn(&I, Vec<K>) -> K,
{
    dep_fn: D,
    compute_fn: C,
    _phantom: PhantomData<fn(&I) -> K>,
}

impl<I, K, D, C> ClosureProblem<I, K, D, C>
where
    D: Fn(&I) -> Vec<I>,
    C: Fn(&I, Vec<K>) -> K,
{
    pub fn new(dep_fn: D, compute_fn: C) -> Self {
        Self {
            dep_fn,
            compute_fn,
            _phantom: PhantomData,
        }
    }
}

impl<I, K, D, C> DpProblem<I, K> for ClosureProblem<I, K, D, C>
where
    D: Fn(&I) -> Vec<I>,
    C: Fn(&I, Vec<K>) -> K,
{
    fn deps(&self, index: &I) -> Vec<I> {
        (self.dep_fn)(index)
    }

    fn compute(&self, index: &I, deps: Vec<K>) -> K {
        (self.compute_fn)(index, deps)
    }
}
