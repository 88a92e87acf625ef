//! Single-threaded DP cache.

use std::cell::RefCell;
use std::marker::PhantomData;

use super::backend::Backend;
use super::problem::{ClosureProblem, DpProblem};

/// Lazily evaluated, memoized DP table.
///
/// Values are computed on first [`get`](DpCache::get), after recursively
/// resolving their dependencies, and then served from the backend. The
/// backend sits in a `RefCell`, so lookups only need `&self`.
///
/// Dependency graphs must be acyclic; a cycle recurses without bound.
pub struct DpCache<I, K, B, P>
where
    B: Backend<I, K>,
    P: DpProblem<I, K>,
{
    backend: RefCell<B>,
    problem: P,
    _phantom: PhantomData<fn(&I) -> K>,
}

impl<I, K, B, P> DpCache<I, K, B, P>
where
    I: Clone,
    K: Clone,
    B: Backend<I, K>,
    P: DpProblem<I, K>,
{
    pub fn with_problem(backend: B, problem: P) -> Self {
        Self {
            backend: RefCell::new(backend),
            problem,
            _phantom: PhantomData,
        }
    }

    /// Value for `index`, computing it and its dependencies if needed.
    pub fn get(&self, index: &I) -> K {
        if let Some(value) = self.backend.borrow().get(index) {
            return value.clone();
        }

        // No borrow may be held across the recursive calls.
        let dep_values: Vec<K> = self
            .problem
            .deps(index)
            .iter()
            .map(|dep| self.get(dep))
            .collect();
        let value = self.problem.compute(index, dep_values);

        self.backend.borrow_mut().insert(index.clone(), value.clone());
        value
    }

    /// Number of indices computed so far
    pub fn computed(&self) -> usize {
        self.backend.borrow().len()
    }

    pub fn problem(&self) -> &P {
        &self.problem
    }
}

impl<I, K, B, D, C> DpCache<I, K, B, ClosureProblem<I, K, D, C>>
where
    I: Clone,
    K: Clone,
    B: Backend<I, K>,
    D: Fn(&I) -> Vec<I>,
    C: Fn(&I, Vec<K>) -> K,
{
    /// Closure-based constructor.
    ///
    /// ```rust
    /// use aoc_solutions::utils::dp_cache::{DpCache, VecBackend};
    ///
    /// let cache = DpCache::new(
    ///     VecBackend::new(),
    ///     |n: &usize| if *n == 0 { vec![] } else { vec![n - 1] },
    ///     |n: &usize, deps: Vec<u64>| if *n == 0 { 1 } else { *n as u64 * deps[0] },
    /// );
    /// assert_eq!(cache.get(&5), 120);
    /// ```
    pub fn new(backend: B, dep_fn: D, compute_fn: C) -> Self {
        Self::with_problem(backend, ClosureProblem::new(dep_fn, compute_fn))
    }
}
