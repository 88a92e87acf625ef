//! Tests for the DP cache module.

use std::cell::Cell;
use std::rc::Rc;

use proptest::prelude::*;

use super::*;

struct Fibonacci;

impl DpProblem<usize, u64> for Fibonacci {
    fn deps(&self, n: &usize) -> Vec<usize> {
        if *n < 2 { vec![] } else { vec![n - 1, n - 2] }
    }

    fn compute(&self, n: &usize, deps: Vec<u64>) -> u64 {
        if *n < 2 { *n as u64 } else { deps[0] + deps[1] }
    }
}

/// Collatz stopping time, keyed sparsely.
struct Collatz;

impl DpProblem<u64, u32> for Collatz {
    fn deps(&self, n: &u64) -> Vec<u64> {
        match *n {
            0 | 1 => vec![],
            n if n % 2 == 0 => vec![n / 2],
            n => vec![3 * n + 1],
        }
    }

    fn compute(&self, _n: &u64, deps: Vec<u32>) -> u32 {
        deps.first().map_or(0, |d| d + 1)
    }
}

#[test]
fn fibonacci_chain() {
    let cache = DpCache::with_problem(VecBackend::new(), Fibonacci);
    assert_eq!(cache.get(&0), 0);
    assert_eq!(cache.get(&1), 1);
    assert_eq!(cache.get(&10), 55);
    assert_eq!(cache.get(&50), 12_586_269_025);
    assert_eq!(cache.computed(), 51);
}

#[test]
fn collatz_with_sparse_keys() {
    let cache = DpCache::with_problem(HashMapBackend::new(), Collatz);
    assert_eq!(cache.get(&1), 0);
    assert_eq!(cache.get(&6), 8);
    assert_eq!(cache.get(&27), 111);
}

#[test]
fn diamond_computes_shared_dependency_once() {
    // 0 -> {1, 2}, 1 -> 3, 2 -> 3
    struct Diamond {
        calls: Rc<Cell<u32>>,
    }

    impl DpProblem<usize, i64> for Diamond {
        fn deps(&self, n: &usize) -> Vec<usize> {
            match *n {
                0 => vec![1, 2],
                1 | 2 => vec![3],
                _ => vec![],
            }
        }

        fn compute(&self, n: &usize, deps: Vec<i64>) -> i64 {
            self.calls.set(self.calls.get() + 1);
            match *n {
                0 => deps[0] + deps[1],
                1 => deps[0] * 2,
                2 => deps[0] * 3,
                _ => 7,
            }
        }
    }

    let calls = Rc::new(Cell::new(0));
    let cache = DpCache::with_problem(
        VecBackend::new(),
        Diamond {
            calls: Rc::clone(&calls),
        },
    );

    assert_eq!(cache.get(&0), 35);
    assert_eq!(calls.get(), 4);
    assert_eq!(cache.get(&0), 35);
    assert_eq!(cache.get(&3), 7);
    assert_eq!(calls.get(), 4);
}

#[test]
fn closure_problem_matches_trait_problem() {
    let closures = DpCache::new(
        VecBackend::new(),
        |n: &usize| if *n < 2 { vec![] } else { vec![n - 1, n - 2] },
        |n: &usize, deps: Vec<u64>| if *n < 2 { *n as u64 } else { deps[0] + deps[1] },
    );
    let by_trait = DpCache::with_problem(VecBackend::new(), Fibonacci);

    for n in 0..40 {
        assert_eq!(closures.get(&n), by_trait.get(&n));
    }
}

#[test]
fn backends_track_length() {
    let mut vec = VecBackend::with_capacity(4);
    assert!(vec.is_empty());
    vec.insert(5, "five");
    vec.insert(5, "FIVE");
    vec.insert(0, "zero");
    assert_eq!(vec.len(), 2);
    assert_eq!(vec.get(&5), Some(&"FIVE"));
    assert_eq!(vec.get(&3), None);
    assert_eq!(vec.get(&99), None);

    let mut map = HashMapBackend::new();
    map.insert("k", 1);
    assert_eq!(Backend::get(&map, &"k"), Some(&1));
    assert_eq!(Backend::get(&map, &"missing"), None);
    assert_eq!(map.len(), 1);
}

fn naive_fib(n: usize) -> u64 {
    let (mut a, mut b) = (0u64, 1u64);
    for _ in 0..n {
        (a, b) = (b, a + b);
    }
    a
}

proptest! {
    #[test]
    fn fibonacci_matches_iterative(n in 0usize..90) {
        let cache = DpCache::with_problem(VecBackend::new(), Fibonacci);
        prop_assert_eq!(cache.get(&n), naive_fib(n));
    }

    #[test]
    fn lookup_order_does_not_change_values(order in prop::collection::vec(0usize..60, 1..20)) {
        let cache = DpCache::with_problem(HashMapBackend::new(), ClosureProblem::new(
            |n: &usize| if *n < 2 { vec![] } else { vec![n - 1, n - 2] },
            |n: &usize, deps: Vec<u64>| if *n < 2 { *n as u64 } else { deps[0] + deps[1] },
        ));
        for n in order {
            prop_assert_eq!(cache.get(&n), naive_fib(n));
        }
    }
}
