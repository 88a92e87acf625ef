use std::collections::HashMap;

use anyhow::{anyhow, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::dp_cache::{DpCache, HashMapBackend, VecBackend};
use crate::utils::parse::parse_lines;

const YOU: &str = "you";
const SERVER: &str = "svr";
const OUT: &str = "out";
const REQUIRED: [&str; 2] = ["dac", "fft"];

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 11, tags = ["2025", "graph", "dp"])]
pub struct Solver;

/// Directed device graph with names interned to dense ids
#[derive(Debug, Default)]
pub struct DeviceGraph<'a> {
    names: Vec<&'a str>,
    ids: HashMap<&'a str, usize>,
    outputs: Vec<Vec<usize>>,
}

impl<'a> DeviceGraph<'a> {
    fn intern(&mut self, name: &'a str) -> usize {
        *self.ids.entry(name).or_insert_with(|| {
            self.names.push(name);
            self.outputs.push(Vec::new());
            self.names.len() - 1
        })
    }

    pub fn id(&self, name: &str) -> Option<usize> {
        self.ids.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Name of some device on a cycle, if there is one
    fn find_cycle(&self) -> Option<&'a str> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            New,
            Active,
            Done,
        }

        let mut marks = vec![Mark::New; self.len()];
        for root in 0..self.len() {
            if marks[root] != Mark::New {
                continue;
            }
            marks[root] = Mark::Active;
            let mut stack = vec![(root, 0)];
            while let Some((node, next)) = stack.pop() {
                let Some(&child) = self.outputs[node].get(next) else {
                    marks[node] = Mark::Done;
                    continue;
                };
                stack.push((node, next + 1));
                match marks[child] {
                    Mark::Active => return Some(self.names[child]),
                    Mark::New => {
                        marks[child] = Mark::Active;
                        stack.push((child, 0));
                    }
                    Mark::Done => {}
                }
            }
        }
        None
    }
}

impl AocParser for Solver {
    type SharedData<'a> = DeviceGraph<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let lines = parse_lines(input, |line| {
            let (device, outputs) = line
                .split_once(':')
                .ok_or_else(|| anyhow!("expected 'name: outputs'"))?;
            let device = device.trim();
            ensure!(!device.is_empty(), "missing device name");
            Ok((device, outputs.split_whitespace().collect::<Vec<_>>()))
        })?;

        let mut graph = DeviceGraph::default();
        for (device, outputs) in lines {
            let id = graph.intern(device);
            for output in outputs {
                let out = graph.intern(output);
                graph.outputs[id].push(out);
            }
        }

        if let Some(name) = graph.find_cycle() {
            return Err(ParseError::InvalidFormat(format!(
                "device graph has a cycle through {name}"
            )));
        }
        Ok(graph)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_paths(shared, YOU, OUT).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_paths_via(shared, SERVER, OUT, &REQUIRED).to_string())
    }
}

/// Number of distinct paths from `from` to `to`; 0 if either is unknown.
pub fn count_paths(graph: &DeviceGraph, from: &str, to: &str) -> u64 {
    let (Some(from), Some(to)) = (graph.id(from), graph.id(to)) else {
        return 0;
    };
    let cache = DpCache::new(
        VecBackend::with_capacity(graph.len()),
        |&node: &usize| {
            if node == to {
                vec![]
            } else {
                graph.outputs[node].clone()
            }
        },
        |&node: &usize, deps: Vec<u64>| if node == to { 1 } else { deps.iter().sum() },
    );
    cache.get(&from)
}

/// Number of paths from `from` to `to` passing through every device in
/// `via`, in any order.
pub fn count_paths_via(graph: &DeviceGraph, from: &str, to: &str, via: &[&str]) -> u64 {
    let (Some(from), Some(to)) = (graph.id(from), graph.id(to)) else {
        return 0;
    };
    let Some(required) = via.iter().map(|name| graph.id(name)).collect::<Option<Vec<_>>>() else {
        return 0;
    };
    let bit = |node: usize| -> u32 {
        required
            .iter()
            .enumerate()
            .filter(|&(_, &r)| r == node)
            .fold(0, |mask, (i, _)| mask | 1 << i)
    };
    let all = (1u32 << required.len()) - 1;

    let cache = DpCache::new(
        HashMapBackend::new(),
        |&(node, seen): &(usize, u32)| {
            if node == to {
                return vec![];
            }
            graph.outputs[node]
                .iter()
                .map(|&next| (next, seen | bit(next)))
                .collect()
        },
        |&(node, seen): &(usize, u32), deps: Vec<u64>| {
            if node == to {
                u64::from(seen == all)
            } else {
                deps.iter().sum()
            }
        },
    );
    cache.get(&(from, bit(from)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_PART1: &str = "aaa: you hhh
you: bbb ccc
bbb: ddd eee
ccc: ddd eee fff
ddd: ggg
eee: out
fff: out
ggg: out
hhh: ccc fff iii
iii: out
";

    const EXAMPLE_PART2: &str = "svr: aaa bbb
aaa: fft
fft: ccc
bbb: tty
tty: ccc
ccc: ddd eee
ddd: hub
hub: fff
eee: dac
dac: fff
fff: ggg hhh
ggg: out
hhh: out
";

    #[test]
    fn example() {
        let mut graph = Solver::parse(EXAMPLE_PART1).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut graph).unwrap(), "5");

        let mut graph = Solver::parse(EXAMPLE_PART2).unwrap();
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut graph).unwrap(), "2");
    }

    #[test]
    fn unknown_endpoints_have_no_paths() {
        let graph = Solver::parse(EXAMPLE_PART2).unwrap();
        assert_eq!(count_paths(&graph, YOU, OUT), 0);

        let graph = Solver::parse(EXAMPLE_PART1).unwrap();
        assert_eq!(count_paths_via(&graph, SERVER, OUT, &REQUIRED), 0);
        assert_eq!(count_paths_via(&graph, YOU, OUT, &["nope"]), 0);
    }

    #[test]
    fn without_required_devices_all_paths_count() {
        let graph = Solver::parse(EXAMPLE_PART2).unwrap();
        assert_eq!(count_paths(&graph, SERVER, OUT), 8);
        assert_eq!(count_paths_via(&graph, SERVER, OUT, &[]), 8);
        assert_eq!(count_paths_via(&graph, SERVER, OUT, &["fft"]), 4);
    }

    #[test]
    fn start_counts_as_visited() {
        let graph = Solver::parse("dac: a b\na: out\nb: out").unwrap();
        assert_eq!(count_paths_via(&graph, "dac", OUT, &["dac"]), 2);
    }

    #[test]
    fn rejects_cycles() {
        let err = Solver::parse("a: b\nb: c\nc: a").unwrap_err();
        assert!(err.to_string().contains("cycle"), "{err}");
    }

    #[test]
    fn rejects_lines_without_colon() {
        assert_eq!(
            Solver::parse("a: b\nb c").unwrap_err(),
            ParseError::InvalidFormat("(line 2) expected 'name: outputs'".into())
        );
    }
}
