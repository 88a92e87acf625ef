use anyhow::{anyhow, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::parse::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 1, tags = ["2024", "sorting"])]
pub struct Solver;

#[derive(Debug, Default)]
pub struct LocationLists {
    pub left: Vec<u64>,
    pub right: Vec<u64>,
}

impl AocParser for Solver {
    type SharedData<'a> = LocationLists;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let pairs = parse_lines(input, |line| {
            let ids = line
                .split_whitespace()
                .map(|id| id.parse::<u64>().map_err(|e| anyhow!("invalid id {id:?}: {e}")))
                .collect::<anyhow::Result<Vec<_>>>()?;
            ensure!(ids.len() == 2, "expected two ids, found {}", ids.len());
            Ok((ids[0], ids[1]))
        })?;
        let (left, right) = pairs.into_iter().unzip();
        Ok(LocationLists { left, right })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(total_distance(&shared.left, &shared.right).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(similarity(&shared.left, &shared.right).to_string())
    }
}

/// Sum of distances between the lists paired up smallest to largest.
pub fn total_distance(left: &[u64], right: &[u64]) -> u64 {
    left.iter()
        .sorted_unstable()
        .zip(right.iter().sorted_unstable())
        .map(|(a, b)| a.abs_diff(*b))
        .sum()
}

/// Each left id weighted by how often it appears on the right.
pub fn similarity(left: &[u64], right: &[u64]) -> u64 {
    let counts = right.iter().counts();
    left.iter()
        .map(|id| id * counts.get(id).copied().unwrap_or(0) as u64)
        .sum()
}
