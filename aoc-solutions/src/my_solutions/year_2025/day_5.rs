use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 5, tags = ["2025", "intervals"])]
pub struct Solver;

/// Inclusive range of fresh ingredient ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FreshRange {
    pub start: u64,
    pub end: u64,
}

impl FreshRange {
    pub fn contains(&self, id: u64) -> bool {
        (self.start..=self.end).contains(&id)
    }
}

#[derive(Debug)]
pub struct Inventory {
    pub fresh: Vec<FreshRange>,
    pub available: Vec<u64>,
}

impl AocParser for Solver {
    type SharedData<'a> = Inventory;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let input = input.replace("\r\n", "\n");
        let (ranges, ids) = input
            .trim_start_matches('\n')
            .split_once("\n\n")
            .ok_or_else(|| ParseError::MissingData("blank line between ranges and ids".into()))?;

        let fresh = parse_lines(ranges, |line| {
            let (start, end) = line
                .trim()
                .split_once('-')
                .ok_or_else(|| anyhow!("expected start-end, got {line:?}"))?;
            let range = FreshRange {
                start: start.parse()?,
                end: end.parse()?,
            };
            if range.start > range.end {
                return Err(anyhow!("range {line} is reversed"));
            }
            Ok(range)
        })?;

        // Line numbers in the id section are relative to that section.
        let available = parse_lines(ids, |line| Ok(line.trim().parse()?))?;

        Ok(Inventory { fresh, available })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_fresh(&shared.fresh, &shared.available).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u64 = merge_ranges(&shared.fresh)
            .iter()
            .map(|r| r.end - r.start + 1)
            .sum();
        Ok(total.to_string())
    }
}

pub fn count_fresh(fresh: &[FreshRange], ids: &[u64]) -> usize {
    ids.iter()
        .filter(|&&id| fresh.iter().any(|r| r.contains(id)))
        .count()
}

/// Sorted, disjoint, non-adjacent ranges covering the same ids as `ranges`.
pub fn merge_ranges(ranges: &[FreshRange]) -> Vec<FreshRange> {
    let mut sorted = ranges.to_vec();
    sorted.sort_unstable();

    let mut merged: Vec<FreshRange> = Vec::with_capacity(sorted.len());
    for range in sorted {
        match merged.last_mut() {
            Some(last) if range.start <= last.end.saturating_add(1) => {
                last.end = last.end.max(range.end);
            }
            _ => merged.push(range),
        }
    }
    merged
}
