use std::ops::RangeInclusive;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 2, tags = ["2025", "digits", "brute-force"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<RangeInclusive<u64>>;

    /// Malformed tokens, negative bounds and reversed ranges are dropped
    /// without an error.
    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Ok(input.split(',').filter_map(parse_range).collect())
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(sum_matching(shared, has_repeating_halves).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(sum_matching(shared, has_repeating_pattern).to_string())
    }
}

fn parse_range(token: &str) -> Option<RangeInclusive<u64>> {
    let token = token.trim();
    // The separator can't be the first character, which would be a sign.
    let (dash, _) = token.char_indices().skip(1).find(|&(_, c)| c == '-')?;
    let start: u64 = token[..dash].parse().ok()?;
    let end: u64 = token[dash + 1..].parse().ok()?;
    (start <= end).then_some(start..=end)
}

/// Even digit count, and the first half repeated once gives the number.
pub fn has_repeating_halves(n: u64) -> bool {
    let digits = n.to_string();
    let len = digits.len();
    len % 2 == 0 && !digits.starts_with('0') && digits[..len / 2] == digits[len / 2..]
}

/// The number is some block of digits repeated at least twice.
pub fn has_repeating_pattern(n: u64) -> bool {
    let digits = n.to_string();
    let bytes = digits.as_bytes();
    let len = bytes.len();
    if bytes[0] == b'0' {
        return false;
    }
    (1..=len / 2)
        .filter(|block| len % block == 0)
        .any(|block| bytes.chunks(block).all(|chunk| chunk == &bytes[..block]))
}

/// Sum of every id in every range accepted by `predicate`.
pub fn sum_matching(ranges: &[RangeInclusive<u64>], predicate: impl Fn(u64) -> bool) -> u64 {
    ranges
        .iter()
        .flat_map(|range| range.clone())
        .filter(|&id| predicate(id))
        .sum()
}
