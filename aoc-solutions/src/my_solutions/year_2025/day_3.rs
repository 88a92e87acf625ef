use std::cmp::Reverse;

use anyhow::bail;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 3, tags = ["2025", "greedy"])]
pub struct Solver;

/// Battery joltage ratings of one bank, one digit per battery
pub type Bank = Vec<u8>;

impl AocParser for Solver {
    type SharedData<'a> = Vec<Bank>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| {
            let line = line.trim();
            if let Some(c) = line.chars().find(|c| !c.is_ascii_digit()) {
                bail!("unexpected character {c:?} in battery bank");
            }
            Ok(line.bytes().map(|b| b - b'0').collect())
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        total_joltage(shared, 2).map(|total| total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        total_joltage(shared, 12).map(|total| total.to_string())
    }
}

/// Largest number formed by `picks` digits of `bank`, keeping their order.
///
/// Each output digit is the leftmost maximum among the positions that still
/// leave enough batteries for the remaining picks. `None` if the bank has
/// fewer than `picks` batteries.
pub fn max_joltage(bank: &[u8], picks: usize) -> Option<u64> {
    if bank.len() < picks {
        return None;
    }
    let mut value = 0u64;
    let mut start = 0;
    for remaining in (0..picks).rev() {
        let window = &bank[start..bank.len() - remaining];
        let (offset, &digit) = window
            .iter()
            .enumerate()
            .max_by_key(|&(i, &d)| (d, Reverse(i)))?;
        value = value * 10 + u64::from(digit);
        start += offset + 1;
    }
    Some(value)
}

pub fn total_joltage(banks: &[Bank], picks: usize) -> Result<u64, SolveError> {
    banks.iter().enumerate().try_fold(0u64, |total, (idx, bank)| {
        let joltage = max_joltage(bank, picks).ok_or_else(|| {
            SolveError::failed(format!(
                "bank {} has {} batteries, {} needed",
                idx + 1,
                bank.len(),
                picks
            ))
        })?;
        Ok(total + joltage)
    })
}
