use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::Grid;

const ROLL: u8 = b'@';
const EMPTY: u8 = b'.';
/// A roll is reachable by forklift when fewer than this many rolls surround it
const CROWDED: usize = 4;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 4, tags = ["2025", "grid"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Grid;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let grid = Grid::parse(input)?;
        if let Some((r, c)) = grid
            .positions()
            .find(|&(r, c)| !matches!(grid.get(r, c), Some(ROLL | EMPTY)))
        {
            return Err(ParseError::InvalidFormat(format!(
                "(line {}) unexpected character at column {}",
                r + 1,
                c + 1
            )));
        }
        Ok(grid)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(accessible_rolls(shared).len().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(remove_all_accessible(shared.clone()).to_string())
    }
}

/// Positions of rolls with fewer than four neighbouring rolls
pub fn accessible_rolls(grid: &Grid) -> Vec<(usize, usize)> {
    grid.positions()
        .filter(|&(r, c)| grid.get(r, c) == Some(ROLL))
        .filter(|&(r, c)| grid.neighbours(r, c).filter(|&n| n == ROLL).count() < CROWDED)
        .collect()
}

/// Remove accessible rolls in rounds until none are left; returns how many
/// were removed in total.
pub fn remove_all_accessible(mut grid: Grid) -> usize {
    let mut removed = 0;
    loop {
        let round = accessible_rolls(&grid);
        if round.is_empty() {
            return removed;
        }
        removed += round.len();
        for (r, c) in round {
            grid.set(r, c, EMPTY);
        }
    }
}
