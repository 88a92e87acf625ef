use std::collections::{HashSet, VecDeque};

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};
use crate::utils::grid::Grid;

const START: u8 = b'S';
const SPLITTER: u8 = b'^';

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 7, tags = ["2025", "grid", "dp"])]
pub struct Solver;

#[derive(Debug)]
pub struct Manifold {
    pub grid: Grid,
    pub start: (usize, usize),
}

impl AocParser for Solver {
    type SharedData<'a> = Manifold;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let grid = Grid::parse(input)?;
        let start = grid
            .find(START)
            .ok_or_else(|| ParseError::MissingData("no 'S' in manifold".into()))?;
        Ok(Manifold { grid, start })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_splits(&shared.grid, shared.start).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_timelines(&shared.grid, shared.start).to_string())
    }
}

/// Number of splitters reached by the beam entering at `start`.
///
/// Beams travel down; a splitter stops the beam and starts two new ones in
/// the next row, one column to either side. Cells already crossed by a beam
/// are not walked again, so merging beams count each splitter once.
pub fn count_splits(grid: &Grid, start: (usize, usize)) -> usize {
    let mut beams = VecDeque::from([start]);
    let mut visited = HashSet::new();
    let mut splits = 0;

    while let Some((mut row, col)) = beams.pop_front() {
        while row < grid.height() && visited.insert((row, col)) {
            if grid.get(row, col) == Some(SPLITTER) {
                splits += 1;
                if col > 0 {
                    beams.push_back((row + 1, col - 1));
                }
                if col + 1 < grid.width() {
                    beams.push_back((row + 1, col + 1));
                }
                break;
            }
            row += 1;
        }
    }
    splits
}

/// Ways out of the manifold from a cell; leaving the grid ends one timeline.
struct Timelines<'g> {
    grid: &'g Grid,
}

impl DpProblem<(usize, isize), u128> for Timelines<'_> {
    fn deps(&self, &(row, col): &(usize, isize)) -> Vec<(usize, isize)> {
        match self.grid.get_signed(row as isize, col) {
            None => vec![],
            Some(SPLITTER) => vec![(row + 1, col - 1), (row + 1, col + 1)],
            Some(_) => vec![(row + 1, col)],
        }
    }

    fn compute(&self, _cell: &(usize, isize), deps: Vec<u128>) -> u128 {
        if deps.is_empty() { 1 } else { deps.iter().sum() }
    }
}

/// Number of distinct paths a single particle can take from `start` out of
/// the grid, choosing a side at every splitter.
pub fn count_timelines(grid: &Grid, start: (usize, usize)) -> u128 {
    let cache = DpCache::with_problem(HashMapBackend::new(), Timelines { grid });
    cache.get(&(start.0, start.1 as isize))
}
