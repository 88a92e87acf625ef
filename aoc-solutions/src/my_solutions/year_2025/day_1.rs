use std::str::FromStr;

use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::parse_lines;

/// Number of positions on the dial
pub const DIAL_SIZE: i64 = 100;
pub const START_POSITION: i64 = 50;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 1, tags = ["2025", "simulation"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rotation {
    pub direction: Direction,
    pub steps: u32,
}

impl FromStr for Rotation {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        if line.len() < 2 {
            bail!("expected a direction followed by a step count, got {line:?}");
        }
        let direction = match line.as_bytes()[0] {
            b'L' => Direction::Left,
            b'R' => Direction::Right,
            _ => bail!("first character needs to be 'L' or 'R'"),
        };
        let steps = line[1..]
            .parse::<u32>()
            .map_err(|e| anyhow!("invalid step count {:?}: {}", &line[1..], e))?;
        Ok(Rotation { direction, steps })
    }
}

impl Rotation {
    /// Apply this rotation at `position`, returning the new position and how
    /// many times the dial pointed at 0 along the way (the final click included).
    pub fn apply(self, position: i64) -> (i64, u64) {
        let steps = i64::from(self.steps);
        match self.direction {
            Direction::Right => {
                let end = position + steps;
                // multiples of DIAL_SIZE in (position, end]
                let passes = end.div_euclid(DIAL_SIZE) - position.div_euclid(DIAL_SIZE);
                (end.rem_euclid(DIAL_SIZE), passes as u64)
            }
            Direction::Left => {
                let end = position - steps;
                // multiples of DIAL_SIZE in [end, position)
                let passes =
                    (position - 1).div_euclid(DIAL_SIZE) - (end - 1).div_euclid(DIAL_SIZE);
                (end.rem_euclid(DIAL_SIZE), passes as u64)
            }
        }
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Rotation>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, Rotation::from_str)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_zero_landings(shared).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_zero_crossings(shared).to_string())
    }
}

/// Number of rotations that leave the dial at 0. Rotations of zero steps
/// never count.
pub fn count_zero_landings(rotations: &[Rotation]) -> u64 {
    rotations
        .iter()
        .scan(START_POSITION, |position, rotation| {
            *position = rotation.apply(*position).0;
            Some(rotation.steps > 0 && *position == 0)
        })
        .filter(|&landed| landed)
        .count() as u64
}

/// Number of clicks, across all rotations, that leave the dial pointing at 0.
pub fn count_zero_crossings(rotations: &[Rotation]) -> u64 {
    rotations
        .iter()
        .fold((START_POSITION, 0), |(position, total), rotation| {
            let (next, passes) = rotation.apply(position);
            (next, total + passes)
        })
        .1
}
