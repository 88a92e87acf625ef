//! Solver traits: parsing, per-part solving, and part dispatch

use crate::error::{ParseError, SolveError};

/// Parses puzzle input into the data every part of a day works on.
///
/// `SharedData` is generic over the input lifetime, so a day may keep
/// `&'a str` slices of the input instead of copying them.
///
/// ```
/// use aoc_solver::{AocParser, ParseError};
///
/// struct Lines;
///
/// impl AocParser for Lines {
///     type SharedData<'a> = Vec<&'a str>;
///
///     fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
///         Ok(input.lines().collect())
///     }
/// }
///
/// assert_eq!(Lines::parse("a\nb").unwrap(), vec!["a", "b"]);
/// ```
pub trait AocParser {
    type SharedData<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError>;
}

/// Solves part `N` of a puzzle.
///
/// Parts receive the shared data mutably; a part may cache intermediate
/// results in it for a later part to pick up.
pub trait PartSolver<const N: u8>: AocParser {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError>;
}

/// A complete solver for one year/day.
///
/// Usually generated by `#[derive(AocSolver)]`, which dispatches `part` to
/// the matching [`PartSolver`] impl.
pub trait Solver: AocParser {
    /// Number of parts this solver implements
    const PARTS: u8;

    /// Solve `part` (1-based).
    ///
    /// Returns [`SolveError::PartNotImplemented`] for parts the solver doesn't
    /// dispatch.
    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError>;
}

/// Range-checked part dispatch, available on every [`Solver`].
pub trait SolverExt: Solver {
    /// Like [`Solver::solve_part`], but rejects parts outside `1..=PARTS`
    /// with [`SolveError::PartOutOfRange`] before dispatching.
    fn solve_part_checked_range(
        shared: &mut Self::SharedData<'_>,
        part: u8,
    ) -> Result<String, SolveError> {
        if (1..=Self::PARTS).contains(&part) {
            Self::solve_part(shared, part)
        } else {
            Err(SolveError::PartOutOfRange(part))
        }
    }
}

impl<T: Solver + ?Sized> SolverExt for T {}
