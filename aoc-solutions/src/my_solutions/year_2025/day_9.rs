use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::parse::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 9, tags = ["2025", "geometry"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub x: i64,
    pub y: i64,
}

/// Axis-aligned rectangle spanned by two red tiles, bounds inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rect {
    min_x: i64,
    max_x: i64,
    min_y: i64,
    max_y: i64,
}

impl Rect {
    /// `None` when the tiles share a row or column.
    fn spanning(a: Tile, b: Tile) -> Option<Self> {
        (a.x != b.x && a.y != b.y).then(|| Rect {
            min_x: a.x.min(b.x),
            max_x: a.x.max(b.x),
            min_y: a.y.min(b.y),
            max_y: a.y.max(b.y),
        })
    }

    fn area(&self) -> i64 {
        (self.max_x - self.min_x + 1) * (self.max_y - self.min_y + 1)
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Tile>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| {
            let (x, y) = line
                .trim()
                .split_once(',')
                .ok_or_else(|| anyhow!("expected x,y, got {line:?}"))?;
            Ok(Tile {
                x: x.trim().parse()?,
                y: y.trim().parse()?,
            })
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(largest_rectangle(shared).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(largest_rectangle_inside(shared).to_string())
    }
}

fn rectangles(tiles: &[Tile]) -> impl Iterator<Item = Rect> + '_ {
    tiles
        .iter()
        .tuple_combinations()
        .filter_map(|(&a, &b)| Rect::spanning(a, b))
}

/// Largest area of a rectangle with red tiles at two opposite corners.
pub fn largest_rectangle(tiles: &[Tile]) -> i64 {
    rectangles(tiles).map(|r| r.area()).max().unwrap_or(0)
}

/// Like [`largest_rectangle`], but the rectangle must lie within the loop
/// the tiles trace, in order, with axis-aligned edges.
pub fn largest_rectangle_inside(tiles: &[Tile]) -> i64 {
    let edges: Vec<(Tile, Tile)> = tiles.iter().copied().circular_tuple_windows().collect();
    rectangles(tiles)
        .filter(|rect| !crosses_interior(&edges, rect) && centre_inside(&edges, rect))
        .map(|r| r.area())
        .max()
        .unwrap_or(0)
}

/// Whether any edge passes through the open interior of `rect`.
fn crosses_interior(edges: &[(Tile, Tile)], rect: &Rect) -> bool {
    edges.iter().any(|&(a, b)| {
        if a.x == b.x {
            let (lo, hi) = (a.y.min(b.y), a.y.max(b.y));
            rect.min_x < a.x && a.x < rect.max_x && lo.max(rect.min_y) < hi.min(rect.max_y)
        } else {
            let (lo, hi) = (a.x.min(b.x), a.x.max(b.x));
            rect.min_y < a.y && a.y < rect.max_y && lo.max(rect.min_x) < hi.min(rect.max_x)
        }
    })
}

/// Ray cast from the rectangle's centre towards +x. Coordinates are doubled
/// so the centre stays integral.
fn centre_inside(edges: &[(Tile, Tile)], rect: &Rect) -> bool {
    let cx = rect.min_x + rect.max_x;
    let cy = rect.min_y + rect.max_y;
    edges
        .iter()
        .filter(|(a, b)| a.x == b.x && 2 * a.x > cx && ((2 * a.y > cy) != (2 * b.y > cy)))
        .count()
        % 2
        == 1
}
