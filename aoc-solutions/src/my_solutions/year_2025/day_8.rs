use anyhow::{anyhow, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::parse_lines;
use crate::utils::union_find::UnionFind;

/// Inputs this small are the worked example, which makes fewer connections
const EXAMPLE_MAX_BOXES: usize = 20;
const EXAMPLE_CONNECTIONS: usize = 10;
const CONNECTIONS: usize = 1000;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 8, tags = ["2025", "union-find"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JunctionBox {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl JunctionBox {
    pub fn distance_squared(&self, other: &JunctionBox) -> i64 {
        let (dx, dy, dz) = (self.x - other.x, self.y - other.y, self.z - other.z);
        dx * dx + dy * dy + dz * dz
    }
}

pub struct Playground {
    pub boxes: Vec<JunctionBox>,
    /// Every pair `(i, j)`, `i < j`, closest first
    pairs: Vec<(usize, usize)>,
}

impl AocParser for Solver {
    type SharedData<'a> = Playground;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let boxes = parse_lines(input, |line| {
            let coords = line
                .split(',')
                .map(|c| c.trim().parse::<i64>().map_err(|e| anyhow!("{c:?}: {e}")))
                .collect::<Result<Vec<_>, _>>()?;
            ensure!(coords.len() == 3, "expected x,y,z, got {} values", coords.len());
            Ok(JunctionBox {
                x: coords[0],
                y: coords[1],
                z: coords[2],
            })
        })?;
        let pairs = pairs_by_distance(&boxes);
        Ok(Playground { boxes, pairs })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let connections = if shared.boxes.len() <= EXAMPLE_MAX_BOXES {
            EXAMPLE_CONNECTIONS
        } else {
            CONNECTIONS
        };
        Ok(largest_circuits_product(shared, connections).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (a, b) = last_connection(shared)
            .ok_or_else(|| SolveError::failed("need at least two junction boxes"))?;
        Ok((shared.boxes[a].x * shared.boxes[b].x).to_string())
    }
}

fn pairs_by_distance(boxes: &[JunctionBox]) -> Vec<(usize, usize)> {
    let mut pairs: Vec<(i64, usize, usize)> = (0..boxes.len())
        .flat_map(|i| (i + 1..boxes.len()).map(move |j| (i, j)))
        .map(|(i, j)| (boxes[i].distance_squared(&boxes[j]), i, j))
        .collect();
    pairs.sort_unstable();
    pairs.into_iter().map(|(_, i, j)| (i, j)).collect()
}

/// Connect the `connections` closest pairs (already-joined pairs still use up
/// a connection) and multiply the sizes of the three largest circuits.
pub fn largest_circuits_product(playground: &Playground, connections: usize) -> usize {
    let mut circuits = UnionFind::new(playground.boxes.len());
    for &(a, b) in playground.pairs.iter().take(connections) {
        circuits.union(a, b);
    }
    let mut sizes = circuits.component_sizes();
    sizes.sort_unstable_by(|a, b| b.cmp(a));
    sizes.iter().take(3).product()
}

/// The pair whose connection first joins every box into one circuit.
pub fn last_connection(playground: &Playground) -> Option<(usize, usize)> {
    let mut circuits = UnionFind::new(playground.boxes.len());
    playground
        .pairs
        .iter()
        .copied()
        .find(|&(a, b)| circuits.union(a, b) && circuits.components() == 1)
}
