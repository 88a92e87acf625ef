use anyhow::{anyhow, bail, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;
use tracing::debug;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2025, day = 12, tags = ["2025", "search", "packing"])]
pub struct Solver;

/// Occupied cells of a present, shifted so the smallest row and column are 0
/// and sorted row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    cells: Vec<(usize, usize)>,
}

impl Shape {
    fn from_rows(rows: &[&str]) -> anyhow::Result<Self> {
        let mut cells = Vec::new();
        for (r, row) in rows.iter().enumerate() {
            for (c, ch) in row.chars().enumerate() {
                match ch {
                    '#' => cells.push((r as isize, c as isize)),
                    '.' => {}
                    other => bail!("unexpected shape cell {other:?}"),
                }
            }
        }
        ensure!(!cells.is_empty(), "shape has no cells");
        Ok(Self::normalized(cells))
    }

    fn normalized(cells: Vec<(isize, isize)>) -> Self {
        let min_row = cells.iter().map(|c| c.0).min().unwrap_or(0);
        let min_col = cells.iter().map(|c| c.1).min().unwrap_or(0);
        let mut cells: Vec<_> = cells
            .into_iter()
            .map(|(r, c)| ((r - min_row) as usize, (c - min_col) as usize))
            .collect();
        cells.sort_unstable();
        Shape { cells }
    }

    pub fn area(&self) -> usize {
        self.cells.len()
    }

    pub fn height(&self) -> usize {
        self.cells.iter().map(|c| c.0 + 1).max().unwrap_or(0)
    }

    pub fn width(&self) -> usize {
        self.cells.iter().map(|c| c.1 + 1).max().unwrap_or(0)
    }

    /// Distinct rotations and mirror images
    pub fn orientations(&self) -> Vec<Shape> {
        [false, true]
            .into_iter()
            .cartesian_product(0..4)
            .map(|(flip, turns)| {
                let cells = self
                    .cells
                    .iter()
                    .map(|&(r, c)| {
                        let (mut r, mut c) = (r as isize, c as isize);
                        if flip {
                            c = -c;
                        }
                        for _ in 0..turns {
                            (r, c) = (c, -r);
                        }
                        (r, c)
                    })
                    .collect();
                Shape::normalized(cells)
            })
            .unique()
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub width: usize,
    pub height: usize,
    /// Presents wanted per shape index
    pub counts: Vec<usize>,
}

#[derive(Debug)]
pub struct PresentPacking {
    pub shapes: Vec<Shape>,
    pub regions: Vec<Region>,
}

fn parse_region(size: &str, counts: &str, shapes: usize) -> anyhow::Result<Region> {
    let (width, height) = size
        .split_once('x')
        .ok_or_else(|| anyhow!("expected WxH"))?;
    let width = width.trim().parse::<usize>().map_err(|e| anyhow!("invalid width: {e}"))?;
    let height = height.trim().parse::<usize>().map_err(|e| anyhow!("invalid height: {e}"))?;
    let counts = counts
        .split_whitespace()
        .map(|n| n.parse::<usize>().map_err(|e| anyhow!("invalid count {n:?}: {e}")))
        .collect::<anyhow::Result<Vec<usize>>>()?;
    ensure!(
        counts.len() <= shapes,
        "{} counts given for {} shapes",
        counts.len(),
        shapes
    );
    Ok(Region {
        width,
        height,
        counts,
    })
}

impl AocParser for Solver {
    type SharedData<'a> = PresentPacking;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut shapes = Vec::new();
        let mut regions = Vec::new();
        let mut lines = input.lines().map(str::trim_end).enumerate().peekable();

        while let Some((idx, line)) = lines.next() {
            if line.is_empty() {
                continue;
            }
            let at_line =
                |e: anyhow::Error| ParseError::InvalidFormat(format!("(line {}) {}", idx + 1, e));

            let (head, rest) = line
                .split_once(':')
                .ok_or_else(|| at_line(anyhow!("expected 'N:' or 'WxH: counts'")))?;
            if head.contains('x') {
                regions.push(parse_region(head, rest, shapes.len()).map_err(at_line)?);
                continue;
            }

            let index = head
                .trim()
                .parse::<usize>()
                .map_err(|e| at_line(anyhow!("invalid shape index {head:?}: {e}")))?;
            if index != shapes.len() || !rest.trim().is_empty() {
                return Err(at_line(anyhow!("expected shape header '{}:'", shapes.len())));
            }
            let mut rows = Vec::new();
            while let Some((_, row)) = lines.next_if(|(_, l)| !l.is_empty()) {
                rows.push(row);
            }
            shapes.push(Shape::from_rows(&rows).map_err(at_line)?);
        }

        if regions.is_empty() {
            return Err(ParseError::MissingData("no regions".into()));
        }
        Ok(PresentPacking { shapes, regions })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut count = 0;
        for (idx, region) in shared.regions.iter().enumerate() {
            let fits = can_fit(&shared.shapes, region);
            debug!(
                region = idx + 1,
                width = region.width,
                height = region.height,
                fits,
                "region checked"
            );
            count += usize::from(fits);
        }
        Ok(count.to_string())
    }
}

/// Whether every present `region` asks for fits without overlap.
///
/// Most regions are settled without searching: if each present gets its own
/// bounding-box slot there is room, and if the presents cover more cells
/// than the region has there isn't.
pub fn can_fit(shapes: &[Shape], region: &Region) -> bool {
    let total: usize = region.counts.iter().sum();
    let slot = shapes
        .iter()
        .map(|s| s.width().max(s.height()))
        .max()
        .unwrap_or(1);
    if (region.width / slot) * (region.height / slot) >= total {
        return true;
    }

    let area = region.width * region.height;
    let filled: usize = region
        .counts
        .iter()
        .zip(shapes)
        .map(|(&n, shape)| n * shape.area())
        .sum();
    if filled > area {
        return false;
    }

    let mut packer = Packer::new(shapes, region);
    packer.fill(0, area - filled)
}

/// Exact packing search.
///
/// Always covers the first empty cell, either with a present whose first
/// cell lands there or by declaring it wasted. Wasted cells are limited to
/// the region's spare area, so the search never explores layouts that
/// cannot hold everything.
struct Packer {
    width: usize,
    height: usize,
    occupied: Vec<bool>,
    remaining: Vec<usize>,
    /// Per shape, per orientation: offsets from the orientation's first cell
    placements: Vec<Vec<Vec<(isize, isize)>>>,
}

impl Packer {
    fn new(shapes: &[Shape], region: &Region) -> Self {
        let placements = shapes
            .iter()
            .map(|shape| {
                shape
                    .orientations()
                    .into_iter()
                    .map(|o| {
                        let (ar, ac) = o.cells[0];
                        o.cells
                            .iter()
                            .map(|&(r, c)| (r as isize - ar as isize, c as isize - ac as isize))
                            .collect()
                    })
                    .collect()
            })
            .collect();
        let mut remaining = region.counts.clone();
        remaining.resize(shapes.len(), 0);

        Packer {
            width: region.width,
            height: region.height,
            occupied: vec![false; region.width * region.height],
            remaining,
            placements,
        }
    }

    fn fill(&mut self, mut pos: usize, slack: usize) -> bool {
        if self.remaining.iter().all(|&n| n == 0) {
            return true;
        }
        while pos < self.occupied.len() && self.occupied[pos] {
            pos += 1;
        }
        if pos == self.occupied.len() {
            return false;
        }

        let (row, col) = (pos / self.width, pos % self.width);
        for shape in 0..self.remaining.len() {
            if self.remaining[shape] == 0 {
                continue;
            }
            for orientation in 0..self.placements[shape].len() {
                let Some(cells) = self.cells_at(&self.placements[shape][orientation], row, col)
                else {
                    continue;
                };
                self.mark(&cells, true);
                self.remaining[shape] -= 1;
                let packed = self.fill(pos + 1, slack);
                self.remaining[shape] += 1;
                self.mark(&cells, false);
                if packed {
                    return true;
                }
            }
        }

        if slack == 0 {
            return false;
        }
        self.occupied[pos] = true;
        let packed = self.fill(pos + 1, slack - 1);
        self.occupied[pos] = false;
        packed
    }

    /// Cell indices covered by `offsets` anchored at `row`/`col`, if all are
    /// inside the region and free.
    fn cells_at(&self, offsets: &[(isize, isize)], row: usize, col: usize) -> Option<Vec<usize>> {
        offsets
            .iter()
            .map(|&(dr, dc)| {
                let r = usize::try_from(row as isize + dr).ok().filter(|&r| r < self.height)?;
                let c = usize::try_from(col as isize + dc).ok().filter(|&c| c < self.width)?;
                let idx = r * self.width + c;
                (!self.occupied[idx]).then_some(idx)
            })
            .collect()
    }

    fn mark(&mut self, cells: &[usize], value: bool) {
        for &idx in cells {
            self.occupied[idx] = value;
        }
    }
}
