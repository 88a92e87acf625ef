//! Rectangular character grids.

use aoc_solver::ParseError;

/// Row offsets and column offsets of the 8 surrounding cells
pub const NEIGHBOURS_8: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Row-major grid of bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<u8>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Parse non-blank lines into a grid. Every row must have the same width.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let mut cells = Vec::new();
        let mut width = None;
        let mut height = 0;

        for (idx, line) in input.lines().enumerate() {
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }
            match width {
                None => width = Some(line.len()),
                Some(w) if w != line.len() => {
                    return Err(ParseError::InvalidFormat(format!(
                        "(line {}) expected {} columns, found {}",
                        idx + 1,
                        w,
                        line.len()
                    )));
                }
                Some(_) => {}
            }
            cells.extend_from_slice(line.as_bytes());
            height += 1;
        }

        let width = width.ok_or_else(|| ParseError::MissingData("empty grid".into()))?;
        Ok(Self {
            cells,
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if row < self.height && col < self.width {
            Some(self.cells[row * self.width + col])
        } else {
            None
        }
    }

    /// Like [`Grid::get`] with signed coordinates, for neighbour offsets.
    pub fn get_signed(&self, row: isize, col: isize) -> Option<u8> {
        if row < 0 || col < 0 {
            return None;
        }
        self.get(row as usize, col as usize)
    }

    pub fn set(&mut self, row: usize, col: usize, value: u8) {
        if row < self.height && col < self.width {
            self.cells[row * self.width + col] = value;
        }
    }

    /// All `(row, col)` positions, row by row
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.height).flat_map(move |r| (0..self.width).map(move |c| (r, c)))
    }

    pub fn find(&self, value: u8) -> Option<(usize, usize)> {
        self.positions().find(|&(r, c)| self.get(r, c) == Some(value))
    }

    /// Values of the in-bounds cells among the 8 around `(row, col)`
    pub fn neighbours(&self, row: usize, col: usize) -> impl Iterator<Item = u8> + '_ {
        NEIGHBOURS_8.iter().filter_map(move |&(dr, dc)| {
            self.get_signed(row as isize + dr, col as isize + dc)
        })
    }
}
