use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 6, tags = ["2025", "parsing"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Multiply,
}

impl Operator {
    fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'+' => Some(Operator::Add),
            b'*' => Some(Operator::Multiply),
            _ => None,
        }
    }

    pub fn apply(self, numbers: &[u64]) -> u64 {
        match self {
            Operator::Add => numbers.iter().sum(),
            Operator::Multiply => numbers.iter().product(),
        }
    }
}

/// One problem: a run of columns bounded by all-space columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub start: usize,
    pub end: usize,
    pub operator: Operator,
}

/// The worksheet as written, plus where each problem sits in it.
#[derive(Debug)]
pub struct Worksheet<'a> {
    rows: Vec<&'a [u8]>,
    blocks: Vec<Block>,
}

impl<'a> Worksheet<'a> {
    /// Byte at `(row, col)`, treating short lines as space-padded
    fn at(&self, row: usize, col: usize) -> u8 {
        self.rows[row].get(col).copied().unwrap_or(b' ')
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Numbers of `block` read left to right, one per row.
    pub fn row_numbers(&self, block: &Block) -> Vec<u64> {
        (0..self.rows.len())
            .filter_map(|row| read_number((block.start..block.end).map(|col| self.at(row, col))))
            .collect()
    }

    /// Numbers of `block` read one per column, right to left, with each
    /// column's digits taken top to bottom.
    pub fn column_numbers(&self, block: &Block) -> Vec<u64> {
        (block.start..block.end)
            .rev()
            .filter_map(|col| read_number((0..self.rows.len()).map(|row| self.at(row, col))))
            .collect()
    }
}

fn read_number(bytes: impl Iterator<Item = u8>) -> Option<u64> {
    bytes
        .filter(u8::is_ascii_digit)
        .fold(None, |acc, d| Some(acc.unwrap_or(0) * 10 + u64::from(d - b'0')))
}

impl AocParser for Solver {
    type SharedData<'a> = Worksheet<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut lines: Vec<&'a [u8]> = input
            .lines()
            .map(|l| l.trim_end_matches('\r').as_bytes())
            .collect();
        while lines.last().is_some_and(|l| l.iter().all(|&b| b == b' ')) {
            lines.pop();
        }
        let operators = lines
            .pop()
            .ok_or_else(|| ParseError::MissingData("empty worksheet".into()))?;

        for (idx, line) in lines.iter().enumerate() {
            if let Some(&b) = line.iter().find(|&&b| b != b' ' && !b.is_ascii_digit()) {
                return Err(ParseError::InvalidFormat(format!(
                    "(line {}) unexpected character {:?}",
                    idx + 1,
                    b as char
                )));
            }
        }

        let width = lines.iter().chain([&operators]).map(|l| l.len()).max().unwrap_or(0);
        let all_lines: Vec<&[u8]> = lines.iter().copied().chain([operators]).collect();
        let is_gap = |col: usize| all_lines.iter().all(|l| l.get(col).is_none_or(|&b| b == b' '));

        let mut blocks = Vec::new();
        let mut col = 0;
        while col < width {
            if is_gap(col) {
                col += 1;
                continue;
            }
            let start = col;
            while col < width && !is_gap(col) {
                col += 1;
            }
            let operator = operators
                .get(start..col.min(operators.len()))
                .unwrap_or_default()
                .iter()
                .find_map(|&b| Operator::from_byte(b))
                .ok_or_else(|| {
                    ParseError::InvalidFormat(format!("no operator under columns {}..{}", start + 1, col))
                })?;
            blocks.push(Block {
                start,
                end: col,
                operator,
            });
        }

        Ok(Worksheet {
            rows: lines,
            blocks,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(grand_total(shared, Worksheet::row_numbers).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(grand_total(shared, Worksheet::column_numbers).to_string())
    }
}

/// Sum of every problem's result, with `read` deciding how numbers are read.
pub fn grand_total<'a>(
    sheet: &Worksheet<'a>,
    read: impl Fn(&Worksheet<'a>, &Block) -> Vec<u64>,
) -> u64 {
    sheet
        .blocks
        .iter()
        .map(|block| block.operator.apply(&read(sheet, block)))
        .sum()
}
