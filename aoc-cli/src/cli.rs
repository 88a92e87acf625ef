//! CLI argument parsing using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::inputs::InputKind;

/// Which puzzle inputs to run each part against
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum InputSelection {
    /// Only the worked examples
    Example,
    /// Only the real puzzle inputs
    Real,
    /// Example first, then the real input
    #[default]
    Both,
}

impl InputSelection {
    pub fn kinds(self) -> &'static [InputKind] {
        match self {
            InputSelection::Example => &[InputKind::Example],
            InputSelection::Real => &[InputKind::Real],
            InputSelection::Both => &[InputKind::Example, InputKind::Real],
        }
    }
}

/// Advent of Code solver runner
#[derive(Parser, Debug)]
#[command(name = "aoc", about = "Run Advent of Code solvers", version)]
pub struct Args {
    /// Year to run (runs all years if omitted)
    #[arg(short, long)]
    pub year: Option<u16>,

    /// Day to run (runs all days if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
    pub day: Option<u8>,

    /// Part to run (runs all parts if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub part: Option<u8>,

    /// Tags to filter solvers (comma-separated, all must match)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Directory holding `<year>/day<DD>/input*.txt`
    /// [default: $AOC_INPUTS_DIR, then ./inputs]
    #[arg(long)]
    pub inputs_dir: Option<PathBuf>,

    /// Inputs to run: example, real, or both
    #[arg(long, value_enum, default_value = "both")]
    pub input: InputSelection,

    /// Quiet mode - only output answers
    #[arg(short, long)]
    pub quiet: bool,

    /// Log solver progress to stderr (overridden by RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,
}
