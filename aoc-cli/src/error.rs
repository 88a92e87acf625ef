//! Error types for the CLI

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Registration error
    #[error("Registration error: {0}")]
    Registration(#[from] aoc_solver::RegistrationError),
}

/// Failure to load a puzzle input from disk
#[derive(Error, Debug, Clone)]
pub enum InputError {
    #[error("input file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: Arc<std::io::Error>,
    },
}

/// Why a single part produced no answer
#[derive(Error, Debug)]
pub enum ExecutorError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("{0}")]
    Parse(#[from] aoc_solver::ParseError),

    #[error("{0}")]
    Solve(#[from] aoc_solver::SolveError),

    /// Registry lookup failed for a listed solver
    #[error("{0}")]
    Registry(String),
}
