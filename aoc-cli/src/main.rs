//! AOC CLI - Command-line interface for running Advent of Code solvers

mod cli;
mod config;
mod error;
mod executor;
mod inputs;
mod output;

// Import aoc-solutions to link the solver plugins
use aoc_solutions as _;

use aoc_solver::SolverRegistryBuilder;
use clap::Parser;
use cli::Args;
use config::Config;
use executor::Executor;
use output::OutputFormatter;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Logs go to stderr; RUST_LOG wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Returns whether every selected part produced an answer
fn run(args: Args) -> Result<bool, error::CliError> {
    let config = Config::from_args(args);
    info!(inputs_dir = %config.inputs_dir.display(), "resolved inputs directory");
    if !config.inputs_dir.exists() {
        warn!(inputs_dir = %config.inputs_dir.display(), "inputs directory does not exist");
    } else if !config.inputs_dir.is_dir() {
        return Err(error::CliError::Config(format!(
            "inputs path {} is not a directory",
            config.inputs_dir.display()
        )));
    }

    // Build registry with tag filtering (only once)
    let registry = build_registry(&config.tags)?;
    let executor = Executor::new(registry, &config);

    let work_items = executor.collect_work_items();
    if work_items.is_empty() {
        println!("No solvers found matching the specified filters.");
        return Ok(true);
    }
    if !config.quiet {
        println!("Running {} solver(s)...", work_items.len());
    }

    let formatter = OutputFormatter::new(config.quiet);
    let mut results = Vec::new();
    executor.execute(|result| {
        formatter.print_result(&result);
        results.push(result);
    });
    formatter.print_summary(&results);

    Ok(results.iter().all(|r| r.answer.is_ok()))
}

/// Build registry with tag filtering
fn build_registry(tags: &[String]) -> Result<aoc_solver::SolverRegistry, error::CliError> {
    let builder = SolverRegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solver_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_holds_every_solution() {
        let registry = build_registry(&[]).unwrap();
        let days: Vec<_> = registry
            .storage()
            .iter_info()
            .map(|info| (info.year, info.day, info.parts))
            .collect();
        assert!(days.contains(&(2024, 1, 2)));
        for day in 1..=11 {
            assert!(days.contains(&(2025, day, 2)), "2025 day {day} missing");
        }
        assert!(days.contains(&(2025, 12, 1)));
    }

    #[test]
    fn tags_must_all_match() {
        let tags = vec!["2025".to_string(), "linear-algebra".to_string()];
        let registry = build_registry(&tags).unwrap();
        let days: Vec<_> = registry.storage().iter_info().map(|i| i.day).collect();
        assert_eq!(days, vec![10]);
    }
}
