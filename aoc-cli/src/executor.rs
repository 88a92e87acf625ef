//! Sequential executor for running solvers against local inputs

use crate::config::Config;
use crate::error::ExecutorError;
use crate::inputs::{InputKind, InputStore};
use aoc_solver::{SolverError, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use tracing::{debug, info};

/// Result from a single solver execution
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub kind: InputKind,
    pub answer: Result<String, ExecutorError>,
    /// Absent when the input couldn't be read or parsed
    pub parse_duration: Option<TimeDelta>,
    pub solve_duration: TimeDelta,
}

impl SolverResult {
    fn failed(year: u16, day: u8, part: u8, kind: InputKind, error: ExecutorError) -> Self {
        Self {
            year,
            day,
            part,
            kind,
            answer: Err(error),
            parse_duration: None,
            solve_duration: TimeDelta::zero(),
        }
    }
}

/// Work item representing a solver to execute
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Runs every selected part, one at a time, in year/day/input/part order
pub struct Executor {
    registry: SolverRegistry,
    inputs: InputStore,
    kinds: &'static [InputKind],
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

impl Executor {
    /// Create a new executor from config
    pub fn new(registry: SolverRegistry, config: &Config) -> Self {
        Self {
            registry,
            inputs: InputStore::new(config.inputs_dir.clone()),
            kinds: config.input.kinds(),
            year_filter: config.year_filter,
            day_filter: config.day_filter,
            part_filter: config.part_filter,
        }
    }

    /// Collect work items by filtering from registry metadata
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        self.registry
            .storage()
            .iter_info()
            .filter(|info| self.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| self.day_filter.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: self.filter_parts(info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Filter parts based on the part filter and solver's max parts
    #[allow(clippy::reversed_empty_ranges)]
    fn filter_parts(&self, max_parts: u8) -> RangeInclusive<u8> {
        match self.part_filter {
            Some(p) if p <= max_parts => p..=p,
            Some(_) => 1..=0, // Empty range - intentional
            None => 1..=max_parts,
        }
    }

    /// Execute all work items, handing each result to `emit` as soon as it
    /// is known.
    pub fn execute(&self, mut emit: impl FnMut(SolverResult)) {
        for work in self.collect_work_items() {
            for &kind in self.kinds {
                // Parts sharing an input file share one parse.
                let groups = work
                    .parts
                    .clone()
                    .map(|part| (self.inputs.path(work.year, work.day, kind, part), part))
                    .chunk_by(|(path, _)| path.clone());
                for (path, group) in &groups {
                    let parts: Vec<u8> = group.map(|(_, part)| part).collect();
                    self.run_input(&work, kind, path, &parts, &mut emit);
                }
            }
        }
    }

    fn run_input(
        &self,
        work: &WorkItem,
        kind: InputKind,
        path: PathBuf,
        parts: &[u8],
        emit: &mut impl FnMut(SolverResult),
    ) {
        let (year, day) = (work.year, work.day);

        info!(year, day, %kind, path = %path.display(), "reading input");
        let input = match self.inputs.read(&path) {
            Ok(input) => input,
            Err(e) => return fail_parts(work, kind, parts, emit, || e.clone().into()),
        };

        let mut solver = match self.registry.create_solver(year, day, &input) {
            Ok(solver) => solver,
            Err(SolverError::ParseError(e)) => {
                return fail_parts(work, kind, parts, emit, || e.clone().into());
            }
            Err(e) => {
                let message = e.to_string();
                return fail_parts(work, kind, parts, emit, || {
                    ExecutorError::Registry(message.clone())
                });
            }
        };
        let parse_duration = solver.parse_duration();

        for &part in parts {
            let result = solver.solve(part);
            debug!(year, day, part, %kind, ok = result.is_ok(), "part solved");
            emit(SolverResult {
                year,
                day,
                part,
                kind,
                solve_duration: result
                    .as_ref()
                    .map(|r| r.duration())
                    .unwrap_or_else(|_| TimeDelta::zero()),
                answer: result.map(|r| r.answer).map_err(Into::into),
                parse_duration: Some(parse_duration),
            });
        }
    }
}

/// Report the same failure for every part that shares an input
fn fail_parts(
    work: &WorkItem,
    kind: InputKind,
    parts: &[u8],
    emit: &mut impl FnMut(SolverResult),
    error: impl Fn() -> ExecutorError,
) {
    for &part in parts {
        emit(SolverResult::failed(work.year, work.day, part, kind, error()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::InputSelection;
    use aoc_solver::{
        AocParser, AocSolver, ParseError, PartSolver, SolveError, SolverRegistryBuilder,
    };
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    /// Part 1 sums the lines, part 2 fails on purpose
    #[derive(AocSolver)]
    #[aoc_solver(max_parts = 2)]
    struct Sum;

    impl AocParser for Sum {
        type SharedData<'a> = Vec<u32>;

        fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
            input
                .lines()
                .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat(l.to_string())))
                .collect()
        }
    }

    impl PartSolver<1> for Sum {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            Ok(shared.iter().sum::<u32>().to_string())
        }
    }

    impl PartSolver<2> for Sum {
        fn solve(_: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            Err(SolveError::failed("no answer"))
        }
    }

    fn config(dir: &Path, input: InputSelection, part: Option<u8>) -> Config {
        Config {
            year_filter: None,
            day_filter: None,
            part_filter: part,
            tags: vec![],
            inputs_dir: dir.to_path_buf(),
            input,
            quiet: true,
        }
    }

    fn executor(config: &Config) -> Executor {
        let registry = SolverRegistryBuilder::new()
            .register_solver::<Sum>(2020, 1, &[])
            .unwrap()
            .build();
        Executor::new(registry, config)
    }

    fn write(dir: &Path, name: &str, content: &str) {
        let dir = dir.join("2020").join("day01");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), content).unwrap();
    }

    fn run(executor: &Executor) -> Vec<SolverResult> {
        let mut results = Vec::new();
        executor.execute(|r| results.push(r));
        results
    }

    #[test]
    fn runs_example_then_real() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "input_example.txt", "1\n2\n");
        write(temp.path(), "input.txt", "10\n20\n");

        let results = run(&executor(&config(temp.path(), InputSelection::Both, Some(1))));
        let answers: Vec<_> = results
            .iter()
            .map(|r| (r.kind, r.part, r.answer.as_ref().ok().cloned()))
            .collect();
        assert_eq!(
            answers,
            vec![
                (InputKind::Example, 1, Some("3".to_string())),
                (InputKind::Real, 1, Some("30".to_string())),
            ]
        );
        assert!(results.iter().all(|r| r.parse_duration.is_some()));
    }

    #[test]
    fn solve_failure_does_not_stop_other_parts() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "input.txt", "5\n");

        let results = run(&executor(&config(temp.path(), InputSelection::Real, None)));
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].answer.as_ref().unwrap(), "5");
        assert!(matches!(results[1].answer, Err(ExecutorError::Solve(_))));
    }

    #[test]
    fn missing_input_fails_every_part() {
        let temp = TempDir::new().unwrap();
        let results = run(&executor(&config(temp.path(), InputSelection::Example, None)));

        assert_eq!(results.len(), 2);
        for result in &results {
            let err = result.answer.as_ref().unwrap_err();
            assert!(err.to_string().starts_with("input file not found: "), "{err}");
            assert!(result.parse_duration.is_none());
        }
    }

    #[test]
    fn parse_failure_fails_every_part() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "input.txt", "x\n");
        let results = run(&executor(&config(temp.path(), InputSelection::Real, None)));

        assert_eq!(results.len(), 2);
        assert!(
            results
                .iter()
                .all(|r| matches!(r.answer, Err(ExecutorError::Parse(_))))
        );
    }

    #[test]
    fn part_specific_examples() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "input_example.txt", "1\n");
        write(temp.path(), "input_example_part1.txt", "7\n");

        let results = run(&executor(&config(temp.path(), InputSelection::Example, Some(1))));
        assert_eq!(results[0].answer.as_ref().unwrap(), "7");
    }

    #[test]
    fn part_filter_beyond_solver_parts_selects_nothing() {
        let temp = TempDir::new().unwrap();
        let mut cfg = config(temp.path(), InputSelection::Real, None);
        cfg.part_filter = Some(3);
        assert!(executor(&cfg).collect_work_items().is_empty());
    }
}
