//! Registry behaviour: registration errors, lookup, and timing.

use aoc_solver::{
    AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, RegistrationError,
    SolveError, SolverError, SolverRegistryBuilder,
};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2016, day = 3, tags = ["registry-test", "count"])]
struct LineCount;

impl AocParser for LineCount {
    type SharedData<'a> = Vec<&'a str>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        if input.is_empty() {
            return Err(ParseError::MissingData("empty input".into()));
        }
        Ok(input.lines().collect())
    }
}

impl PartSolver<1> for LineCount {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.len().to_string())
    }
}

impl PartSolver<2> for LineCount {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().map(|l| l.len()).sum::<usize>().to_string())
    }
}

#[test]
fn creates_and_solves_registered_solver() {
    let registry = SolverRegistryBuilder::new()
        .register_solver::<LineCount>(2020, 5, &[])
        .unwrap()
        .build();

    let mut solver = registry.create_solver(2020, 5, "ab\ncde").unwrap();
    assert_eq!((solver.year(), solver.day(), solver.parts()), (2020, 5, 2));
    assert!(solver.parse_end() >= solver.parse_start());

    let part1 = solver.solve(1).unwrap();
    assert_eq!(part1.answer, "2");
    assert!(part1.duration() >= chrono::TimeDelta::zero());
    assert_eq!(solver.solve(2).unwrap().answer, "5");
    assert!(matches!(solver.solve(3), Err(SolveError::PartOutOfRange(3))));
}

#[test]
fn duplicate_registration_is_rejected() {
    let result = SolverRegistryBuilder::new()
        .register_solver::<LineCount>(2020, 5, &[])
        .unwrap()
        .register_solver::<LineCount>(2020, 5, &[]);
    assert_eq!(result.err(), Some(RegistrationError::DuplicateSolver(2020, 5)));
}

#[test]
fn out_of_range_registration_is_rejected() {
    for (year, day) in [(2014, 1), (2035, 1), (2020, 0), (2020, 26)] {
        let result = SolverRegistryBuilder::new().register_solver::<LineCount>(year, day, &[]);
        assert_eq!(result.err(), Some(RegistrationError::InvalidYearDay(year, day)));
    }
}

#[test]
fn lookup_errors() {
    let registry = SolverRegistryBuilder::new().build();
    assert!(registry.storage().is_empty());
    assert!(matches!(
        registry.create_solver(2020, 1, "x"),
        Err(SolverError::NotFound(2020, 1))
    ));
    assert!(matches!(
        registry.create_solver(1999, 1, "x"),
        Err(SolverError::InvalidYearDay(1999, 1))
    ));
}

#[test]
fn parse_errors_surface_through_registry() {
    let registry = SolverRegistryBuilder::new()
        .register_solver::<LineCount>(2020, 5, &[])
        .unwrap()
        .build();
    match registry.create_solver(2020, 5, "") {
        Err(SolverError::ParseError(ParseError::MissingData(msg))) => assert_eq!(msg, "empty input"),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("empty input should not parse"),
    }
}

#[test]
fn plugins_are_filtered_and_keep_their_tags() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"registry-test"))
        .unwrap()
        .build();

    let infos: Vec<_> = registry.storage().iter_info().collect();
    assert_eq!(infos.len(), 1);
    assert_eq!((infos[0].year, infos[0].day, infos[0].parts), (2016, 3, 2));
    assert_eq!(infos[0].tags, &["registry-test", "count"]);
    assert!(registry.storage().contains(2016, 3));

    let mut solver = registry.create_solver(2016, 3, "a\nb\nc").unwrap();
    assert_eq!(solver.solve(1).unwrap().answer, "3");
}

#[test]
fn register_all_includes_auto_registered_solver() {
    let registry = SolverRegistryBuilder::new()
        .register_all_plugins()
        .unwrap()
        .build();
    assert_eq!(registry.storage().get_info(2016, 3).map(|i| i.parts), Some(2));
}
