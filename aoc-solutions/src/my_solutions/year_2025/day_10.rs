use std::sync::LazyLock;

use anyhow::{anyhow, bail, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use regex::Regex;
use thiserror::Error;
use tracing::{debug, warn};

use crate::utils::parse::parse_lines;

/// Largest button count the lights search enumerates (2^20 subsets)
pub const MAX_TOGGLE_BUTTONS: usize = 20;
/// Largest button count [`ExhaustivePartition`] accepts
pub const MAX_EXHAUSTIVE_BUTTONS: usize = 8;
const MAX_LIGHTS: usize = 64;

static LIGHTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]").expect("lights pattern compiles"));
static BUTTON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^)]*)\)").expect("button pattern compiles"));
static JOLTAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^}]*)\}").expect("joltage pattern compiles"));

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 10, tags = ["2025", "linear-algebra", "search"])]
pub struct Solver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Machine {
    /// Desired light states, bit `i` for light `i`
    pub lights: u64,
    pub light_count: usize,
    /// Indices each button toggles (lights) or increments (joltage counters)
    pub buttons: Vec<Vec<usize>>,
    pub joltage: Option<Vec<u64>>,
}

impl Machine {
    fn button_masks(&self) -> Vec<u64> {
        self.buttons
            .iter()
            .map(|b| b.iter().fold(0u64, |mask, &i| mask | 1 << i))
            .collect()
    }
}

fn parse_list<T: std::str::FromStr>(list: &str, what: &str) -> anyhow::Result<Vec<T>>
where
    T::Err: std::fmt::Display,
{
    ensure!(!list.trim().is_empty(), "empty {what} list");
    list.split(',')
        .map(|v| {
            v.trim()
                .parse()
                .map_err(|e| anyhow!("invalid {what} value {v:?}: {e}"))
        })
        .collect()
}

fn parse_machine(line: &str) -> anyhow::Result<Machine> {
    let lights = LIGHTS
        .captures(line)
        .ok_or_else(|| anyhow!("missing [lights] pattern"))?;
    let pattern = &lights[1];
    let light_count = pattern.len();
    ensure!(light_count <= MAX_LIGHTS, "{light_count} lights, at most {MAX_LIGHTS} supported");

    let mut mask = 0u64;
    for (i, c) in pattern.chars().enumerate() {
        match c {
            '#' => mask |= 1 << i,
            '.' => {}
            other => bail!("unexpected light state {other:?}"),
        }
    }

    // A button is a set of positions; `(0,0)` presses position 0 once.
    let buttons = BUTTON
        .captures_iter(line)
        .map(|c| {
            let mut button = parse_list::<usize>(&c[1], "button")?;
            button.sort_unstable();
            button.dedup();
            Ok(button)
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let joltage = JOLTAGE
        .captures(line)
        .map(|c| parse_list::<u64>(&c[1], "joltage"))
        .transpose()?;
    if let Some(joltage) = &joltage {
        ensure!(
            joltage.len() == light_count,
            "{} joltage counters for {} lights",
            joltage.len(),
            light_count
        );
    }

    for (b, button) in buttons.iter().enumerate() {
        if let Some(&i) = button.iter().find(|&&i| i >= light_count) {
            bail!("button {} references position {} of {}", b + 1, i, light_count);
        }
    }

    Ok(Machine {
        lights: mask,
        light_count,
        buttons,
        joltage,
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Machine>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, parse_machine)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut total = 0u64;
        for (idx, machine) in shared.iter().enumerate() {
            if machine.buttons.len() > MAX_TOGGLE_BUTTONS {
                return Err(SolveError::failed(format!(
                    "machine {} has {} buttons, at most {} supported",
                    idx + 1,
                    machine.buttons.len(),
                    MAX_TOGGLE_BUTTONS
                )));
            }
            let presses = min_toggle_presses(machine.lights, &machine.button_masks())
                .ok_or_else(|| SolveError::failed(format!("machine {} has no solution", idx + 1)))?;
            debug!(machine = idx + 1, presses, "lights configured");
            total += u64::from(presses);
        }
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut total = 0u64;
        for (idx, machine) in shared.iter().enumerate() {
            let Some(targets) = &machine.joltage else {
                debug!(machine = idx + 1, "no joltage requirements");
                continue;
            };
            let presses = min_joltage_presses(&machine.buttons, targets)
                .map_err(|e| SolveError::failed(format!("machine {}: {}", idx + 1, e)))?
                .ok_or_else(|| {
                    SolveError::failed(format!("machine {} has no joltage solution", idx + 1))
                })?;
            debug!(machine = idx + 1, presses, "joltage configured");
            total += presses;
        }
        Ok(total.to_string())
    }
}

/// Fewest buttons whose toggles XOR to `target`; each button is pressed at
/// most once since pressing twice cancels out.
///
/// Enumerates all `2^buttons.len()` subsets, so callers keep the button count
/// at or below [`MAX_TOGGLE_BUTTONS`]. `None` when no subset works.
pub fn min_toggle_presses(target: u64, buttons: &[u64]) -> Option<u32> {
    (0u32..1 << buttons.len())
        .filter(|&subset| {
            buttons
                .iter()
                .enumerate()
                .filter(|&(i, _)| subset & (1u32 << i) != 0)
                .fold(0, |lights, (_, mask)| lights ^ mask)
                == target
        })
        .map(u32::count_ones)
        .min()
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoltageError {
    #[error("arithmetic overflow while eliminating")]
    Overflow,
    #[error("{buttons} buttons is too many for exhaustive search (max {max})")]
    TooManyButtons { buttons: usize, max: usize },
}

/// Minimizes total presses so that every counter `i` receives exactly
/// `targets[i]`, where a press of button `j` adds 1 to each counter in
/// `buttons[j]`.
///
/// `Ok(None)` means no non-negative integer assignment exists.
pub trait PressOptimizer {
    fn min_presses(
        &self,
        buttons: &[Vec<usize>],
        targets: &[u64],
    ) -> Result<Option<u64>, JoltageError>;
}

/// Optimizer first, exhaustive partitions if it fails or finds nothing.
pub fn min_joltage_presses(
    buttons: &[Vec<usize>],
    targets: &[u64],
) -> Result<Option<u64>, JoltageError> {
    match IntegerProgram.min_presses(buttons, targets) {
        Ok(Some(presses)) => Ok(Some(presses)),
        outcome => {
            warn!(?outcome, buttons = buttons.len(), "falling back to exhaustive search");
            ExhaustivePartition.min_presses(buttons, targets)
        }
    }
}

/// Exact integer program: fraction-free Gaussian elimination to express the
/// pivot presses in terms of the free ones, then a bounded search over the
/// free presses.
///
/// A button can't be pressed more often than the smallest target among the
/// counters it feeds, which bounds every free variable.
pub struct IntegerProgram;

struct PivotRow {
    coefficient: i128,
    rhs: i128,
    /// Coefficient of each free variable, in `free` order
    free: Vec<i128>,
}

impl PressOptimizer for IntegerProgram {
    fn min_presses(
        &self,
        buttons: &[Vec<usize>],
        targets: &[u64],
    ) -> Result<Option<u64>, JoltageError> {
        let width = buttons.len();
        let mut rows = targets
            .iter()
            .enumerate()
            .map(|(counter, &target)| {
                let mut row: Vec<i64> = buttons
                    .iter()
                    .map(|b| i64::from(b.contains(&counter)))
                    .collect();
                row.push(i64::try_from(target).map_err(|_| JoltageError::Overflow)?);
                Ok(row)
            })
            .collect::<Result<Vec<_>, JoltageError>>()?;

        let pivots = eliminate(&mut rows, width)?;
        if rows[pivots.len()..].iter().any(|row| row[width] != 0) {
            return Ok(None);
        }

        let free: Vec<usize> = (0..width).filter(|c| !pivots.contains(c)).collect();
        let bounds: Vec<i128> = free
            .iter()
            .map(|&c| {
                buttons[c]
                    .iter()
                    .map(|&i| i128::from(targets[i]))
                    .min()
                    .unwrap_or(0)
            })
            .collect();
        let pivot_rows: Vec<PivotRow> = pivots
            .iter()
            .enumerate()
            .map(|(r, &c)| PivotRow {
                coefficient: i128::from(rows[r][c]),
                rhs: i128::from(rows[r][width]),
                free: free.iter().map(|&f| i128::from(rows[r][f])).collect(),
            })
            .collect();

        let mut search = FreeSearch {
            rows: &pivot_rows,
            bounds: &bounds,
            values: vec![0; free.len()],
            best: None,
        };
        search.run(0, 0)?;
        Ok(search.best.map(|b| b as u64))
    }
}

/// Reduce `rows` (augmented, `width` coefficient columns) to a form where
/// each pivot column is non-zero in exactly one row, with a positive entry.
/// Returns the pivot column of rows `0..k`; rows from `k` on have only zero
/// coefficients.
fn eliminate(rows: &mut [Vec<i64>], width: usize) -> Result<Vec<usize>, JoltageError> {
    let mut pivots = Vec::new();
    for col in 0..width {
        let r = pivots.len();
        let Some(found) = (r..rows.len()).find(|&k| rows[k][col] != 0) else {
            continue;
        };
        rows.swap(r, found);
        if rows[r][col] < 0 {
            for v in rows[r].iter_mut() {
                *v = v.checked_neg().ok_or(JoltageError::Overflow)?;
            }
        }

        let pivot = rows[r].clone();
        for (k, row) in rows.iter_mut().enumerate() {
            let factor = row[col];
            if k == r || factor == 0 {
                continue;
            }
            for (v, &p) in row.iter_mut().zip(&pivot) {
                *v = v
                    .checked_mul(pivot[col])
                    .and_then(|a| p.checked_mul(factor).and_then(|b| a.checked_sub(b)))
                    .ok_or(JoltageError::Overflow)?;
            }
            normalize(row);
        }

        pivots.push(col);
        if pivots.len() == rows.len() {
            break;
        }
    }
    Ok(pivots)
}

/// Divide a row by the gcd of its entries.
fn normalize(row: &mut [i64]) {
    let g = row.iter().fold(0u64, |g, &v| gcd(g, v.unsigned_abs()));
    if g > 1 {
        for v in row.iter_mut() {
            *v /= g as i64;
        }
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

struct FreeSearch<'a> {
    rows: &'a [PivotRow],
    bounds: &'a [i128],
    values: Vec<i128>,
    best: Option<i128>,
}

impl FreeSearch<'_> {
    fn run(&mut self, idx: usize, partial: i128) -> Result<(), JoltageError> {
        if self.best.is_some_and(|best| partial >= best) {
            return Ok(());
        }
        if idx == self.values.len() {
            if let Some(pivot_total) = self.pivot_total()? {
                let total = partial + pivot_total;
                if self.best.is_none_or(|best| total < best) {
                    self.best = Some(total);
                }
            }
            return Ok(());
        }
        for value in 0..=self.bounds[idx] {
            self.values[idx] = value;
            self.run(idx + 1, partial + value)?;
        }
        self.values[idx] = 0;
        Ok(())
    }

    /// Sum of the pivot presses implied by the current free values, or `None`
    /// if some pivot would be negative or fractional.
    fn pivot_total(&self) -> Result<Option<i128>, JoltageError> {
        let mut total = 0i128;
        for row in self.rows {
            let mut rest = row.rhs;
            for (&coefficient, &value) in row.free.iter().zip(&self.values) {
                rest = coefficient
                    .checked_mul(value)
                    .and_then(|v| rest.checked_sub(v))
                    .ok_or(JoltageError::Overflow)?;
            }
            if rest < 0 || rest % row.coefficient != 0 {
                return Ok(None);
            }
            total += rest / row.coefficient;
        }
        Ok(Some(total))
    }
}

/// Tries every way to split `0, 1, 2, ...` presses among the buttons until
/// one hits the targets exactly.
///
/// Exponential in the button count; machines with more than
/// [`MAX_EXHAUSTIVE_BUTTONS`] buttons are rejected with
/// [`JoltageError::TooManyButtons`].
pub struct ExhaustivePartition;

impl PressOptimizer for ExhaustivePartition {
    fn min_presses(
        &self,
        buttons: &[Vec<usize>],
        targets: &[u64],
    ) -> Result<Option<u64>, JoltageError> {
        if buttons.len() > MAX_EXHAUSTIVE_BUTTONS {
            return Err(JoltageError::TooManyButtons {
                buttons: buttons.len(),
                max: MAX_EXHAUSTIVE_BUTTONS,
            });
        }
        // Every useful press raises at least one counter.
        let limit: u64 = targets.iter().sum();
        let mut counters = vec![0u64; targets.len()];
        Ok((0..=limit).find(|&total| distribute(buttons, targets, total, &mut counters)))
    }
}

fn distribute(
    buttons: &[Vec<usize>],
    targets: &[u64],
    remaining: u64,
    counters: &mut [u64],
) -> bool {
    let Some((button, rest)) = buttons.split_first() else {
        return remaining == 0 && counters == targets;
    };

    let mut applied = 0;
    let mut found = distribute(rest, targets, remaining, counters);
    while !found && applied < remaining {
        for &i in button {
            counters[i] += 1;
        }
        applied += 1;
        if button.iter().any(|&i| counters[i] > targets[i]) {
            break;
        }
        found = distribute(rest, targets, remaining - applied, counters);
    }
    for &i in button {
        counters[i] -= applied;
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EXAMPLE: &str = "[.##.] (3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}
[...#.] (0,2,3,4) (2,3) (0,4) (0,1,2) (1,2,3,4) {7,5,12,7,2}
[.###.#] (0,1,2,3,4) (0,3,4) (0,1,2,4,5) (1,2) {10,11,11,5,10,5}
";

    #[test]
    fn example() {
        let mut machines = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(machines.len(), 3);
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut machines).unwrap(), "7");
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut machines).unwrap(), "33");
    }

    #[test]
    fn parses_machine() {
        let machine = parse_machine("[.##.] (3) (1,3) {3,5,4,7}").unwrap();
        assert_eq!(
            machine,
            Machine {
                lights: 0b0110,
                light_count: 4,
                buttons: vec![vec![3], vec![1, 3]],
                joltage: Some(vec![3, 5, 4, 7]),
            }
        );
        assert_eq!(parse_machine("[#] (0)").unwrap().joltage, None);
    }

    #[test]
    fn repeated_button_positions_count_once() {
        let machine = parse_machine("[#.] (1,0,0) (1,1) {2,1}").unwrap();
        assert_eq!(machine.buttons, vec![vec![0, 1], vec![1]]);

        let machine = parse_machine("[#] (0,0) {2}").unwrap();
        assert_eq!(machine.buttons, vec![vec![0]]);
        for target in [1, 2] {
            assert_eq!(
                IntegerProgram.min_presses(&machine.buttons, &[target]),
                Ok(Some(target))
            );
            assert_eq!(
                ExhaustivePartition.min_presses(&machine.buttons, &[target]),
                Ok(Some(target))
            );
        }
        assert_eq!(min_toggle_presses(machine.lights, &machine.button_masks()), Some(1));
    }

    #[test]
    fn malformed_machines_name_the_line() {
        for (line, message) in [
            ("(0) {1}", "missing [lights] pattern"),
            ("[.#] (0,x)", "invalid button value \"x\""),
            ("[.#] ()", "empty button list"),
            ("[.#] (0,2)", "button 1 references position 2 of 2"),
            ("[.#] (0) {1}", "1 joltage counters for 2 lights"),
            ("[.o] (0)", "unexpected light state 'o'"),
        ] {
            match Solver::parse(&format!("[#] (0)\n{line}")) {
                Err(ParseError::InvalidFormat(msg)) => {
                    assert!(msg.starts_with("(line 2) "), "{msg}");
                    assert!(msg.contains(message), "{msg} should mention {message}");
                }
                other => panic!("{line:?} parsed as {other:?}"),
            }
        }
    }

    #[test]
    fn one_button_matching_the_target() {
        assert_eq!(min_toggle_presses(0b1010, &[0b0001, 0b1010, 0b0110]), Some(1));
        assert_eq!(min_toggle_presses(0, &[0b1]), Some(0));
    }

    #[test]
    fn unreachable_lights_are_none_not_zero() {
        assert_eq!(min_toggle_presses(0b100, &[0b001, 0b010]), None);
        let mut machines = Solver::parse("[..#] (0) (1)").unwrap();
        let err = <Solver as PartSolver<1>>::solve(&mut machines).unwrap_err();
        assert_eq!(err.to_string(), "Solve failed: machine 1 has no solution");
    }

    #[test]
    fn each_relevant_button_once() {
        // Disjoint buttons covering all counters with target 1 each.
        let buttons = vec![vec![0, 1], vec![2], vec![3, 4]];
        let targets = [1, 1, 1, 1, 1];
        assert_eq!(IntegerProgram.min_presses(&buttons, &targets), Ok(Some(3)));
        assert_eq!(ExhaustivePartition.min_presses(&buttons, &targets), Ok(Some(3)));
    }

    #[test]
    fn free_variables_are_minimized() {
        // x0 + x2 = 4, x1 + x2 = 4: pressing the shared button 4 times wins.
        let buttons = vec![vec![0], vec![1], vec![0, 1]];
        assert_eq!(IntegerProgram.min_presses(&buttons, &[4, 4]), Ok(Some(4)));
        assert_eq!(IntegerProgram.min_presses(&buttons, &[4, 6]), Ok(Some(6)));
    }

    #[test]
    fn infeasible_joltage() {
        let buttons = vec![vec![0, 1]];
        assert_eq!(IntegerProgram.min_presses(&buttons, &[1, 2]), Ok(None));
        assert_eq!(min_joltage_presses(&buttons, &[1, 2]), Ok(None));

        let mut machines = Solver::parse("[..] (0,1) {1,2}").unwrap();
        assert!(<Solver as PartSolver<2>>::solve(&mut machines).is_err());
    }

    #[test]
    fn exhaustive_search_has_a_button_limit() {
        let buttons = vec![vec![0]; MAX_EXHAUSTIVE_BUTTONS + 1];
        assert_eq!(
            ExhaustivePartition.min_presses(&buttons, &[1]),
            Err(JoltageError::TooManyButtons {
                buttons: MAX_EXHAUSTIVE_BUTTONS + 1,
                max: MAX_EXHAUSTIVE_BUTTONS
            })
        );
    }

    #[test]
    fn missing_joltage_counts_zero() {
        let mut machines = Solver::parse("[#.] (0) (1)\n[##] (0,1) {2,2}").unwrap();
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut machines).unwrap(), "2");
    }

    #[test]
    fn zero_targets_need_no_presses() {
        let buttons = vec![vec![0], vec![0, 1]];
        assert_eq!(IntegerProgram.min_presses(&buttons, &[0, 0]), Ok(Some(0)));
        assert_eq!(ExhaustivePartition.min_presses(&buttons, &[0, 0]), Ok(Some(0)));
    }

    fn instance() -> impl Strategy<Value = (Vec<Vec<usize>>, Vec<u64>)> {
        (1usize..=4, 1usize..=4).prop_flat_map(|(counters, button_count)| {
            let button = prop::collection::btree_set(0..counters, 1..=counters)
                .prop_map(|set| set.into_iter().collect::<Vec<_>>());
            (
                prop::collection::vec(button, button_count),
                prop::collection::vec(0u64..4, button_count),
            )
                .prop_map(move |(buttons, presses)| {
                    let mut targets = vec![0u64; counters];
                    for (button, &n) in buttons.iter().zip(&presses) {
                        for &i in button {
                            targets[i] += n;
                        }
                    }
                    (buttons, targets)
                })
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn optimizer_agrees_with_exhaustive_search((buttons, targets) in instance()) {
            let exact = IntegerProgram.min_presses(&buttons, &targets).unwrap();
            let exhaustive = ExhaustivePartition.min_presses(&buttons, &targets).unwrap();
            prop_assert!(exact.is_some());
            prop_assert_eq!(exact, exhaustive);
        }

        #[test]
        fn toggle_minimum_is_achievable(masks in prop::collection::vec(1u64..16, 1..8), subset in 0u32..256) {
            let subset = subset & ((1 << masks.len()) - 1);
            let target = masks
                .iter()
                .enumerate()
                .filter(|(i, _)| subset & (1 << i) != 0)
                .fold(0, |acc, (_, m)| acc ^ m);
            let best = min_toggle_presses(target, &masks);
            prop_assert!(best.is_some_and(|b| b <= subset.count_ones()));
        }
    }
}
