//! Puzzle inputs stored on disk

use crate::error::InputError;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Worked example or real puzzle input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Example,
    Real,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputKind::Example => f.write_str("example"),
            InputKind::Real => f.write_str("real"),
        }
    }
}

/// File-based input store
///
/// Directory structure: `{base_dir}/{year}/day{day:02}/input.txt`, with
/// `input_example.txt` beside it. An `input_example_part{N}.txt` replaces the
/// shared example for part `N`.
pub struct InputStore {
    base_dir: PathBuf,
}

impl InputStore {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Directory holding every input of a year/day
    pub fn day_dir(&self, year: u16, day: u8) -> PathBuf {
        self.base_dir.join(year.to_string()).join(format!("day{:02}", day))
    }

    /// Path to read for `part`; the file may not exist.
    pub fn path(&self, year: u16, day: u8, kind: InputKind, part: u8) -> PathBuf {
        let dir = self.day_dir(year, day);
        match kind {
            InputKind::Real => dir.join("input.txt"),
            InputKind::Example => {
                let part_specific = dir.join(format!("input_example_part{}.txt", part));
                if part_specific.is_file() {
                    part_specific
                } else {
                    dir.join("input_example.txt")
                }
            }
        }
    }

    /// Read a whole input file.
    pub fn read(&self, path: &Path) -> Result<String, InputError> {
        fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => InputError::NotFound {
                path: path.to_path_buf(),
            },
            _ => InputError::Io {
                path: path.to_path_buf(),
                source: Arc::new(e),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn path_layout() {
        let store = InputStore::new(PathBuf::from("inputs"));
        assert_eq!(
            store.path(2025, 1, InputKind::Real, 1),
            PathBuf::from("inputs/2025/day01/input.txt")
        );
        assert_eq!(
            store.path(2024, 12, InputKind::Example, 2),
            PathBuf::from("inputs/2024/day12/input_example.txt")
        );
    }

    #[test]
    fn part_specific_example_wins() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf());
        let dir = store.day_dir(2025, 11);
        write(&dir, "input_example.txt", "shared");
        write(&dir, "input_example_part2.txt", "second");

        let part1 = store.path(2025, 11, InputKind::Example, 1);
        let part2 = store.path(2025, 11, InputKind::Example, 2);
        assert_eq!(store.read(&part1).unwrap(), "shared");
        assert_eq!(store.read(&part2).unwrap(), "second");
    }

    #[test]
    fn missing_file_names_the_path() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf());
        let path = store.path(2025, 3, InputKind::Real, 1);

        let err = store.read(&path).unwrap_err();
        assert!(matches!(&err, InputError::NotFound { path: p } if *p == path));
        assert_eq!(err.to_string(), format!("input file not found: {}", path.display()));
    }

    #[test]
    fn reads_whole_file() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf());
        let input = "L68\nL30\nR48\n";
        write(&store.day_dir(2025, 1), "input.txt", input);

        let path = store.path(2025, 1, InputKind::Real, 1);
        assert_eq!(store.read(&path).unwrap(), input);
    }
}
