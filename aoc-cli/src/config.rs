//! Configuration resolution from CLI args

use crate::cli::{Args, InputSelection};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable naming the inputs directory
pub const INPUTS_DIR_ENV: &str = "AOC_INPUTS_DIR";
const DEFAULT_INPUTS_DIR: &str = "inputs";

/// Resolved runtime configuration
pub struct Config {
    /// Year filter (None = all years)
    pub year_filter: Option<u16>,
    /// Day filter (None = all days)
    pub day_filter: Option<u8>,
    /// Part filter (None = all parts)
    pub part_filter: Option<u8>,
    /// Tags to filter solvers
    pub tags: Vec<String>,
    pub inputs_dir: PathBuf,
    pub input: InputSelection,
    pub quiet: bool,
}

impl Config {
    /// Build config from CLI args and the environment
    pub fn from_args(args: Args) -> Self {
        Self::resolve(args, std::env::var_os(INPUTS_DIR_ENV))
    }

    fn resolve(args: Args, env_inputs_dir: Option<OsString>) -> Self {
        let inputs_dir = args
            .inputs_dir
            .or_else(|| env_inputs_dir.filter(|d| !d.is_empty()).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUTS_DIR));

        Config {
            year_filter: args.year,
            day_filter: args.day,
            part_filter: args.part,
            tags: args.tags,
            inputs_dir: expand_tilde(&inputs_dir),
            input: args.input,
            quiet: args.quiet,
        }
    }
}

/// Expand a leading `~` to the home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(extra: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("aoc").chain(extra.iter().copied())).unwrap()
    }

    #[test]
    fn flag_beats_environment() {
        let config = Config::resolve(args(&["--inputs-dir", "from-flag"]), Some("from-env".into()));
        assert_eq!(config.inputs_dir, PathBuf::from("from-flag"));
    }

    #[test]
    fn environment_beats_default() {
        let config = Config::resolve(args(&[]), Some("from-env".into()));
        assert_eq!(config.inputs_dir, PathBuf::from("from-env"));

        let config = Config::resolve(args(&[]), Some("".into()));
        assert_eq!(config.inputs_dir, PathBuf::from(DEFAULT_INPUTS_DIR));

        let config = Config::resolve(args(&[]), None);
        assert_eq!(config.inputs_dir, PathBuf::from(DEFAULT_INPUTS_DIR));
    }

    #[test]
    fn tilde_expands_to_home() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(expand_tilde(Path::new("~/aoc")), home.join("aoc"));
        assert_eq!(expand_tilde(Path::new("~")), home);
        assert_eq!(expand_tilde(Path::new("a/~/b")), PathBuf::from("a/~/b"));
    }

    #[test]
    fn filters_pass_through() {
        let config = Config::resolve(args(&["-y", "2024", "-p", "1", "-q"]), None);
        assert_eq!(config.year_filter, Some(2024));
        assert_eq!(config.day_filter, None);
        assert_eq!(config.part_filter, Some(1));
        assert!(config.quiet);
        assert_eq!(config.input, InputSelection::Both);
    }
}
