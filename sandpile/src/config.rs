// config.rs - Run parameters taken from the command line

use crate::error::{Result, SandpileError};
use crate::grid::Cell;
use crate::seed::SeedMode;
use log::warn;
use std::str::FromStr;

pub const USAGE: &str = "usage: sandpile <size:int> <totalGrains:int> <mode:central|random>";

/// Which relaxations a run performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Parallel then serial from one seeded board, each rendered to its own file.
    Compare,
    /// Depth-first cascade from the seeded sites only.
    Recursive,
}

pub const DEFAULT_STRATEGY: Strategy = Strategy::Compare;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub size: i64,
    pub total_grains: Cell,
    pub mode: SeedMode,
    pub workers: usize,
    pub strategy: Strategy,
}

impl RunConfig {
    /// Parses `<size> <totalGrains> <mode>` (program name already stripped).
    /// Trailing arguments are ignored.
    pub fn from_args<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut args = args.into_iter();
        let size = parse_arg(args.next(), "size")?;
        let total_grains = parse_arg(args.next(), "totalGrains")?;
        let mode = args
            .next()
            .map(|m| SeedMode::parse(m.as_ref()))
            .ok_or_else(|| missing("mode"))?;
        let extra = args.count();
        if extra > 0 {
            warn!("Ignoring {extra} extra argument(s)");
        }
        Ok(Self {
            size,
            total_grains,
            mode,
            workers: default_workers(),
            strategy: DEFAULT_STRATEGY,
        })
    }

    /// Board side length; sizes below 1 describe no board at all.
    pub fn board_size(&self) -> Result<usize> {
        usize::try_from(self.size)
            .ok()
            .filter(|&s| s > 0)
            .ok_or_else(|| {
                SandpileError::InvariantViolation(format!("board size {} gives an empty board", self.size))
            })
    }
}

/// One band worker per available core.
pub fn default_workers() -> usize {
    std::thread::available_parallelism().map_or(1, |n| n.get())
}

fn missing(name: &str) -> SandpileError {
    SandpileError::Configuration(format!("missing <{name}> argument\n{USAGE}"))
}

fn parse_arg<T: FromStr, S: AsRef<str>>(arg: Option<S>, name: &str) -> Result<T> {
    let arg = arg.ok_or_else(|| missing(name))?;
    let arg = arg.as_ref();
    arg.trim().parse().map_err(|_| {
        SandpileError::Configuration(format!("<{name}> must be an integer, got '{arg}'\n{USAGE}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn parses_three_positionals() {
        let config = RunConfig::from_args(["100", "5000", "central"]).unwrap();
        assert_eq!(config.size, 100);
        assert_eq!(config.total_grains, 5000);
        assert_eq!(config.mode, SeedMode::Central);
        assert_eq!(config.strategy, DEFAULT_STRATEGY);
        assert!(config.workers >= 1);
        assert_eq!(config.board_size().unwrap(), 100);
    }

    #[test]
    fn missing_arguments_fail() {
        for args in [vec![], vec!["10"], vec!["10", "20"]] {
            assert!(matches!(
                RunConfig::from_args(args),
                Err(SandpileError::Configuration(_))
            ));
        }
    }

    #[test]
    fn non_numeric_arguments_fail() {
        let err = RunConfig::from_args(["ten", "20", "central"]).unwrap_err();
        assert!(err.to_string().contains("<size>"));
        let err = RunConfig::from_args(["10", "2.5", "random"]).unwrap_err();
        assert!(err.to_string().contains("<totalGrains>"));
    }

    #[test]
    fn unknown_mode_and_extras_are_tolerated() {
        let config = RunConfig::from_args(["10", "20", "spiral", "x", "y"]).unwrap();
        assert_eq!(config.mode, SeedMode::Unrecognized("spiral".into()));
    }

    #[test]
    fn negative_grains_accepted_but_not_sizes() {
        let config = RunConfig::from_args(["10", "-5", "central"]).unwrap();
        assert_eq!(config.total_grains, -5);
        for size in ["0", "-3"] {
            let config = RunConfig::from_args([size, "5", "central"]).unwrap();
            assert!(matches!(
                config.board_size(),
                Err(SandpileError::InvariantViolation(_))
            ));
        }
    }
}
