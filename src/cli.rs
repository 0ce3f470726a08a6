//! Command-line interface definitions for imgdupsort.
//!
//! This module defines all CLI arguments and options using the clap derive API.
//!
//! # Example
//!
//! ```bash
//! # Sort duplicates out of ~/Pictures/incoming into ~/Pictures/sorted
//! imgdupsort ~/Pictures/incoming -o ~/Pictures/sorted
//!
//! # Copy instead of moving the originals
//! imgdupsort ~/Pictures/incoming -o ~/Pictures/sorted --copy
//!
//! # Verbose run with a log file
//! imgdupsort -v --log debug --log-file run.log ~/Pictures/incoming
//! ```

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

use crate::logging::LogOptions;
use crate::scanner::signature::{DEFAULT_SENSITIVITY, MAX_SENSITIVITY};

/// Sort duplicate images into per-group directories.
///
/// imgdupsort scans a single directory of images, fingerprints each one with a
/// coarse bit signature, and moves (or copies) every set of images sharing a
/// signature into its own subdirectory of the output directory. Images with no
/// duplicate end up in a subdirectory called "unduplicated".
#[derive(Debug, Parser)]
#[command(name = "imgdupsort")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to scan for duplicate images (not recursive)
    #[arg(value_name = "INPUT_DIR", default_value = ".")]
    pub input_dir: PathBuf,

    /// Directory to sort images into, one subdirectory per duplicate group
    #[arg(short, long, value_name = "OUTPUT_DIR", default_value = ".")]
    pub output: PathBuf,

    /// Sensitivity of matches: images are signed on an NxN grid
    ///
    /// Higher values are more discriminating but detect fewer duplicates
    /// across lossy re-encodes. Raising this is NOT RECOMMENDED.
    #[arg(
        short,
        long,
        value_name = "N",
        default_value_t = DEFAULT_SENSITIVITY,
        value_parser = clap::value_parser!(u32).range(1..=MAX_SENSITIVITY as i64)
    )]
    pub sensitivity: u32,

    /// Copy the sorted images into the output directory instead of moving them
    #[arg(short, long)]
    pub copy: bool,

    /// Raise the default log threshold to info (overridden by --log)
    #[arg(short, long)]
    pub verbose: bool,

    /// Turn off all logging including error messages
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Severity threshold for log output
    ///
    /// Each level also logs everything the levels before it log:
    /// error < warning < info < debug. Defaults to error (info with -v).
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log: Option<LogLevelArg>,

    /// Write log output to FILE instead of the console
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Build the logging configuration from the parsed flags.
    #[must_use]
    pub fn log_options(&self) -> LogOptions {
        let level = match self.log {
            Some(level) => level.to_filter(),
            None if self.verbose => LevelFilter::Info,
            None => LevelFilter::Error,
        };
        LogOptions {
            quiet: self.quiet,
            level,
            file: self.log_file.clone(),
        }
    }
}

/// Severity threshold names accepted by `--log`.
///
/// Unrecognized names are rejected by clap at parse time, before any logging
/// sink is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevelArg {
    /// Log errors only
    Error,
    /// Log errors and warnings
    Warning,
    /// Log errors, warnings, and results
    Info,
    /// Log everything, including per-file traces
    Debug,
}

impl LogLevelArg {
    /// Map the CLI level name onto a `log` crate filter.
    #[must_use]
    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warning => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["imgdupsort"]).unwrap();
        assert_eq!(cli.input_dir, PathBuf::from("."));
        assert_eq!(cli.output, PathBuf::from("."));
        assert_eq!(cli.sensitivity, DEFAULT_SENSITIVITY);
        assert!(!cli.copy);
        assert!(!cli.verbose);
        assert!(!cli.quiet);
        assert_eq!(cli.log, None);
        assert_eq!(cli.log_file, None);
    }

    #[test]
    fn test_cli_parse_basic() {
        let cli = Cli::try_parse_from(["imgdupsort", "/some/dir", "-o", "/out"]).unwrap();
        assert_eq!(cli.input_dir, PathBuf::from("/some/dir"));
        assert_eq!(cli.output, PathBuf::from("/out"));
    }

    #[test]
    fn test_cli_parse_all_flags() {
        let cli = Cli::try_parse_from([
            "imgdupsort",
            "/in",
            "--output",
            "/out",
            "--sensitivity",
            "8",
            "--copy",
            "--log",
            "debug",
            "--log-file",
            "run.log",
        ])
        .unwrap();

        assert_eq!(cli.sensitivity, 8);
        assert!(cli.copy);
        assert_eq!(cli.log, Some(LogLevelArg::Debug));
        assert_eq!(cli.log_file, Some(PathBuf::from("run.log")));
    }

    #[test]
    fn test_cli_sensitivity_range() {
        assert!(Cli::try_parse_from(["imgdupsort", "-s", "0"]).is_err());
        assert!(Cli::try_parse_from(["imgdupsort", "-s", "12"]).is_err());
        assert!(Cli::try_parse_from(["imgdupsort", "-s", "1"]).is_ok());
        assert!(Cli::try_parse_from(["imgdupsort", "-s", "11"]).is_ok());
    }

    #[test]
    fn test_cli_invalid_log_level_rejected() {
        // Bad severity names fail at parse time, before any sink exists
        let result = Cli::try_parse_from(["imgdupsort", "--log", "chatty"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["imgdupsort", "-v", "-q"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_log_options_default_is_error() {
        let cli = Cli::try_parse_from(["imgdupsort"]).unwrap();
        let options = cli.log_options();
        assert!(!options.quiet);
        assert_eq!(options.level, LevelFilter::Error);
    }

    #[test]
    fn test_log_options_verbose_raises_to_info() {
        let cli = Cli::try_parse_from(["imgdupsort", "-v"]).unwrap();
        assert_eq!(cli.log_options().level, LevelFilter::Info);
    }

    #[test]
    fn test_log_options_explicit_level_wins_over_verbose() {
        let cli = Cli::try_parse_from(["imgdupsort", "-v", "--log", "warning"]).unwrap();
        assert_eq!(cli.log_options().level, LevelFilter::Warn);
    }

    #[test]
    fn test_log_level_arg_filters() {
        assert_eq!(LogLevelArg::Error.to_filter(), LevelFilter::Error);
        assert_eq!(LogLevelArg::Warning.to_filter(), LevelFilter::Warn);
        assert_eq!(LogLevelArg::Info.to_filter(), LevelFilter::Info);
        assert_eq!(LogLevelArg::Debug.to_filter(), LevelFilter::Debug);
    }

    #[test]
    fn test_log_level_arg_display() {
        assert_eq!(LogLevelArg::Warning.to_string(), "warning");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }
}
