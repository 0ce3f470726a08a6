//! Logging infrastructure for imgdupsort.
//!
//! This module provides structured logging using the `log` facade and
//! `env_logger` backend. Three sinks are supported, selected at startup:
//!
//! - **discard** (`--quiet`): every message is dropped, including errors
//! - **console** (default): messages at or below the threshold go to stdout
//! - **file** (`--log-file`): messages are appended to a file, one per line
//!
//! The threshold is determined by (in priority order):
//!
//! 1. `RUST_LOG` environment variable (if set)
//! 2. CLI flags: `--log <LEVEL>`, or `-v` (info)
//! 3. Default: error level

use env_logger::{Builder, Target};
use log::LevelFilter;
use std::env;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while constructing the logging sink.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The requested log file could not be opened for writing.
    #[error("could not open log file {}: {source}", path.display())]
    OpenLogFile {
        /// Path passed via `--log-file`
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Sink and threshold configuration, derived from the CLI.
#[derive(Debug, Clone)]
pub struct LogOptions {
    /// Discard every message (the `-q` flag).
    pub quiet: bool,
    /// Severity threshold for the console or file sink.
    pub level: LevelFilter,
    /// Write to this file instead of the console.
    pub file: Option<PathBuf>,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            quiet: false,
            level: LevelFilter::Error,
            file: None,
        }
    }
}

/// Initialize the logging subsystem.
///
/// Should be called once at startup, before any logging calls are made; a
/// repeated call (as happens across in-process tests) leaves the first
/// configuration in place.
///
/// # Errors
///
/// Fails if a log file was requested and cannot be created. This happens
/// before any other work, so an unusable logging configuration aborts the
/// run up front.
pub fn init(options: &LogOptions) -> Result<(), LoggingError> {
    let mut builder = Builder::new();

    if env::var("RUST_LOG").is_ok() {
        // RUST_LOG takes precedence over CLI flags
        builder.parse_default_env();
    } else if options.quiet {
        builder.filter_level(LevelFilter::Off);
    } else {
        builder.filter_level(options.level);
    }

    match &options.file {
        Some(path) => {
            let file = File::create(path).map_err(|source| LoggingError::OpenLogFile {
                path: path.clone(),
                source,
            })?;
            builder.target(Target::Pipe(Box::new(file)));
            // Plain format for the file sink: no colors, one entry per line
            builder.format(|buf, record| {
                writeln!(buf, "{:<5} {}", record.level(), record.args())
            });
        }
        None => {
            // The console sink writes results to stdout so they can be piped
            builder.target(Target::Stdout);
            builder.format(|buf, record| {
                let level = record.level();
                let level_style = buf.default_level_style(level);
                writeln!(
                    buf,
                    "{level_style}{:<5}{level_style:#} {}",
                    level,
                    record.args()
                )
            });
        }
    }

    // try_init so a second in-process initialization is a no-op
    let _ = builder.try_init();
    Ok(())
}
