//! imgdupsort - Duplicate Image Sorter
//!
//! A batch CLI tool that scans one directory of images, fingerprints each
//! image with a coarse perceptual bit signature, and sorts the files: every
//! set of images sharing a signature moves (or copies) into its own
//! subdirectory of the output directory, and everything else lands in an
//! `unduplicated` subdirectory.

pub mod cli;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod placement;
pub mod scanner;

use anyhow::{Context, Result};

use crate::cli::Cli;
use crate::duplicates::FinderConfig;
use crate::error::ExitCode;
use crate::placement::PlaceOptions;

/// Run one scan-group-place pass with the parsed CLI options.
///
/// # Errors
///
/// Fails on an unusable logging configuration, a directory-listing failure,
/// or any directory-creation or file-placement failure. Fatal errors are
/// logged at error severity and propagated; nothing already placed is rolled
/// back.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init(&cli.log_options())?;

    let config = FinderConfig {
        sensitivity: cli.sensitivity,
        show_progress: !cli.quiet,
    };
    let (index, summary) = match duplicates::find_duplicates(&cli.input_dir, &config) {
        Ok(result) => result,
        Err(e) => {
            log::error!("could not list directories in {}", cli.input_dir.display());
            return Err(e).context("scan failed");
        }
    };
    log::debug!(
        "{} entries listed, {} decoded, {} skipped",
        summary.listed,
        summary.decoded,
        summary.skipped
    );

    duplicates::log_report(&index, &cli.input_dir);
    if index.is_empty() {
        return Ok(ExitCode::NoImages);
    }

    let plan = placement::plan_placement(&index);
    let options = PlaceOptions { copy: cli.copy };
    let stats = placement::apply_plan(&plan, &cli.input_dir, &cli.output, &options)
        .context("placement failed")?;
    log::debug!(
        "placed {} files into {} directories under {}",
        stats.placed,
        stats.directories_created,
        cli.output.display()
    );

    Ok(ExitCode::Success)
}
