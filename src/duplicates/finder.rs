//! The decode-and-sign pipeline.
//!
//! # Overview
//!
//! This module turns a directory listing into a populated [`GroupIndex`]:
//!
//! 1. List the input directory (sorted, non-recursive).
//! 2. Decode and sign every entry in parallel with rayon; decoding and
//!    signature extraction are pure per-file operations.
//! 3. Merge results back in listing order and feed the index sequentially.
//!
//! Listing order is re-imposed before the index sees any entry: group
//! membership order and the directory names derived from it must not depend
//! on thread scheduling.

use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use crate::scanner::{self, decode_image, signature, ImageEntry, ScanError, Signature};

use super::GroupIndex;

/// Configuration for a duplicate scan.
#[derive(Debug, Clone)]
pub struct FinderConfig {
    /// Signature grid size.
    pub sensitivity: u32,
    /// Draw a progress bar on stderr during the decode phase.
    pub show_progress: bool,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            sensitivity: scanner::DEFAULT_SENSITIVITY,
            show_progress: false,
        }
    }
}

/// Statistics from a duplicate scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Directory entries listed
    pub listed: usize,
    /// Entries successfully decoded and signed
    pub decoded: usize,
    /// Entries skipped because they could not be decoded as images
    pub skipped: usize,
}

/// Scan `input_dir` and group its images by signature.
///
/// # Errors
///
/// Fails if the directory listing fails; decode failures are recoverable and
/// only counted in the summary.
pub fn find_duplicates(
    input_dir: &Path,
    config: &FinderConfig,
) -> Result<(GroupIndex, ScanSummary), ScanError> {
    let entries = scanner::list_images(input_dir)?;
    let listed = entries.len();
    log::debug!(
        "listed {} entries in {}, sensitivity {}",
        listed,
        input_dir.display(),
        config.sensitivity
    );

    let progress = make_progress(config.show_progress, listed as u64);

    // Decode + sign in parallel, keeping each entry's listing position
    let sensitivity = config.sensitivity;
    let mut signed: Vec<(usize, ImageEntry, Option<Signature>)> = entries
        .into_par_iter()
        .enumerate()
        .map(|(position, entry)| {
            log::debug!("attempting to open file {}", entry.path.display());
            let sig = match decode_image(&entry.path) {
                Ok(image) => Some(signature(&image, sensitivity)),
                Err(e) => {
                    log::debug!("{e}");
                    None
                }
            };
            progress.inc(1);
            (position, entry, sig)
        })
        .collect();
    progress.finish_and_clear();

    // Re-assert listing order before the index sees anything
    signed.sort_by_key(|(position, _, _)| *position);

    let mut index = GroupIndex::new();
    let mut skipped = 0;
    for (_, entry, sig) in signed {
        match sig {
            Some(sig) => {
                if index.contains(sig) {
                    log::debug!("{} is a duplicated image", entry.name);
                } else {
                    log::debug!("{} is an unduplicated image", entry.name);
                }
                index.add(sig, entry);
            }
            None => skipped += 1,
        }
    }

    let summary = ScanSummary {
        listed,
        decoded: index.total(),
        skipped,
    };
    Ok((index, summary))
}

fn make_progress(show: bool, len: u64) -> ProgressBar {
    if !show || len == 0 {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len);
    bar.set_style(
        ProgressStyle::with_template("Signing images [{bar:40}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    bar
}
