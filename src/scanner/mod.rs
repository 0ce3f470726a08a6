//! Scanner module for directory listing and image signing.
//!
//! This module provides functionality for:
//! - Non-recursive, sorted listing of the input directory
//! - Coarse perceptual bit signatures for decoded images
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`signature`]: image decoding and signature extraction
//!
//! # Example
//!
//! ```no_run
//! use imgdupsort::scanner::list_images;
//! use std::path::Path;
//!
//! for entry in list_images(Path::new(".")).unwrap() {
//!     println!("{}: {}", entry.name, entry.path.display());
//! }
//! ```

pub mod signature;

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

// Re-export main types
pub use signature::{
    decode_image, signature, DecodeError, Signature, DEFAULT_SENSITIVITY, MAX_SENSITIVITY,
};

/// One entry of the input directory listing.
///
/// Created once per directory entry; immutable thereafter. The name doubles
/// as the entry's identifier throughout grouping and placement, since the
/// scan covers a single flat directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    /// File name within the input directory
    pub name: String,
    /// Full path to the file
    pub path: PathBuf,
}

impl ImageEntry {
    /// Create a new entry.
    #[must_use]
    pub fn new(name: String, path: PathBuf) -> Self {
        Self { name, path }
    }
}

/// Errors that can occur while listing the input directory.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// The specified path was not found.
    #[error("path not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The specified path is not a directory.
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// An I/O error occurred while reading the directory.
    #[error("could not list directory {}: {source}", path.display())]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// List the input directory once, non-recursively, sorted by file name.
///
/// Every directory entry is returned, including non-images and
/// subdirectories; callers discover which entries are images by attempting to
/// decode them. Sorting makes the listing order deterministic, which duplicate
/// group membership order and directory naming depend on.
///
/// # Errors
///
/// Fails if the path does not exist, is not a directory, or cannot be read.
/// Listing failures are fatal to the run.
pub fn list_images(dir: &Path) -> Result<Vec<ImageEntry>, ScanError> {
    if !dir.exists() {
        return Err(ScanError::NotFound(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(ScanError::NotADirectory(dir.to_path_buf()));
    }

    let mut entries = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| ScanError::Io {
            path: dir.to_path_buf(),
            source: e.into(),
        })?;
        let name = entry.file_name().to_string_lossy().into_owned();
        entries.push(ImageEntry::new(name, entry.into_path()));
    }

    Ok(entries)
}
