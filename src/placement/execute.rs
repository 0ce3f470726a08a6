//! Plan execution: directory creation and file moves/copies.
//!
//! # Overview
//!
//! This module applies a [`PlacementPlan`](super::PlacementPlan) to the
//! filesystem:
//! - Creates the output root (if absent), one directory per group, and the
//!   reserved `unduplicated` directory.
//! - Moves each member into its target directory, or copies it when the
//!   `--copy` flag is set. Copies preserve the source's modification time.
//!
//! Any directory-creation or file-placement failure aborts the run. Files
//! already placed stay where they are; the tool is one-shot batch software
//! and a human re-runs it after fixing the underlying condition.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use filetime::FileTime;
use thiserror::Error;

use crate::scanner::ImageEntry;

use super::{PlacementPlan, UNDUPLICATED_DIR};

/// Errors that can occur while applying a placement plan.
#[derive(Debug, Error)]
pub enum PlaceError {
    /// A target directory could not be created.
    #[error("could not create directory {}: {source}", path.display())]
    CreateDir {
        /// Directory that failed to be created
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A file could not be moved into its target directory.
    #[error("could not move {} into {}: {source}", src.display(), dst.display())]
    Move {
        /// Source file
        src: PathBuf,
        /// Target directory
        dst: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A file could not be copied into its target directory.
    #[error("could not copy {} into {}: {source}", src.display(), dst.display())]
    Copy {
        /// Source file
        src: PathBuf,
        /// Target directory
        dst: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl PlaceError {
    /// Get the path associated with this error.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::CreateDir { path, .. } => path,
            Self::Move { src, .. } | Self::Copy { src, .. } => src,
        }
    }
}

/// Options for applying a plan.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceOptions {
    /// Copy files instead of moving them, leaving the sources in place.
    pub copy: bool,
}

/// Results of a completed placement run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceStats {
    /// Files moved or copied
    pub placed: usize,
    /// Directories created, counting `unduplicated`
    pub directories_created: usize,
}

/// Apply a placement plan under `output_root`.
///
/// Sources are resolved against `input_dir` by entry name. An empty plan
/// creates nothing, not even the output root.
///
/// # Errors
///
/// The first directory-creation or placement failure aborts with a
/// [`PlaceError`], logged at error severity. No rollback is attempted.
pub fn apply_plan(
    plan: &PlacementPlan,
    input_dir: &Path,
    output_root: &Path,
    options: &PlaceOptions,
) -> Result<PlaceStats, PlaceError> {
    let mut stats = PlaceStats::default();
    if plan.is_empty() {
        return Ok(stats);
    }

    if !output_root.exists() {
        fs::create_dir_all(output_root).map_err(|source| {
            log::error!("could not create directory {}", output_root.display());
            PlaceError::CreateDir {
                path: output_root.to_path_buf(),
                source,
            }
        })?;
        stats.directories_created += 1;
    }

    for group in &plan.group_dirs {
        let dst_dir = output_root.join(&group.name);
        create_dir(&dst_dir)?;
        stats.directories_created += 1;
        for member in &group.members {
            place_file(member, input_dir, &dst_dir, options.copy)?;
            stats.placed += 1;
        }
    }

    let undup_dir = output_root.join(UNDUPLICATED_DIR);
    create_dir(&undup_dir)?;
    stats.directories_created += 1;
    for member in &plan.unduplicated {
        place_file(member, input_dir, &undup_dir, options.copy)?;
        stats.placed += 1;
    }

    Ok(stats)
}

fn create_dir(path: &Path) -> Result<(), PlaceError> {
    fs::create_dir(path).map_err(|source| {
        log::error!("could not create directory {}", path.display());
        PlaceError::CreateDir {
            path: path.to_path_buf(),
            source,
        }
    })
}

fn place_file(
    entry: &ImageEntry,
    input_dir: &Path,
    dst_dir: &Path,
    copy: bool,
) -> Result<(), PlaceError> {
    let src = input_dir.join(&entry.name);
    let dst = dst_dir.join(&entry.name);

    if copy {
        log::debug!("Copying {} into {}", src.display(), dst_dir.display());
        copy_with_times(&src, &dst).map_err(|source| PlaceError::Copy {
            src,
            dst: dst_dir.to_path_buf(),
            source,
        })
    } else {
        log::debug!("Moving {} into {}", src.display(), dst_dir.display());
        move_file(&src, &dst).map_err(|source| PlaceError::Move {
            src,
            dst: dst_dir.to_path_buf(),
            source,
        })
    }
}

/// Copy a file and carry over its modification time.
fn copy_with_times(src: &Path, dst: &Path) -> io::Result<()> {
    fs::copy(src, dst)?;
    let metadata = fs::metadata(src)?;
    filetime::set_file_mtime(dst, FileTime::from_last_modification_time(&metadata))?;
    Ok(())
}

/// Move a file, falling back to copy-and-delete across filesystems.
fn move_file(src: &Path, dst: &Path) -> io::Result<()> {
    match fs::rename(src, dst) {
        Ok(()) => Ok(()),
        Err(_) => {
            copy_with_times(src, dst)?;
            fs::remove_file(src)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::GroupDir;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_file(dir: &Path, name: &str) -> ImageEntry {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        writeln!(file, "content of {name}").unwrap();
        ImageEntry::new(name.to_string(), path)
    }

    fn one_group_plan(input: &Path) -> PlacementPlan {
        let a = write_file(input, "a.jpg");
        let b = write_file(input, "b.jpg");
        let c = write_file(input, "c.jpg");
        PlacementPlan {
            group_dirs: vec![GroupDir {
                name: "a".to_string(),
                members: vec![a, b],
            }],
            unduplicated: vec![c],
        }
    }

    #[test]
    fn test_apply_plan_moves_by_default() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        let plan = one_group_plan(input.path());

        let stats = apply_plan(
            &plan,
            input.path(),
            output.path(),
            &PlaceOptions::default(),
        )
        .unwrap();

        assert_eq!(stats.placed, 3);
        assert_eq!(stats.directories_created, 2);
        assert!(output.path().join("a").join("a.jpg").exists());
        assert!(output.path().join("a").join("b.jpg").exists());
        assert!(output.path().join(UNDUPLICATED_DIR).join("c.jpg").exists());
        // Sources are gone after a move
        assert!(!input.path().join("a.jpg").exists());
        assert!(!input.path().join("b.jpg").exists());
        assert!(!input.path().join("c.jpg").exists());
    }

    #[test]
    fn test_apply_plan_copy_keeps_sources() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        let plan = one_group_plan(input.path());

        apply_plan(
            &plan,
            input.path(),
            output.path(),
            &PlaceOptions { copy: true },
        )
        .unwrap();

        assert!(input.path().join("a.jpg").exists());
        assert!(input.path().join("c.jpg").exists());
        assert!(output.path().join("a").join("a.jpg").exists());
        assert!(output.path().join(UNDUPLICATED_DIR).join("c.jpg").exists());
    }

    #[test]
    fn test_copy_preserves_modification_time() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        let entry = write_file(input.path(), "old.jpg");

        let stamp = FileTime::from_unix_time(1_000_000_000, 0);
        filetime::set_file_mtime(&entry.path, stamp).unwrap();

        let plan = PlacementPlan {
            group_dirs: Vec::new(),
            unduplicated: vec![entry],
        };
        apply_plan(
            &plan,
            input.path(),
            output.path(),
            &PlaceOptions { copy: true },
        )
        .unwrap();

        let copied = output.path().join(UNDUPLICATED_DIR).join("old.jpg");
        let metadata = fs::metadata(copied).unwrap();
        assert_eq!(FileTime::from_last_modification_time(&metadata), stamp);
    }

    #[test]
    fn test_apply_empty_plan_creates_nothing() {
        let input = tempdir().unwrap();
        let output_root = input.path().join("out");

        let stats = apply_plan(
            &PlacementPlan::default(),
            input.path(),
            &output_root,
            &PlaceOptions::default(),
        )
        .unwrap();

        assert_eq!(stats, PlaceStats::default());
        assert!(!output_root.exists());
    }

    #[test]
    fn test_apply_plan_creates_missing_output_root() {
        let input = tempdir().unwrap();
        let output_root = input.path().join("sorted");
        let entry = write_file(input.path(), "only.jpg");
        let plan = PlacementPlan {
            group_dirs: Vec::new(),
            unduplicated: vec![entry],
        };

        let stats =
            apply_plan(&plan, input.path(), &output_root, &PlaceOptions::default()).unwrap();

        assert_eq!(stats.directories_created, 2);
        assert!(output_root.join(UNDUPLICATED_DIR).join("only.jpg").exists());
    }

    #[test]
    fn test_pre_existing_group_directory_is_fatal() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        let plan = one_group_plan(input.path());
        fs::create_dir(output.path().join("a")).unwrap();

        let result = apply_plan(
            &plan,
            input.path(),
            output.path(),
            &PlaceOptions::default(),
        );

        match result {
            Err(PlaceError::CreateDir { path, .. }) => {
                assert_eq!(path, output.path().join("a"));
            }
            other => panic!("expected CreateDir error, got {other:?}"),
        }
        // Nothing rolled back, sources untouched before the failure point
        assert!(input.path().join("a.jpg").exists());
    }

    #[test]
    fn test_place_error_path_accessor() {
        let err = PlaceError::CreateDir {
            path: PathBuf::from("/out/a"),
            source: io::Error::other("boom"),
        };
        assert_eq!(err.path(), Path::new("/out/a"));

        let err = PlaceError::Move {
            src: PathBuf::from("/in/a.jpg"),
            dst: PathBuf::from("/out/a"),
            source: io::Error::other("boom"),
        };
        assert_eq!(err.path(), Path::new("/in/a.jpg"));
    }
}
