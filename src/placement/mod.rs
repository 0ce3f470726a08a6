//! Placement planning: mapping duplicate groups to output directories.
//!
//! # Overview
//!
//! The planner turns a populated [`GroupIndex`] into a [`PlacementPlan`]:
//! one uniquely named directory per duplicate group, plus the reserved
//! `unduplicated` bucket holding every singleton. Planning is pure
//! computation; [`execute`] applies the plan to the filesystem.

pub mod execute;

use std::collections::HashSet;

use crate::duplicates::GroupIndex;
use crate::scanner::ImageEntry;

// Re-export main types
pub use execute::{apply_plan, PlaceError, PlaceOptions, PlaceStats};

/// Reserved directory name for images with no duplicate.
pub const UNDUPLICATED_DIR: &str = "unduplicated";

/// One duplicate group's target directory and its members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupDir {
    /// Directory name under the output root; unique within the plan and
    /// never equal to [`UNDUPLICATED_DIR`]
    pub name: String,
    /// Files to place in the directory, in group membership order
    pub members: Vec<ImageEntry>,
}

/// The computed source-to-destination layout for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlacementPlan {
    /// Duplicate group directories, in group promotion order
    pub group_dirs: Vec<GroupDir>,
    /// Members of the reserved `unduplicated` directory
    pub unduplicated: Vec<ImageEntry>,
}

impl PlacementPlan {
    /// Check if the plan places no files at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.group_dirs.is_empty() && self.unduplicated.is_empty()
    }

    /// Number of directories the plan will create, counting `unduplicated`.
    #[must_use]
    pub fn dir_count(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.group_dirs.len() + 1
        }
    }

    /// Total number of files the plan will place.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.group_dirs.iter().map(|g| g.members.len()).sum::<usize>() + self.unduplicated.len()
    }
}

/// Compute the placement plan for a populated index.
///
/// Each group is named after its first member's file name with everything
/// from the first `.` onward stripped. A candidate that is empty, already
/// taken, or equal to the reserved `unduplicated` name gets a `_N` suffix,
/// where `N` comes from a run-wide counter that increments on every collision
/// and is never reused. Assigned names are therefore pairwise distinct and
/// never shadow the reserved directory.
#[must_use]
pub fn plan_placement(index: &GroupIndex) -> PlacementPlan {
    let mut assigned: HashSet<String> = HashSet::new();
    assigned.insert(UNDUPLICATED_DIR.to_string());

    let mut counter: u64 = 0;
    let mut group_dirs = Vec::with_capacity(index.group_count());

    for (_, members) in index.groups() {
        let base = members
            .first()
            .map(|m| m.name.split('.').next().unwrap_or("").to_string())
            .unwrap_or_default();

        let mut name = base.clone();
        while name.is_empty() || assigned.contains(&name) {
            name = format!("{base}_{counter}");
            counter += 1;
        }
        assigned.insert(name.clone());

        group_dirs.push(GroupDir {
            name,
            members: members.to_vec(),
        });
    }

    PlacementPlan {
        group_dirs,
        unduplicated: index.singles().cloned().collect(),
    }
}
