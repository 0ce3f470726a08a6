//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Signature-keyed grouping of image entries ([`GroupIndex`])
//! - The decode-and-sign pipeline ([`finder`])
//! - Result reporting at info severity

pub mod finder;

use std::collections::HashMap;
use std::path::Path;

use crate::scanner::{ImageEntry, Signature};

// Re-export main types
pub use finder::{find_duplicates, FinderConfig, ScanSummary};

/// Signature-keyed index of scanned images.
///
/// Entries are fed in directory-listing order. Each signature key moves
/// through three states: unseen, singleton (one entry so far), and group
/// (two or more entries). The singleton entry is retained so it can seed the
/// group when a second occurrence arrives; promotion moves it out of the
/// singleton map, so singles and groups partition all added entries at every
/// point in time. No transition ever demotes a group.
///
/// Group iteration follows promotion order and singleton iteration follows
/// first-occurrence order, so downstream directory naming is reproducible for
/// a given listing order.
#[derive(Debug, Default)]
pub struct GroupIndex {
    /// Signatures seen exactly once so far, each with its entry
    singles: HashMap<Signature, ImageEntry>,
    /// Signatures seen at least twice, with members in arrival order
    groups: HashMap<Signature, Vec<ImageEntry>>,
    /// Every signature, in first-occurrence order
    first_seen: Vec<Signature>,
    /// Group signatures, in promotion order
    promoted: Vec<Signature>,
    /// Number of entries added
    total: usize,
}

impl GroupIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one scanned entry under its signature.
    ///
    /// Must be called in directory-listing order for group membership order
    /// to be meaningful.
    pub fn add(&mut self, sig: Signature, entry: ImageEntry) {
        self.total += 1;

        if let Some(members) = self.groups.get_mut(&sig) {
            // Third or later occurrence: the group grows
            members.push(entry);
        } else if let Some(first) = self.singles.remove(&sig) {
            // Second occurrence: promote, seeding with the retained first entry
            self.groups.insert(sig, vec![first, entry]);
            self.promoted.push(sig);
        } else {
            // First occurrence
            self.singles.insert(sig, entry);
            self.first_seen.push(sig);
        }
    }

    /// Whether this signature has been seen before.
    #[must_use]
    pub fn contains(&self, sig: Signature) -> bool {
        self.singles.contains_key(&sig) || self.groups.contains_key(&sig)
    }

    /// Duplicate groups in promotion order, each with its ordered members.
    pub fn groups(&self) -> impl Iterator<Item = (Signature, &[ImageEntry])> {
        self.promoted
            .iter()
            .map(move |sig| (*sig, self.groups[sig].as_slice()))
    }

    /// Unduplicated entries, in first-occurrence order.
    pub fn singles(&self) -> impl Iterator<Item = &ImageEntry> {
        self.first_seen
            .iter()
            .filter_map(move |sig| self.singles.get(sig))
    }

    /// Number of entries added so far.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of duplicate groups.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.promoted.len()
    }

    /// Number of unduplicated entries.
    #[must_use]
    pub fn single_count(&self) -> usize {
        self.singles.len()
    }

    /// Check if no entries were added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Check if at least one duplicate group exists.
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        !self.promoted.is_empty()
    }
}

/// Render a path for log messages, the way the original directory was named
/// on the command line.
fn dir_phrase(dir: &Path) -> String {
    if dir == Path::new(".") {
        "current directory".to_string()
    } else {
        format!("directory {}", dir.display())
    }
}

/// Log the scan results.
///
/// Counts and group membership go to the info level; an input directory with
/// no decodable images is a warning.
pub fn log_report(index: &GroupIndex, input_dir: &Path) {
    if index.is_empty() {
        log::warn!("no images found in {}", dir_phrase(input_dir));
        return;
    }

    if !index.has_duplicates() {
        log::info!("no duplicate images in {}", dir_phrase(input_dir));
        return;
    }

    let count = index.group_count();
    if count == 1 {
        log::info!("1 duplicated image found in {}", dir_phrase(input_dir));
    } else {
        log::info!(
            "{} duplicated images found in {}",
            count,
            dir_phrase(input_dir)
        );
    }

    log::info!("The following are groups of identical images:");
    for (_, members) in index.groups() {
        for member in members {
            log::info!("{}", member.name);
        }
        log::info!("");
    }
}
