use log::{debug, info};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::discovery::list_files;
use crate::error::Result;
use crate::fingerprint::{fingerprint_file, Fingerprint};
use crate::logging::{report_status, Severity};
use crate::types::IndexStats;

/// In-memory mapping from fingerprint to the file that first produced it.
///
/// Lives for a single run. Entries are only ever added.
#[derive(Debug, Default)]
pub struct ReferenceIndex {
    entries: HashMap<Fingerprint, PathBuf>,
}

impl ReferenceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `path` for `fingerprint`. Returns false, leaving the
    /// existing entry in place, when the fingerprint is already known.
    pub fn register(&mut self, fingerprint: Fingerprint, path: PathBuf) -> bool {
        match self.entries.entry(fingerprint) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(path);
                true
            }
        }
    }

    pub fn lookup(&self, fingerprint: &Fingerprint) -> Option<&Path> {
        self.entries.get(fingerprint).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fingerprint every file in the reference directory into `index`.
///
/// Files that fail to load are reported and skipped. Nothing on disk is
/// modified.
pub fn make_reference_hashes(directory: &Path, index: &mut ReferenceIndex) -> Result<IndexStats> {
    let mut stats = IndexStats::default();

    for path in list_files(directory)? {
        let fingerprint = match fingerprint_file(&path) {
            Ok(fingerprint) => fingerprint,
            Err(e) => {
                debug!("Failed to fingerprint {}: {}", path.display(), e);
                report_status(Severity::Warning, path.display(), "skipping");
                stats.skipped += 1;
                continue;
            }
        };

        if index.register(fingerprint, path.clone()) {
            stats.indexed += 1;
        } else {
            debug!(
                "Fingerprint {} of {} already registered, keeping first",
                fingerprint,
                path.display()
            );
            stats.collisions += 1;
        }
    }

    info!(
        "Indexed {} reference images from {} ({} skipped, {} sharing a fingerprint)",
        stats.indexed,
        directory.display(),
        stats.skipped,
        stats.collisions
    );
    Ok(stats)
}
