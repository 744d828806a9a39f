//! Classify incoming images against the reference index.
//!
//! Every incoming file ends in exactly one [`Outcome`]: skipped when it does
//! not load, reported when its fingerprint is already indexed, or moved into
//! the reference directory and registered when it is novel.

use log::{debug, info};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::discovery::list_files;
use crate::error::Result;
use crate::fingerprint::{fingerprint_file, Fingerprint};
use crate::index::ReferenceIndex;
use crate::logging::{report_status, Severity};
use crate::safety::relocate_file;
use crate::types::{DedupSummary, Outcome};

#[cfg(test)]
mod tests;

/// Classify every file in `incoming` against `index`, moving novel images
/// into `reference`.
///
/// Files are processed in listing order, so an incoming image is compared
/// against novel images accepted earlier in the same pass. A failed move
/// aborts the pass.
pub fn mark_duplicates(
    incoming: &Path,
    reference: &Path,
    index: &mut ReferenceIndex,
) -> Result<DedupSummary> {
    let mut summary = DedupSummary::default();

    for path in list_files(incoming)? {
        let outcome = classify_file(&path, reference, index)?;
        summary.record(path, outcome);
    }

    info!(
        "Processed {} incoming files: {} new, {} duplicates, {} skipped",
        summary.files.len(),
        summary.relocated(),
        summary.duplicates(),
        summary.skipped()
    );
    Ok(summary)
}

/// Classify a single incoming file
pub fn classify_file(path: &Path, reference: &Path, index: &mut ReferenceIndex) -> Result<Outcome> {
    let fingerprint = match fingerprint_file(path) {
        Ok(fingerprint) => fingerprint,
        Err(e) => {
            debug!("Failed to fingerprint {}: {}", path.display(), e);
            report_status(Severity::Warning, path.display(), "skipping");
            return Ok(Outcome::Skipped);
        }
    };

    if let Some(original) = index.lookup(&fingerprint) {
        report_status(
            Severity::Info,
            format_args!("{} -> {}", path.display(), original.display()),
            "duplicate",
        );
        return Ok(Outcome::Duplicate {
            fingerprint,
            original: original.to_path_buf(),
        });
    }

    let destination = relocation_target(reference, fingerprint, path);
    relocate_file(path, &destination)?;

    // The lookup above missed, so this registration cannot be refused
    index.register(fingerprint, destination.clone());
    debug!("Registered {} as {}", fingerprint, destination.display());

    Ok(Outcome::Relocated {
        fingerprint,
        destination,
    })
}

/// Destination for a novel image: `<fingerprint>_<file name>` inside `reference`
pub fn relocation_target(reference: &Path, fingerprint: Fingerprint, source: &Path) -> PathBuf {
    let mut name = OsString::from(format!("{}_", fingerprint));
    if let Some(file_name) = source.file_name() {
        name.push(file_name);
    }
    reference.join(name)
}
