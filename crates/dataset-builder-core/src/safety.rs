//! Safe file moves into the reference collection.
//!
//! A move either completes, leaving exactly one copy at the destination, or
//! fails with [`Error::Relocation`] leaving the source where it was.

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::logging::{log_file_error, log_fs_modification};

/// Move `source` to `destination`, which must not already exist.
///
/// Uses a rename when both paths are on one volume. Across volumes the file
/// is copied and synced first, and the source is removed only once the
/// destination is complete.
pub fn relocate_file(source: &Path, destination: &Path) -> Result<()> {
    if destination.exists() {
        return Err(relocation_error(
            source,
            destination,
            "destination already exists",
        ));
    }

    match fs::rename(source, destination) {
        Ok(()) => {
            log_fs_modification(
                "move",
                source,
                Some(destination.display().to_string().as_str()),
            );
            Ok(())
        }
        Err(e) if is_cross_device(&e) => copy_then_remove(source, destination),
        Err(e) => {
            log_file_error(source, "move", &e);
            Err(relocation_error(source, destination, &e.to_string()))
        }
    }
}

/// Cross-volume move: copy to a temporary sibling of `destination`, sync,
/// rename into place, then delete `source`.
pub(crate) fn copy_then_remove(source: &Path, destination: &Path) -> Result<()> {
    copy_then_remove_with(source, destination, |path| fs::remove_file(path))
}

/// As [`copy_then_remove`], with the source deletion supplied by the caller
fn copy_then_remove_with<F>(source: &Path, destination: &Path, remove_source: F) -> Result<()>
where
    F: FnOnce(&Path) -> io::Result<()>,
{
    let partial = partial_path(destination);

    let copied = fs::copy(source, &partial)
        .and_then(|_| OpenOptions::new().write(true).open(&partial)?.sync_all())
        .and_then(|_| fs::rename(&partial, destination));
    if let Err(e) = copied {
        log_file_error(source, "copy", &e);
        let _ = fs::remove_file(&partial);
        return Err(relocation_error(source, destination, &e.to_string()));
    }

    if let Err(e) = remove_source(source) {
        // Roll back so the image is not left in both directories
        log_file_error(source, "remove_source", &e);
        if let Err(rollback) = fs::remove_file(destination) {
            log_file_error(destination, "rollback", &rollback);
        }
        return Err(relocation_error(source, destination, &e.to_string()));
    }

    log_fs_modification(
        "copy_move",
        source,
        Some(destination.display().to_string().as_str()),
    );
    Ok(())
}

fn partial_path(destination: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    if let Some(file_name) = destination.file_name() {
        name.push(file_name);
    }
    name.push(".partial");
    destination.with_file_name(name)
}

#[cfg(unix)]
fn is_cross_device(e: &io::Error) -> bool {
    // EXDEV
    e.raw_os_error() == Some(18)
}

#[cfg(windows)]
fn is_cross_device(e: &io::Error) -> bool {
    // ERROR_NOT_SAME_DEVICE
    e.raw_os_error() == Some(17)
}

#[cfg(not(any(unix, windows)))]
fn is_cross_device(_e: &io::Error) -> bool {
    false
}

fn relocation_error(source: &Path, destination: &Path, reason: &str) -> Error {
    Error::Relocation {
        source_path: source.to_path_buf(),
        destination: destination.to_path_buf(),
        reason: reason.to_string(),
    }
}
