use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::logging::log_file_error;

/// List the regular files directly inside `directory`, sorted by file name.
///
/// The listing is taken once; files created afterwards are not observed by
/// the caller's loop. Subdirectories are not descended into.
pub fn list_files(directory: &Path) -> Result<Vec<PathBuf>> {
    if !directory.is_dir() {
        return Err(Error::DirectoryNotFound(directory.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        match entry {
            Ok(entry) if entry.file_type().is_file() => files.push(entry.into_path()),
            Ok(_) => {}
            Err(e) => {
                // Entry vanished or is unreadable; the rest of the listing is still usable
                let path = e.path().unwrap_or(directory).to_path_buf();
                log_file_error(&path, "list", &e);
            }
        }
    }

    Ok(files)
}

// -- Tests --
