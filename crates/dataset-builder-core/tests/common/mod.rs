pub mod image_variants;
pub use image_variants::*;

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary reference and incoming directories for one test
pub struct Workspace {
    pub _root: TempDir,
    pub reference: PathBuf,
    pub incoming: PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let reference = root.path().join("reference");
        let incoming = root.path().join("incoming");
        fs::create_dir(&reference).unwrap();
        fs::create_dir(&incoming).unwrap();
        Self {
            _root: root,
            reference,
            incoming,
        }
    }
}

/// Sorted file names directly inside `dir`
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
