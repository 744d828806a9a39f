use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

/// Custom error types for the dataset-builder library
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decoding error
    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    /// Directory to scan does not exist
    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    /// Invalid configuration error
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// A novel image could not be moved into the reference collection.
    ///
    /// Never recovered locally: continuing would let a later copy of the
    /// same image be classified as novel.
    #[error("Failed to relocate {} to {}: {reason}", source_path.display(), destination.display())]
    Relocation {
        source_path: PathBuf,
        destination: PathBuf,
        reason: String,
    },

    /// HTTP transport or status error from the search API
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Malformed image URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
