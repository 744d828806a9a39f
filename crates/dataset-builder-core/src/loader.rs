use image::DynamicImage;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::logging::{log_file_error, report_status, Severity};

/// Open and fully decode an image, detecting the format from its content.
///
/// The file handle is owned by the decoder and closed before this returns,
/// on success and on error.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
    let reader = image::io::Reader::open(path.as_ref())?.with_guessed_format()?;
    Ok(reader.decode()?)
}

/// Check that a downloaded file decodes as an image, deleting it if not
pub fn is_valid_image(path: &Path) -> bool {
    match load_image(path) {
        Ok(_) => true,
        Err(e) => {
            log::debug!("Validation failed for {}: {}", path.display(), e);
            report_status(Severity::Warning, path.display(), "deleting");
            if let Err(e) = fs::remove_file(path) {
                log_file_error(path, "remove_invalid", &e);
            }
            false
        }
    }
}
