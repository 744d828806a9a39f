use reqwest::blocking::Client;
use reqwest::Url;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::discovery::list_files;
use crate::error::{Error, Result};
use crate::logging::{report_status, Severity};

/// File extension of the image a URL points at, taken from the last path
/// segment only. Lowercased, with the leading dot; empty when absent.
pub fn extension_from_url(url: &str) -> Result<String> {
    let parsed = Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))?;

    let extension = parsed
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .and_then(|segment| Path::new(segment).extension())
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default();

    Ok(extension)
}

/// Zero-padded file name for the `counter`th downloaded image
pub fn image_file_name(counter: usize, extension: &str) -> String {
    format!("{:08}{}", counter, extension)
}

/// First counter past every numbered image already in `output_dir`
pub fn next_image_counter(output_dir: &Path) -> Result<usize> {
    let next = list_files(output_dir)?
        .iter()
        .filter_map(|path| path.file_stem()?.to_str()?.parse::<usize>().ok())
        .map(|counter| counter + 1)
        .max()
        .unwrap_or(0);
    Ok(next)
}

/// Download `url` into `output_dir`, returning the written path.
///
/// Never replaces an existing file. Any failure is reported and skipped.
pub fn retrieve_image(
    client: &Client,
    url: &str,
    counter: usize,
    output_dir: &Path,
) -> Option<PathBuf> {
    match try_retrieve(client, url, counter, output_dir) {
        Ok(path) => Some(path),
        Err(e) => {
            log::debug!("Download of {} failed: {}", url, e);
            report_status(Severity::Warning, url, "skipping");
            None
        }
    }
}

fn try_retrieve(client: &Client, url: &str, counter: usize, output_dir: &Path) -> Result<PathBuf> {
    let extension = extension_from_url(url)?;
    let bytes = client.get(url).send()?.error_for_status()?.bytes()?;

    let image_path = output_dir.join(image_file_name(counter, &extension));
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&image_path)?;
    file.write_all(&bytes)?;
    Ok(image_path)
}
