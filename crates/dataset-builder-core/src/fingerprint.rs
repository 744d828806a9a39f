//! # Perceptual fingerprints
//!
//! An average hash over an 8×8 grayscale grid: the image is downsampled,
//! each cell is compared against the grid mean, and the 64 comparisons are
//! packed into a `u64`. Visually near-identical images usually land on the
//! same value; distinct images usually do not. Equality is exact, there is
//! no distance threshold.

use image::{imageops::FilterType, DynamicImage, GenericImageView};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::Result;
use crate::loader::load_image;

/// Number of cells along each side of the hash grid
const GRID: u32 = 8;

/// A 64-bit perceptual fingerprint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(pub u64);

impl fmt::Display for Fingerprint {
    /// Sixteen lowercase hex digits, safe to embed in file names
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFingerprintError(String);

impl fmt::Display for ParseFingerprintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid fingerprint: {:?}", self.0)
    }
}

impl std::error::Error for ParseFingerprintError {}

impl FromStr for Fingerprint {
    type Err = ParseFingerprintError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.len() != 16 {
            return Err(ParseFingerprintError(s.to_string()));
        }
        u64::from_str_radix(s, 16)
            .map(Fingerprint)
            .map_err(|_| ParseFingerprintError(s.to_string()))
    }
}

/// Calculate the fingerprint of a decoded image
pub fn fingerprint_image(img: &DynamicImage) -> Fingerprint {
    let small = img.resize_exact(GRID, GRID, FilterType::Triangle);

    // Grayscale formula: 0.299*R + 0.587*G + 0.114*B
    let mut pixels = [0.0f32; (GRID * GRID) as usize];
    let mut sum = 0.0;
    for (x, y, pixel) in small.pixels() {
        let gray = 0.299 * pixel[0] as f32 + 0.587 * pixel[1] as f32 + 0.114 * pixel[2] as f32;
        pixels[(y * GRID + x) as usize] = gray;
        sum += gray;
    }
    let mean = sum / pixels.len() as f32;

    let hash = pixels
        .iter()
        .enumerate()
        .filter(|&(_, &p)| p > mean)
        .fold(0u64, |acc, (bit, _)| acc | (1u64 << bit));

    Fingerprint(hash)
}

/// Load an image from disk and calculate its fingerprint
pub fn fingerprint_file<P: AsRef<Path>>(path: P) -> Result<Fingerprint> {
    let img = load_image(path)?;
    Ok(fingerprint_image(&img))
}
