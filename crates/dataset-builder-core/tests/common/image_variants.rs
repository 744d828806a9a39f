//! Controlled image variants for classification tests.
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::path::Path;

pub struct ImageVariant {
    base: DynamicImage,
}

impl ImageVariant {
    /// A 96x96 checkerboard of 24 pixel blocks
    pub fn checker() -> Self {
        let img = RgbImage::from_fn(96, 96, |x, y| {
            if (x / 24 + y / 24) % 2 == 0 {
                Rgb([230, 200, 60])
            } else {
                Rgb([20, 30, 90])
            }
        });
        Self {
            base: DynamicImage::ImageRgb8(img),
        }
    }

    /// Left half dark, right half bright
    pub fn split() -> Self {
        let img = RgbImage::from_fn(96, 96, |x, _| {
            if x < 48 {
                Rgb([20, 20, 20])
            } else {
                Rgb([230, 230, 230])
            }
        });
        Self {
            base: DynamicImage::ImageRgb8(img),
        }
    }

    /// Photographic negative of the base image
    pub fn inverted(&self) -> Self {
        let mut base = self.base.clone();
        base.invert();
        Self { base }
    }

    /// Lossless copy of the base image
    pub fn write_identical(&self, path: &Path) {
        self.base.save_with_format(path, ImageFormat::Png).unwrap();
    }

    /// Base image scaled up
    pub fn write_resized(&self, path: &Path) {
        self.base
            .resize_exact(160, 160, FilterType::Triangle)
            .save_with_format(path, ImageFormat::Png)
            .unwrap();
    }

    /// Base image re-encoded as JPEG
    pub fn write_recompressed(&self, path: &Path) {
        self.base
            .to_rgb8()
            .save_with_format(path, ImageFormat::Jpeg)
            .unwrap();
    }
}
