//! Image utilities for testing.
//!
//! Rendered figures are read back from disk and inspected pixel by pixel.

use image::{ImageFormat, RgbImage};
use std::path::Path;

/// Load a saved figure as RGB
pub fn load_rgb(path: &Path) -> RgbImage {
    image::open(path)
        .unwrap_or_else(|e| panic!("Failed to open {}: {}", path.display(), e))
        .to_rgb8()
}

/// Detect the on-disk format from the file content
pub fn detect_image_format(path: &Path) -> Option<ImageFormat> {
    let bytes = std::fs::read(path).ok()?;
    image::guess_format(&bytes).ok()
}

/// Number of pixels with exactly this color
pub fn count_color(image: &RgbImage, rgb: [u8; 3]) -> usize {
    image.pixels().filter(|p| p.0 == rgb).count()
}

/// Number of pixels that are not pure white
pub fn count_non_white(image: &RgbImage) -> usize {
    image.pixels().filter(|p| p.0 != [255, 255, 255]).count()
}
