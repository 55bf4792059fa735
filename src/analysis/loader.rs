use std::path::Path;

use anyhow::{Context, Result};
use image::{DynamicImage, ImageReader};

/// Decode encoded image bytes (JPEG, PNG, anything the `image` crate reads)
/// into a pixel buffer.
///
/// This is the only hard-error boundary in the pipeline: bytes that do not
/// decode produce an error, never a panic. Decoded buffers are in the
/// `image` crate's native RGB channel order, which every later stage
/// assumes.
pub fn load_image(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes).context("Failed to decode image bytes")
}

/// Open and decode an image file from disk.
pub fn load_image_file(path: &Path) -> Result<DynamicImage> {
    ImageReader::open(path)
        .with_context(|| format!("Failed to open image: {}", path.display()))?
        .decode()
        .map_err(|e| anyhow::anyhow!("Failed to decode image: {}", e))
}
