use image::imageops::FilterType;
use image::{DynamicImage, GrayImage, RgbImage};
use imageproc::contrast::equalize_histogram;
use imageproc::filter::gaussian_blur_f32;

/// Default working resolution. Landmark coordinates and the overlay are
/// relative to this fixed frame.
pub const TARGET_WIDTH: u32 = 640;
pub const TARGET_HEIGHT: u32 = 480;

/// Blur sigma equivalent to a 5x5 Gaussian kernel: 0.3*((5-1)*0.5 - 1) + 0.8
pub const BLUR_SIGMA: f32 = 1.1;

/// Resize to exactly `width` x `height` with bilinear interpolation.
/// The input aspect ratio is NOT preserved.
pub fn resize_exact(img: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    img.resize_exact(width, height, FilterType::Triangle)
}

/// Convert image to grayscale
pub fn to_grayscale(img: &DynamicImage) -> GrayImage {
    img.to_luma8()
}

/// Spread the intensity histogram over the full range to normalize contrast
pub fn equalize(img: &GrayImage) -> GrayImage {
    equalize_histogram(img)
}

/// Apply Gaussian blur to suppress high-frequency noise
pub fn apply_blur(img: &GrayImage, sigma: f32) -> GrayImage {
    gaussian_blur_f32(img, sigma)
}

/// Replicate a single gray plane into three equal RGB channels so the
/// drawing stages can overlay in color.
pub fn expand_channels(img: &GrayImage) -> RgbImage {
    DynamicImage::ImageLuma8(img.clone()).to_rgb8()
}

/// Full preprocessing chain: exact resize, grayscale, histogram
/// equalization, Gaussian blur, replicate back to three channels.
///
/// Output dimensions are always exactly `width` x `height`; downstream
/// stages rely on that. A zero-area input propagates as a zero-area
/// output rather than raising.
pub fn preprocess(img: &DynamicImage, width: u32, height: u32) -> RgbImage {
    if img.width() == 0 || img.height() == 0 {
        return RgbImage::new(0, 0);
    }

    let resized = resize_exact(img, width, height);
    let gray = to_grayscale(&resized);
    let equalized = equalize(&gray);
    let blurred = apply_blur(&equalized, BLUR_SIGMA);
    expand_channels(&blurred)
}
