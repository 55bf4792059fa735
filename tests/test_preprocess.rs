//! Tests for image loading and preprocessing.
//!
//! Tests cover:
//! - Decode boundary: valid bytes, garbage bytes, empty input
//! - Exact output resolution regardless of input size and aspect
//! - Channel replication after the grayscale stages
//! - Zero-area propagation instead of errors
//! - Histogram equalization spreading a low-contrast image

mod common;

use common::*;
use image::{DynamicImage, ImageBuffer, Rgb};
use spinecheck::analysis::{loader, preprocess};

#[test]
fn test_load_image_decodes_png_bytes() -> anyhow::Result<()> {
    let bytes = png_bytes(&gradient_image(120, 80));

    let img = loader::load_image(&bytes)?;
    assert_eq!(img.width(), 120);
    assert_eq!(img.height(), 80);

    Ok(())
}

#[test]
fn test_load_image_rejects_garbage_bytes() {
    assert!(loader::load_image(b"definitely not an image").is_err());
    assert!(loader::load_image(&[]).is_err());
}

#[test]
fn test_load_image_keeps_rgb_channel_order() -> anyhow::Result<()> {
    // A pure red source pixel must land in channel 0 after decoding
    let red = DynamicImage::ImageRgb8(solid_image(4, 4, [255, 0, 0]));
    let bytes = png_bytes(&red);

    let decoded = loader::load_image(&bytes)?.to_rgb8();
    assert_eq!(decoded.get_pixel(0, 0), &Rgb([255u8, 0, 0]));

    Ok(())
}

#[test]
fn test_preprocess_output_is_exactly_target_size() {
    let inputs = [(100, 100), (2000, 500), (33, 77), (640, 480)];

    for (w, h) in inputs {
        let out = preprocess::preprocess(&gradient_image(w, h), 640, 480);
        assert_eq!(out.dimensions(), (640, 480), "input {}x{}", w, h);
    }
}

#[test]
fn test_preprocess_honors_custom_target_size() {
    let out = preprocess::preprocess(&gradient_image(500, 500), 320, 240);
    assert_eq!(out.dimensions(), (320, 240));
}

#[test]
fn test_preprocess_replicates_channels() {
    // The output is grayscale replicated into RGB, so all three channels
    // must be equal at every pixel even for a colored input
    let colored = DynamicImage::ImageRgb8(ImageBuffer::from_fn(90, 60, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    }));

    let out = preprocess::preprocess(&colored, 90, 60);
    for pixel in out.pixels() {
        assert_eq!(pixel[0], pixel[1]);
        assert_eq!(pixel[1], pixel[2]);
    }
}

#[test]
fn test_preprocess_zero_area_input_propagates() {
    let empty = DynamicImage::new_rgb8(0, 0);

    let out = preprocess::preprocess(&empty, 640, 480);
    assert_eq!(out.dimensions(), (0, 0));
}

#[test]
fn test_equalize_spreads_low_contrast_image() {
    // Intensities confined to [100, 120) should cover most of the range
    // after equalization
    let flat: image::GrayImage =
        ImageBuffer::from_fn(64, 64, |x, y| image::Luma([(100 + (x + y) % 20) as u8]));

    let equalized = preprocess::equalize(&flat);
    let min = equalized.pixels().map(|p| p[0]).min().unwrap();
    let max = equalized.pixels().map(|p| p[0]).max().unwrap();
    assert!(max - min > 200, "span was {}", max - min);
}

#[test]
fn test_blur_preserves_dimensions() {
    let gray = preprocess::to_grayscale(&gradient_image(123, 45));
    let blurred = preprocess::apply_blur(&gray, preprocess::BLUR_SIGMA);
    assert_eq!(blurred.dimensions(), (123, 45));
}
