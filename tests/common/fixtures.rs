use image::{DynamicImage, ImageBuffer, Rgb, RgbImage};
use spinecheck::LandmarkPoint;

/// Creates a width x height image with diagonal intensity structure so
/// resizing, equalization, and blurring have something to work on.
pub fn gradient_image(width: u32, height: u32) -> DynamicImage {
    let img = ImageBuffer::from_fn(width, height, |x, y| {
        let v = ((x + y) % 256) as u8;
        Rgb([v, v, v])
    });
    DynamicImage::ImageRgb8(img)
}

/// Creates a solid-color RGB image.
pub fn solid_image(width: u32, height: u32, color: [u8; 3]) -> RgbImage {
    ImageBuffer::from_pixel(width, height, Rgb(color))
}

/// Encodes an image as PNG bytes, for the bytes-in entry point.
pub fn png_bytes(img: &DynamicImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    img.write_to(
        &mut std::io::Cursor::new(&mut bytes),
        image::ImageFormat::Png,
    )
    .expect("Failed to encode test image");
    bytes
}

/// A gently S-curved 7-point landmark column on a 640x480 frame.
pub fn curved_landmarks() -> Vec<LandmarkPoint> {
    vec![
        LandmarkPoint::new(320, 144),
        LandmarkPoint::new(325, 184),
        LandmarkPoint::new(328, 224),
        LandmarkPoint::new(330, 264),
        LandmarkPoint::new(328, 304),
        LandmarkPoint::new(325, 344),
        LandmarkPoint::new(320, 384),
    ]
}

/// Four collinear points on a 45-degree diagonal.
pub fn collinear_landmarks() -> Vec<LandmarkPoint> {
    (0..4)
        .map(|i| LandmarkPoint::new(100 + 10 * i, 100 + 10 * i))
        .collect()
}

/// A perfectly straight vertical landmark column at the given x.
pub fn vertical_landmarks(x: i32) -> Vec<LandmarkPoint> {
    (0..5).map(|i| LandmarkPoint::new(x, 100 + 50 * i)).collect()
}
