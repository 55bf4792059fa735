use ab_glyph::{FontRef, PxScale};
use anyhow::{Context, Result};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut, draw_text_mut};

use crate::models::LandmarkPoint;

/// Overlay colors, in the pipeline's RGB channel order
const MARKER_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
const SEGMENT_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const REFERENCE_COLOR: Rgb<u8> = Rgb([0, 0, 255]);
const LABEL_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

const MARKER_RADIUS: i32 = 5;
const LABEL_SCALE: f32 = 24.0;

/// Draw the measurement overlay onto a copy of `img`.
///
/// The caller's buffer is never mutated. An empty landmark sequence (or a
/// zero-area buffer) returns the copy unchanged rather than failing.
///
/// Overlay, drawn in this order: a filled red marker at every landmark,
/// green segments connecting consecutive landmarks, blue reference lines
/// along the two extremal spinal segments extended to the image boundary,
/// and a white text label with the angle to one decimal place.
pub fn annotate(img: &RgbImage, points: &[LandmarkPoint], angle: f64) -> Result<RgbImage> {
    let mut result = img.clone();
    if img.width() == 0 || img.height() == 0 || points.is_empty() {
        return Ok(result);
    }

    let (width, height) = img.dimensions();

    for point in points {
        draw_filled_circle_mut(&mut result, (point.x, point.y), MARKER_RADIUS, MARKER_COLOR);
    }

    for pair in points.windows(2) {
        draw_line_segment_mut(&mut result, pair[0].as_f32(), pair[1].as_f32(), SEGMENT_COLOR);
    }

    // Reference lines along the same point pairs the angle is measured from
    if points.len() >= 3 {
        let n = points.len();
        draw_reference_line(&mut result, points[0], points[2], width, height);
        draw_reference_line(&mut result, points[n - 3], points[n - 1], width, height);
    }

    draw_label(&mut result, angle)?;

    Ok(result)
}

fn draw_reference_line(
    img: &mut RgbImage,
    p1: LandmarkPoint,
    p2: LandmarkPoint,
    width: u32,
    height: u32,
) {
    if let Some((a, b)) = reference_endpoints(p1, p2, width, height) {
        draw_line_segment_mut(img, a.as_f32(), b.as_f32(), REFERENCE_COLOR);
    }
}

/// Endpoints of the infinite line through `p1` and `p2`, clipped to the
/// image boundary.
///
/// Intersections with the four edges are considered in left, right, top,
/// bottom order; one counts only when its other coordinate falls within
/// `[0, dimension]` after truncation. The first two hits become the
/// segment; `None` means the line misses the image entirely. A vertical
/// line spans the full height at `x = p1.x`.
pub fn reference_endpoints(
    p1: LandmarkPoint,
    p2: LandmarkPoint,
    width: u32,
    height: u32,
) -> Option<(LandmarkPoint, LandmarkPoint)> {
    let (w, h) = (width as i32, height as i32);

    if p1.x == p2.x {
        return Some((LandmarkPoint::new(p1.x, 0), LandmarkPoint::new(p1.x, h)));
    }

    let slope = (p2.y - p1.y) as f64 / (p2.x - p1.x) as f64;
    let (x1, y1) = (p1.x as f64, p1.y as f64);

    let mut hits = Vec::new();

    // Left and right edges: y = m*(x - x1) + y1
    let y_left = (slope * (0.0 - x1) + y1) as i32;
    if (0..=h).contains(&y_left) {
        hits.push(LandmarkPoint::new(0, y_left));
    }
    let y_right = (slope * (width as f64 - x1) + y1) as i32;
    if (0..=h).contains(&y_right) {
        hits.push(LandmarkPoint::new(w, y_right));
    }

    // Top and bottom edges: x = (y - y1)/m + x1. A horizontal line makes
    // the division saturate out of range, so these candidates drop out.
    let x_top = ((0.0 - y1) / slope + x1) as i32;
    if (0..=w).contains(&x_top) {
        hits.push(LandmarkPoint::new(x_top, 0));
    }
    let x_bottom = ((height as f64 - y1) / slope + x1) as i32;
    if (0..=w).contains(&x_bottom) {
        hits.push(LandmarkPoint::new(x_bottom, h));
    }

    if hits.len() >= 2 {
        Some((hits[0], hits[1]))
    } else {
        None
    }
}

fn draw_label(img: &mut RgbImage, angle: f64) -> Result<()> {
    let font = FontRef::try_from_slice(include_bytes!("../../fonts/DejaVuSans.ttf"))
        .context("Failed to load embedded font")?;

    let text = format!("Cobb Angle: {:.1} degrees", angle);
    let x = img.width() as i32 / 2 - 100;
    // Keep the text block 30px clear of the bottom edge
    let y = img.height() as i32 - 30 - LABEL_SCALE as i32;
    draw_text_mut(img, LABEL_COLOR, x, y, PxScale::from(LABEL_SCALE), &font, &text);

    Ok(())
}
