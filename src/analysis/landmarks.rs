use image::RgbImage;

use crate::models::LandmarkPoint;

/// Source of spine landmarks for a preprocessed image.
///
/// This is the replacement boundary for the detection strategy: a trained
/// pose or segmentation model drops in behind this trait without touching
/// the angle math or the drawing code. Implementations must return points
/// ordered top to bottom (increasing y); the angle computation indexes the
/// sequence under that assumption.
pub trait LandmarkDetector: Send + Sync {
    /// Detect spine landmarks, ordered top to bottom.
    /// A zero-area buffer yields an empty sequence.
    fn detect(&self, img: &RgbImage) -> Vec<LandmarkPoint>;

    /// Human-readable name for this detector (used in verbose output)
    fn name(&self) -> &str;
}

/// Deterministic placeholder detector.
///
/// NOT a trained model: it synthesizes a gently S-shaped column of points
/// around the horizontal center so the geometry and drawing stages can be
/// exercised end to end. Points are spaced evenly between 30% and 80% of
/// the image height, with a half sine wave of horizontal offset.
pub struct SyntheticDetector {
    /// Number of landmarks to generate, top to bottom
    pub num_points: usize,
    /// Maximum horizontal offset from the image center, in pixels
    pub amplitude: f64,
}

impl SyntheticDetector {
    pub fn new() -> Self {
        Self {
            num_points: 7,
            amplitude: 10.0,
        }
    }

    pub fn with_num_points(mut self, num_points: usize) -> Self {
        self.num_points = num_points;
        self
    }
}

impl Default for SyntheticDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl LandmarkDetector for SyntheticDetector {
    fn detect(&self, img: &RgbImage) -> Vec<LandmarkPoint> {
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 || self.num_points < 2 {
            return Vec::new();
        }

        let center_x = (width / 2) as i32;
        let h = height as f64;
        let span = (self.num_points - 1) as f64;

        (0..self.num_points)
            .map(|i| {
                let t = i as f64 / span;
                let y = (h * 0.3 + h * 0.5 * t) as i32;
                let offset = (self.amplitude * (t * std::f64::consts::PI).sin()) as i32;
                LandmarkPoint::new(center_x + offset, y)
            })
            .collect()
    }

    fn name(&self) -> &str {
        "synthetic"
    }
}
