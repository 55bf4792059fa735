use image::RgbImage;
use serde::Serialize;

/// A single spine landmark in pixel coordinates.
/// `y` grows downward, matching raster row order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LandmarkPoint {
    pub x: i32,
    pub y: i32,
}

impl LandmarkPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Coordinates as floats, for drawing APIs.
    pub fn as_f32(&self) -> (f32, f32) {
        (self.x as f32, self.y as f32)
    }
}

/// Slope of the segment between two landmarks.
///
/// Segments whose endpoints share an x-coordinate get an explicit
/// `Vertical` sentinel instead of a division by zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Slope {
    Finite(f64),
    Vertical,
}

impl Slope {
    /// Slope between two points: `(y2 - y1) / (x2 - x1)`.
    /// Order-invariant: swapping the endpoints yields the same slope.
    pub fn between(a: LandmarkPoint, b: LandmarkPoint) -> Self {
        if a.x == b.x {
            Slope::Vertical
        } else {
            Slope::Finite((b.y - a.y) as f64 / (b.x - a.x) as f64)
        }
    }

    pub fn is_vertical(&self) -> bool {
        matches!(self, Slope::Vertical)
    }
}

/// Severity band for a measured Cobb angle.
///
/// The thresholds are presentation policy layered on the numeric result:
/// below 10 degrees reads as low, 10 up to 20 as medium, 20 and above as
/// high. The angle math never depends on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn from_angle(angle: f64) -> Self {
        if angle < 10.0 {
            Severity::Low
        } else if angle < 20.0 {
            Severity::Medium
        } else {
            Severity::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }

    /// Guidance shown to the user alongside the measured angle.
    pub fn recommendations(&self) -> &'static [&'static str] {
        match self {
            Severity::Low => &[
                "Keep up regular posture-correction exercise",
                "Re-check the measurement in about 12 months",
            ],
            Severity::Medium => &[
                "Consult an orthopedic specialist",
                "Consider professional posture-correction therapy",
                "Re-check the measurement in about 6 months",
            ],
            Severity::High => &[
                "See a spine specialist promptly",
                "Discuss a treatment plan, including bracing options",
                "Schedule regular follow-up measurements",
            ],
        }
    }
}

/// Full analysis result for one photograph.
///
/// `annotated` is the preprocessed frame with the measurement overlay; it
/// keeps no reference to the caller's input buffer.
#[derive(Debug, Clone)]
pub struct SpineReport {
    /// Estimated Cobb angle in degrees, always non-negative.
    pub angle: f64,
    /// Landmarks the angle was measured from, ordered top to bottom.
    /// A count below 4 means the angle fell back to 0.0.
    pub landmarks: Vec<LandmarkPoint>,
    /// Annotated copy of the preprocessed image.
    pub annotated: RgbImage,
}

impl SpineReport {
    pub fn severity(&self) -> Severity {
        Severity::from_angle(self.angle)
    }
}
