use crate::models::{LandmarkPoint, Slope};

/// Below this magnitude `1 + m1*m2` is treated as zero, i.e. the two
/// lines are perpendicular.
const PERPENDICULAR_EPS: f64 = 1e-9;

/// Angle between two slopes in degrees, via the tangent identity
/// `tan(theta) = (m2 - m1) / (1 + m1*m2)`.
///
/// Two vertical sentinels are parallel (0 degrees); one vertical measures
/// against the other line's inclination. Near-perpendicular finite slopes
/// would blow the division up, so the result is clamped to exactly 90
/// degrees below [`PERPENDICULAR_EPS`]. The result is always finite and
/// non-negative.
pub fn angle_between(a: Slope, b: Slope) -> f64 {
    match (a, b) {
        (Slope::Vertical, Slope::Vertical) => 0.0,
        (Slope::Vertical, Slope::Finite(m)) | (Slope::Finite(m), Slope::Vertical) => {
            90.0 - m.atan().to_degrees()
        }
        (Slope::Finite(m1), Slope::Finite(m2)) => {
            let denom = 1.0 + m1 * m2;
            if denom.abs() < PERPENDICULAR_EPS {
                return 90.0;
            }
            ((m2 - m1) / denom).atan().to_degrees().abs()
        }
    }
}

/// Cobb angle for an ordered landmark sequence, in degrees.
///
/// The upper slope comes from points 0 and 2, the lower from points n-3
/// and n-1. Fewer than 4 points returns 0.0, an insufficient-data
/// fallback rather than an error, which means the angle alone cannot tell
/// a genuinely straight spine from a failed detection; check the landmark
/// count when that distinction matters.
pub fn cobb_angle(points: &[LandmarkPoint]) -> f64 {
    if points.len() < 4 {
        return 0.0;
    }

    let n = points.len();
    let upper = Slope::between(points[0], points[2]);
    let lower = Slope::between(points[n - 3], points[n - 1]);

    angle_between(upper, lower)
}
