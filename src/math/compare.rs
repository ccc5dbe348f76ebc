use std::f64::consts::TAU;

use super::Point2;

/// Returns `true` if `|a - b| < eps`.
#[must_use]
pub fn is_almost_equal(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() < eps
}

/// Returns `true` if `|x| < eps`.
#[must_use]
pub fn is_almost_zero(x: f64, eps: f64) -> bool {
    x.abs() < eps
}

/// Component-wise epsilon comparison of two points.
#[must_use]
pub fn points_almost_equal(a: &Point2, b: &Point2, eps: f64) -> bool {
    is_almost_equal(a.x, b.x, eps) && is_almost_equal(a.y, b.y, eps)
}

/// Reduces an angle in radians to `[0, 2π)`.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    let r = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negative inputs up to exactly TAU.
    if r >= TAU {
        0.0
    } else {
        r
    }
}
