use super::Point2;

/// Linear interpolation between two points.
#[must_use]
pub fn lerp(a: &Point2, b: &Point2, t: f64) -> Point2 {
    a + (b - a) * t
}

/// Flatness test for a cubic bezier `p1, c1, c2, p2`.
///
/// Measures how far the control points stray from where they would sit on
/// the chord (`(3c1 - 2p1 - p2)²` and `(3c2 - p1 - 2p2)²` per axis) and
/// compares the worst case against `16·eps²`. The criterion is monotone under
/// de Casteljau subdivision: both halves of a flat curve are flat.
#[must_use]
pub fn is_bezier_flat(p1: &Point2, c1: &Point2, c2: &Point2, p2: &Point2, eps: f64) -> bool {
    let ux = (3.0 * c1.x - 2.0 * p1.x - p2.x).powi(2);
    let uy = (3.0 * c1.y - 2.0 * p1.y - p2.y).powi(2);
    let vx = (3.0 * c2.x - p1.x - 2.0 * p2.x).powi(2);
    let vy = (3.0 * c2.y - p1.y - 2.0 * p2.y).powi(2);
    ux.max(vx) + uy.max(vy) <= 16.0 * eps * eps
}

/// Flatness test for a quadratic bezier, via its degree-elevated cubic.
#[must_use]
pub fn is_quadratic_flat(p1: &Point2, c: &Point2, p2: &Point2, eps: f64) -> bool {
    let c1 = lerp(p1, c, 2.0 / 3.0);
    let c2 = lerp(p2, c, 2.0 / 3.0);
    is_bezier_flat(p1, &c1, &c2, p2, eps)
}
