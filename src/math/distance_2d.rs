use super::Point2;

/// Returns the minimum distance from point `p` to the line segment `a → b`.
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let d = b - a;
    let len_sq = d.norm_squared();

    if len_sq < 1e-20 {
        // Degenerate segment (zero length).
        return (p - a).norm();
    }

    // Project point onto the infinite line, clamp to [0, 1].
    let t = ((p - a).dot(&d) / len_sq).clamp(0.0, 1.0);
    (p - (a + d * t)).norm()
}

/// Checks whether `p` lies on the segment `a → b` within `eps`.
///
/// The projection parameter of `p` onto the segment must fall in `[0, 1]`,
/// then the squared distance to the projected point must not exceed `eps²`.
/// A zero-length segment only contains points within `eps` of its start.
#[must_use]
pub fn is_point_on_line(p: &Point2, a: &Point2, b: &Point2, eps: f64) -> bool {
    let d = b - a;
    let len_sq = d.norm_squared();

    if len_sq < 1e-20 {
        return (p - a).norm_squared() <= eps * eps;
    }

    let t = (p - a).dot(&d) / len_sq;
    if !(0.0..=1.0).contains(&t) {
        return false;
    }

    (p - (a + d * t)).norm_squared() <= eps * eps
}
