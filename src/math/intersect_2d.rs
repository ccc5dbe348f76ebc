use super::distance_2d::is_point_on_line;
use super::{Point2, Vector2, TOLERANCE};

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
) -> Option<(f64, f64)> {
    let cross = d1.perp(d2);
    if cross.abs() < TOLERANCE {
        return None;
    }
    let delta = p2 - p1;
    let t = delta.perp(d2) / cross;
    let u = delta.perp(d1) / cross;
    Some((t, u))
}

/// Bounded segment-segment intersection in 2D.
///
/// Returns `(intersection_point, t, u)` where `t` and `u` are in `[0, 1]`.
///
/// Parallel and collinear segments report no intersection, even when they
/// overlap. A zero-length segment intersects only where it coincides with
/// the other segment.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<(Point2, f64, f64)> {
    let da = a1 - a0;
    let db = b1 - b0;

    let a_degenerate = da.norm_squared() < TOLERANCE * TOLERANCE;
    let b_degenerate = db.norm_squared() < TOLERANCE * TOLERANCE;
    match (a_degenerate, b_degenerate) {
        (true, true) => {
            return (a0 == b0).then_some((*a0, 0.0, 0.0));
        }
        (true, false) => {
            if !is_point_on_line(a0, b0, b1, TOLERANCE) {
                return None;
            }
            let u = (a0 - b0).dot(&db) / db.norm_squared();
            return Some((*a0, 0.0, u.clamp(0.0, 1.0)));
        }
        (false, true) => {
            if !is_point_on_line(b0, a0, a1, TOLERANCE) {
                return None;
            }
            let t = (b0 - a0).dot(&da) / da.norm_squared();
            return Some((*b0, t.clamp(0.0, 1.0), 0.0));
        }
        (false, false) => {}
    }

    let (t, u) = line_line_intersect_2d(a0, &da, b0, &db)?;

    // Use a small epsilon to include endpoints.
    let eps = TOLERANCE;
    if t >= -eps && t <= 1.0 + eps && u >= -eps && u <= 1.0 + eps {
        let t_clamped = t.clamp(0.0, 1.0);
        Some((a0 + da * t_clamped, t_clamped, u.clamp(0.0, 1.0)))
    } else {
        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn pt(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn line_line_perpendicular() {
        let (t, u) = line_line_intersect_2d(
            &pt(0.0, 0.0),
            &Vector2::new(1.0, 0.0),
            &pt(0.5, -1.0),
            &Vector2::new(0.0, 1.0),
        )
        .unwrap();
        assert!((t - 0.5).abs() < TOLERANCE);
        assert!((u - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn line_line_parallel_returns_none() {
        let d = Vector2::new(1.0, 0.0);
        assert!(line_line_intersect_2d(&pt(0.0, 0.0), &d, &pt(0.0, 1.0), &d).is_none());
    }

    #[test]
    fn segment_segment_crossing() {
        let (p, t, u) =
            segment_segment_intersect_2d(&pt(0.0, 0.0), &pt(2.0, 2.0), &pt(0.0, 2.0), &pt(2.0, 0.0))
                .unwrap();
        assert!((p.x - 1.0).abs() < TOLERANCE);
        assert!((p.y - 1.0).abs() < TOLERANCE);
        assert!((t - 0.5).abs() < TOLERANCE);
        assert!((u - 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn segment_segment_no_crossing() {
        assert!(segment_segment_intersect_2d(
            &pt(0.0, 0.0),
            &pt(1.0, 0.0),
            &pt(0.0, 1.0),
            &pt(1.0, 1.0)
        )
        .is_none());
    }

    #[test]
    fn segment_segment_outside_extent() {
        // The carrier lines cross at (3, 3), beyond both segments.
        assert!(segment_segment_intersect_2d(
            &pt(0.0, 0.0),
            &pt(1.0, 1.0),
            &pt(6.0, 0.0),
            &pt(5.0, 1.0)
        )
        .is_none());
    }

    #[test]
    fn segment_segment_collinear_overlap_is_dropped() {
        assert!(segment_segment_intersect_2d(
            &pt(0.0, 0.0),
            &pt(2.0, 0.0),
            &pt(1.0, 0.0),
            &pt(3.0, 0.0)
        )
        .is_none());
    }

    #[test]
    fn segment_segment_touching_endpoint() {
        let (p, t, u) =
            segment_segment_intersect_2d(&pt(0.0, 0.0), &pt(1.0, 0.0), &pt(1.0, -1.0), &pt(1.0, 1.0))
                .unwrap();
        assert!((p.x - 1.0).abs() < TOLERANCE);
        assert!((t - 1.0).abs() < TOLERANCE);
        assert!((u - 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn zero_length_segment_only_at_coincidence() {
        let a = pt(0.5, 0.0);
        let (p, _, u) = segment_segment_intersect_2d(&a, &a, &pt(0.0, 0.0), &pt(1.0, 0.0)).unwrap();
        assert_eq!(p, a);
        assert!((u - 0.5).abs() < TOLERANCE);

        let off = pt(0.5, 0.1);
        assert!(segment_segment_intersect_2d(&off, &off, &pt(0.0, 0.0), &pt(1.0, 0.0)).is_none());
        assert!(segment_segment_intersect_2d(&a, &a, &off, &off).is_none());
        assert!(segment_segment_intersect_2d(&a, &a, &a, &a).is_some());
    }
}
