use std::cmp::Ordering;

use crate::geometry::{CurveSegment, FillRule, Path};
use crate::math::distance_2d::point_to_segment_dist;
use crate::math::solve::solve_quadratic;
use crate::math::Point2;

/// Extrema closer than this to a curve end are ignored.
const ROOT_EPS: f64 = 1e-9;

/// Halvings when locating a ray crossing on a monotonic piece.
const BISECT_ITERATIONS: u32 = 60;

/// Subdivision cap for boundary distance queries.
const MAX_BOUNDARY_DEPTH: u32 = 24;

/// Signed crossing count of a horizontal ray and its nonzero-rule reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindingResult {
    pub winding: i32,
    pub inside: bool,
}

/// Classification of a point relative to a path's fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointClassification {
    Inside,
    Outside,
    OnBoundary,
}

/// Winding number of `path` around `point` under the nonzero rule.
///
/// Casts a ray from `point` towards +x. Every edge crossing it to the right
/// of `point` adds +1 when the edge moves towards +y and -1 otherwise. Each
/// edge covers a half-open y-range so a ray through a shared vertex counts
/// once. Open subpaths are closed first, as a filler would.
#[must_use]
pub fn calculate_winding(point: &Point2, path: &Path) -> WindingResult {
    let winding = winding_number(point, &path.fill_curves());
    WindingResult {
        winding,
        inside: winding != 0,
    }
}

/// Point-in-path test honouring the path's [`FillRule`].
#[must_use]
pub fn is_point_in_path(point: &Point2, path: &Path) -> bool {
    fills(winding_number(point, &path.fill_curves()), path.fill_rule())
}

/// Even-odd ray-casting test over a closed polygon.
#[must_use]
pub fn is_point_in_polygon(point: &Point2, polygon: &[Point2]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (&polygon[i], &polygon[j]);
        if (pi.y > point.y) != (pj.y > point.y) {
            let x = (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x;
            if point.x < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Classifies `point` against the fill of `path`.
///
/// Points within `boundary_tolerance` of an edge are `OnBoundary`.
#[must_use]
pub fn classify_point(point: &Point2, path: &Path, boundary_tolerance: f64) -> PointClassification {
    classify_against(
        point,
        &path.fill_curves(),
        path.fill_rule(),
        boundary_tolerance,
    )
}

/// [`classify_point`] over closed edges that were already collected.
pub(crate) fn classify_against(
    point: &Point2,
    curves: &[CurveSegment],
    fill_rule: FillRule,
    boundary_tolerance: f64,
) -> PointClassification {
    if curves
        .iter()
        .any(|curve| is_point_on_curve(point, curve, boundary_tolerance))
    {
        PointClassification::OnBoundary
    } else if fills(winding_number(point, curves), fill_rule) {
        PointClassification::Inside
    } else {
        PointClassification::Outside
    }
}

fn winding_number(point: &Point2, curves: &[CurveSegment]) -> i32 {
    curves.iter().map(|curve| curve_winding(point, curve)).sum()
}

fn fills(winding: i32, fill_rule: FillRule) -> bool {
    match fill_rule {
        FillRule::NonZero => winding != 0,
        FillRule::EvenOdd => winding % 2 != 0,
    }
}

/// Returns `true` if `point` lies within `tolerance` of `curve`.
#[must_use]
pub fn is_point_on_curve(point: &Point2, curve: &CurveSegment, tolerance: f64) -> bool {
    near_curve(point, curve, tolerance, 0)
}

fn near_curve(point: &Point2, curve: &CurveSegment, tolerance: f64, depth: u32) -> bool {
    let bounds = curve.bounds();
    let outside = point.x < bounds.min.x - tolerance
        || point.x > bounds.max.x + tolerance
        || point.y < bounds.min.y - tolerance
        || point.y > bounds.max.y + tolerance;
    if outside {
        return false;
    }
    // A flat piece strays at most about its flatness epsilon from its chord.
    if curve.is_line() || depth >= MAX_BOUNDARY_DEPTH || curve.is_flat(tolerance * 0.25) {
        return point_to_segment_dist(point, &curve.start(), &curve.end()) <= tolerance;
    }
    let (left, right) = curve.split(0.5);
    near_curve(point, &left, tolerance, depth + 1)
        || near_curve(point, &right, tolerance, depth + 1)
}

fn curve_winding(point: &Point2, curve: &CurveSegment) -> i32 {
    if let CurveSegment::Line { start, end } = curve {
        return line_winding(point, start, end);
    }

    let bounds = curve.bounds();
    if point.y < bounds.min.y || point.y > bounds.max.y || point.x > bounds.max.x {
        return 0;
    }

    // Split at the y-extrema so every piece is monotonic in y, then count
    // each piece like a line. Neighbouring pieces share their end samples,
    // so a ray grazing an extremum enters and leaves or misses both.
    let [a, b, c, _] = curve.power_coefficients();
    let mut ts: Vec<f64> = solve_quadratic(3.0 * a.y, 2.0 * b.y, c.y)
        .into_iter()
        .filter(|t| *t > ROOT_EPS && *t < 1.0 - ROOT_EPS)
        .collect();
    ts.sort_by(|x, y| x.partial_cmp(y).unwrap_or(Ordering::Equal));

    let mut samples = Vec::with_capacity(ts.len() + 2);
    samples.push((0.0, curve.start()));
    samples.extend(ts.into_iter().map(|t| (t, curve.evaluate(t))));
    samples.push((1.0, curve.end()));

    samples
        .windows(2)
        .map(|w| monotonic_winding(point, curve, w[0], w[1]))
        .sum()
}

/// Winding contribution of the y-monotonic piece of `curve` between two
/// samples, with the same half-open rule as [`line_winding`].
fn monotonic_winding(
    point: &Point2,
    curve: &CurveSegment,
    (t0, p0): (f64, Point2),
    (t1, p1): (f64, Point2),
) -> i32 {
    let upward = p0.y <= point.y && p1.y > point.y;
    let downward = p1.y <= point.y && p0.y > point.y;
    if !upward && !downward {
        return 0;
    }

    let (mut lo, mut hi) = (t0, t1);
    for _ in 0..BISECT_ITERATIONS {
        let mid = 0.5 * (lo + hi);
        if (curve.evaluate(mid).y <= point.y) == upward {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    let x = curve.evaluate(0.5 * (lo + hi)).x;
    if point.x < x {
        if upward {
            1
        } else {
            -1
        }
    } else {
        0
    }
}

fn line_winding(point: &Point2, start: &Point2, end: &Point2) -> i32 {
    let upward = start.y <= point.y && end.y > point.y;
    let downward = end.y <= point.y && start.y > point.y;
    if !upward && !downward {
        return 0;
    }
    let x = start.x + (point.y - start.y) * (end.x - start.x) / (end.y - start.y);
    if point.x < x {
        if upward {
            1
        } else {
            -1
        }
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn square(x: f64, y: f64, size: f64) -> Path {
        Path::from_points(
            &[
                pt(x, y),
                pt(x + size, y),
                pt(x + size, y + size),
                pt(x, y + size),
            ],
            true,
        )
    }

    fn dome() -> Path {
        let mut path = Path::new();
        path.move_to(pt(0.0, 0.0))
            .cubic_curve_to(pt(0.0, 10.0), pt(10.0, 10.0), pt(10.0, 0.0));
        path.close_path();
        path
    }

    /// Four-cubic circle of radius 10 around the origin.
    fn circle() -> Path {
        let k = 10.0 * 0.552_284_749_8;
        let mut path = Path::new();
        path.move_to(pt(10.0, 0.0))
            .cubic_curve_to(pt(10.0, k), pt(k, 10.0), pt(0.0, 10.0))
            .cubic_curve_to(pt(-k, 10.0), pt(-10.0, k), pt(-10.0, 0.0))
            .cubic_curve_to(pt(-10.0, -k), pt(-k, -10.0), pt(0.0, -10.0))
            .cubic_curve_to(pt(k, -10.0), pt(10.0, -k), pt(10.0, 0.0));
        path.close_path();
        path
    }

    #[test]
    fn square_winding() {
        let path = square(0.0, 0.0, 10.0);
        assert_eq!(
            calculate_winding(&pt(5.0, 5.0), &path),
            WindingResult {
                winding: 1,
                inside: true
            }
        );
        assert_eq!(calculate_winding(&pt(15.0, 5.0), &path).winding, 0);
        assert_eq!(calculate_winding(&pt(-5.0, 5.0), &path).winding, 0);
        assert_eq!(
            calculate_winding(&pt(5.0, 5.0), &path.reversed()).winding,
            -1
        );
    }

    #[test]
    fn ray_through_vertex_counts_once() {
        let diamond = Path::from_points(
            &[pt(5.0, 0.0), pt(10.0, 5.0), pt(5.0, 10.0), pt(0.0, 5.0)],
            true,
        );
        assert!(calculate_winding(&pt(2.0, 5.0), &diamond).inside);
        assert!(!calculate_winding(&pt(-2.0, 5.0), &diamond).inside);
    }

    #[test]
    fn curved_edge_winding() {
        let path = dome();
        assert_eq!(calculate_winding(&pt(5.0, 3.0), &path).winding, -1);
        assert!(!calculate_winding(&pt(5.0, 8.0), &path).inside);
        assert!(!calculate_winding(&pt(5.0, -1.0), &path).inside);
        assert!(!calculate_winding(&pt(0.1, 6.0), &path).inside);
    }

    #[test]
    fn ray_tangent_to_curve_extremum_does_not_cross() {
        let path = circle();
        for p in [
            pt(-20.0, -10.0),
            pt(-50.0, -10.0),
            pt(20.0, -10.0),
            pt(-20.0, 10.0),
        ] {
            assert_eq!(calculate_winding(&p, &path).winding, 0, "{p:?}");
            assert_eq!(
                classify_point(&p, &path, 1e-7),
                PointClassification::Outside
            );
        }

        // Interior extremum of a single curve.
        let dome = dome();
        assert_eq!(calculate_winding(&pt(-1.0, 7.5), &dome).winding, 0);
        assert_eq!(calculate_winding(&pt(-1.0, 7.0), &dome).winding, 0);
        assert_eq!(calculate_winding(&pt(5.0, 7.0), &dome).winding, -1);
    }

    #[test]
    fn ray_through_curve_junction_counts_once() {
        let path = circle();
        assert_eq!(calculate_winding(&pt(0.0, 0.0), &path).winding, 1);
        assert_eq!(calculate_winding(&pt(-9.0, 0.0), &path).winding, 1);
        assert_eq!(calculate_winding(&pt(-20.0, 0.0), &path).winding, 0);
        assert_eq!(calculate_winding(&pt(20.0, 0.0), &path).winding, 0);
        assert!(is_point_in_path(&pt(0.0, -9.0), &path));
        assert!(!is_point_in_path(&pt(9.0, -9.0), &path));
    }

    #[test]
    fn fill_rule_decides_overlap() {
        let mut path = square(0.0, 0.0, 10.0);
        path.extend(&square(5.0, 5.0, 10.0));
        let p = pt(7.0, 7.0);
        assert_eq!(calculate_winding(&p, &path).winding, 2);
        assert!(is_point_in_path(&p, &path));

        let even_odd = path.with_fill_rule(FillRule::EvenOdd);
        assert!(!is_point_in_path(&p, &even_odd));
        assert!(is_point_in_path(&pt(2.0, 2.0), &even_odd));
    }

    #[test]
    fn open_path_is_filled_as_closed() {
        let path = Path::from_points(&[pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 10.0)], false);
        assert!(is_point_in_path(&pt(8.0, 2.0), &path));
        assert!(!is_point_in_path(&pt(2.0, 8.0), &path));
    }

    #[test]
    fn polygon_even_odd() {
        let poly = [pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 10.0), pt(0.0, 10.0)];
        assert!(is_point_in_polygon(&pt(5.0, 5.0), &poly));
        assert!(!is_point_in_polygon(&pt(11.0, 5.0), &poly));
        assert!(!is_point_in_polygon(&pt(5.0, 5.0), &poly[..2]));
    }

    #[test]
    fn classification_detects_boundary() {
        let path = square(0.0, 0.0, 10.0);
        assert_eq!(
            classify_point(&pt(5.0, 0.0), &path, 1e-7),
            PointClassification::OnBoundary
        );
        assert_eq!(
            classify_point(&pt(5.0, 5.0), &path, 1e-7),
            PointClassification::Inside
        );
        assert_eq!(
            classify_point(&pt(50.0, 5.0), &path, 1e-7),
            PointClassification::Outside
        );

        let curved = dome();
        let on_curve = curved.curves()[0].evaluate(0.3);
        assert_eq!(
            classify_point(&on_curve, &curved, 1e-7),
            PointClassification::OnBoundary
        );
    }
}
