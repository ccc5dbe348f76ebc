use crate::geometry::{CurveSegment, Path};
use crate::math::solve::solve_quadratic;
use crate::math::TOLERANCE;

use super::subdivide::intersect_curves;
use super::{Intersection, IntersectionParams};

/// Parameters `(s, t)`, `s < t`, at which a cubic passes through the same
/// point twice.
///
/// With the curve in power form `a·t³ + b·t² + c·t + d`, `B(s) = B(t)` for
/// `s ≠ t` reduces to `a(σ² - π) + bσ + c = 0` where `σ = s + t` and
/// `π = s·t`. The two components give `σ` directly; `s` and `t` are then the
/// roots of `z² - σz + π`. Only loops with both roots strictly inside
/// `(ε, 1 - ε)` are reported.
#[must_use]
pub fn cubic_self_intersection(curve: &CurveSegment) -> Option<(f64, f64)> {
    let CurveSegment::Cubic { .. } = curve else {
        return None;
    };
    let [a, b, c, _] = curve.power_coefficients();

    let denom = a.y * b.x - a.x * b.y;
    if denom.abs() < TOLERANCE {
        return None;
    }
    let sigma = (a.x * c.y - a.y * c.x) / denom;

    let (ak, bk, ck) = if a.x.abs() >= a.y.abs() {
        (a.x, b.x, c.x)
    } else {
        (a.y, b.y, c.y)
    };
    if ak.abs() < TOLERANCE {
        return None;
    }
    let pi = sigma * sigma + (bk * sigma + ck) / ak;

    let eps = TOLERANCE * 100.0;
    let roots: Vec<f64> = solve_quadratic(1.0, -sigma, pi)
        .into_iter()
        .filter(|&t| t > eps && t < 1.0 - eps)
        .collect();
    match roots.as_slice() {
        [s, t] if (t - s).abs() > eps => Some((s.min(*t), s.max(*t))),
        _ => None,
    }
}

/// Crossings of a path with itself.
///
/// Reports crossings between distinct curves of [`Path::curves`] plus the
/// loop of every self-intersecting cubic. Touches at a curve endpoint, such
/// as the vertex shared by consecutive curves, are skipped. Each crossing is
/// reported once with `segment1 <= segment2`.
#[must_use]
pub fn find_self_intersections(path: &Path) -> Vec<Intersection> {
    let params = IntersectionParams::default();
    let curves = path.curves();
    let eps = TOLERANCE * 100.0;
    let at_end = |t: f64| t < eps || t > 1.0 - eps;

    let mut results = Vec::new();
    for (i, ci) in curves.iter().enumerate() {
        if let Some((s, t)) = cubic_self_intersection(ci) {
            let mut hit = Intersection::between((ci, i, s), (ci, i, t));
            // The loop's crossing direction comes from the tangent cross
            // product, which does not wrap like the atan2 difference.
            hit.entry = ci.tangent(s).perp(&ci.tangent(t)) > 0.0;
            results.push(hit);
        }

        for (j, cj) in curves.iter().enumerate().skip(i + 1) {
            if !ci.bounds().overlaps(&cj.bounds(), params.tolerance) {
                continue;
            }
            for (t, u) in intersect_curves(ci, cj, &params) {
                if at_end(t) || at_end(u) {
                    continue;
                }
                results.push(Intersection::between((ci, i, t), (cj, j, u)));
            }
        }
    }

    results.sort_by(|a, b| {
        a.segment1
            .cmp(&b.segment1)
            .then(a.t1.partial_cmp(&b.t1).unwrap_or(std::cmp::Ordering::Equal))
    });
    results
}
