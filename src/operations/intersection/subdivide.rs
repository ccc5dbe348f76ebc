use nalgebra::Matrix2;
use tracing::trace;

use crate::geometry::CurveSegment;
use crate::math::intersect_2d::segment_segment_intersect_2d;

use super::{Intersection, IntersectionParams};

const NEWTON_ITERATIONS: usize = 8;

/// A piece of a curve together with the parameter range it covers on the
/// original curve.
#[derive(Debug, Clone, Copy)]
struct Piece {
    curve: CurveSegment,
    t0: f64,
    t1: f64,
}

impl Piece {
    fn whole(curve: &CurveSegment) -> Self {
        Self {
            curve: *curve,
            t0: 0.0,
            t1: 1.0,
        }
    }

    fn halves(&self) -> [Self; 2] {
        let (left, right) = self.curve.split(0.5);
        let mid = 0.5 * (self.t0 + self.t1);
        [
            Self {
                curve: left,
                t0: self.t0,
                t1: mid,
            },
            Self {
                curve: right,
                t0: mid,
                t1: self.t1,
            },
        ]
    }

    /// Maps a local parameter back to the original curve.
    fn global(&self, t: f64) -> f64 {
        self.t0 + (self.t1 - self.t0) * t
    }

    fn is_straight(&self, params: &IntersectionParams) -> bool {
        self.curve.is_line() || params.flatness.is_some_and(|eps| self.curve.is_flat(eps))
    }
}

/// Parameter pairs `(t1, t2)` where two curves cross.
///
/// Both curves are subdivided at `t = 0.5` until their bounding boxes stop
/// overlapping, both are flat, or the depth cap is reached; surviving pieces
/// are intersected as straight chords. Parallel chords never intersect.
#[must_use]
pub fn intersect_curves(
    c1: &CurveSegment,
    c2: &CurveSegment,
    params: &IntersectionParams,
) -> Vec<(f64, f64)> {
    let mut raw = Vec::new();
    subdivide(Piece::whole(c1), Piece::whole(c2), 0, params, &mut raw);

    let exact = c1.is_line() && c2.is_line();
    let mut out: Vec<(f64, f64)> = Vec::with_capacity(raw.len());
    for (t1, t2) in raw {
        let (t1, t2) = if params.refine && !exact {
            refine(c1, c2, t1, t2)
        } else {
            (t1, t2)
        };
        let p = c1.evaluate(t1);
        let duplicate = out
            .iter()
            .any(|&(s, _)| (c1.evaluate(s) - p).norm() < params.merge_tolerance);
        if !duplicate {
            out.push((t1, t2));
        }
    }
    out
}

/// Crossings between every curve of `a` and every curve of `b`.
///
/// Hits at the same point (within `merge_tolerance`) are reported once, so a
/// crossing through a shared vertex is not duplicated. Sorted by
/// `(segment1, t1)`.
#[must_use]
pub fn intersect_curve_sets(
    a: &[CurveSegment],
    b: &[CurveSegment],
    params: &IntersectionParams,
) -> Vec<Intersection> {
    let mut hits: Vec<Intersection> = Vec::new();
    for (i, ca) in a.iter().enumerate() {
        let box_a = ca.bounds();
        for (j, cb) in b.iter().enumerate() {
            if !box_a.overlaps(&cb.bounds(), params.tolerance) {
                continue;
            }
            for (t1, t2) in intersect_curves(ca, cb, params) {
                let hit = Intersection::between((ca, i, t1), (cb, j, t2));
                let duplicate = hits
                    .iter()
                    .any(|h| (h.point - hit.point).norm() < params.merge_tolerance);
                if !duplicate {
                    hits.push(hit);
                }
            }
        }
    }
    hits.sort_by(|x, y| {
        x.segment1
            .cmp(&y.segment1)
            .then(x.t1.partial_cmp(&y.t1).unwrap_or(std::cmp::Ordering::Equal))
    });
    hits
}

fn subdivide(
    a: Piece,
    b: Piece,
    depth: u32,
    params: &IntersectionParams,
    out: &mut Vec<(f64, f64)>,
) {
    if !a.curve.bounds().overlaps(&b.curve.bounds(), params.tolerance) {
        return;
    }

    let a_straight = a.is_straight(params);
    let b_straight = b.is_straight(params);
    if depth >= params.max_depth || (a_straight && b_straight) {
        if depth >= params.max_depth && !(a_straight && b_straight) {
            trace!(depth, "subdivision depth cap reached, solving chords");
        }
        solve_chords(&a, &b, out);
        return;
    }

    let a_parts = if a_straight { vec![a] } else { a.halves().to_vec() };
    let b_parts = if b_straight { vec![b] } else { b.halves().to_vec() };
    for pa in &a_parts {
        for pb in &b_parts {
            subdivide(*pa, *pb, depth + 1, params, out);
        }
    }
}

fn solve_chords(a: &Piece, b: &Piece, out: &mut Vec<(f64, f64)>) {
    if let Some((_, t, u)) = segment_segment_intersect_2d(
        &a.curve.start(),
        &a.curve.end(),
        &b.curve.start(),
        &b.curve.end(),
    ) {
        out.push((a.global(t), b.global(u)));
    }
}

/// Newton iteration on `c1(t1) - c2(t2) = 0`, starting from a chord hit.
///
/// Keeps the starting parameters when the iteration fails to improve the
/// residual.
fn refine(c1: &CurveSegment, c2: &CurveSegment, t1: f64, t2: f64) -> (f64, f64) {
    let residual = |s: f64, u: f64| (c1.evaluate(s) - c2.evaluate(u)).norm_squared();
    let start = residual(t1, t2);

    let (mut s, mut u) = (t1, t2);
    for _ in 0..NEWTON_ITERATIONS {
        let f = c1.evaluate(s) - c2.evaluate(u);
        if f.norm_squared() < 1e-28 {
            break;
        }
        let jacobian = Matrix2::from_columns(&[c1.derivative(s), -c2.derivative(u)]);
        let Some(inverse) = jacobian.try_inverse() else {
            break;
        };
        let step = inverse * f;
        s = (s - step.x).clamp(0.0, 1.0);
        u = (u - step.y).clamp(0.0, 1.0);
    }

    if residual(s, u) < start {
        (s, u)
    } else {
        (t1, t2)
    }
}
