use tracing::debug;

use crate::geometry::{Aabb, CurveSegment, FillRule, Path};
use crate::math::{Point2, Vector2, TOLERANCE};
use crate::operations::intersection::{intersect_curve_sets, Intersection};
use crate::operations::winding::{classify_against, PointClassification};

use super::assemble::assemble_result;
use super::select::{
    should_keep_fragment, should_keep_shared_edge, BooleanOp, KeepDecision, PathSource,
};
use super::split::{split_subpath, Cut, Fragment};
use super::BooleanParams;

/// Largest offset used to probe either side of a shared edge.
const SIDE_PROBE: f64 = 1e-4;

/// One operand prepared for the pipeline: its fill edges, grouped by
/// subpath, plus the rule its interior is read with.
struct Operand<'a> {
    path: &'a Path,
    subpaths: Vec<Vec<CurveSegment>>,
    curves: Vec<CurveSegment>,
    fill_rule: FillRule,
}

impl<'a> Operand<'a> {
    fn new(path: &'a Path) -> Self {
        let subpaths: Vec<Vec<CurveSegment>> =
            path.fill_subpaths().into_iter().map(|s| s.curves).collect();
        let curves = subpaths.iter().flatten().copied().collect();
        Self {
            path,
            subpaths,
            curves,
            fill_rule: path.fill_rule(),
        }
    }

    fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    fn bounds(&self) -> Option<Aabb> {
        let mut iter = self.curves.iter().map(CurveSegment::bounds);
        let first = iter.next()?;
        Some(iter.fold(first, |acc, b| acc.union(&b)))
    }

    fn classify(&self, point: &Point2, params: &BooleanParams) -> PointClassification {
        classify_against(point, &self.curves, self.fill_rule, params.boundary_tolerance)
    }

    /// Classifies the operand against `other` using the first sample point
    /// that is not on `other`'s boundary. `OnBoundary` means every sample
    /// was.
    fn classify_in(&self, other: &Operand, params: &BooleanParams) -> PointClassification {
        self.curves
            .iter()
            .flat_map(|c| [c.evaluate(0.5), c.start()])
            .map(|p| other.classify(&p, params))
            .find(|c| *c != PointClassification::OnBoundary)
            .unwrap_or(PointClassification::OnBoundary)
    }

    /// Splits every subpath at the hits, reading `(segment, t)` via `side`.
    fn fragments(
        &self,
        hits: &[Intersection],
        side: impl Fn(&Intersection) -> (usize, f64),
        source: PathSource,
    ) -> Vec<Fragment> {
        let mut out = Vec::new();
        let mut offset = 0;
        for curves in &self.subpaths {
            let range = offset..offset + curves.len();
            let cuts: Vec<Cut> = hits
                .iter()
                .filter_map(|hit| {
                    let (index, t) = side(hit);
                    range.contains(&index).then(|| Cut {
                        index: index - offset,
                        t,
                        point: hit.point,
                    })
                })
                .collect();
            out.extend(split_subpath(curves, &cuts, source));
            offset = range.end;
        }
        out
    }
}

/// Executes a boolean operation on two paths.
///
/// Orchestrates the full pipeline: intersection, splitting, classification,
/// selection, and assembly. The inputs are never modified; the result takes
/// its fill rule and transform from `a`.
#[must_use]
pub fn boolean_execute(a: &Path, b: &Path, op: BooleanOp, params: &BooleanParams) -> Path {
    let lhs = Operand::new(a);
    let rhs = Operand::new(b);

    // Step 1: Empty operands
    if lhs.is_empty() || rhs.is_empty() {
        debug!(?op, "boolean operation with an empty operand");
        return handle_empty(&lhs, &rhs, op);
    }

    // Step 2: AABB early-out
    let overlapping = match (lhs.bounds(), rhs.bounds()) {
        (Some(ba), Some(bb)) => ba.overlaps(&bb, params.intersection.tolerance),
        _ => false,
    };
    if !overlapping {
        debug!(?op, "boolean operands are disjoint");
        return handle_disjoint(&lhs, &rhs, op);
    }

    // Step 3: Intersections
    let hits = intersect_curve_sets(&lhs.curves, &rhs.curves, &params.intersection);
    debug!(?op, intersections = hits.len(), "boolean operation");
    if hits.is_empty() {
        return handle_no_intersection(&lhs, &rhs, op, params);
    }

    // Steps 4-6: split, select, assemble
    let result = match op {
        BooleanOp::Xor => {
            let swapped: Vec<Intersection> = hits.iter().map(Intersection::swapped).collect();
            let mut result = combine(&lhs, &rhs, &hits, BooleanOp::Difference, params);
            result.extend(&combine(&rhs, &lhs, &swapped, BooleanOp::Difference, params));
            result
        }
        _ => combine(&lhs, &rhs, &hits, op, params),
    };
    result.with_style_of(a)
}

/// Splits both operands at `hits`, keeps fragments per `op` and stitches
/// them. `hits` must have `first` on the `segment1`/`t1` side.
fn combine(
    first: &Operand,
    second: &Operand,
    hits: &[Intersection],
    op: BooleanOp,
    params: &BooleanParams,
) -> Path {
    let mut fragments: Vec<(Fragment, KeepDecision)> = Vec::new();

    for frag in first.fragments(hits, |h| (h.segment1, h.t1), PathSource::A) {
        let decision = decide(&frag, first, second, op, params);
        fragments.push((frag, decision));
    }
    for frag in second.fragments(hits, |h| (h.segment2, h.t2), PathSource::B) {
        let decision = decide(&frag, second, first, op, params);
        fragments.push((frag, decision));
    }

    let kept = fragments
        .iter()
        .filter(|(_, d)| *d != KeepDecision::Discard)
        .count();
    debug!(?op, fragments = fragments.len(), kept, "fragments selected");

    assemble_result(&fragments, params.join_tolerance)
}

/// Classifies a fragment's midpoint against the other operand.
fn decide(
    frag: &Fragment,
    own: &Operand,
    other: &Operand,
    op: BooleanOp,
    params: &BooleanParams,
) -> KeepDecision {
    let Some(mid) = frag.midpoint() else {
        return KeepDecision::Discard;
    };
    let classification = other.classify(&mid, params);
    if classification == PointClassification::OnBoundary && frag.source == PathSource::A {
        if let Some(same_side) = shares_interior_side(frag, own, other, params) {
            return should_keep_shared_edge(same_side, op);
        }
    }
    should_keep_fragment(frag.source, classification, op)
}

/// For a fragment running along `other`'s boundary: whether `other` fills
/// the same side of it as `own`. `None` when the sides cannot be told apart.
fn shares_interior_side(
    frag: &Fragment,
    own: &Operand,
    other: &Operand,
    params: &BooleanParams,
) -> Option<bool> {
    let curve = frag.curves.get(frag.curves.len() / 2)?;
    let mid = curve.evaluate(0.5);
    let tangent = curve.tangent(0.5);
    let len = tangent.norm();
    if len < TOLERANCE {
        return None;
    }
    let normal = Vector2::new(-tangent.y, tangent.x) / len;
    let delta = (0.01 * (curve.end() - curve.start()).norm()).min(SIDE_PROBE);
    if delta <= params.boundary_tolerance {
        return None;
    }

    let plus = mid + normal * delta;
    let minus = mid - normal * delta;
    let interior = match (
        own.classify(&plus, params) == PointClassification::Inside,
        own.classify(&minus, params) == PointClassification::Inside,
    ) {
        (true, false) => plus,
        (false, true) => minus,
        _ => return None,
    };
    Some(other.classify(&interior, params) == PointClassification::Inside)
}

fn handle_empty(lhs: &Operand, rhs: &Operand, op: BooleanOp) -> Path {
    let result = match op {
        BooleanOp::Union | BooleanOp::Xor if lhs.is_empty() => rhs.path.clone(),
        BooleanOp::Union | BooleanOp::Xor | BooleanOp::Difference => lhs.path.clone(),
        BooleanOp::Intersection => Path::new(),
    };
    result.with_style_of(lhs.path)
}

/// Operands whose bounding boxes do not overlap: both components survive a
/// union or xor.
fn handle_disjoint(lhs: &Operand, rhs: &Operand, op: BooleanOp) -> Path {
    let result = match op {
        BooleanOp::Union | BooleanOp::Xor => {
            let mut both = lhs.path.clone();
            both.extend(rhs.path);
            both
        }
        BooleanOp::Difference => lhs.path.clone(),
        BooleanOp::Intersection => Path::new(),
    };
    result.with_style_of(lhs.path)
}

/// Operands whose boundaries never cross: either one contains the other,
/// they coincide, or they are disjoint.
fn handle_no_intersection(
    lhs: &Operand,
    rhs: &Operand,
    op: BooleanOp,
    params: &BooleanParams,
) -> Path {
    let a_in_b = lhs.classify_in(rhs, params);
    let b_in_a = rhs.classify_in(lhs, params);
    debug!(?op, ?a_in_b, ?b_in_a, "no boundary crossings");

    let (a, b) = (lhs.path, rhs.path);
    let result = match (a_in_b, b_in_a) {
        (PointClassification::OnBoundary, PointClassification::OnBoundary) => match op {
            BooleanOp::Union | BooleanOp::Intersection => a.clone(),
            BooleanOp::Difference | BooleanOp::Xor => Path::new(),
        },
        (PointClassification::Inside, _) => match op {
            BooleanOp::Union => b.clone(),
            BooleanOp::Intersection => a.clone(),
            BooleanOp::Difference => Path::new(),
            BooleanOp::Xor => with_hole(b, a),
        },
        (_, PointClassification::Inside) => match op {
            BooleanOp::Union => a.clone(),
            BooleanOp::Intersection => b.clone(),
            BooleanOp::Difference | BooleanOp::Xor => with_hole(a, b),
        },
        _ => return handle_disjoint(lhs, rhs, op),
    };
    result.with_style_of(a)
}

/// `outer` plus `inner` oriented against it, so the nonzero rule leaves the
/// inner region unfilled.
fn with_hole(outer: &Path, inner: &Path) -> Path {
    let hole = if inner.winding_direction() == outer.winding_direction() {
        inner.reversed()
    } else {
        inner.clone()
    };
    let mut result = outer.clone();
    result.extend(&hole);
    result
}
