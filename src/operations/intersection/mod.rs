mod self_intersect;
mod subdivide;

pub use self_intersect::{cubic_self_intersection, find_self_intersections};
pub use subdivide::{intersect_curve_sets, intersect_curves};

use crate::geometry::{CurveSegment, Path};
use crate::math::{Point2, TOLERANCE};

/// A crossing between two curves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub point: Point2,
    /// Parameter on the first curve.
    pub t1: f64,
    /// Parameter on the second curve.
    pub t2: f64,
    /// Index of the first curve in its curve list.
    pub segment1: usize,
    /// Index of the second curve in its curve list.
    pub segment2: usize,
    /// `atan2` of the second tangent minus `atan2` of the first, unnormalized.
    pub angle: f64,
    /// `angle > 0`. For the loop of a single cubic, the sign of the
    /// tangent cross product instead.
    pub entry: bool,
}

impl Intersection {
    pub(crate) fn between(
        first: (&CurveSegment, usize, f64),
        second: (&CurveSegment, usize, f64),
    ) -> Self {
        let (c1, segment1, t1) = first;
        let (c2, segment2, t2) = second;
        let d1 = c1.tangent(t1);
        let d2 = c2.tangent(t2);
        let angle = d2.y.atan2(d2.x) - d1.y.atan2(d1.x);
        Self {
            point: c1.evaluate(t1),
            t1,
            t2,
            segment1,
            segment2,
            angle,
            entry: angle > 0.0,
        }
    }

    /// The same crossing seen from the other curve.
    #[must_use]
    pub fn swapped(&self) -> Self {
        Self {
            point: self.point,
            t1: self.t2,
            t2: self.t1,
            segment1: self.segment2,
            segment2: self.segment1,
            angle: -self.angle,
            entry: -self.angle > 0.0,
        }
    }
}

/// Tunables of the subdivision intersection engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionParams {
    /// Bounding-box slack and determinant epsilon.
    pub tolerance: f64,
    /// Subdivision depth at which curves are solved as chords.
    pub max_depth: u32,
    /// Curves flat within this epsilon are solved as chords early.
    pub flatness: Option<f64>,
    /// Hits closer than this are merged.
    pub merge_tolerance: f64,
    /// Polish curve hits with Newton iterations.
    pub refine: bool,
}

impl Default for IntersectionParams {
    fn default() -> Self {
        Self {
            tolerance: TOLERANCE,
            max_depth: 8,
            flatness: Some(1e-4),
            merge_tolerance: 1e-6,
            refine: true,
        }
    }
}

/// Finds all crossings between the edges of two paths.
///
/// `segment1`/`segment2` index into [`Path::curves`] of `a` and `b`. Results
/// are sorted by `segment1`, then `t1`.
#[must_use]
pub fn find_path_intersections(a: &Path, b: &Path) -> Vec<Intersection> {
    find_path_intersections_with(a, b, &IntersectionParams::default())
}

/// [`find_path_intersections`] with explicit parameters.
#[must_use]
pub fn find_path_intersections_with(
    a: &Path,
    b: &Path,
    params: &IntersectionParams,
) -> Vec<Intersection> {
    intersect_curve_sets(&a.curves(), &b.curves(), params)
}
