use crate::error::{GeometryError, Result};
use crate::math::Point2;

use super::path::Path;
use super::segment::Segment;

/// How a [`PathPoint`] is reached from the previous point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPointKind {
    Move,
    Line,
    Quadratic,
    Cubic,
}

/// One entry of a flat point array, the form shape producers hand to the
/// kernel.
///
/// Closure is not stored: a subpath whose last point returns to its first
/// is closed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathPoint {
    pub x: f64,
    pub y: f64,
    pub kind: PathPointKind,
    pub control1: Option<Point2>,
    pub control2: Option<Point2>,
}

impl PathPoint {
    #[must_use]
    pub fn move_to(x: f64, y: f64) -> Self {
        Self::plain(x, y, PathPointKind::Move)
    }

    #[must_use]
    pub fn line_to(x: f64, y: f64) -> Self {
        Self::plain(x, y, PathPointKind::Line)
    }

    #[must_use]
    pub fn quad_to(control: Point2, x: f64, y: f64) -> Self {
        Self {
            control1: Some(control),
            ..Self::plain(x, y, PathPointKind::Quadratic)
        }
    }

    #[must_use]
    pub fn cubic_to(control1: Point2, control2: Point2, x: f64, y: f64) -> Self {
        Self {
            control1: Some(control1),
            control2: Some(control2),
            ..Self::plain(x, y, PathPointKind::Cubic)
        }
    }

    fn plain(x: f64, y: f64, kind: PathPointKind) -> Self {
        Self {
            x,
            y,
            kind,
            control1: None,
            control2: None,
        }
    }

    #[must_use]
    pub fn point(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }
}

impl Path {
    /// Builds a path from a point array.
    ///
    /// A cubic point carrying a single control point is read as a quadratic.
    /// A leading line point starts the path at its anchor, like a move. A
    /// leading curve point starts it at its first control point, as the
    /// curve builders do on an empty path.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InvalidBezier` if a curve point has no
    /// control point.
    pub fn try_from_points(points: &[PathPoint]) -> Result<Self> {
        let mut path = Self::new();
        for (index, p) in points.iter().enumerate() {
            let to = p.point();
            match (p.kind, p.control1, p.control2) {
                (PathPointKind::Move, ..) => {
                    path.move_to(to);
                }
                (PathPointKind::Line, ..) => {
                    path.line_to(to);
                }
                (PathPointKind::Quadratic, Some(c), _)
                | (PathPointKind::Cubic, Some(c), None)
                | (PathPointKind::Cubic, None, Some(c)) => {
                    path.quad_curve_to(c, to);
                }
                (PathPointKind::Cubic, Some(c1), Some(c2)) => {
                    path.cubic_curve_to(c1, c2, to);
                }
                (PathPointKind::Quadratic | PathPointKind::Cubic, None, _) => {
                    return Err(GeometryError::InvalidBezier { index }.into());
                }
            }
        }
        Ok(path)
    }

    /// Flattens the segment list into a point array.
    ///
    /// `Close` markers are dropped; the edge back to the start is already
    /// present as a line point whenever it has nonzero length.
    #[must_use]
    pub fn to_path_points(&self) -> Vec<PathPoint> {
        self.segments()
            .iter()
            .filter_map(|segment| match *segment {
                Segment::Move(p) => Some(PathPoint::move_to(p.x, p.y)),
                Segment::Line(p) => Some(PathPoint::line_to(p.x, p.y)),
                Segment::Quadratic { point, control } => {
                    Some(PathPoint::quad_to(control, point.x, point.y))
                }
                Segment::Cubic {
                    point,
                    control1,
                    control2,
                } => Some(PathPoint::cubic_to(control1, control2, point.x, point.y)),
                Segment::Close => None,
            })
            .collect()
    }
}
