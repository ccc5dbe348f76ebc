use crate::math::{Affine2, Point2};

/// One drawing command of a [`Path`](super::Path).
///
/// Every variant except [`Segment::Close`] carries the anchor point it ends
/// at. Curves carry their control points alongside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    /// Starts a new subpath at `point`.
    Move(Point2),
    /// Straight edge from the previous anchor to `point`.
    Line(Point2),
    /// Quadratic bezier from the previous anchor to `point`.
    Quadratic { point: Point2, control: Point2 },
    /// Cubic bezier from the previous anchor to `point`.
    Cubic {
        point: Point2,
        control1: Point2,
        control2: Point2,
    },
    /// Edge back to the first point of the current subpath.
    Close,
}

impl Segment {
    /// The anchor point this segment ends at; `None` for `Close`.
    #[must_use]
    pub fn anchor(&self) -> Option<Point2> {
        match *self {
            Self::Move(p) | Self::Line(p) => Some(p),
            Self::Quadratic { point, .. } | Self::Cubic { point, .. } => Some(point),
            Self::Close => None,
        }
    }

    /// Off-curve control points, in drawing order.
    #[must_use]
    pub fn control_points(&self) -> Vec<Point2> {
        match *self {
            Self::Quadratic { control, .. } => vec![control],
            Self::Cubic {
                control1, control2, ..
            } => vec![control1, control2],
            Self::Move(_) | Self::Line(_) | Self::Close => Vec::new(),
        }
    }

    /// Returns `true` for `Move`.
    #[must_use]
    pub fn is_move(&self) -> bool {
        matches!(self, Self::Move(_))
    }

    /// Applies `transform` to every point of the segment.
    #[must_use]
    pub fn transformed(&self, transform: &Affine2) -> Self {
        let map = |p: Point2| transform * p;
        match *self {
            Self::Move(p) => Self::Move(map(p)),
            Self::Line(p) => Self::Line(map(p)),
            Self::Quadratic { point, control } => Self::Quadratic {
                point: map(point),
                control: map(control),
            },
            Self::Cubic {
                point,
                control1,
                control2,
            } => Self::Cubic {
                point: map(point),
                control1: map(control1),
                control2: map(control2),
            },
            Self::Close => Self::Close,
        }
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::{Matrix3, Vector2};

    use super::*;

    #[test]
    fn anchor_and_controls() {
        let cubic = Segment::Cubic {
            point: Point2::new(3.0, 0.0),
            control1: Point2::new(1.0, 1.0),
            control2: Point2::new(2.0, 1.0),
        };
        assert_eq!(cubic.anchor(), Some(Point2::new(3.0, 0.0)));
        assert_eq!(cubic.control_points().len(), 2);
        assert_eq!(Segment::Close.anchor(), None);
        assert!(Segment::Close.control_points().is_empty());
    }

    #[test]
    fn transform_moves_all_points() {
        let t = Affine2::from_matrix_unchecked(Matrix3::new_translation(&Vector2::new(10.0, -5.0)));
        let quad = Segment::Quadratic {
            point: Point2::new(2.0, 0.0),
            control: Point2::new(1.0, 1.0),
        };
        assert_eq!(
            quad.transformed(&t),
            Segment::Quadratic {
                point: Point2::new(12.0, -5.0),
                control: Point2::new(11.0, -4.0),
            }
        );
    }
}
