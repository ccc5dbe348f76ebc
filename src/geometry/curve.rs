use crate::math::bezier::{is_bezier_flat, is_quadratic_flat, lerp};
use crate::math::{Point2, Vector2, TOLERANCE};

use super::bounds::Aabb;

/// Recursion cap for [`CurveSegment::flatten`].
const MAX_FLATTEN_DEPTH: u32 = 16;

/// A single geometric edge of a path: a start point, an end point and the
/// control points between them.
///
/// This is the unit intersection and winding algorithms operate on. Curves
/// are parameterised over `t ∈ [0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurveSegment {
    Line {
        start: Point2,
        end: Point2,
    },
    Quadratic {
        start: Point2,
        control: Point2,
        end: Point2,
    },
    Cubic {
        start: Point2,
        control1: Point2,
        control2: Point2,
        end: Point2,
    },
}

impl CurveSegment {
    #[must_use]
    pub fn start(&self) -> Point2 {
        match *self {
            Self::Line { start, .. } | Self::Quadratic { start, .. } | Self::Cubic { start, .. } => {
                start
            }
        }
    }

    #[must_use]
    pub fn end(&self) -> Point2 {
        match *self {
            Self::Line { end, .. } | Self::Quadratic { end, .. } | Self::Cubic { end, .. } => end,
        }
    }

    /// Returns `true` for straight segments (no control points).
    #[must_use]
    pub fn is_line(&self) -> bool {
        matches!(self, Self::Line { .. })
    }

    /// Evaluates the curve at parameter `t`.
    #[must_use]
    pub fn evaluate(&self, t: f64) -> Point2 {
        match *self {
            Self::Line { start, end } => lerp(&start, &end, t),
            Self::Quadratic {
                start,
                control,
                end,
            } => {
                let a = lerp(&start, &control, t);
                let b = lerp(&control, &end, t);
                lerp(&a, &b, t)
            }
            Self::Cubic {
                start,
                control1,
                control2,
                end,
            } => {
                let mt = 1.0 - t;
                let coords = start.coords * (mt * mt * mt)
                    + control1.coords * (3.0 * mt * mt * t)
                    + control2.coords * (3.0 * mt * t * t)
                    + end.coords * (t * t * t);
                Point2::from(coords)
            }
        }
    }

    /// First derivative with respect to `t`.
    #[must_use]
    pub fn derivative(&self, t: f64) -> Vector2 {
        match *self {
            Self::Line { start, end } => end - start,
            Self::Quadratic {
                start,
                control,
                end,
            } => (control - start) * (2.0 * (1.0 - t)) + (end - control) * (2.0 * t),
            Self::Cubic {
                start,
                control1,
                control2,
                end,
            } => {
                let mt = 1.0 - t;
                (control1 - start) * (3.0 * mt * mt)
                    + (control2 - control1) * (6.0 * mt * t)
                    + (end - control2) * (3.0 * t * t)
            }
        }
    }

    /// Direction of travel at `t`.
    ///
    /// Falls back to the chord when the derivative vanishes (a control point
    /// coinciding with its anchor).
    #[must_use]
    pub fn tangent(&self, t: f64) -> Vector2 {
        let d = self.derivative(t);
        if d.norm_squared() > TOLERANCE * TOLERANCE {
            d
        } else {
            self.end() - self.start()
        }
    }

    /// Splits the curve at `t` with de Casteljau's algorithm.
    #[must_use]
    pub fn split(&self, t: f64) -> (Self, Self) {
        match *self {
            Self::Line { start, end } => {
                let mid = lerp(&start, &end, t);
                (
                    Self::Line { start, end: mid },
                    Self::Line { start: mid, end },
                )
            }
            Self::Quadratic {
                start,
                control,
                end,
            } => {
                let a = lerp(&start, &control, t);
                let b = lerp(&control, &end, t);
                let mid = lerp(&a, &b, t);
                (
                    Self::Quadratic {
                        start,
                        control: a,
                        end: mid,
                    },
                    Self::Quadratic {
                        start: mid,
                        control: b,
                        end,
                    },
                )
            }
            Self::Cubic {
                start,
                control1,
                control2,
                end,
            } => {
                let ab = lerp(&start, &control1, t);
                let bc = lerp(&control1, &control2, t);
                let cd = lerp(&control2, &end, t);
                let abc = lerp(&ab, &bc, t);
                let bcd = lerp(&bc, &cd, t);
                let mid = lerp(&abc, &bcd, t);
                (
                    Self::Cubic {
                        start,
                        control1: ab,
                        control2: abc,
                        end: mid,
                    },
                    Self::Cubic {
                        start: mid,
                        control1: bcd,
                        control2: cd,
                        end,
                    },
                )
            }
        }
    }

    /// The piece of the curve between `t0` and `t1` (`t0 <= t1`).
    #[must_use]
    pub fn subsegment(&self, t0: f64, t1: f64) -> Self {
        let (head, _) = self.split(t1);
        if t1 < TOLERANCE {
            return head;
        }
        head.split(t0 / t1).1
    }

    /// Same curve with its start point replaced.
    #[must_use]
    pub fn with_start(mut self, p: Point2) -> Self {
        match &mut self {
            Self::Line { start, .. } | Self::Quadratic { start, .. } | Self::Cubic { start, .. } => {
                *start = p;
            }
        }
        self
    }

    /// Same curve with its end point replaced.
    #[must_use]
    pub fn with_end(mut self, p: Point2) -> Self {
        match &mut self {
            Self::Line { end, .. } | Self::Quadratic { end, .. } | Self::Cubic { end, .. } => {
                *end = p;
            }
        }
        self
    }

    /// Same curve traversed from end to start.
    #[must_use]
    pub fn reversed(&self) -> Self {
        match *self {
            Self::Line { start, end } => Self::Line {
                start: end,
                end: start,
            },
            Self::Quadratic {
                start,
                control,
                end,
            } => Self::Quadratic {
                start: end,
                control,
                end: start,
            },
            Self::Cubic {
                start,
                control1,
                control2,
                end,
            } => Self::Cubic {
                start: end,
                control1: control2,
                control2: control1,
                end: start,
            },
        }
    }

    /// Bounding box of the anchors and control points.
    ///
    /// The control-point hull always contains the curve, so the box is
    /// conservative rather than tight.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        let mut aabb = Aabb::from_point(self.start());
        match self {
            Self::Line { .. } => {}
            Self::Quadratic { control, .. } => aabb.include(control),
            Self::Cubic {
                control1, control2, ..
            } => {
                aabb.include(control1);
                aabb.include(control2);
            }
        }
        aabb.include(&self.end());
        aabb
    }

    /// Flatness test; lines are always flat.
    #[must_use]
    pub fn is_flat(&self, eps: f64) -> bool {
        match self {
            Self::Line { .. } => true,
            Self::Quadratic {
                start,
                control,
                end,
            } => is_quadratic_flat(start, control, end, eps),
            Self::Cubic {
                start,
                control1,
                control2,
                end,
            } => is_bezier_flat(start, control1, control2, end, eps),
        }
    }

    /// Polynomial coefficients `[a, b, c, d]` of `a·t³ + b·t² + c·t + d`,
    /// one vector per power of `t`.
    #[must_use]
    pub fn power_coefficients(&self) -> [Vector2; 4] {
        match *self {
            Self::Line { start, end } => [Vector2::zeros(), Vector2::zeros(), end - start, start.coords],
            Self::Quadratic {
                start,
                control,
                end,
            } => {
                let (p0, p1, p2) = (start.coords, control.coords, end.coords);
                [Vector2::zeros(), p0 - p1 * 2.0 + p2, (p1 - p0) * 2.0, p0]
            }
            Self::Cubic {
                start,
                control1,
                control2,
                end,
            } => {
                let (p0, p1, p2, p3) = (start.coords, control1.coords, control2.coords, end.coords);
                [
                    -p0 + p1 * 3.0 - p2 * 3.0 + p3,
                    p0 * 3.0 - p1 * 6.0 + p2 * 3.0,
                    (p1 - p0) * 3.0,
                    p0,
                ]
            }
        }
    }

    /// Appends points approximating the curve to `out`, excluding the start
    /// point, until every piece passes the flatness test for `tolerance`.
    pub fn flatten(&self, tolerance: f64, out: &mut Vec<Point2>) {
        self.flatten_rec(tolerance, 0, out);
    }

    fn flatten_rec(&self, tolerance: f64, depth: u32, out: &mut Vec<Point2>) {
        if depth >= MAX_FLATTEN_DEPTH || self.is_flat(tolerance) {
            out.push(self.end());
            return;
        }
        let (left, right) = self.split(0.5);
        left.flatten_rec(tolerance, depth + 1, out);
        right.flatten_rec(tolerance, depth + 1, out);
    }
}
