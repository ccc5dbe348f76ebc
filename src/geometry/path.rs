use std::cell::OnceCell;

use crate::error::{PathError, Result};
use crate::math::compare::points_almost_equal;
use crate::math::polygon_2d::{shoelace_sum, WindingDirection};
use crate::math::{Affine2, Point2, TOLERANCE};

use super::bounds::Aabb;
use super::curve::CurveSegment;
use super::segment::Segment;

/// Rule deciding which points a path's fill covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FillRule {
    /// Inside where the winding number is nonzero.
    #[default]
    NonZero,
    /// Inside where the boundary is crossed an odd number of times.
    EvenOdd,
}

/// Receiver of drawing commands, e.g. a renderer backend.
pub trait PathSink {
    fn move_to(&mut self, to: Point2);
    fn line_to(&mut self, to: Point2);
    fn quad_curve_to(&mut self, control: Point2, to: Point2);
    fn cubic_curve_to(&mut self, control1: Point2, control2: Point2, to: Point2);
    fn close_path(&mut self);
}

/// The geometric edges of one subpath.
#[derive(Debug, Clone)]
pub struct Subpath {
    pub curves: Vec<CurveSegment>,
    /// Whether the subpath ends where it started, either through an explicit
    /// `Close` or because its last anchor coincides with its first.
    pub closed: bool,
}

impl Subpath {
    /// The curves plus, for an open subpath, the straight edge a filler
    /// would add to close it.
    #[must_use]
    pub fn closed_curves(&self) -> Vec<CurveSegment> {
        let mut curves = self.curves.clone();
        if !self.closed {
            if let (Some(first), Some(last)) = (self.curves.first(), self.curves.last()) {
                if first.start() != last.end() {
                    curves.push(CurveSegment::Line {
                        start: last.end(),
                        end: first.start(),
                    });
                }
            }
        }
        curves
    }
}

/// An ordered sequence of segments forming one or more subpaths.
///
/// Insertion order defines traversal and therefore winding direction. The
/// bounding box is computed lazily and dropped by every mutating call.
///
/// The affine `transform` is carried for renderers; geometric queries work
/// on the untransformed coordinates. Use [`Path::transformed`] to bake it in.
#[derive(Debug, Clone)]
pub struct Path {
    segments: Vec<Segment>,
    fill_rule: FillRule,
    transform: Affine2,
    bounds: OnceCell<Option<Aabb>>,
}

impl Default for Path {
    fn default() -> Self {
        Self::new()
    }
}

impl Path {
    /// Creates an empty path.
    #[must_use]
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
            fill_rule: FillRule::default(),
            transform: Affine2::identity(),
            bounds: OnceCell::new(),
        }
    }

    /// Creates a polyline path through `points`, closing it if requested.
    #[must_use]
    pub fn from_points(points: &[Point2], closed: bool) -> Self {
        let mut path = Self::new();
        let mut iter = points.iter();
        if let Some(first) = iter.next() {
            path.move_to(*first);
            for p in iter {
                path.line_to(*p);
            }
            if closed {
                path.close_path();
            }
        }
        path
    }

    /// Creates a path from raw segments.
    ///
    /// # Errors
    ///
    /// Returns `PathError::MissingMove` if the first segment is not a move,
    /// or `PathError::SegmentAfterClose` if anything but a move follows a
    /// close.
    pub fn from_segments(segments: Vec<Segment>) -> Result<Self> {
        if let Some(first) = segments.first() {
            if !first.is_move() {
                return Err(PathError::MissingMove.into());
            }
        }
        for (index, pair) in segments.windows(2).enumerate() {
            if pair[0] == Segment::Close && !pair[1].is_move() {
                return Err(PathError::SegmentAfterClose { index: index + 1 }.into());
            }
        }
        Ok(Self {
            segments,
            ..Self::new()
        })
    }

    // --- Builder ---

    /// Starts a new subpath at `to`.
    pub fn move_to(&mut self, to: Point2) -> &mut Self {
        self.push(Segment::Move(to))
    }

    /// Adds a straight edge to `to`. On an empty path this only starts a
    /// subpath at `to`.
    pub fn line_to(&mut self, to: Point2) -> &mut Self {
        if self.ensure_subpath(to) {
            return self;
        }
        self.push(Segment::Line(to))
    }

    /// Adds a quadratic bezier through `control` to `to`.
    pub fn quad_curve_to(&mut self, control: Point2, to: Point2) -> &mut Self {
        self.ensure_subpath(control);
        self.push(Segment::Quadratic { point: to, control })
    }

    /// Adds a cubic bezier through `control1`, `control2` to `to`.
    pub fn cubic_curve_to(&mut self, control1: Point2, control2: Point2, to: Point2) -> &mut Self {
        self.ensure_subpath(control1);
        self.push(Segment::Cubic {
            point: to,
            control1,
            control2,
        })
    }

    /// Closes the current subpath.
    ///
    /// Does nothing if the subpath has fewer than two points or is already
    /// closed by a `Close`. Adds a straight edge back to the first point
    /// unless the last point already lies on it.
    pub fn close_path(&mut self) -> &mut Self {
        let Some(start_idx) = self.current_subpath_start() else {
            return self;
        };
        if self.segments.len() - start_idx < 2 {
            return self;
        }
        let (Some(start), Some(last)) = (
            self.segments[start_idx].anchor(),
            self.segments.last().and_then(Segment::anchor),
        ) else {
            // Last segment is already a Close.
            return self;
        };
        if !points_almost_equal(&last, &start, TOLERANCE) {
            self.segments.push(Segment::Line(start));
        }
        self.push(Segment::Close)
    }

    /// Appends a curve as the next segment of the current subpath.
    pub fn append_curve(&mut self, curve: &CurveSegment) -> &mut Self {
        match *curve {
            CurveSegment::Line { end, .. } => self.line_to(end),
            CurveSegment::Quadratic { control, end, .. } => self.quad_curve_to(control, end),
            CurveSegment::Cubic {
                control1,
                control2,
                end,
                ..
            } => self.cubic_curve_to(control1, control2, end),
        }
    }

    /// Appends all subpaths of `other`.
    pub fn extend(&mut self, other: &Path) -> &mut Self {
        self.segments.extend_from_slice(&other.segments);
        self.invalidate();
        self
    }

    /// Removes all segments.
    pub fn clear(&mut self) {
        self.segments.clear();
        self.invalidate();
    }

    fn push(&mut self, segment: Segment) -> &mut Self {
        self.segments.push(segment);
        self.invalidate();
        self
    }

    fn invalidate(&mut self) {
        self.bounds = OnceCell::new();
    }

    /// Makes sure a subpath is open before a drawing command.
    ///
    /// On an empty path a subpath is started at `at` and `true` is returned.
    /// After a `Close` the new subpath starts where the closed one started.
    fn ensure_subpath(&mut self, at: Point2) -> bool {
        match self.segments.last() {
            None => {
                self.move_to(at);
                true
            }
            Some(Segment::Close) => {
                let start = self
                    .current_subpath_start()
                    .and_then(|i| self.segments[i].anchor())
                    .unwrap_or(at);
                self.move_to(start);
                false
            }
            Some(_) => false,
        }
    }

    fn current_subpath_start(&self) -> Option<usize> {
        self.segments.iter().rposition(Segment::is_move)
    }

    // --- Style ---

    #[must_use]
    pub fn fill_rule(&self) -> FillRule {
        self.fill_rule
    }

    pub fn set_fill_rule(&mut self, fill_rule: FillRule) {
        self.fill_rule = fill_rule;
    }

    #[must_use]
    pub fn with_fill_rule(mut self, fill_rule: FillRule) -> Self {
        self.fill_rule = fill_rule;
        self
    }

    #[must_use]
    pub fn transform(&self) -> &Affine2 {
        &self.transform
    }

    pub fn set_transform(&mut self, transform: Affine2) {
        self.transform = transform;
    }

    /// Returns a copy with the transform applied to every point and reset
    /// to identity.
    #[must_use]
    pub fn transformed(&self) -> Self {
        Self {
            segments: self
                .segments
                .iter()
                .map(|s| s.transformed(&self.transform))
                .collect(),
            fill_rule: self.fill_rule,
            transform: Affine2::identity(),
            bounds: OnceCell::new(),
        }
    }

    /// Copies style and transform from `other`.
    pub(crate) fn with_style_of(mut self, other: &Path) -> Self {
        self.fill_rule = other.fill_rule;
        self.transform = other.transform;
        self
    }

    // --- Queries ---

    /// The raw segment list.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// All anchor points in order (the path's point array).
    #[must_use]
    pub fn anchors(&self) -> Vec<Point2> {
        self.segments.iter().filter_map(Segment::anchor).collect()
    }

    /// All off-curve control points in order.
    #[must_use]
    pub fn control_points(&self) -> Vec<Point2> {
        self.segments
            .iter()
            .flat_map(Segment::control_points)
            .collect()
    }

    #[must_use]
    pub fn first_point(&self) -> Option<Point2> {
        self.segments.iter().find_map(Segment::anchor)
    }

    #[must_use]
    pub fn last_point(&self) -> Option<Point2> {
        self.segments.iter().rev().find_map(Segment::anchor)
    }

    /// Bounding box over anchors and control points (cached).
    #[must_use]
    pub fn bounds(&self) -> Option<Aabb> {
        *self.bounds.get_or_init(|| {
            let mut points = self.anchors();
            points.extend(self.control_points());
            Aabb::from_points(&points)
        })
    }

    /// Returns `true` if the path has edges and every subpath is closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        let subpaths = self.subpaths();
        !subpaths.is_empty() && subpaths.iter().all(|s| s.closed)
    }

    /// Winding direction from the shoelace sum over each subpath's anchors.
    #[must_use]
    pub fn winding_direction(&self) -> WindingDirection {
        let mut sum = 0.0;
        let mut ring: Vec<Point2> = Vec::new();
        for segment in &self.segments {
            if segment.is_move() {
                sum += shoelace_sum(&ring);
                ring.clear();
            }
            if let Some(p) = segment.anchor() {
                ring.push(p);
            }
        }
        sum += shoelace_sum(&ring);
        if sum < 0.0 {
            WindingDirection::CounterClockwise
        } else {
            WindingDirection::Clockwise
        }
    }

    /// Geometric edges grouped by subpath.
    ///
    /// Zero-length straight edges and subpaths without edges are skipped. A
    /// `Close` contributes an edge back to the subpath start when the last
    /// anchor is elsewhere.
    #[must_use]
    pub fn subpaths(&self) -> Vec<Subpath> {
        let mut out = Vec::new();
        let mut builder: Option<SubpathBuilder> = None;

        for segment in &self.segments {
            if let Segment::Move(p) = *segment {
                if let Some(done) = builder.take() {
                    done.finish_into(&mut out);
                }
                builder = Some(SubpathBuilder::new(p));
                continue;
            }
            let Some(b) = builder.as_mut() else {
                continue;
            };
            match *segment {
                Segment::Line(p) => b.line(p),
                Segment::Quadratic { point, control } => {
                    b.push(CurveSegment::Quadratic {
                        start: b.current,
                        control,
                        end: point,
                    });
                }
                Segment::Cubic {
                    point,
                    control1,
                    control2,
                } => {
                    b.push(CurveSegment::Cubic {
                        start: b.current,
                        control1,
                        control2,
                        end: point,
                    });
                }
                Segment::Close => {
                    let start = b.start;
                    b.line(start);
                    b.explicitly_closed = true;
                }
                Segment::Move(_) => {}
            }
        }
        if let Some(done) = builder {
            done.finish_into(&mut out);
        }
        out
    }

    /// The explicit edges of the path (the segment pairs).
    #[must_use]
    pub fn curves(&self) -> Vec<CurveSegment> {
        self.subpaths().into_iter().flat_map(|s| s.curves).collect()
    }

    /// Subpaths with open ones implicitly closed, as a filler sees them.
    #[must_use]
    pub fn fill_subpaths(&self) -> Vec<Subpath> {
        self.subpaths()
            .into_iter()
            .map(|s| Subpath {
                curves: s.closed_curves(),
                closed: true,
            })
            .collect()
    }

    /// Edges of [`Path::fill_subpaths`], flattened into one list.
    #[must_use]
    pub fn fill_curves(&self) -> Vec<CurveSegment> {
        self.fill_subpaths()
            .into_iter()
            .flat_map(|s| s.curves)
            .collect()
    }

    /// Returns a copy with every subpath traversed backwards.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut out = Self::new().with_style_of(self);
        for subpath in self.subpaths() {
            let Some(last) = subpath.curves.last() else {
                continue;
            };
            out.move_to(last.end());
            for curve in subpath.curves.iter().rev() {
                out.append_curve(&curve.reversed());
            }
            if subpath.closed {
                out.close_path();
            }
        }
        out
    }

    /// Approximates every subpath with a polyline; one point list per subpath.
    #[must_use]
    pub fn flatten(&self, tolerance: f64) -> Vec<Vec<Point2>> {
        self.subpaths()
            .into_iter()
            .filter_map(|subpath| {
                let first = subpath.curves.first()?;
                let mut points = vec![first.start()];
                for curve in &subpath.curves {
                    curve.flatten(tolerance, &mut points);
                }
                Some(points)
            })
            .collect()
    }

    /// Walks the path, issuing one drawing command per segment.
    pub fn replay<S: PathSink + ?Sized>(&self, sink: &mut S) {
        for segment in &self.segments {
            match *segment {
                Segment::Move(p) => sink.move_to(p),
                Segment::Line(p) => sink.line_to(p),
                Segment::Quadratic { point, control } => sink.quad_curve_to(control, point),
                Segment::Cubic {
                    point,
                    control1,
                    control2,
                } => sink.cubic_curve_to(control1, control2, point),
                Segment::Close => sink.close_path(),
            }
        }
    }
}

impl PathSink for Path {
    fn move_to(&mut self, to: Point2) {
        Path::move_to(self, to);
    }

    fn line_to(&mut self, to: Point2) {
        Path::line_to(self, to);
    }

    fn quad_curve_to(&mut self, control: Point2, to: Point2) {
        Path::quad_curve_to(self, control, to);
    }

    fn cubic_curve_to(&mut self, control1: Point2, control2: Point2, to: Point2) {
        Path::cubic_curve_to(self, control1, control2, to);
    }

    fn close_path(&mut self) {
        Path::close_path(self);
    }
}

struct SubpathBuilder {
    start: Point2,
    current: Point2,
    curves: Vec<CurveSegment>,
    explicitly_closed: bool,
}

impl SubpathBuilder {
    fn new(start: Point2) -> Self {
        Self {
            start,
            current: start,
            curves: Vec::new(),
            explicitly_closed: false,
        }
    }

    fn line(&mut self, to: Point2) {
        if to != self.current {
            self.push(CurveSegment::Line {
                start: self.current,
                end: to,
            });
        }
    }

    fn push(&mut self, curve: CurveSegment) {
        self.current = curve.end();
        self.curves.push(curve);
    }

    fn finish_into(self, out: &mut Vec<Subpath>) {
        if self.curves.is_empty() {
            return;
        }
        let closed =
            self.explicitly_closed || points_almost_equal(&self.current, &self.start, TOLERANCE);
        out.push(Subpath {
            curves: self.curves,
            closed,
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use nalgebra::{Matrix3, Vector2};

    use super::*;
    use crate::error::PathlisError;

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

    #[test]
    fn builder_appends_in_order() {
        let mut path = Path::new();
        path.move_to(pt(0.0, 0.0))
            .line_to(pt(10.0, 0.0))
            .quad_curve_to(pt(15.0, 5.0), pt(10.0, 10.0))
            .cubic_curve_to(pt(5.0, 15.0), pt(0.0, 15.0), pt(0.0, 10.0));
        assert_eq!(path.len(), 4);
        assert!(path.segments()[0].is_move());
        assert_eq!(path.last_point(), Some(pt(0.0, 10.0)));
        assert_eq!(path.control_points().len(), 3);
    }

    #[test]
    fn close_path_adds_closing_edge_once() {
        let mut path = Path::new();
        path.move_to(pt(0.0, 0.0))
            .line_to(pt(10.0, 0.0))
            .line_to(pt(10.0, 10.0));
        path.close_path();
        let once = path.anchors();
        assert_eq!(once.last(), Some(&pt(0.0, 0.0)));
        path.close_path();
        assert_eq!(path.anchors(), once);
        assert_eq!(path.segments().last(), Some(&Segment::Close));
    }

    #[test]
    fn close_path_skips_edge_when_already_at_start() {
        let path = Path::from_points(
            &[
                pt(0.0, 0.0),
                pt(100.0, 0.0),
                pt(100.0, 100.0),
                pt(0.0, 100.0),
                pt(0.0, 0.0),
            ],
            true,
        );
        assert_eq!(path.anchors().len(), 5);
        assert_eq!(path.curves().len(), 4);
        assert!(path.is_closed());
    }

    #[test]
    fn close_path_needs_two_points() {
        let mut path = Path::new();
        path.close_path();
        assert!(path.is_empty());
        path.move_to(pt(1.0, 1.0));
        path.close_path();
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn line_to_on_empty_path_starts_subpath() {
        let mut path = Path::new();
        path.line_to(pt(3.0, 4.0));
        assert_eq!(path.segments(), &[Segment::Move(pt(3.0, 4.0))]);
    }

    #[test]
    fn drawing_after_close_restarts_at_subpath_start() {
        let mut path = square(0.0, 0.0, 10.0);
        path.line_to(pt(5.0, -5.0));
        let n = path.len();
        assert_eq!(path.segments()[n - 2], Segment::Move(pt(0.0, 0.0)));
        assert_eq!(path.segments()[n - 1], Segment::Line(pt(5.0, -5.0)));
    }

    #[test]
    fn from_segments_validates_structure() {
        let err = Path::from_segments(vec![Segment::Line(pt(1.0, 1.0))]).unwrap_err();
        assert!(matches!(err, PathlisError::Path(PathError::MissingMove)));

        let err = Path::from_segments(vec![
            Segment::Move(pt(0.0, 0.0)),
            Segment::Line(pt(1.0, 0.0)),
            Segment::Close,
            Segment::Line(pt(2.0, 2.0)),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            PathlisError::Path(PathError::SegmentAfterClose { index: 3 })
        ));

        assert!(Path::from_segments(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn close_synthesizes_edge_in_curves() {
        let path = Path::from_segments(vec![
            Segment::Move(pt(0.0, 0.0)),
            Segment::Line(pt(4.0, 0.0)),
            Segment::Line(pt(4.0, 3.0)),
            Segment::Close,
        ])
        .unwrap();
        let curves = path.curves();
        assert_eq!(curves.len(), 3);
        assert_eq!(curves[2].end(), pt(0.0, 0.0));
        assert!(path.is_closed());
    }

    #[test]
    fn bounds_include_control_points_and_refresh_after_mutation() {
        let mut path = Path::new();
        path.move_to(pt(0.0, 0.0))
            .quad_curve_to(pt(5.0, 20.0), pt(10.0, 0.0));
        let b = path.bounds().unwrap();
        assert_eq!(b.max, pt(10.0, 20.0));

        path.line_to(pt(-5.0, -5.0));
        let b = path.bounds().unwrap();
        assert_eq!(b.min, pt(-5.0, -5.0));
        assert!(Path::new().bounds().is_none());
    }

    #[test]
    fn clone_is_deep() {
        let original = square(0.0, 0.0, 1.0);
        let mut copy = original.clone();
        copy.line_to(pt(9.0, 9.0));
        assert_ne!(copy.len(), original.len());
    }

    #[test]
    fn winding_direction_flips_on_reverse() {
        let path = square(0.0, 0.0, 10.0);
        assert_eq!(path.winding_direction(), WindingDirection::Clockwise);
        let reversed = path.reversed();
        assert_eq!(
            reversed.winding_direction(),
            WindingDirection::CounterClockwise
        );
        assert!(reversed.is_closed());
        assert_eq!(reversed.first_point(), Some(pt(0.0, 0.0)));
    }

    #[test]
    fn reversed_swaps_cubic_controls() {
        let mut path = Path::new();
        path.move_to(pt(0.0, 0.0))
            .cubic_curve_to(pt(1.0, 1.0), pt(2.0, 1.0), pt(3.0, 0.0));
        let rev = path.reversed();
        assert_eq!(
            rev.segments(),
            &[
                Segment::Move(pt(3.0, 0.0)),
                Segment::Cubic {
                    point: pt(0.0, 0.0),
                    control1: pt(2.0, 1.0),
                    control2: pt(1.0, 1.0),
                }
            ]
        );
    }

    #[test]
    fn open_subpath_is_closed_for_filling() {
        let path = Path::from_points(&[pt(0.0, 0.0), pt(4.0, 0.0), pt(4.0, 4.0)], false);
        assert!(!path.is_closed());
        assert_eq!(path.curves().len(), 2);
        let fill = path.fill_curves();
        assert_eq!(fill.len(), 3);
        assert_eq!(fill[2].end(), pt(0.0, 0.0));
    }

    #[test]
    fn multiple_subpaths() {
        let mut path = square(0.0, 0.0, 10.0);
        path.extend(&square(20.0, 0.0, 5.0));
        let subpaths = path.subpaths();
        assert_eq!(subpaths.len(), 2);
        assert!(subpaths.iter().all(|s| s.closed && s.curves.len() == 4));
    }

    #[test]
    fn transformed_bakes_transform() {
        let mut path = square(0.0, 0.0, 1.0);
        path.set_transform(Affine2::from_matrix_unchecked(Matrix3::new_translation(
            &Vector2::new(5.0, 5.0),
        )));
        let baked = path.transformed();
        assert_eq!(baked.first_point(), Some(pt(5.0, 5.0)));
        assert_eq!(*baked.transform(), Affine2::identity());
        assert_eq!(path.first_point(), Some(pt(0.0, 0.0)));
    }

    #[test]
    fn flatten_produces_one_ring_per_subpath() {
        let mut path = Path::new();
        path.move_to(pt(0.0, 0.0))
            .cubic_curve_to(pt(0.0, 10.0), pt(10.0, 10.0), pt(10.0, 0.0));
        path.close_path();
        let rings = path.flatten(0.01);
        assert_eq!(rings.len(), 1);
        assert!(rings[0].len() > 8);
        assert_eq!(rings[0].first(), rings[0].last());
    }

    #[derive(Default)]
    struct Recorder(Vec<&'static str>);

    impl PathSink for Recorder {
        fn move_to(&mut self, _: Point2) {
            self.0.push("M");
        }
        fn line_to(&mut self, _: Point2) {
            self.0.push("L");
        }
        fn quad_curve_to(&mut self, _: Point2, _: Point2) {
            self.0.push("Q");
        }
        fn cubic_curve_to(&mut self, _: Point2, _: Point2, _: Point2) {
            self.0.push("C");
        }
        fn close_path(&mut self) {
            self.0.push("Z");
        }
    }

    #[test]
    fn replay_issues_drawing_commands() {
        let mut path = Path::new();
        path.move_to(pt(0.0, 0.0))
            .quad_curve_to(pt(1.0, 1.0), pt(2.0, 0.0))
            .cubic_curve_to(pt(2.0, -1.0), pt(1.0, -1.0), pt(0.5, -0.5));
        path.close_path();
        let mut rec = Recorder::default();
        path.replay(&mut rec);
        assert_eq!(rec.0, vec!["M", "Q", "C", "L", "Z"]);

        let mut copy = Path::new();
        path.replay(&mut copy);
        assert_eq!(copy.segments(), path.segments());
    }
}
