use crate::math::Point2;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point2,
    /// Maximum corner of the bounding box.
    pub max: Point2,
}

impl Aabb {
    /// Creates a degenerate box containing a single point.
    #[must_use]
    pub fn from_point(p: Point2) -> Self {
        Self { min: p, max: p }
    }

    /// Smallest box containing all `points`, or `None` if empty.
    #[must_use]
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point2>,
    {
        let mut iter = points.into_iter();
        let mut aabb = Self::from_point(*iter.next()?);
        for p in iter {
            aabb.include(p);
        }
        Some(aabb)
    }

    /// Grows the box to contain `p`.
    pub fn include(&mut self, p: &Point2) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    /// Smallest box containing both boxes.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut out = *self;
        out.include(&other.min);
        out.include(&other.max);
        out
    }

    /// Checks if two boxes overlap, allowing `slack` on every side.
    #[must_use]
    pub fn overlaps(&self, other: &Self, slack: f64) -> bool {
        self.min.x <= other.max.x + slack
            && self.max.x >= other.min.x - slack
            && self.min.y <= other.max.y + slack
            && self.max.y >= other.min.y - slack
    }

    /// Checks if `p` lies inside the box (boundary included).
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn from_points_spans_all() {
        let pts = [
            Point2::new(1.0, 5.0),
            Point2::new(-2.0, 3.0),
            Point2::new(4.0, -1.0),
        ];
        let b = Aabb::from_points(&pts).unwrap();
        assert_eq!(b.min, Point2::new(-2.0, -1.0));
        assert_eq!(b.max, Point2::new(4.0, 5.0));
        assert!((b.width() - 6.0).abs() < 1e-12);
        assert!((b.height() - 6.0).abs() < 1e-12);
    }

    #[test]
    fn from_no_points_is_none() {
        assert!(Aabb::from_points(&[] as &[Point2]).is_none());
    }

    #[test]
    fn overlap_with_slack() {
        let a = Aabb {
            min: Point2::new(0.0, 0.0),
            max: Point2::new(1.0, 1.0),
        };
        let b = Aabb {
            min: Point2::new(1.05, 0.0),
            max: Point2::new(2.0, 1.0),
        };
        assert!(!a.overlaps(&b, 0.0));
        assert!(a.overlaps(&b, 0.1));
        assert!(a.union(&b).contains(&Point2::new(1.5, 0.5)));
    }
}
