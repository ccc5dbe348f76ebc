use super::{Point2, TOLERANCE};

/// Traversal direction of a closed polygon.
///
/// Uses screen coordinates (y pointing down): a polygon that appears
/// clockwise on screen has a positive shoelace sum. In a y-up coordinate
/// system the names are swapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindingDirection {
    Clockwise,
    CounterClockwise,
}

impl WindingDirection {
    /// Returns the opposite direction.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Clockwise => Self::CounterClockwise,
            Self::CounterClockwise => Self::Clockwise,
        }
    }
}

/// Shoelace sum `Σ(x_i·y_{i+1} - x_{i+1}·y_i)` over a closed polygon.
#[must_use]
pub fn shoelace_sum(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum
}

/// Computes the signed area of a polygon (half the shoelace sum).
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    shoelace_sum(points) * 0.5
}

/// Winding direction of a polygon: a negative shoelace sum is
/// counter-clockwise, anything else clockwise.
#[must_use]
pub fn winding_direction(points: &[Point2]) -> WindingDirection {
    if shoelace_sum(points) < 0.0 {
        WindingDirection::CounterClockwise
    } else {
        WindingDirection::Clockwise
    }
}

/// Rotates a closed polygon so it starts at the leftmost vertex (smallest x),
/// breaking ties by smallest y. Ensures deterministic output for tests.
#[must_use]
pub fn rotate_to_canonical_start(points: &[Point2]) -> Vec<Point2> {
    if points.len() < 2 {
        return points.to_vec();
    }
    let mut best = 0;
    for (i, pt) in points.iter().enumerate().skip(1) {
        let b = &points[best];
        if pt.x < b.x - TOLERANCE || (pt.x - b.x).abs() < TOLERANCE && pt.y < b.y {
            best = i;
        }
    }
    if best == 0 {
        return points.to_vec();
    }
    let mut rotated = Vec::with_capacity(points.len());
    rotated.extend_from_slice(&points[best..]);
    rotated.extend_from_slice(&points[..best]);
    rotated
}
