//! A 2D path geometry kernel.
//!
//! Paths are sequences of move, line, quadratic and cubic segments. The
//! kernel finds curve intersections by recursive subdivision, answers
//! point-in-path queries through winding numbers, and combines closed paths
//! with union, intersection, difference and xor.

pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;

pub use error::{PathlisError, Result};
pub use geometry::{FillRule, Path, PathPoint, PathPointKind, PathSink, Segment, WindingDirection};
pub use operations::boolean::{
    boolean_operation, boolean_operation_with, BooleanCache, BooleanOp, BooleanParams,
};
pub use operations::intersection::{
    find_path_intersections, find_self_intersections, Intersection, IntersectionParams,
};
pub use operations::winding::{calculate_winding, is_point_in_path, PointClassification};
