pub mod bounds;
pub mod curve;
pub mod path;
pub mod path_point;
pub mod segment;

pub use bounds::Aabb;
pub use curve::CurveSegment;
pub use path::{FillRule, Path, PathSink, Subpath};
pub use path_point::{PathPoint, PathPointKind};
pub use segment::Segment;

pub use crate::math::polygon_2d::WindingDirection;
