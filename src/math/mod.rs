pub mod bezier;
pub mod compare;
pub mod distance_2d;
pub mod intersect_2d;
pub mod polygon_2d;
pub mod solve;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 2D affine transformation.
pub type Affine2 = nalgebra::Affine2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;
