mod assemble;
mod cache;
mod engine;
mod intersect_op;
mod select;
mod split;
mod subtract;
mod union;
mod xor;

pub use assemble::assemble_result;
pub use cache::BooleanCache;
pub use intersect_op::Intersect;
pub use select::{
    should_keep_fragment, should_keep_shared_edge, BooleanOp, KeepDecision, PathSource,
};
pub use split::Fragment;
pub use subtract::Subtract;
pub use union::Union;
pub use xor::Xor;

use crate::geometry::Path;
use crate::operations::intersection::IntersectionParams;

/// Tunables of the boolean pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BooleanParams {
    pub intersection: IntersectionParams,
    /// Fragment midpoints closer than this to the other operand's boundary
    /// are classified `OnBoundary`.
    pub boundary_tolerance: f64,
    /// Fragment ends closer than this are stitched together.
    pub join_tolerance: f64,
}

impl Default for BooleanParams {
    fn default() -> Self {
        Self {
            intersection: IntersectionParams::default(),
            boundary_tolerance: 1e-7,
            join_tolerance: 1e-6,
        }
    }
}

/// Combines two paths with `op` using default parameters.
///
/// The inputs are never modified. The result is a new path carrying the
/// fill rule and transform of `a`.
#[must_use]
pub fn boolean_operation(a: &Path, b: &Path, op: BooleanOp) -> Path {
    boolean_operation_with(a, b, op, &BooleanParams::default())
}

/// [`boolean_operation`] with explicit parameters.
#[must_use]
pub fn boolean_operation_with(a: &Path, b: &Path, op: BooleanOp, params: &BooleanParams) -> Path {
    engine::boolean_execute(a, b, op, params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Point2;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Path {
        Path::from_points(
            &[
                Point2::new(x0, y0),
                Point2::new(x1, y0),
                Point2::new(x1, y1),
                Point2::new(x0, y1),
                Point2::new(x0, y0),
            ],
            true,
        )
    }

    #[test]
    fn every_operation_on_overlapping_rectangles_is_non_empty() {
        let a = rect(0.0, 0.0, 100.0, 100.0);
        let b = rect(50.0, 50.0, 150.0, 150.0);
        for op in [
            BooleanOp::Union,
            BooleanOp::Intersection,
            BooleanOp::Difference,
            BooleanOp::Xor,
        ] {
            let result = boolean_operation(&a, &b, op);
            assert!(!result.is_empty(), "{op:?}");
            assert!(result.is_closed(), "{op:?}");
        }
    }

    #[test]
    fn op_structs_match_free_function() {
        let a = rect(0.0, 0.0, 100.0, 100.0);
        let b = rect(50.0, 50.0, 150.0, 150.0);
        let params = BooleanParams::default();
        assert_eq!(
            Union::new(&a, &b).execute().segments(),
            boolean_operation_with(&a, &b, BooleanOp::Union, &params).segments()
        );
        assert_eq!(
            Intersect::new(&a, &b).execute().segments(),
            boolean_operation(&a, &b, BooleanOp::Intersection).segments()
        );
        assert_eq!(
            Subtract::new(&a, &b).execute().segments(),
            boolean_operation(&a, &b, BooleanOp::Difference).segments()
        );
        assert_eq!(
            Xor::new(&a, &b).execute().segments(),
            boolean_operation(&a, &b, BooleanOp::Xor).segments()
        );
    }
}
