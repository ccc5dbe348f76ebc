use crate::geometry::Path;

use super::engine::boolean_execute;
use super::select::BooleanOp;
use super::BooleanParams;

/// Computes the boolean intersection of two paths.
pub struct Intersect<'a> {
    path_a: &'a Path,
    path_b: &'a Path,
    params: BooleanParams,
}

impl<'a> Intersect<'a> {
    /// Creates a new `Intersect` operation.
    #[must_use]
    pub fn new(path_a: &'a Path, path_b: &'a Path) -> Self {
        Self {
            path_a,
            path_b,
            params: BooleanParams::default(),
        }
    }

    #[must_use]
    pub fn with_params(mut self, params: BooleanParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the intersection, returning a new path.
    #[must_use]
    pub fn execute(&self) -> Path {
        boolean_execute(self.path_a, self.path_b, BooleanOp::Intersection, &self.params)
    }
}
