use crate::geometry::Path;

use super::engine::boolean_execute;
use super::select::BooleanOp;
use super::BooleanParams;

/// Computes the region covered by exactly one of two paths.
pub struct Xor<'a> {
    path_a: &'a Path,
    path_b: &'a Path,
    params: BooleanParams,
}

impl<'a> Xor<'a> {
    /// Creates a new `Xor` operation.
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

    /// Executes the symmetric difference, returning a new path.
    #[must_use]
    pub fn execute(&self) -> Path {
        boolean_execute(self.path_a, self.path_b, BooleanOp::Xor, &self.params)
    }
}
