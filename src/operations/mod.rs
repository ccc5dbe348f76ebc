pub mod boolean;
pub mod intersection;
pub mod winding;
