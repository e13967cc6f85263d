mod bounds;
mod path;

pub use bounds::{compute_bounds, distance_sq, extend_bounds, inflate, intersects, point_rect};
pub use path::{InkPath, PathCommand};
