//! Simple shapes used around the collision routines: axis-aligned regions and
//! line segments.

use crate::Vector2;

mod aabb;
mod segment;

pub use aabb::*;
pub use segment::*;

/// Checks if `p` lies in the region spanned by `ll` (lower left) and `ur` (upper right).
/// Points on the border are inside.
pub fn point_in_region(ll: Vector2, ur: Vector2, p: Vector2) -> bool {
    p.x >= ll.x && p.x <= ur.x && p.y >= ll.y && p.y <= ur.y
}
