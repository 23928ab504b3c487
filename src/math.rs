//! Angle and distance helpers.
//!
//! Angles are expressed in degrees, counter-clockwise positive, with 0 degrees
//! facing +x.

use crate::Vector2;
use std::f32::consts::PI;

pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees * PI / 180.0
}

pub fn radians_to_degrees(radians: f32) -> f32 {
    radians * 180.0 / PI
}

pub fn square_distance(a: Vector2, b: Vector2) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

pub fn distance(a: Vector2, b: Vector2) -> f32 {
    square_distance(a, b).sqrt()
}

/// Unit vector pointing at `degrees`.
pub fn direction_from_degrees(degrees: f32) -> Vector2 {
    let (s, c) = degrees_to_radians(degrees).sin_cos();
    Vector2::new(c, s)
}

/// Angle of `direction` in degrees, in `(-180, 180]`.
/// Inverse of [`direction_from_degrees`] for non-zero directions.
pub fn degrees_from_direction(direction: Vector2) -> f32 {
    radians_to_degrees(direction.y.atan2(direction.x))
}

/// Rotates `p` counter-clockwise about the origin.
///
/// # Example
/// ```rust
/// use obb_collide::{math::rotate_point, Vector2};
/// let r = rotate_point(Vector2::new(1.0, 0.0), 90.0);
/// assert!(r.x.abs() < 1e-6 && (r.y - 1.0).abs() < 1e-6);
/// ```
pub fn rotate_point(p: Vector2, degrees: f32) -> Vector2 {
    let (sr, cr) = degrees_to_radians(degrees).sin_cos();
    Vector2::new(p.x * cr - p.y * sr, p.x * sr + p.y * cr)
}
