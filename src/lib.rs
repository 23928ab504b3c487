//!
//! obb_collide is a small crate dedicated to collision tests between rectangles that may be
//! rotated (oriented bounding boxes), using the separating axis theorem.
//!
//! Bodies are given by their center, width, height and rotation in degrees (counter-clockwise).
//! Anything implementing [`Collider`] can be tested, [`Body`] is the plain data version.
//! All collision tests treat touching as colliding.
//!
//! [`BodyWorld`] stores many bodies in a sparse grid with optional tags, to answer
//! "is this touching anything" queries without testing every pair.
//!
//! ```rust
//! use obb_collide::{is_aabb_collision, is_rotated_box_collision, Body};
//!
//! let a = Body::new([0.0, 0.0], 2.0, 0.5);
//! let b = Body::new([1.0, 0.8], 2.0, 0.5);
//! assert!(!is_aabb_collision(&a, &b));
//! assert!(is_rotated_box_collision(&a, &b.with_rotation(45.0)));
//! ```
//!

pub mod body;
pub mod cell;
pub mod collision;
pub mod error;
pub mod math;
pub mod shape;
pub mod storage;
pub mod vector;
pub mod world;

pub use body::{Basis, Body, Collider};
pub use collision::{
    is_aabb_collision, is_buffered_aabb_collision, is_buffered_aabb_collision_with,
    is_buffered_rotated_box_collision, is_buffered_rotated_box_collision_with,
    is_rotated_box_collision, CollisionBuffer,
};
pub use error::{GeometryError, Result};
pub use vector::Vector2;
pub use world::{BodyHandle, BodyWorld};
