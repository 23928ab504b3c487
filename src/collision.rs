//! Collision tests between rectangular bodies.
//!
//! All tests use closed intervals: bodies that exactly touch are colliding.
//!
//! The rotated tests implement the separating axis theorem for rectangles. Only
//! four axes need checking, the two local axes of each body. For an axis owned
//! by body `A`, the corners of `B` are projected relative to `A`'s corner
//! `p - u - v` so that `A` itself always covers `[0, extent]` on that axis.

use crate::body::{corners, Basis, Body, Collider};
use crate::Vector2;
use log::trace;

/// Tolerance shrinking the collision window of buffered tests.
/// `x` applies along a body's local x axis (width), `y` along its local y axis (height).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollisionBuffer {
    pub x: f32,
    pub y: f32,
}

impl CollisionBuffer {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn uniform(buffer: f32) -> Self {
        Self::new(buffer, buffer)
    }
}

/// Tests for collision of two axis-aligned bodies, rotation is ignored.
///
/// # Example
/// ```rust
/// use obb_collide::{is_aabb_collision, Body};
/// let a = Body::new([0.0, 0.0], 1.0, 1.0);
/// let b = Body::new([1.0, 0.0], 1.0, 1.0);
/// assert!(is_aabb_collision(&a, &b)); // touching counts
/// ```
pub fn is_aabb_collision<A, B>(a: &A, b: &B) -> bool
where
    A: Collider + ?Sized,
    B: Collider + ?Sized,
{
    is_buffered_aabb_collision(a, b, 0.0, 0.0)
}

/// Axis-aligned collision where each body's width is reduced by `x_buffer`
/// and its height by `y_buffer` before testing.
pub fn is_buffered_aabb_collision<A, B>(a: &A, b: &B, x_buffer: f32, y_buffer: f32) -> bool
where
    A: Collider + ?Sized,
    B: Collider + ?Sized,
{
    let (pa, pb) = (a.position(), b.position());
    let aw = (a.width() - x_buffer) / 2.0;
    let bw = (b.width() - x_buffer) / 2.0;
    let ah = (a.height() - y_buffer) / 2.0;
    let bh = (b.height() - y_buffer) / 2.0;

    pa.x - aw <= pb.x + bw
        && pa.x + aw >= pb.x - bw
        && pa.y - ah <= pb.y + bh
        && pa.y + ah >= pb.y - bh
}

pub fn is_buffered_aabb_collision_with<A, B>(a: &A, b: &B, buffer: &CollisionBuffer) -> bool
where
    A: Collider + ?Sized,
    B: Collider + ?Sized,
{
    is_buffered_aabb_collision(a, b, buffer.x, buffer.y)
}

/// Tests for collision of two arbitrarily rotated bodies.
///
/// # Example
/// ```rust
/// use obb_collide::{is_rotated_box_collision, Body};
/// let a = Body::new([0.0, 0.0], 2.0, 0.5);
/// let b = Body::new([1.2, 1.2], 2.0, 0.5);
/// assert!(!is_rotated_box_collision(&a, &b));
/// assert!(is_rotated_box_collision(&a, &b.with_rotation(90.0)));
/// ```
pub fn is_rotated_box_collision<A, B>(a: &A, b: &B) -> bool
where
    A: Collider + ?Sized,
    B: Collider + ?Sized,
{
    is_buffered_rotated_box_collision(a, b, 0.0, 0.0)
}

/// Rotated collision where the window on each tested axis is shrunk by the
/// buffer at both ends: `x_buffer` on local x axes, `y_buffer` on local y axes.
pub fn is_buffered_rotated_box_collision<A, B>(
    a: &A,
    b: &B,
    x_buffer: f32,
    y_buffer: f32,
) -> bool
where
    A: Collider + ?Sized,
    B: Collider + ?Sized,
{
    let fa = Frame::new(&a.body());
    let fb = Frame::new(&b.body());

    for (name, owner, other) in [("a", &fa, &fb), ("b", &fb, &fa)] {
        if let Some(axis) = owner.separating_axis(&other.vertices, x_buffer, y_buffer) {
            trace!("bodies separated along local {} axis of {}", axis, name);
            return false;
        }
    }
    true
}

pub fn is_buffered_rotated_box_collision_with<A, B>(
    a: &A,
    b: &B,
    buffer: &CollisionBuffer,
) -> bool
where
    A: Collider + ?Sized,
    B: Collider + ?Sized,
{
    is_buffered_rotated_box_collision(a, b, buffer.x, buffer.y)
}

/// A body expressed as its basis, extents and corners.
struct Frame {
    basis: Basis,
    width: f32,
    height: f32,
    vertices: [Vector2; 4],
}

impl Frame {
    fn new(body: &Body) -> Self {
        let basis = body.basis();
        Frame {
            basis,
            width: body.width,
            height: body.height,
            vertices: corners(body.center, basis, body.width, body.height),
        }
    }

    fn origin(&self) -> Vector2 {
        self.vertices[2]
    }

    /// Returns the name of the first own axis along which `points` lie
    /// entirely outside of this frame.
    fn separating_axis(
        &self,
        points: &[Vector2; 4],
        x_buffer: f32,
        y_buffer: f32,
    ) -> Option<&'static str> {
        let axes = [
            ("x", self.basis.u, self.width, x_buffer),
            ("y", self.basis.v, self.height, y_buffer),
        ];

        axes.into_iter()
            .find(|&(_, axis, extent, buffer)| {
                let (min, max) = self.project(points, axis);
                max < buffer || min > extent - buffer
            })
            .map(|(name, ..)| name)
    }

    /// Range of the scalar projections of `points` on the unit `axis`, measured
    /// from the origin corner.
    fn project(&self, points: &[Vector2; 4], axis: Vector2) -> (f32, f32) {
        let origin = self.origin();
        points
            .iter()
            .map(|&p| (p - origin).dot(axis))
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), d| {
                (lo.min(d), hi.max(d))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::degrees_to_radians;

    fn unit(x: f32, y: f32) -> Body {
        Body::new([x, y], 1.0, 1.0)
    }

    fn random_body() -> Body {
        Body::new(
            [fastrand::f32() * 10.0 - 5.0, fastrand::f32() * 10.0 - 5.0],
            fastrand::f32() * 4.0 + 0.1,
            fastrand::f32() * 4.0 + 0.1,
        )
        .with_rotation(fastrand::f32() * 360.0 - 180.0)
    }

    fn resized(b: &Body, d: f32) -> Body {
        Body {
            width: b.width + d,
            height: b.height + d,
            ..*b
        }
    }

    /// Collision result that does not flip when both bodies grow or shrink a little,
    /// `None` for near-contact cases where rounding could decide the outcome.
    fn robust(a: &Body, b: &Body) -> Option<bool> {
        let shrunk = is_rotated_box_collision(&resized(a, -0.01), &resized(b, -0.01));
        let grown = is_rotated_box_collision(&resized(a, 0.01), &resized(b, 0.01));
        if shrunk == grown {
            Some(shrunk)
        } else {
            None
        }
    }

    #[test]
    fn test_touching_is_colliding() {
        assert!(is_aabb_collision(&unit(0.0, 0.0), &unit(1.0, 0.0)));
        assert!(is_aabb_collision(&unit(0.0, 0.0), &unit(0.0, -1.0)));
        assert!(is_aabb_collision(&unit(0.0, 0.0), &unit(1.0, 1.0)));
        assert!(is_rotated_box_collision(&unit(0.0, 0.0), &unit(1.0, 0.0)));
        assert!(is_rotated_box_collision(&unit(0.0, 0.0), &unit(0.0, -1.0)));
        assert!(is_rotated_box_collision(&unit(0.0, 0.0), &unit(1.0, 1.0)));
    }

    #[test]
    fn test_gap_is_separated() {
        assert!(!is_aabb_collision(&unit(0.0, 0.0), &unit(2.0, 0.0)));
        assert!(!is_rotated_box_collision(&unit(0.0, 0.0), &unit(2.0, 0.0)));
        assert!(!is_aabb_collision(&unit(0.0, 0.0), &unit(0.0, 1.5)));
        assert!(!is_rotated_box_collision(&unit(0.0, 0.0), &unit(0.0, 1.5)));
    }

    #[test]
    fn test_far_apart_and_same_position() {
        let a = Body::new([0.0, 0.0], 10.0, 10.0);
        let b = Body::new([100.0, 100.0], 10.0, 10.0);
        assert!(!is_rotated_box_collision(&a, &b));

        let c = Body::new([50.0, 50.0], 20.0, 20.0);
        assert!(is_rotated_box_collision(&c, &c));

        let d = Body::new([10.0, 10.0], 20.0, 20.0);
        assert!(is_rotated_box_collision(&Body::new([0.0, 0.0], 20.0, 20.0), &d));
    }

    #[test]
    fn test_buffered_aabb_consumes_contact() {
        let a = unit(0.0, 0.0);
        let b = unit(1.0, 0.0);
        assert!(!is_buffered_aabb_collision(&a, &b, 0.5, 0.0));
        assert!(is_buffered_aabb_collision(&a, &b, 0.0, 0.0));
        // y buffer does not matter for a side contact with full vertical overlap
        assert!(is_buffered_aabb_collision(&a, &b, 0.0, 0.5));

        let buffer = CollisionBuffer::new(0.5, 0.0);
        assert!(!is_buffered_aabb_collision_with(&a, &b, &buffer));
        assert!(is_buffered_aabb_collision_with(&a, &b, &CollisionBuffer::default()));
    }

    #[test]
    fn test_buffered_rotated() {
        let a = unit(0.0, 0.0);
        let touching = unit(1.0, 0.0);
        assert!(is_buffered_rotated_box_collision(&a, &touching, 0.0, 0.0));
        assert!(!is_buffered_rotated_box_collision(&a, &touching, 0.25, 0.0));

        let overlapping = unit(0.5, 0.0);
        assert!(is_buffered_rotated_box_collision(&a, &overlapping, 0.2, 0.0));
        assert!(!is_buffered_rotated_box_collision(&a, &overlapping, 0.6, 0.0));

        assert!(is_buffered_rotated_box_collision_with(
            &a,
            &overlapping,
            &CollisionBuffer::uniform(0.2)
        ));
        assert!(!is_buffered_rotated_box_collision_with(
            &a,
            &unit(0.0, 0.9),
            &CollisionBuffer::uniform(0.2)
        ));
    }

    #[test]
    fn test_buffered_rotated_uses_local_axes() {
        // at 90 degrees the local x axis points along world y
        let a = Body::new([0.0, 0.0], 4.0, 2.0).with_rotation(90.0);
        let b = Body::new([0.0, 2.5], 2.0, 2.0).with_rotation(90.0);
        assert!(is_buffered_rotated_box_collision(&a, &b, 0.4, 0.0));
        assert!(!is_buffered_rotated_box_collision(&a, &b, 0.6, 0.0));
        assert!(is_buffered_rotated_box_collision(&a, &b, 0.0, 0.6));
        assert!(is_buffered_rotated_box_collision(&a, &b, 0.0, 0.9));
        assert!(!is_buffered_rotated_box_collision(&b, &a, 0.6, 0.0));

        // unrotated, the same contact is along the local y axes
        let a0 = Body::new([0.0, 0.0], 2.0, 4.0);
        let b0 = Body::new([0.0, 2.5], 2.0, 2.0);
        assert!(is_buffered_rotated_box_collision(&a0, &b0, 0.6, 0.0));
        assert!(!is_buffered_rotated_box_collision(&a0, &b0, 0.0, 0.6));
    }

    #[test]
    fn test_buffered_rotated_45() {
        let Basis { u, v } = Basis::from_degrees(45.0);
        let a = Body::new([0.0, 0.0], 2.0, 1.0).with_rotation(45.0);

        // overlap of 0.5 along the local x axis
        let along_u = Body::new(u * 1.5, 2.0, 1.0).with_rotation(45.0);
        assert!(is_buffered_rotated_box_collision(&a, &along_u, 0.4, 0.0));
        assert!(!is_buffered_rotated_box_collision(&a, &along_u, 0.6, 0.0));
        assert!(is_buffered_rotated_box_collision(&a, &along_u, 0.0, 0.4));

        // overlap of 0.2 along the local y axis
        let along_v = Body::new(v * 0.8, 2.0, 1.0).with_rotation(45.0);
        assert!(is_buffered_rotated_box_collision(&a, &along_v, 0.3, 0.0));
        assert!(is_buffered_rotated_box_collision(&a, &along_v, 0.0, 0.1));
        assert!(!is_buffered_rotated_box_collision(&a, &along_v, 0.0, 0.3));
        assert!(!is_buffered_rotated_box_collision_with(
            &along_v,
            &a,
            &CollisionBuffer::new(0.0, 0.3)
        ));
    }

    #[test]
    fn test_shared_center_always_collides() {
        let a = unit(0.0, 0.0);
        for deg in [0.0, 15.0, 45.0, 90.0, 137.0, -60.0] {
            assert!(is_rotated_box_collision(&a, &a.with_rotation(deg)));
        }
    }

    #[test]
    fn test_rotation_changes_outcome() {
        let a = Body::new([0.0, 0.0], 2.0, 0.5);

        // b spans y in [0.95, 1.45] unrotated, upright it reaches down to y = 0.2
        let b = Body::new([1.2, 1.2], 2.0, 0.5);
        assert!(!is_rotated_box_collision(&a, &b));
        assert!(is_rotated_box_collision(&a, &b.with_rotation(90.0)));

        // at 45 degrees the corner p - u + v of c lands at (0.47, -0.08), inside a
        let c = Body::new([1.0, 0.8], 2.0, 0.5);
        assert!(!is_rotated_box_collision(&a, &c));
        assert!(is_rotated_box_collision(&a, &c.with_rotation(45.0)));
    }

    #[test]
    fn test_bounding_boxes_overlap_but_bodies_do_not() {
        let a = unit(0.0, 0.0);
        let diamond = unit(1.2, 1.2).with_rotation(45.0);
        assert!(a.bbox().intersects(&diamond.bbox()));
        assert!(!is_rotated_box_collision(&a, &diamond));
        assert!(!is_rotated_box_collision(&diamond, &a));
    }

    #[test]
    fn test_degenerate_bodies() {
        let a = unit(0.0, 0.0);
        let stick = Body::new([0.2, 0.0], 0.0, 3.0);
        assert!(is_rotated_box_collision(&a, &stick));
        assert!(is_aabb_collision(&a, &stick));

        let dot = Body::new([0.5, 0.5], 0.0, 0.0);
        assert!(is_rotated_box_collision(&a, &dot));
        assert!(!is_rotated_box_collision(&a, &Body::new([0.6, 0.0], 0.0, 0.0)));
    }

    #[test]
    fn test_works_through_references() {
        let a = unit(0.0, 0.0);
        let b = unit(0.5, 0.5);
        let colliders: Vec<&dyn Collider> = vec![&a, &b];
        assert!(is_rotated_box_collision(colliders[0], colliders[1]));
        assert!(is_aabb_collision(&&a, &b));
    }

    #[test]
    fn test_symmetry() {
        fastrand::seed(0);
        for _ in 0..2000 {
            let a = random_body();
            let b = random_body();
            assert_eq!(
                is_rotated_box_collision(&a, &b),
                is_rotated_box_collision(&b, &a),
                "{:?} {:?}",
                a,
                b
            );
        }
    }

    #[test]
    fn test_agrees_with_aabb_when_unrotated() {
        fastrand::seed(1);
        // halves keep every intermediate value exact, so touching cases are covered too
        let half = |lo: i32, hi: i32| fastrand::i32(lo..hi) as f32 / 2.0;
        for _ in 0..2000 {
            let a = Body::new([half(-8, 8), half(-8, 8)], half(0, 8), half(0, 8));
            let b = Body::new([half(-8, 8), half(-8, 8)], half(0, 8), half(0, 8));
            assert_eq!(
                is_rotated_box_collision(&a, &b),
                is_aabb_collision(&a, &b),
                "{:?} {:?}",
                a,
                b
            );
        }
    }

    #[test]
    fn test_translation_invariance() {
        fastrand::seed(2);
        for _ in 0..2000 {
            let a = random_body();
            let b = random_body();
            let expected = match robust(&a, &b) {
                Some(x) => x,
                None => continue,
            };
            let t = Vector2::new(fastrand::f32() * 200.0 - 100.0, fastrand::f32() * 200.0 - 100.0);
            assert_eq!(
                is_rotated_box_collision(&a.translated(t), &b.translated(t)),
                expected
            );
        }
    }

    #[test]
    fn test_identity_overlap() {
        fastrand::seed(3);
        for _ in 0..500 {
            let a = random_body();
            assert!(is_rotated_box_collision(&a, &a));
        }
    }

    fn parry_intersects(a: &Body, b: &Body) -> bool {
        use parry2d::math::{Isometry, Vector};
        use parry2d::query;
        use parry2d::shape::Cuboid;

        let pa = Isometry::new(
            Vector::new(a.center.x, a.center.y),
            degrees_to_radians(a.rotation),
        );
        let pb = Isometry::new(
            Vector::new(b.center.x, b.center.y),
            degrees_to_radians(b.rotation),
        );
        let ca = Cuboid::new(Vector::new(a.width / 2.0, a.height / 2.0));
        let cb = Cuboid::new(Vector::new(b.width / 2.0, b.height / 2.0));

        query::intersection_test(&pa, &ca, &pb, &cb).unwrap()
    }

    #[test]
    fn test_matches_parry() {
        fastrand::seed(4);
        let mut checked = 0;
        let mut hits = 0;
        for _ in 0..3000 {
            let a = random_body();
            let b = random_body();
            let expected = match robust(&a, &b) {
                Some(x) => x,
                None => continue,
            };
            assert_eq!(parry_intersects(&a, &b), expected, "{:?} {:?}", a, b);
            checked += 1;
            hits += expected as u32;
        }
        assert!(checked > 2500);
        assert!(hits > 100);
    }
}
