use crate::math::{degrees_from_direction, direction_from_degrees, distance, rotate_point};
use crate::shape::{AABB, Segment};
use crate::Vector2;

/// Anything that can be treated as a rotated rectangle.
///
/// Game objects implement this instead of being converted to a [`Body`],
/// collision queries only read these four values.
pub trait Collider {
    /// World-space center of the rectangle.
    fn position(&self) -> Vector2;
    /// Full extent along the local x axis.
    fn width(&self) -> f32;
    /// Full extent along the local y axis.
    fn height(&self) -> f32;
    /// Orientation in degrees, counter-clockwise positive.
    fn rotation(&self) -> f32;

    /// Snapshot of the collider as a plain [`Body`].
    fn body(&self) -> Body {
        Body {
            center: self.position(),
            width: self.width(),
            height: self.height(),
            rotation: self.rotation(),
        }
    }
}

/// Local frame of a rotated rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Basis {
    /// Local x axis, unit length.
    pub u: Vector2,
    /// Local y axis: `u` rotated clockwise by 90 degrees.
    pub v: Vector2,
}

impl Basis {
    pub fn from_degrees(rotation: f32) -> Self {
        let u = direction_from_degrees(rotation);
        Basis { u, v: u.perp_cw() }
    }
}

/// A rectangle of `width` x `height` centered on `center`, rotated by `rotation` degrees.
///
/// `width` and `height` are expected to be non-negative, negative extents give
/// meaningless results.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Body {
    pub center: Vector2,
    pub width: f32,
    pub height: f32,
    pub rotation: f32,
}

impl Body {
    pub fn new(center: impl Into<Vector2>, width: f32, height: f32) -> Self {
        Self {
            center: center.into(),
            width,
            height,
            rotation: 0.0,
        }
    }

    pub fn with_rotation(self, rotation: f32) -> Self {
        Self { rotation, ..self }
    }

    pub fn basis(&self) -> Basis {
        Basis::from_degrees(self.rotation)
    }

    /// Corners in winding order: `p+u+v`, `p-u+v`, `p-u-v`, `p+u-v`
    /// where `u` and `v` are the half extents along the basis.
    pub fn vertices(&self) -> [Vector2; 4] {
        corners(self.center, self.basis(), self.width, self.height)
    }

    /// Outline of the body, edge `i` goes from vertex `i` to vertex `i + 1`.
    pub fn edges(&self) -> [Segment; 4] {
        let v = self.vertices();
        [
            Segment::new(v[0], v[1]),
            Segment::new(v[1], v[2]),
            Segment::new(v[2], v[3]),
            Segment::new(v[3], v[0]),
        ]
    }

    /// World-space bounding box of the rotated rectangle.
    pub fn bbox(&self) -> AABB {
        let [a, b, c, d] = self.vertices();
        AABB::new(a, c).union_point(b).union_point(d)
    }

    /// True if `p` is strictly inside the rectangle, points on the outline are outside.
    pub fn contains_point(&self, p: Vector2) -> bool {
        let hw = self.width / 2.0;
        let hh = self.height / 2.0;
        let q = rotate_point(p - self.center, -self.rotation);
        -hw < q.x && q.x < hw && -hh < q.y && q.y < hh
    }

    pub fn forward_direction(&self) -> Vector2 {
        direction_from_degrees(self.rotation)
    }

    /// Moves along the forward direction, rotation 0 moves towards +x.
    pub fn move_forward(&mut self, step: f32) {
        self.center += self.forward_direction() * step;
    }

    /// Rotates the body to face `p`. Does nothing if `p` is the center.
    pub fn point_toward(&mut self, p: Vector2) {
        let d = p - self.center;
        if d == Vector2::ZERO {
            return;
        }
        self.rotation = degrees_from_direction(d);
    }

    pub fn distance_to(&self, p: Vector2) -> f32 {
        distance(self.center, p)
    }

    pub fn translated(&self, t: Vector2) -> Self {
        Self {
            center: self.center + t,
            ..*self
        }
    }

    pub fn rotated(&self, degrees: f32) -> Self {
        Self {
            rotation: self.rotation + degrees,
            ..*self
        }
    }
}

pub(crate) fn corners(p: Vector2, basis: Basis, width: f32, height: f32) -> [Vector2; 4] {
    let hu = basis.u * (width / 2.0);
    let hv = basis.v * (height / 2.0);
    [p + hu + hv, p - hu + hv, p - hu - hv, p + hu - hv]
}

impl Collider for Body {
    fn position(&self) -> Vector2 {
        self.center
    }

    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn rotation(&self) -> f32 {
        self.rotation
    }

    fn body(&self) -> Body {
        *self
    }
}

impl<T: Collider + ?Sized> Collider for &T {
    fn position(&self) -> Vector2 {
        (**self).position()
    }

    fn width(&self) -> f32 {
        (**self).width()
    }

    fn height(&self) -> f32 {
        (**self).height()
    }

    fn rotation(&self) -> f32 {
        (**self).rotation()
    }
}
