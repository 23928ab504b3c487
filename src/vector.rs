use crate::error::{GeometryError, Result};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// A 2D point or vector.
///
/// Every operation returns a new value, nothing is mutated in place except
/// through the explicit `set` and the assign operators.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn set(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    pub fn as_tuple(self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn scale(self, k: f32) -> Self {
        Self::new(self.x * k, self.y * k)
    }

    /// Divides both components by `k`.
    ///
    /// Fails with [`GeometryError::DivisionByZero`] when `k` is zero instead of
    /// producing infinities.
    ///
    /// # Example
    /// ```rust
    /// use obb_collide::{GeometryError, Vector2};
    /// assert_eq!(Vector2::new(6.0, 8.0).try_div(2.0), Ok(Vector2::new(3.0, 4.0)));
    /// assert_eq!(Vector2::new(1.0, 2.0).try_div(0.0), Err(GeometryError::DivisionByZero));
    /// ```
    pub fn try_div(self, k: f32) -> Result<Self> {
        if k == 0.0 {
            return Err(GeometryError::DivisionByZero);
        }
        Ok(Self::new(self.x / k, self.y / k))
    }

    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn square_magnitude(self) -> f32 {
        self.dot(self)
    }

    pub fn magnitude(self) -> f32 {
        self.square_magnitude().sqrt()
    }

    /// Unit vector with the same direction, or the zero vector if `self` is zero.
    pub fn normalized(self) -> Self {
        let m = self.magnitude();
        if m == 0.0 {
            return Self::ZERO;
        }
        Self::new(self.x / m, self.y / m)
    }

    /// `self` rotated clockwise by 90 degrees.
    pub fn perp_cw(self) -> Self {
        Self::new(self.y, -self.x)
    }

    /// Vector projection of `self` onto `onto`: `(self . q / q . q) * q`.
    ///
    /// # Example
    /// ```rust
    /// use obb_collide::{GeometryError, Vector2};
    /// let p = Vector2::new(3.0, 4.0);
    /// assert_eq!(p.project(Vector2::new(2.0, 0.0)), Ok(Vector2::new(3.0, 0.0)));
    /// assert_eq!(p.project(Vector2::ZERO), Err(GeometryError::DegenerateAxis));
    /// ```
    pub fn project(self, onto: Self) -> Result<Self> {
        let qq = onto.dot(onto);
        if qq == 0.0 {
            return Err(GeometryError::DegenerateAxis);
        }
        Ok(onto * (self.dot(onto) / qq))
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl Add for Vector2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vector2 {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f32> for Vector2 {
    type Output = Self;
    fn mul(self, k: f32) -> Self {
        self.scale(k)
    }
}

impl Mul<Vector2> for f32 {
    type Output = Vector2;
    fn mul(self, v: Vector2) -> Vector2 {
        v.scale(self)
    }
}

impl Neg for Vector2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl From<[f32; 2]> for Vector2 {
    fn from([x, y]: [f32; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<(f32, f32)> for Vector2 {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

impl From<Vector2> for [f32; 2] {
    fn from(v: Vector2) -> Self {
        [v.x, v.y]
    }
}

#[cfg(feature = "mint")]
mod mint_interop {
    use super::Vector2;

    impl From<mint::Point2<f32>> for Vector2 {
        fn from(p: mint::Point2<f32>) -> Self {
            Vector2::new(p.x, p.y)
        }
    }

    impl From<Vector2> for mint::Point2<f32> {
        fn from(v: Vector2) -> Self {
            mint::Point2 { x: v.x, y: v.y }
        }
    }

    impl From<mint::Vector2<f32>> for Vector2 {
        fn from(p: mint::Vector2<f32>) -> Self {
            Vector2::new(p.x, p.y)
        }
    }

    impl From<Vector2> for mint::Vector2<f32> {
        fn from(v: Vector2) -> Self {
            mint::Vector2 { x: v.x, y: v.y }
        }
    }
}

#[cfg(feature = "euclid")]
mod euclid_interop {
    use super::Vector2;

    impl<U> From<euclid::Point2D<f32, U>> for Vector2 {
        fn from(p: euclid::Point2D<f32, U>) -> Self {
            Vector2::new(p.x, p.y)
        }
    }

    impl<U> From<Vector2> for euclid::Point2D<f32, U> {
        fn from(v: Vector2) -> Self {
            euclid::Point2D::new(v.x, v.y)
        }
    }

    impl<U> From<euclid::Vector2D<f32, U>> for Vector2 {
        fn from(p: euclid::Vector2D<f32, U>) -> Self {
            Vector2::new(p.x, p.y)
        }
    }

    impl<U> From<Vector2> for euclid::Vector2D<f32, U> {
        fn from(v: Vector2) -> Self {
            euclid::Vector2D::new(v.x, v.y)
        }
    }
}
