use super::*;
use crate::Vector2;

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AABB {
    /// Lower left of the AABB
    pub ll: Vector2,
    /// Upper right of the AABB
    pub ur: Vector2,
}

impl AABB {
    pub fn new(p1: Vector2, p2: Vector2) -> Self {
        AABB {
            ll: Vector2::new(p1.x.min(p2.x), p1.y.min(p2.y)),
            ur: Vector2::new(p1.x.max(p2.x), p1.y.max(p2.y)),
        }
    }

    /// AABB of the given extents around `center`.
    pub fn centered(center: Vector2, width: f32, height: f32) -> Self {
        let half = Vector2::new(width / 2.0, height / 2.0);
        Self::new(center - half, center + half)
    }

    /// Smallest AABB containing every point, `None` if there are none.
    pub fn from_points(points: impl IntoIterator<Item = Vector2>) -> Option<Self> {
        let mut it = points.into_iter();
        let first = it.next()?;
        Some(it.fold(AABB { ll: first, ur: first }, AABB::union_point))
    }

    /// Grows the AABB so that it contains `p`.
    pub fn union_point(self, p: Vector2) -> Self {
        AABB {
            ll: Vector2::new(self.ll.x.min(p.x), self.ll.y.min(p.y)),
            ur: Vector2::new(self.ur.x.max(p.x), self.ur.y.max(p.y)),
        }
    }

    pub fn width(&self) -> f32 {
        self.ur.x - self.ll.x
    }

    pub fn height(&self) -> f32 {
        self.ur.y - self.ll.y
    }

    pub fn center(&self) -> Vector2 {
        Vector2::new((self.ll.x + self.ur.x) / 2.0, (self.ll.y + self.ur.y) / 2.0)
    }

    pub fn contains(&self, p: Vector2) -> bool {
        point_in_region(self.ll, self.ur, p)
    }

    /// Closed interval overlap on both axes, touching boxes intersect.
    pub fn intersects(&self, b: &AABB) -> bool {
        let a = self;
        let x =
            f32::abs((a.ll.x + a.ur.x) - (b.ll.x + b.ur.x)) <= (a.ur.x - a.ll.x + b.ur.x - b.ll.x);
        let y =
            f32::abs((a.ll.y + a.ur.y) - (b.ll.y + b.ur.y)) <= (a.ur.y - a.ll.y + b.ur.y - b.ll.y);

        x && y
    }

    pub fn segments(&self) -> impl Iterator<Item = Segment> {
        let ul = Vector2::new(self.ll.x, self.ur.y);
        let lr = Vector2::new(self.ur.x, self.ll.y);
        let ll = self.ll;
        let ur = self.ur;

        std::iter::once(Segment::new(ll, lr))
            .chain(std::iter::once(Segment::new(lr, ur)))
            .chain(std::iter::once(Segment::new(ur, ul)))
            .chain(std::iter::once(Segment::new(ul, ll)))
    }
}
