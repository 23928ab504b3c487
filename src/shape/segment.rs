use crate::Vector2;

/// Determinants below this are treated as parallel lines.
const PARALLEL_EPSILON: f32 = 0.0001;

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    pub src: Vector2,
    pub dst: Vector2,
}

impl Segment {
    pub fn new(src: Vector2, dst: Vector2) -> Self {
        Self { src, dst }
    }

    pub fn length(&self) -> f32 {
        (self.dst - self.src).magnitude()
    }

    /// Closest point to `p` on the segment.
    pub fn project(&self, p: Vector2) -> Vector2 {
        let diff = self.dst - self.src;
        let diff2 = p - self.src;
        let diff3 = p - self.dst;

        let proj1 = diff2.dot(diff);
        let proj2 = -diff3.dot(diff);

        if proj1 <= 0.0 {
            self.src
        } else if proj2 <= 0.0 {
            self.dst
        } else {
            self.src + diff * (proj1 / diff.dot(diff))
        }
    }

    /// Point where the two segments cross, if any.
    ///
    /// Parallel (or nearly parallel) segments never intersect, even when they overlap.
    /// Crossings exactly at an endpoint count.
    ///
    /// # Example
    /// ```rust
    /// use obb_collide::{shape::Segment, Vector2};
    /// let a = Segment::new(Vector2::new(0.0, 0.0), Vector2::new(2.0, 2.0));
    /// let b = Segment::new(Vector2::new(0.0, 2.0), Vector2::new(2.0, 0.0));
    /// assert_eq!(a.intersection(&b), Some(Vector2::new(1.0, 1.0)));
    /// ```
    pub fn intersection(&self, other: &Segment) -> Option<Vector2> {
        let Vector2 { x: ax, y: ay } = self.src;
        let Vector2 { x: bx, y: by } = self.dst;
        let Vector2 { x: cx, y: cy } = other.src;
        let Vector2 { x: dx, y: dy } = other.dst;

        let d = ay * cx - by * cx - ax * cy + bx * cy - ay * dx + by * dx + ax * dy - bx * dy;
        if d.abs() < PARALLEL_EPSILON {
            return None;
        }

        // t1 runs from dst (0) to src (1) on self, t2 from other.dst to other.src
        let t1 = (bx * cy - bx * dy - by * cx + by * dx + cx * dy - cy * dx) / d;
        let t2 = (ay * bx - ax * by - ay * dx + by * dx + ax * dy - bx * dy) / d;

        if (0.0..=1.0).contains(&t1) && (0.0..=1.0).contains(&t2) {
            return Some(Vector2::new(
                t1 * ax + (1.0 - t1) * bx,
                t1 * ay + (1.0 - t1) * by,
            ));
        }
        None
    }

    pub fn intersects(&self, other: &Segment) -> bool {
        self.intersection(other).is_some()
    }
}
