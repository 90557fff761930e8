use crate::math::{intersect_ray, Point2d, RayHit, Vector2d};

/// An immutable line segment forming one wall of a track or one checkpoint gate.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Boundary {
    a: Point2d,
    b: Point2d,
}

impl Boundary {
    /// Creates a boundary between two points.
    pub fn new(a: Point2d, b: Point2d) -> Self {
        Self { a, b }
    }

    /// The first end point.
    pub fn a(&self) -> Point2d {
        self.a
    }

    /// The second end point.
    pub fn b(&self) -> Point2d {
        self.b
    }

    /// Casts a ray from `origin` along `dir` against this boundary.
    pub fn cast(&self, origin: Point2d, dir: Vector2d) -> Option<RayHit> {
        intersect_ray(self.a, self.b, origin, dir)
    }
}

impl From<[[f64; 2]; 2]> for Boundary {
    fn from([a, b]: [[f64; 2]; 2]) -> Self {
        Self::new(a.into(), b.into())
    }
}
