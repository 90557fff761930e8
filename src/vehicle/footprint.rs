use crate::boundary::Boundary;
use crate::math::{project_local, rot90, segments_intersect, Point2d, Vector2d};
use crate::util::Interval;

/// The area occupied by a vehicle, as an oriented rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Footprint {
    centre: Point2d,
    /// A unit vector along the vehicle's heading.
    dir: Vector2d,
    half_len: f64,
    half_wid: f64,
}

impl Footprint {
    /// Creates a footprint centred on `centre` and aligned with the unit vector `dir`.
    pub fn new(centre: Point2d, dir: Vector2d, half_len: f64, half_wid: f64) -> Self {
        Self {
            centre,
            dir,
            half_len,
            half_wid,
        }
    }

    /// The corners of the rectangle, in winding order.
    pub fn corners(&self) -> [Point2d; 4] {
        let long = self.half_len * self.dir;
        let lat = self.half_wid * rot90(self.dir);
        [
            self.centre + long + lat,
            self.centre + long - lat,
            self.centre - long - lat,
            self.centre - long + lat,
        ]
    }

    /// Whether the point lies within the rectangle, edges included.
    pub fn contains(&self, point: Point2d) -> bool {
        let local = project_local(point, self.centre, self.dir, rot90(self.dir));
        Interval::disc(0.0, self.half_len).contains(local.x)
            && Interval::disc(0.0, self.half_wid).contains(local.y)
    }

    /// Whether the boundary touches the rectangle, either crossing an edge or lying inside it.
    pub fn intersects(&self, boundary: &Boundary) -> bool {
        if self.contains(boundary.a()) || self.contains(boundary.b()) {
            return true;
        }
        let corners = self.corners();
        (0..4).any(|i| segments_intersect(corners[i], corners[(i + 1) % 4], boundary.a(), boundary.b()))
    }
}
