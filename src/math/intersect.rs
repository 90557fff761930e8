use super::{Point2d, Vector2d};

/// Where a ray meets a line segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// The intersection point in world space.
    pub point: Point2d,
    /// The fractional position of the hit along the segment, in (0, 1).
    pub t: f64,
    /// The ray parameter of the hit, in multiples of the ray's direction vector.
    pub u: f64,
}

/// Solves for the segment and line parameters `(t, u)` at which the segment `a`-`b`
/// meets the line through `origin` with direction `dir`.
/// Returns `None` if they are parallel or collinear.
fn solve(a: Point2d, b: Point2d, origin: Point2d, dir: Vector2d) -> Option<(f64, f64)> {
    let end = origin + dir;
    let den = (a.x - b.x) * (origin.y - end.y) - (a.y - b.y) * (origin.x - end.x);
    if den == 0.0 {
        return None;
    }
    let t = ((a.x - origin.x) * (origin.y - end.y) - (a.y - origin.y) * (origin.x - end.x)) / den;
    let u = -((a.x - b.x) * (a.y - origin.y) - (a.y - b.y) * (a.x - origin.x)) / den;
    Some((t, u))
}

/// Casts a ray against the segment `a`-`b`.
///
/// A hit is only reported strictly inside the segment and strictly ahead of the origin.
/// The ray is not bounded by the length of `dir`: `u` may exceed 1.
pub fn intersect_ray(a: Point2d, b: Point2d, origin: Point2d, dir: Vector2d) -> Option<RayHit> {
    let (t, u) = solve(a, b, origin, dir)?;
    if t > 0.0 && t < 1.0 && u > 0.0 {
        Some(RayHit {
            point: a + t * (b - a),
            t,
            u,
        })
    } else {
        None
    }
}

/// Determines whether the segments `a1`-`a2` and `b1`-`b2` touch or cross.
/// Parallel segments are never considered to intersect.
pub fn segments_intersect(a1: Point2d, a2: Point2d, b1: Point2d, b2: Point2d) -> bool {
    let unit = 0.0..=1.0;
    solve(a1, a2, b1, b2 - b1).map_or(false, |(t, u)| unit.contains(&t) && unit.contains(&u))
}
