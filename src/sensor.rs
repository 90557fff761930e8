use crate::boundary::Boundary;
use crate::debug::debug_line;
use crate::error::{require_positive, Error};
use crate::math::{heading_vector, Point2d, RayHit, Vector2d};
use smallvec::SmallVec;

/// The distance reported by a ray that does not hit any boundary.
pub const NO_HIT_DISTANCE: f64 = 1.0e9;

/// The attributes of a perception sensor.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SensorAttributes {
    /// The number of rays, spaced evenly around a full circle.
    pub ray_count: usize,
    /// The length of each ray's direction vector.
    /// Sensed distances are reported in multiples of this length.
    pub range: f64,
}

impl Default for SensorAttributes {
    fn default() -> Self {
        Self {
            ray_count: 8,
            range: 1.0,
        }
    }
}

/// A single ray of a [PerceptionSensor].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    /// The ray's origin, the sensor's current position.
    origin: Point2d,
    /// The fixed angular offset from the sensor heading, in degrees.
    offset: f64,
    /// The absolute heading of the ray in degrees.
    heading: f64,
    /// The direction vector, whose length is the sensor range.
    dir: Vector2d,
}

impl Ray {
    fn new(offset: f64) -> Self {
        Self {
            origin: Point2d::new(0.0, 0.0),
            offset,
            heading: 0.0,
            dir: Vector2d::new(0.0, 0.0),
        }
    }

    /// Points the ray from `origin` relative to the given sensor heading.
    fn point(&mut self, origin: Point2d, heading: f64, range: f64) {
        self.origin = origin;
        self.heading = heading - self.offset;
        self.dir = range * heading_vector(self.heading);
    }

    /// The ray's origin.
    pub fn origin(&self) -> Point2d {
        self.origin
    }

    /// The fixed angular offset of the ray from the sensor heading, in degrees.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// The absolute heading of the ray in degrees.
    pub fn heading(&self) -> f64 {
        self.heading
    }

    /// The ray's direction vector.
    pub fn direction(&self) -> Vector2d {
        self.dir
    }

    /// Casts the ray against a boundary.
    pub fn cast(&self, boundary: &Boundary) -> Option<RayHit> {
        boundary.cast(self.origin, self.dir)
    }

    /// Finds the nearest hit of this ray among the given boundaries.
    pub fn nearest_hit<'a>(&self, boundaries: impl IntoIterator<Item = &'a Boundary>) -> Option<RayHit> {
        boundaries
            .into_iter()
            .filter_map(|boundary| self.cast(boundary))
            .min_by(|a, b| a.u.total_cmp(&b.u))
    }
}

/// A fan of rays attached to a vehicle, spaced evenly around a full circle.
///
/// Ray `i` always looks `i * 360 / N` degrees clockwise of the sensor's heading,
/// so ray 0 looks straight ahead.
#[derive(Clone, Debug)]
pub struct PerceptionSensor {
    origin: Point2d,
    heading: f64,
    range: f64,
    rays: SmallVec<[Ray; 8]>,
}

impl PerceptionSensor {
    /// Creates a new sensor at the given pose.
    pub fn new(attributes: &SensorAttributes, origin: Point2d, heading: f64) -> Result<Self, Error> {
        if attributes.ray_count == 0 {
            return Err(Error::NoRays);
        }
        require_positive("sensor.range", attributes.range)?;

        let spacing = 360.0 / attributes.ray_count as f64;
        let rays = (0..attributes.ray_count)
            .map(|i| Ray::new(i as f64 * spacing))
            .collect();
        let mut sensor = Self {
            origin,
            heading,
            range: attributes.range,
            rays,
        };
        sensor.reposition(origin, heading);
        Ok(sensor)
    }

    /// The number of rays.
    pub fn ray_count(&self) -> usize {
        self.rays.len()
    }

    /// The sensor's current position.
    pub fn origin(&self) -> Point2d {
        self.origin
    }

    /// The sensor's current heading in degrees.
    pub fn heading(&self) -> f64 {
        self.heading
    }

    /// The rays, ordered by index.
    pub fn rays(&self) -> &[Ray] {
        &self.rays
    }

    /// Moves the sensor and re-points every ray.
    pub fn reposition(&mut self, origin: Point2d, heading: f64) {
        self.origin = origin;
        self.heading = heading;
        for ray in &mut self.rays {
            ray.point(origin, heading, self.range);
        }
    }

    /// Measures the distance to the nearest boundary along each ray, in ray order.
    ///
    /// Distances are ray parameters: multiples of the sensor range. Rays that hit
    /// nothing report [NO_HIT_DISTANCE].
    pub fn sense(&self, boundaries: &[Boundary]) -> Vec<f64> {
        self.rays
            .iter()
            .map(|ray| match ray.nearest_hit(boundaries) {
                Some(hit) => {
                    debug_line("ray", ray.origin, hit.point);
                    hit.u
                }
                None => NO_HIT_DISTANCE,
            })
            .collect()
    }
}
