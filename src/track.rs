use crate::boundary::Boundary;
use crate::error::Error;
use crate::math::Point2d;
use crate::vehicle::Footprint;
use itertools::Itertools;

/// The waypoint rails describing a track.
///
/// Each rail is a polyline; consecutive waypoints are joined by a wall.
/// The first two rails are also paired up waypoint by waypoint to form the checkpoint gates.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackLayout {
    pub rails: Vec<Vec<[f64; 2]>>,
}

impl TrackLayout {
    /// Creates a layout from its rails.
    pub fn new(rails: Vec<Vec<[f64; 2]>>) -> Self {
        Self { rails }
    }

    /// A closed circuit of two rails around a 966x768 area.
    pub fn default_circuit() -> Self {
        Self::new(vec![
            vec![
                [20.0, 20.0],
                [120.0, 20.0],
                [180.0, 20.0],
                [240.0, 20.0],
                [300.0, 20.0],
                [400.0, 20.0],
                [700.0, 20.0],
                [850.0, 20.0],
                [950.0, 100.0],
                [950.0, 700.0],
                [900.0, 750.0],
                [100.0, 750.0],
                [20.0, 700.0],
                [20.0, 20.0],
            ],
            vec![
                [90.0, 70.0],
                [120.0, 70.0],
                [180.0, 70.0],
                [240.0, 70.0],
                [300.0, 70.0],
                [400.0, 70.0],
                [700.0, 70.0],
                [800.0, 70.0],
                [870.0, 130.0],
                [870.0, 670.0],
                [830.0, 700.0],
                [150.0, 700.0],
                [100.0, 650.0],
                [90.0, 70.0],
            ],
        ])
    }

    /// Checks that the layout has at least two rails of at least two waypoints each.
    pub fn validate(&self) -> Result<(), Error> {
        if self.rails.len() < 2 {
            return Err(Error::TooFewRails(self.rails.len()));
        }
        match self.rails.iter().position(|rail| rail.len() < 2) {
            Some(rail) => Err(Error::RailTooShort {
                rail,
                points: self.rails[rail].len(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(feature = "serde")]
impl TrackLayout {
    /// Parses a layout from a JSON document and checks it.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let layout: Self = serde_json::from_str(json)?;
        layout.validate()?;
        Ok(layout)
    }
}

impl Default for TrackLayout {
    fn default() -> Self {
        Self::default_circuit()
    }
}

/// The walls of a track. Immutable once built, so it may be shared between environments.
#[derive(Clone, Debug)]
pub struct Track {
    /// The waypoints of each rail.
    rails: Vec<Vec<Point2d>>,
    /// The walls joining consecutive waypoints of every rail.
    boundaries: Vec<Boundary>,
}

impl Track {
    /// Builds the walls of a track from its layout.
    pub fn new(layout: &TrackLayout) -> Result<Self, Error> {
        layout.validate()?;
        let rails = layout
            .rails
            .iter()
            .map(|rail| rail.iter().copied().map(Point2d::from).collect::<Vec<_>>())
            .collect::<Vec<_>>();
        let boundaries = rails
            .iter()
            .flat_map(|rail| rail.iter().tuple_windows())
            .map(|(a, b)| Boundary::new(*a, *b))
            .collect();
        Ok(Self { rails, boundaries })
    }

    /// The waypoints of each rail.
    pub fn rails(&self) -> &[Vec<Point2d>] {
        &self.rails
    }

    /// The walls of every rail.
    pub fn boundaries(&self) -> &[Boundary] {
        &self.boundaries
    }

    /// Whether the footprint touches any wall.
    pub fn collides_with_walls(&self, footprint: &Footprint) -> bool {
        self.boundaries.iter().any(|wall| footprint.intersects(wall))
    }
}
