//! A small 2D driving simulator for training agents.
//!
//! An [Environment] advances a kinematic vehicle each tick under a discrete [Action],
//! senses the track walls with a fan of rays, and rewards the vehicle for crossing
//! checkpoint gates in order.

pub use action::{Action, Lateral, Longitudinal, ACTION_COUNT};
pub use boundary::Boundary;
pub use cgmath;
pub use environment::{Environment, EnvironmentAttributes, Rewards, StartPose, Step};
pub use error::Error;
pub use gates::{GateCrossing, GateSequence};
pub use sensor::{PerceptionSensor, Ray, SensorAttributes, NO_HIT_DISTANCE};
pub use track::{Track, TrackLayout};
pub use util::Interval;
pub use vehicle::{Footprint, Vehicle, VehicleAttributes};

mod action;
mod boundary;
mod debug;
mod environment;
mod error;
mod gates;
pub mod math;
mod sensor;
mod track;
mod util;
mod vehicle;
