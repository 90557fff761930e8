use self::acceleration::AccelerationModel;
use self::dynamics::{angular_velocity, steer};
pub use self::footprint::Footprint;
use crate::action::Action;
use crate::error::{require_positive, Error};
use crate::math::{heading_vector, Point2d, Vector2d};
use crate::sensor::{PerceptionSensor, SensorAttributes};
use crate::util::Interval;

mod acceleration;
mod dynamics;
mod footprint;

/// The attributes of a simulated vehicle.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VehicleAttributes {
    /// The length of the vehicle's body.
    pub length: f64,
    /// The width of the vehicle's body.
    pub width: f64,
    /// Distance between the front and rear axles.
    pub wheel_base: f64,
    /// The top speed, forwards or backwards.
    pub max_velocity: f64,
    /// The maximum acceleration, also used for braking.
    pub max_acc: f64,
    /// The deceleration when driving against the current direction of travel.
    pub reverse_dec: f64,
    /// The deceleration when coasting.
    pub free_dec: f64,
    /// The maximum steering angle in degrees.
    pub max_steer: f64,
    /// The rate at which the steering angle changes, in degrees per second.
    pub steer_rate: f64,
}

impl Default for VehicleAttributes {
    fn default() -> Self {
        Self {
            length: 32.0,
            width: 16.0,
            wheel_base: 4.0,
            max_velocity: 320.0,
            max_acc: 160.0,
            reverse_dec: 320.0,
            free_dec: 80.0,
            max_steer: 4.0,
            steer_rate: 30.0,
        }
    }
}

impl VehicleAttributes {
    /// Checks that every attribute is finite and positive.
    pub fn validate(&self) -> Result<(), Error> {
        require_positive("vehicle.length", self.length)?;
        require_positive("vehicle.width", self.width)?;
        require_positive("vehicle.wheel_base", self.wheel_base)?;
        require_positive("vehicle.max_velocity", self.max_velocity)?;
        require_positive("vehicle.max_acc", self.max_acc)?;
        require_positive("vehicle.reverse_dec", self.reverse_dec)?;
        require_positive("vehicle.free_dec", self.free_dec)?;
        require_positive("vehicle.max_steer", self.max_steer)?;
        require_positive("vehicle.steer_rate", self.steer_rate)
    }
}

/// A simulated vehicle, following a kinematic single-track model.
#[derive(Clone, Debug)]
pub struct Vehicle {
    /// Half the vehicle's width.
    half_wid: f64,
    /// Half the vehicle's length.
    half_len: f64,
    /// Distance between the front and rear axles.
    wheel_base: f64,
    /// The longitudinal acceleration model.
    acc_model: AccelerationModel,
    /// Saturation limits of the velocity.
    vel_limits: Interval<f64>,
    /// The maximum steering angle in degrees.
    max_steer: f64,
    /// The steering rate in degrees per second.
    steer_rate: f64,
    /// The starting position.
    start_pos: Point2d,
    /// The starting heading in degrees.
    start_heading: f64,
    /// The world space coordinates of the centre of the vehicle.
    pos: Point2d,
    /// The heading in degrees.
    heading: f64,
    /// The longitudinal velocity along the heading.
    vel: f64,
    /// The acceleration applied during the last tick.
    acc: f64,
    /// The steering angle in degrees.
    steering: f64,
    /// The ray-casting sensor riding on the vehicle.
    sensor: PerceptionSensor,
}

impl Vehicle {
    /// Creates a new vehicle at rest at the given start pose.
    pub fn new(
        attributes: &VehicleAttributes,
        sensor: &SensorAttributes,
        start_pos: Point2d,
        start_heading: f64,
    ) -> Result<Self, Error> {
        attributes.validate()?;
        Ok(Self {
            half_wid: 0.5 * attributes.width,
            half_len: 0.5 * attributes.length,
            wheel_base: attributes.wheel_base,
            acc_model: AccelerationModel::new(&acceleration::ModelParams {
                max_acceleration: attributes.max_acc,
                reverse_deceleration: attributes.reverse_dec,
                free_deceleration: attributes.free_dec,
            }),
            vel_limits: Interval::disc(0.0, attributes.max_velocity),
            max_steer: attributes.max_steer,
            steer_rate: attributes.steer_rate,
            start_pos,
            start_heading,
            pos: start_pos,
            heading: start_heading,
            vel: 0.0,
            acc: 0.0,
            steering: 0.0,
            sensor: PerceptionSensor::new(sensor, start_pos, start_heading)?,
        })
    }

    /// The vehicle's width.
    pub fn width(&self) -> f64 {
        2.0 * self.half_wid
    }

    /// The vehicle's length.
    pub fn length(&self) -> f64 {
        2.0 * self.half_len
    }

    /// The coordinates in world space of the centre of the vehicle.
    pub fn position(&self) -> Point2d {
        self.pos
    }

    /// The heading in degrees.
    pub fn heading(&self) -> f64 {
        self.heading
    }

    /// A unit vector in world space aligned with the vehicle's heading.
    pub fn direction(&self) -> Vector2d {
        heading_vector(self.heading)
    }

    /// The longitudinal velocity.
    pub fn vel(&self) -> f64 {
        self.vel
    }

    /// The acceleration applied during the last tick.
    pub fn acc(&self) -> f64 {
        self.acc
    }

    /// The steering angle in degrees.
    pub fn steering(&self) -> f64 {
        self.steering
    }

    /// The maximum speed of the vehicle.
    pub fn max_velocity(&self) -> f64 {
        self.vel_limits.max
    }

    /// The maximum steering angle in degrees.
    pub fn max_steer(&self) -> f64 {
        self.max_steer
    }

    /// The ray-casting sensor riding on the vehicle.
    pub fn sensor(&self) -> &PerceptionSensor {
        &self.sensor
    }

    /// The area currently occupied by the vehicle.
    pub fn footprint(&self) -> Footprint {
        Footprint::new(self.pos, self.direction(), self.half_len, self.half_wid)
    }

    /// Applies an action and integrates the vehicle's state over one tick.
    ///
    /// # Parameters
    /// * `action` - The control input
    /// * `dt` - The time step in seconds
    pub(crate) fn integrate(&mut self, action: Action, dt: f64) {
        self.acc = self.acc_model.acc(action.longitudinal, self.vel, dt);
        self.steering = steer(
            self.steering,
            action.lateral,
            self.steer_rate,
            self.max_steer,
            dt,
        );

        self.vel = self.vel_limits.clamp(self.vel + self.acc * dt);
        let yaw_rate = angular_velocity(self.vel, self.steering, self.wheel_base);

        // Move along the old heading before turning
        self.pos += self.direction() * self.vel * dt;
        self.heading += yaw_rate.to_degrees() * dt;

        self.sensor.reposition(self.pos, self.heading);
    }

    /// Returns the vehicle to rest at its start pose.
    pub(crate) fn reset(&mut self) {
        self.pos = self.start_pos;
        self.heading = self.start_heading;
        self.vel = 0.0;
        self.acc = 0.0;
        self.steering = 0.0;
        self.sensor.reposition(self.pos, self.heading);
    }
}
