use crate::action::Longitudinal;
use crate::util::Interval;

/// The longitudinal acceleration model of a vehicle.
#[derive(Clone, Debug)]
pub struct AccelerationModel {
    max_acc: f64,
    reverse_dec: f64,
    free_dec: f64,
}

/// The parameters of the acceleration model.
pub struct ModelParams {
    /// The vehicle's maximum acceleration in m/s<sup>2</sup>.
    /// Also the braking deceleration and the overall limit.
    pub max_acceleration: f64,
    /// The deceleration applied when driving against the current direction of travel.
    pub reverse_deceleration: f64,
    /// The deceleration when coasting.
    pub free_deceleration: f64,
}

impl AccelerationModel {
    /// Creates a new acceleration model.
    pub fn new(params: &ModelParams) -> Self {
        AccelerationModel {
            max_acc: params.max_acceleration,
            reverse_dec: params.reverse_deceleration,
            free_dec: params.free_deceleration,
        }
    }

    /// Resolves a longitudinal intent into an acceleration for the coming tick.
    ///
    /// # Arguments
    /// * `intent` - The longitudinal intent.
    /// * `vel` - The current velocity of the vehicle (m/s).
    /// * `dt` - The length of the tick in seconds.
    pub fn acc(&self, intent: Longitudinal, vel: f64, dt: f64) -> f64 {
        let acc = match intent {
            Longitudinal::Forward if vel < 0.0 => self.reverse_dec,
            Longitudinal::Forward => self.max_acc,
            Longitudinal::Backward if vel > 0.0 => -self.reverse_dec,
            Longitudinal::Backward => -self.max_acc,
            Longitudinal::Brake if vel != 0.0 => -self.max_acc.copysign(vel),
            Longitudinal::Brake => 0.0,
            Longitudinal::Coast => self.coast(vel, dt),
        };
        Interval::disc(0.0, self.max_acc).clamp(acc)
    }

    /// The deceleration while coasting, which stops exactly at zero rather than overshooting.
    fn coast(&self, vel: f64, dt: f64) -> f64 {
        if vel.abs() > dt * self.free_dec {
            -self.free_dec.copysign(vel)
        } else if dt != 0.0 {
            -vel / dt
        } else {
            0.0
        }
    }
}
