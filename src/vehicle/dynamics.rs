use crate::action::Lateral;
use crate::util::Interval;

/// Computes the yaw rate in rad/s of a single-track vehicle.
///
/// # Parameters
/// * `vel` - The longitudinal velocity
/// * `steering` - The steering angle in degrees
/// * `wheel_base` - The distance between the axles
pub fn angular_velocity(vel: f64, steering: f64, wheel_base: f64) -> f64 {
    if steering == 0.0 {
        return 0.0;
    }
    let radius = wheel_base / steering.to_radians().sin();
    vel / radius
}

/// Applies a lateral intent to the steering angle, in degrees.
///
/// Turning moves the steering angle by `rate` degrees per second,
/// whereas going straight re-centres the wheel immediately.
pub fn steer(steering: f64, intent: Lateral, rate: f64, max_steer: f64, dt: f64) -> f64 {
    let steering = match intent {
        Lateral::Left => steering + rate * dt,
        Lateral::Right => steering - rate * dt,
        Lateral::Straight => 0.0,
    };
    Interval::disc(0.0, max_steer).clamp(steering)
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn straight_has_no_yaw() {
        assert_eq!(angular_velocity(100.0, 0.0, 4.0), 0.0);
    }

    #[test]
    fn yaw_follows_turning_radius() {
        let radius = 4.0 / 4f64.to_radians().sin();
        assert_approx_eq!(angular_velocity(100.0, 4.0, 4.0), 100.0 / radius);
        assert_approx_eq!(angular_velocity(-100.0, 4.0, 4.0), -100.0 / radius);
        assert_approx_eq!(angular_velocity(100.0, -4.0, 4.0), -100.0 / radius);
    }

    #[test]
    fn steering_rates_and_limits() {
        assert_approx_eq!(steer(0.0, Lateral::Left, 30.0, 4.0, 0.1), 3.0);
        assert_approx_eq!(steer(3.0, Lateral::Left, 30.0, 4.0, 0.1), 4.0);
        assert_approx_eq!(steer(3.0, Lateral::Right, 30.0, 4.0, 0.1), 0.0);
        assert_approx_eq!(steer(-3.5, Lateral::Right, 30.0, 4.0, 0.1), -4.0);
        assert_eq!(steer(3.5, Lateral::Straight, 30.0, 4.0, 0.1), 0.0);
    }
}
