//! Tests of the observations produced by the perception sensor.

use assert_approx_eq::assert_approx_eq;
use track_sim::{
    Action, Environment, EnvironmentAttributes, Lateral, Longitudinal, SensorAttributes,
    StartPose, TrackLayout, NO_HIT_DISTANCE,
};

fn corridor() -> TrackLayout {
    TrackLayout::new(vec![
        vec![[0.0, 0.0], [1000.0, 0.0]],
        vec![[0.0, 100.0], [1000.0, 100.0]],
    ])
}

fn environment(ray_count: usize) -> Environment {
    let attributes = EnvironmentAttributes {
        start: StartPose {
            position: [500.0, 40.0],
            heading: 0.0,
        },
        sensor: SensorAttributes {
            ray_count,
            range: 1.0,
        },
        ..Default::default()
    };
    Environment::new(&corridor(), &attributes).unwrap()
}

/// Test that the observation measures the distance to the walls on each side.
#[test]
fn observes_corridor_walls() {
    let mut env = environment(4);
    let observation = env.reset();

    assert_eq!(observation.len(), 4);
    assert_eq!(observation[0], NO_HIT_DISTANCE);
    assert_approx_eq!(observation[1], 60.0);
    assert_eq!(observation[2], NO_HIT_DISTANCE);
    assert_approx_eq!(observation[3], 40.0);
}

/// Test that the observation follows the vehicle as it moves.
#[test]
fn observation_tracks_vehicle() {
    let mut env = environment(4);
    env.reset();
    let forward = Action::new(Longitudinal::Forward, Lateral::Straight);
    for _ in 0..3 {
        env.step(forward, 0.1).unwrap();
    }

    let vehicle = env.vehicle();
    assert_eq!(env.sensor().origin(), vehicle.position());
    assert_eq!(env.sensor().heading(), vehicle.heading());
    for ray in env.sensor().rays() {
        assert_eq!(ray.origin(), vehicle.position());
    }
    assert_approx_eq!(env.observation()[1], 60.0);
}

/// Test that a diagonal ray measures the slanted distance.
#[test]
fn diagonal_rays() {
    let mut env = environment(8);
    let observation = env.reset();

    // Ray 1 looks 45 degrees clockwise of ahead, towards the far wall.
    assert_approx_eq!(observation[1], 60.0 * 2f64.sqrt());
    assert_approx_eq!(observation[7], 40.0 * 2f64.sqrt());
}

#[cfg(feature = "debug")]
fn count_named(frame: &serde_json::Value, name: &str) -> usize {
    frame
        .as_array()
        .map_or(0, |items| items.iter().filter(|item| item["name"] == name).count())
}

/// Test that the debug frame holds exactly the geometry of the last step.
#[cfg(feature = "debug")]
#[test]
fn debug_frame_holds_last_step() {
    let attributes = EnvironmentAttributes::default();
    let mut env = Environment::new(&TrackLayout::default(), &attributes).unwrap();
    let step = env.step(Action::IDLE, 0.1).unwrap();
    let hits = step.observation.iter().filter(|d| **d != NO_HIT_DISTANCE).count();
    assert_eq!(hits, env.observation_size());
    assert_eq!(count_named(&env.debug(), "ray"), hits);
    assert_eq!(count_named(&env.debug(), "vehicle"), 1);

    // Resets do not leak into the next frame.
    env.reset();
    env.reset();
    assert!(env.debug().is_null());
    env.step(Action::IDLE, 0.1).unwrap();
    assert_eq!(count_named(&env.debug(), "ray"), env.observation_size());
    assert_eq!(count_named(&env.debug(), "vehicle"), 1);

    // Nor do other environments on the same thread.
    let mut other = Environment::new(&TrackLayout::default(), &attributes).unwrap();
    other.reset();
    env.step(Action::IDLE, 0.1).unwrap();
    assert_eq!(count_named(&env.debug(), "ray"), env.observation_size());
}
