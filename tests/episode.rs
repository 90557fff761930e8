//! Tests that drive whole episodes through the environment.

use assert_approx_eq::assert_approx_eq;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use track_sim::{
    math::Point2d, Action, Environment, EnvironmentAttributes, Error, Lateral, Longitudinal,
    StartPose, TrackLayout,
};

const DT: f64 = 0.1;
const FORWARD: Action = Action::new(Longitudinal::Forward, Lateral::Straight);

/// A straight corridor between y = 0 and y = 100, with a gate every 100 units along x.
fn corridor(gates: usize) -> TrackLayout {
    let rail = |y: f64| -> Vec<[f64; 2]> { (0..=gates).map(|i| [100.0 * i as f64, y]).collect() };
    TrackLayout::new(vec![rail(0.0), rail(100.0)])
}

fn environment(layout: &TrackLayout, x: f64, y: f64, heading: f64) -> Environment {
    let attributes = EnvironmentAttributes {
        start: StartPose {
            position: [x, y],
            heading,
        },
        ..Default::default()
    };
    Environment::new(layout, &attributes).unwrap()
}

/// Test that an idle vehicle at rest stays put.
#[test]
fn idle_vehicle_stays_put() {
    let mut env = environment(&corridor(10), 50.0, 50.0, 0.0);
    env.reset();
    let step = env.step(Action::IDLE, DT).unwrap();

    assert_eq!(env.vehicle().vel(), 0.0);
    assert_eq!(env.vehicle().position(), Point2d::new(50.0, 50.0));
    assert_eq!(step.reward, 0.0);
    assert!(!step.done);
}

/// Test that a zero timestep leaves the vehicle where it is.
#[test]
fn zero_timestep_does_not_move() {
    let mut env = environment(&corridor(10), 50.0, 50.0, 0.0);
    for _ in 0..3 {
        env.step(FORWARD, DT).unwrap();
    }
    let before = (env.vehicle().position(), env.vehicle().vel(), env.vehicle().heading());

    let step = env.step(FORWARD, 0.0).unwrap();
    assert_eq!(
        (env.vehicle().position(), env.vehicle().vel(), env.vehicle().heading()),
        before
    );
    assert_eq!(step.reward, 0.0);
    assert!(!step.done);

    let step = env.step(Action::IDLE, 0.0).unwrap();
    assert_eq!(env.vehicle().position(), before.0);
    assert_eq!(env.vehicle().vel(), before.1);
    assert!(!step.done);
}

/// Test that crossing the active gate pays out and activates the next one.
#[test]
fn crossing_a_gate() {
    // The front of the vehicle sits just short of the gate at x = 100.
    let mut env = environment(&corridor(10), 83.0, 50.0, 0.0);
    assert_eq!(env.gates().current_index(), Some(1));

    let step = env.step(FORWARD, DT).unwrap();
    assert_eq!(step.reward, 50.0);
    assert!(!step.done);
    assert_eq!(env.gates().current_index(), Some(2));
    assert_eq!(env.gates().passed(), 1);

    // Still touching the consumed gate, but only the new head counts.
    let step = env.step(Action::IDLE, DT).unwrap();
    assert_eq!(step.reward, 0.0);
}

/// Test that driving into a wall ends the episode with a penalty.
#[test]
fn crashing_into_a_wall() {
    let mut env = environment(&corridor(10), 50.0, 50.0, 90.0);
    let mut last = None;
    for _ in 0..20 {
        let step = env.step(FORWARD, DT).unwrap();
        if step.done {
            last = Some(step);
            break;
        }
        assert_eq!(step.reward, 0.0);
    }

    let step = last.expect("vehicle never reached the wall");
    assert_eq!(step.reward, -50.0);
    assert!(env.vehicle().position().y < 50.0);
}

/// Test that a wall collision takes precedence over a simultaneous gate crossing.
#[test]
fn wall_beats_gate() {
    let mut env = environment(&corridor(10), 100.0, 5.0, 0.0);
    let step = env.step(Action::IDLE, DT).unwrap();

    assert!(step.done);
    assert_eq!(step.reward, -50.0);
    assert_eq!(env.gates().current_index(), Some(1));
}

/// Test that crossing the last gate finishes the episode with a bonus.
#[test]
fn crossing_the_last_gate() {
    let mut env = environment(&corridor(1), 83.0, 50.0, 0.0);
    let step = env.step(FORWARD, DT).unwrap();

    assert_eq!(step.reward, 150.0);
    assert!(step.done);
    assert!(env.gates().is_finished());
}

/// Test that a finished episode must be reset before stepping again.
#[test]
fn step_after_done_is_rejected() {
    let mut env = environment(&corridor(1), 83.0, 50.0, 0.0);
    env.step(FORWARD, DT).unwrap();
    let position = env.vehicle().position();

    assert!(matches!(env.step(FORWARD, DT), Err(Error::EpisodeDone)));
    assert_eq!(env.vehicle().position(), position);
    assert_eq!(env.frame(), 1);

    env.reset();
    assert!(!env.is_done());
    assert!(env.step(Action::IDLE, DT).is_ok());
}

/// Test that the vehicle accelerates until it reaches its top speed.
#[test]
fn accelerates_to_top_speed() {
    let mut env = environment(&corridor(10), 50.0, 50.0, 0.0);
    let mut vel = env.vehicle().vel();
    let mut reached_top = false;
    for _ in 0..25 {
        env.step(FORWARD, DT).unwrap();
        let next_vel = env.vehicle().vel();
        if reached_top {
            assert_eq!(next_vel, vel);
        } else {
            assert!(next_vel > vel);
        }
        reached_top = next_vel == env.vehicle().max_velocity();
        vel = next_vel;
    }
    assert!(reached_top);
    assert_approx_eq!(vel, 320.0);
}

/// Test that resetting twice gives the same state both times.
#[test]
fn reset_is_idempotent() {
    let mut env = environment(&corridor(10), 83.0, 50.0, 0.0);
    for _ in 0..5 {
        env.step(Action::new(Longitudinal::Forward, Lateral::Left), DT).unwrap();
    }

    let first = env.reset();
    let pose = (env.vehicle().position(), env.vehicle().heading(), env.vehicle().vel());
    let gate = env.gates().current_index();

    let second = env.reset();
    assert_eq!(first, second);
    assert_eq!(
        pose,
        (env.vehicle().position(), env.vehicle().heading(), env.vehicle().vel())
    );
    assert_eq!(gate, env.gates().current_index());
    assert_eq!(env.vehicle().steering(), 0.0);
    assert_eq!(env.frame(), 0);
}

/// Test that the speed and steering limits hold whatever the agent does.
#[test]
fn limits_hold_over_random_episodes() {
    let mut env = Environment::new(&TrackLayout::default(), &EnvironmentAttributes::default()).unwrap();
    let mut rng = rand::rngs::StdRng::from_seed(*b"Random drivers make poor racers.");
    for _ in 0..5000 {
        let action = rng.gen_range(0..env.action_count());
        let step = env.step_index(action, rng.gen_range(0.0..0.05)).unwrap();
        let vehicle = env.vehicle();
        assert!(vehicle.vel().abs() <= vehicle.max_velocity());
        assert!(vehicle.steering().abs() <= vehicle.max_steer());
        assert_eq!(step.observation.len(), env.observation_size());
        if step.done {
            env.reset();
        }
    }
}

/// Test that environments sharing a track progress independently.
#[test]
fn shared_track() {
    let layout = corridor(10);
    let first = environment(&layout, 83.0, 50.0, 0.0);
    let attributes = EnvironmentAttributes {
        start: StartPose {
            position: [83.0, 50.0],
            heading: 0.0,
        },
        ..Default::default()
    };

    let handles = (0..4)
        .map(|i| {
            let mut env = Environment::with_track(first.shared_track(), &attributes).unwrap();
            std::thread::spawn(move || {
                for _ in 0..i {
                    env.step(FORWARD, DT).unwrap();
                }
                env.gates().passed()
            })
        })
        .collect::<Vec<_>>();
    let passed = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect::<Vec<_>>();

    assert_eq!(passed, vec![0, 1, 1, 1]);
    assert_eq!(first.gates().passed(), 0);
    assert_eq!(Arc::strong_count(&first.shared_track()), 2);
}
