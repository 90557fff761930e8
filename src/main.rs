use std::time::Instant;

use track_sim::{Action, Environment, EnvironmentAttributes, Lateral, Longitudinal, TrackLayout};

/// Steers toward whichever side has more room, easing off when the way ahead is short.
fn policy(observation: &[f64]) -> Action {
    let n = observation.len();
    let ahead = observation[0];
    let left = observation[3 * n / 4];
    let right = observation[n / 4];
    let longitudinal = if ahead < 40.0 {
        Longitudinal::Brake
    } else {
        Longitudinal::Forward
    };
    let lateral = if (left - right).abs() < 5.0 {
        Lateral::Straight
    } else if left > right {
        Lateral::Left
    } else {
        Lateral::Right
    };
    Action::new(longitudinal, lateral)
}

fn main() -> Result<(), track_sim::Error> {
    const NUM_EPISODES: usize = 100;
    const MAX_FRAMES: usize = 5000;
    const DT: f64 = 0.015;

    let mut env = Environment::new(&TrackLayout::default_circuit(), &EnvironmentAttributes::default())?;

    println!("Simulating...");
    let mut frames = 0;
    let mut finished = 0;
    let mut total_reward = 0.0;
    let start = Instant::now();
    for _ in 0..NUM_EPISODES {
        let mut observation = env.reset();
        for _ in 0..MAX_FRAMES {
            let step = env.step(policy(&observation), DT)?;
            frames += 1;
            total_reward += step.reward;
            observation = step.observation;
            if step.done {
                finished += env.gates().is_finished() as usize;
                break;
            }
        }
    }
    let frame = start.elapsed() / frames.max(1) as u32;
    println!(
        "Avg. frame: {:?} over {} frames ({} of {} episodes finished, avg. reward {:.1})",
        frame,
        frames,
        finished,
        NUM_EPISODES,
        total_reward / NUM_EPISODES as f64,
    );
    Ok(())
}
