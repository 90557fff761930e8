use crate::action::{Action, ACTION_COUNT};
#[cfg(feature = "debug")]
use crate::debug::take_debug_frame;
use crate::debug::debug_polygon;
use crate::error::{require_positive, Error};
use crate::gates::GateSequence;
use crate::sensor::{PerceptionSensor, SensorAttributes};
use crate::track::{Track, TrackLayout};
use crate::vehicle::{Vehicle, VehicleAttributes};
use std::sync::Arc;

/// The reward magnitudes handed out by an [Environment].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Rewards {
    /// The reward for touching a wall, a negative number.
    pub wall_penalty: f64,
    /// The reward for crossing the active gate.
    pub gate_pass: f64,
    /// The extra reward for crossing the last gate.
    pub finish_bonus: f64,
}

impl Default for Rewards {
    fn default() -> Self {
        Self {
            wall_penalty: -50.0,
            gate_pass: 50.0,
            finish_bonus: 100.0,
        }
    }
}

impl Rewards {
    /// Checks that penalties are negative and rewards are positive.
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.wall_penalty.is_finite() && self.wall_penalty < 0.0) {
            return Err(Error::InvalidAttribute {
                name: "rewards.wall_penalty",
                value: self.wall_penalty,
            });
        }
        require_positive("rewards.gate_pass", self.gate_pass)?;
        require_positive("rewards.finish_bonus", self.finish_bonus)
    }
}

/// Where the vehicle starts each episode.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StartPose {
    /// The position of the centre of the vehicle.
    pub position: [f64; 2],
    /// The heading in degrees.
    pub heading: f64,
}

impl Default for StartPose {
    fn default() -> Self {
        Self {
            position: [100.0, 50.0],
            heading: 0.0,
        }
    }
}

/// The attributes of an [Environment], everything but the track geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnvironmentAttributes {
    pub start: StartPose,
    pub vehicle: VehicleAttributes,
    pub sensor: SensorAttributes,
    pub rewards: Rewards,
}

#[cfg(feature = "serde")]
impl EnvironmentAttributes {
    /// Parses the attributes from a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }
}

/// The result of one [Environment::step].
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    /// The sensed distance along each ray.
    pub observation: Vec<f64>,
    /// The reward earned this tick.
    pub reward: f64,
    /// Whether the episode is over.
    pub done: bool,
}

/// A driving environment: one vehicle on one track, chasing a sequence of gates.
///
/// An environment is driven by a single caller; independent episodes need
/// independent environments, which may share a [Track].
#[derive(Clone, Debug)]
pub struct Environment {
    /// The track walls.
    track: Arc<Track>,
    /// The checkpoint gates.
    gates: GateSequence,
    /// The vehicle being driven.
    vehicle: Vehicle,
    /// The reward magnitudes.
    rewards: Rewards,
    /// The most recent observation.
    observation: Vec<f64>,
    /// The most recent reward.
    reward: f64,
    /// Whether the episode is over.
    done: bool,
    /// The number of ticks since the last reset.
    frame: usize,
    /// Debugging information from the previously simulated frame.
    #[cfg(feature = "debug")]
    debug: serde_json::Value,
}

impl Environment {
    /// Creates an environment, building the track from its layout.
    pub fn new(layout: &TrackLayout, attributes: &EnvironmentAttributes) -> Result<Self, Error> {
        Self::with_track(Arc::new(Track::new(layout)?), attributes)
    }

    /// Creates an environment on an existing track.
    pub fn with_track(track: Arc<Track>, attributes: &EnvironmentAttributes) -> Result<Self, Error> {
        attributes.rewards.validate()?;
        let vehicle = Vehicle::new(
            &attributes.vehicle,
            &attributes.sensor,
            attributes.start.position.into(),
            attributes.start.heading,
        )?;
        let rails = track.rails();
        let gates = GateSequence::new(&rails[0], &rails[1]);
        log::debug!(
            "Created environment with {} rays, {} walls and {} gates",
            vehicle.sensor().ray_count(),
            track.boundaries().len(),
            gates.gates().len()
        );

        let mut env = Self {
            track,
            gates,
            vehicle,
            rewards: attributes.rewards,
            observation: vec![],
            reward: 0.0,
            done: false,
            frame: 0,
            #[cfg(feature = "debug")]
            debug: serde_json::Value::Null,
        };
        env.reset();
        Ok(env)
    }

    /// The number of actions in the action set.
    pub fn action_count(&self) -> usize {
        ACTION_COUNT
    }

    /// The length of an observation.
    pub fn observation_size(&self) -> usize {
        self.vehicle.sensor().ray_count()
    }

    /// Starts a new episode and returns the first observation.
    pub fn reset(&mut self) -> Vec<f64> {
        self.vehicle.reset();
        self.gates.reset();
        self.reward = 0.0;
        self.done = false;
        self.frame = 0;
        self.observation = self.sense();
        #[cfg(feature = "debug")]
        {
            take_debug_frame();
            self.debug = serde_json::Value::Null;
        }
        log::debug!("Environment reset");
        self.observation.clone()
    }

    /// Advances the simulation by one tick of `dt` seconds.
    ///
    /// Fails with [Error::EpisodeDone] once the episode is over, until [reset](Self::reset) is called.
    pub fn step(&mut self, action: Action, dt: f64) -> Result<Step, Error> {
        if self.done {
            log::warn!("Rejected step on a finished episode at frame {}", self.frame);
            return Err(Error::EpisodeDone);
        }
        if !dt.is_finite() || dt < 0.0 {
            return Err(Error::InvalidTimestep(dt));
        }

        // Drop anything another environment on this thread left behind
        #[cfg(feature = "debug")]
        take_debug_frame();

        self.vehicle.integrate(action, dt);
        self.observation = self.sense();
        self.frame += 1;
        self.reward = 0.0;

        let footprint = self.vehicle.footprint();
        debug_polygon("vehicle", &footprint.corners());
        if self.track.collides_with_walls(&footprint) {
            log::info!(
                "Crashed into a wall at frame {}, position {:?}",
                self.frame,
                self.vehicle.position()
            );
            self.done = true;
            self.reward = self.rewards.wall_penalty;
        } else {
            let crossing = self.gates.collide(&footprint);
            if crossing.crossed {
                log::debug!("Crossed gate {} at frame {}", self.gates.passed(), self.frame);
                self.reward = self.rewards.gate_pass;
            }
            if crossing.finished {
                log::info!("Finished the circuit at frame {}", self.frame);
                self.reward += self.rewards.finish_bonus;
                self.done = true;
            }
        }

        log::trace!(
            "frame {}: vel {:.2}, heading {:.2}, reward {}",
            self.frame,
            self.vehicle.vel(),
            self.vehicle.heading(),
            self.reward
        );

        #[cfg(feature = "debug")]
        {
            self.debug = take_debug_frame();
        }

        Ok(Step {
            observation: self.observation.clone(),
            reward: self.reward,
            done: self.done,
        })
    }

    /// Advances the simulation by one tick, given the categorical index of an action.
    pub fn step_index(&mut self, action: usize, dt: f64) -> Result<Step, Error> {
        self.step(Action::try_from(action)?, dt)
    }

    /// Gets the debugging information for the previously simulated frame as JSON array.
    #[cfg(feature = "debug")]
    pub fn debug(&self) -> serde_json::Value {
        self.debug.clone()
    }

    /// The track being driven on.
    pub fn track(&self) -> &Track {
        &self.track
    }

    /// A shared handle to the track, for building further environments.
    pub fn shared_track(&self) -> Arc<Track> {
        self.track.clone()
    }

    /// The checkpoint gates.
    pub fn gates(&self) -> &GateSequence {
        &self.gates
    }

    /// The vehicle being driven.
    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    /// The vehicle's sensor.
    pub fn sensor(&self) -> &PerceptionSensor {
        self.vehicle.sensor()
    }

    /// The most recent observation.
    pub fn observation(&self) -> &[f64] {
        &self.observation
    }

    /// The most recent reward.
    pub fn reward(&self) -> f64 {
        self.reward
    }

    /// Whether the episode is over.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// The number of ticks since the last reset.
    pub fn frame(&self) -> usize {
        self.frame
    }

    fn sense(&self) -> Vec<f64> {
        self.vehicle.sensor().sense(self.track.boundaries())
    }
}
