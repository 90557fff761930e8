use thiserror::Error;

use crate::action::ACTION_COUNT;

/// Errors raised when the simulation is constructed or driven incorrectly.
///
/// These are caller bugs rather than runtime conditions: every operation in the
/// simulation is deterministic, so retrying with the same input fails the same way.
#[derive(Debug, Error)]
pub enum Error {
    #[error("action index {0} is outside the action set (0..{})", ACTION_COUNT)]
    InvalidAction(usize),
    #[error("a track needs at least two rails, got {0}")]
    TooFewRails(usize),
    #[error("rail {rail} has {points} waypoints but at least two are required")]
    RailTooShort { rail: usize, points: usize },
    #[error("the perception sensor needs at least one ray")]
    NoRays,
    #[error("attribute `{name}` has invalid value {value}")]
    InvalidAttribute { name: &'static str, value: f64 },
    #[error("timestep must be finite and non-negative, got {0}")]
    InvalidTimestep(f64),
    #[error("the episode is over; reset the environment before stepping again")]
    EpisodeDone,
    #[cfg(feature = "serde")]
    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Checks that a physical constant is finite and strictly positive.
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<(), Error> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidAttribute { name, value })
    }
}
