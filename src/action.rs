//! The discrete control inputs of a vehicle.

use crate::error::Error;

/// The number of actions in the categorical action set.
pub const ACTION_COUNT: usize = 12;

/// The longitudinal intent of an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Longitudinal {
    /// No input; the vehicle rolls to a stop.
    Coast,
    Forward,
    Backward,
    Brake,
}

/// The lateral intent of an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Lateral {
    /// Snaps the steering back to the centre.
    Straight,
    Left,
    Right,
}

/// A control input, made up of one longitudinal and one lateral intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Action {
    pub longitudinal: Longitudinal,
    pub lateral: Lateral,
}

impl Action {
    /// Every action, in index order.
    pub const ALL: [Action; ACTION_COUNT] = {
        use Lateral::*;
        use Longitudinal::*;
        [
            Action::new(Coast, Straight),
            Action::new(Forward, Straight),
            Action::new(Backward, Straight),
            Action::new(Coast, Left),
            Action::new(Coast, Right),
            Action::new(Brake, Straight),
            Action::new(Forward, Left),
            Action::new(Forward, Right),
            Action::new(Backward, Left),
            Action::new(Backward, Right),
            Action::new(Brake, Left),
            Action::new(Brake, Right),
        ]
    };

    /// No input at all.
    pub const IDLE: Action = Action::new(Longitudinal::Coast, Lateral::Straight);

    /// Creates an action from its intents.
    pub const fn new(longitudinal: Longitudinal, lateral: Lateral) -> Self {
        Self {
            longitudinal,
            lateral,
        }
    }

    /// The categorical index of the action.
    pub fn index(&self) -> usize {
        use Lateral::*;
        use Longitudinal::*;
        match (self.longitudinal, self.lateral) {
            (Coast, Straight) => 0,
            (Forward, Straight) => 1,
            (Backward, Straight) => 2,
            (Coast, Left) => 3,
            (Coast, Right) => 4,
            (Brake, Straight) => 5,
            (Forward, Left) => 6,
            (Forward, Right) => 7,
            (Backward, Left) => 8,
            (Backward, Right) => 9,
            (Brake, Left) => 10,
            (Brake, Right) => 11,
        }
    }
}

impl Default for Action {
    fn default() -> Self {
        Self::IDLE
    }
}

impl TryFrom<usize> for Action {
    type Error = Error;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(Error::InvalidAction(index))
    }
}
