use crate::boundary::Boundary;
use crate::math::Point2d;
use crate::vehicle::Footprint;
use std::collections::VecDeque;

/// The outcome of testing a vehicle against the active gate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GateCrossing {
    /// Whether the active gate was crossed this tick.
    pub crossed: bool,
    /// Whether that crossing consumed the last gate.
    pub finished: bool,
}

/// An ordered queue of checkpoint gates.
///
/// Only the head of the queue is active, so gates are consumed strictly in order.
#[derive(Clone, Debug)]
pub struct GateSequence {
    /// Every gate in order, the finish line first.
    gates: Vec<Boundary>,
    /// The gates yet to be crossed; the front is the active gate.
    queue: VecDeque<Boundary>,
}

impl GateSequence {
    /// Builds the gates by pairing the waypoints of two rails.
    ///
    /// The first pair is the finish line, and the remaining pairs are queued in order.
    pub fn new(left: &[Point2d], right: &[Point2d]) -> Self {
        let gates = left
            .iter()
            .zip(right)
            .map(|(a, b)| Boundary::new(*a, *b))
            .collect();
        let mut sequence = Self {
            gates,
            queue: VecDeque::new(),
        };
        sequence.reset();
        sequence
    }

    /// Every gate in order, starting with the finish line.
    pub fn gates(&self) -> &[Boundary] {
        &self.gates
    }

    /// The finish line.
    pub fn finish_line(&self) -> Option<&Boundary> {
        self.gates.first()
    }

    /// The active gate, if the sequence is not finished.
    pub fn current(&self) -> Option<&Boundary> {
        self.queue.front()
    }

    /// The index into [gates](Self::gates) of the active gate.
    pub fn current_index(&self) -> Option<usize> {
        (!self.queue.is_empty()).then(|| self.gates.len() - self.queue.len())
    }

    /// The gates yet to be crossed, starting with the active gate.
    pub fn remaining(&self) -> impl Iterator<Item = &Boundary> {
        self.queue.iter()
    }

    /// The number of gates crossed so far.
    pub fn passed(&self) -> usize {
        self.gates.len().saturating_sub(1) - self.queue.len()
    }

    /// Whether every gate has been crossed.
    pub fn is_finished(&self) -> bool {
        self.queue.is_empty()
    }

    /// Tests the footprint against the active gate, consuming the gate if it is touched.
    pub fn collide(&mut self, footprint: &Footprint) -> GateCrossing {
        let crossed = self
            .queue
            .front()
            .map_or(false, |gate| footprint.intersects(gate));
        if !crossed {
            return GateCrossing::default();
        }
        self.queue.pop_front();
        GateCrossing {
            crossed: true,
            finished: self.queue.is_empty(),
        }
    }

    /// Restores every gate and reactivates the first one after the finish line.
    pub fn reset(&mut self) {
        self.queue.clear();
        self.queue.extend(self.gates.iter().skip(1).copied());
    }
}
