//! Touch input samples.
//!
//! The input collaborator produces one slice of these per tick. Samples
//! are ephemeral; nothing in this crate stores them across ticks.

use lodestone_shared::Vec2;

/// Phase of a touch within its lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchPhase {
    /// The touch was first detected this tick.
    Began,
    /// The touch moved since the previous tick.
    Moved,
    /// The touch was lifted this tick.
    Ended,
}

/// One touch as sampled by the input collaborator for the current tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchSample {
    /// Stable identifier for the finger across ticks.
    pub id: u32,
    /// Screen position this tick.
    pub position: Vec2,
    /// Screen position at the previous tick.
    ///
    /// Equal to `position` for `Began` samples.
    pub previous_position: Vec2,
    /// Phase this tick.
    pub phase: TouchPhase,
}

impl TouchSample {
    /// A touch that started this tick.
    #[must_use]
    pub const fn began(id: u32, position: Vec2) -> Self {
        Self {
            id,
            position,
            previous_position: position,
            phase: TouchPhase::Began,
        }
    }

    /// A touch that moved from `previous_position` to `position`.
    #[must_use]
    pub const fn moved(id: u32, position: Vec2, previous_position: Vec2) -> Self {
        Self {
            id,
            position,
            previous_position,
            phase: TouchPhase::Moved,
        }
    }

    /// A touch that ended at `position`.
    #[must_use]
    pub const fn ended(id: u32, position: Vec2) -> Self {
        Self {
            id,
            position,
            previous_position: position,
            phase: TouchPhase::Ended,
        }
    }

    /// Movement since the previous tick.
    #[must_use]
    pub fn delta(&self) -> Vec2 {
        self.position - self.previous_position
    }
}
