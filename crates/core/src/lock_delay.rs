//! Lock delay sub-state
//!
//! A piece that comes to rest does not lock at once: the delay is armed and
//! counts down through `tick`. Successful moves and rotations restart the
//! countdown, but only a limited number of times per piece.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum LockDelay {
    /// Piece is airborne (or nothing is active)
    #[default]
    Inactive,
    /// Piece is resting; locks when `remaining_ms` runs out
    Active {
        remaining_ms: u32,
        /// Restarts used for this piece
        resets: u8,
    },
}

impl LockDelay {
    pub fn is_active(&self) -> bool {
        matches!(self, LockDelay::Active { .. })
    }

    /// Start the countdown with no resets used. No-op when already armed.
    pub fn arm(&mut self, delay_ms: u32) {
        if !self.is_active() {
            *self = LockDelay::Active {
                remaining_ms: delay_ms,
                resets: 0,
            };
        }
    }

    pub fn disarm(&mut self) {
        *self = LockDelay::Inactive;
    }

    /// Restart the countdown after a successful move or rotation.
    ///
    /// Returns true if the timer was restarted; false when inactive or the
    /// reset limit is used up.
    pub fn refresh(&mut self, delay_ms: u32, limit: u8) -> bool {
        match self {
            LockDelay::Active {
                remaining_ms,
                resets,
            } if *resets < limit => {
                *remaining_ms = delay_ms;
                *resets += 1;
                true
            }
            _ => false,
        }
    }

    /// Count down by `elapsed_ms`; returns the time left (0 when inactive)
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        match self {
            LockDelay::Active { remaining_ms, .. } => {
                *remaining_ms = remaining_ms.saturating_sub(elapsed_ms);
                *remaining_ms
            }
            LockDelay::Inactive => 0,
        }
    }

    /// Armed and either expired or out of resets
    pub fn should_lock(&self, limit: u8) -> bool {
        match *self {
            LockDelay::Active {
                remaining_ms,
                resets,
            } => remaining_ms == 0 || resets >= limit,
            LockDelay::Inactive => false,
        }
    }

    pub fn remaining_ms(&self) -> u32 {
        match *self {
            LockDelay::Active { remaining_ms, .. } => remaining_ms,
            LockDelay::Inactive => 0,
        }
    }

    pub fn resets(&self) -> u8 {
        match *self {
            LockDelay::Active { resets, .. } => resets,
            LockDelay::Inactive => 0,
        }
    }
}
