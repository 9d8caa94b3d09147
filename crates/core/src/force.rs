//! Force meter - the charge-based special ability
//!
//! The meter fills from soft drops, hard drops and line clears and saturates
//! at [`FORCE_MAX`]. A full meter makes the ability ready; firing it empties
//! the meter whether or not it found anything to blast.

use serde::Serialize;

use crate::types::FORCE_MAX;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ForceMeter {
    charge: f64,
    ready: bool,
    uses: u32,
}

impl ForceMeter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add charge. Returns true only on the call that makes the meter ready.
    pub fn charge(&mut self, amount: f64) -> bool {
        if amount <= 0.0 {
            return false;
        }
        self.charge = (self.charge + amount).min(FORCE_MAX);
        if self.charge >= FORCE_MAX && !self.ready {
            self.ready = true;
            return true;
        }
        false
    }

    /// Empty the meter after activation
    pub fn discharge(&mut self) {
        self.charge = 0.0;
        self.ready = false;
        self.uses += 1;
    }

    pub fn value(&self) -> f64 {
        self.charge
    }

    pub fn ready(&self) -> bool {
        self.ready
    }

    /// Times the ability has been fired this session
    pub fn uses(&self) -> u32 {
        self.uses
    }
}
