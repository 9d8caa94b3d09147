//! Structured results of player intents and ticks
//!
//! Nothing in the rules engine is an error: an intent that cannot happen
//! reports `moved`/`used`/`locked == false` and leaves the state untouched.

use serde::Serialize;

use crate::board::ClearedRows;
use crate::types::SpinKind;

/// What a lock did
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LockOutcome {
    /// Original indices of the cleared rows, bottom row first
    pub cleared_rows: ClearedRows,
    /// Whether the next piece could be placed; false means defeat
    pub spawned: bool,
    pub spin: Option<SpinKind>,
}

impl LockOutcome {
    pub fn cleared_count(&self) -> usize {
        self.cleared_rows.len()
    }
}

/// Result of a soft drop step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DropOutcome {
    pub moved: bool,
    /// Always false: a blocked soft drop arms the lock delay instead
    pub locked: bool,
}

/// Result of a hard drop
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct HardDropOutcome {
    /// Rows fallen before locking
    pub distance: u32,
    pub locked: bool,
    pub lock: Option<LockOutcome>,
}

/// Result of advancing time
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TickOutcome {
    /// Gravity moved the piece at least one row
    pub moved: bool,
    /// The lock delay ran out and the piece locked
    pub locked: bool,
    pub lock: Option<LockOutcome>,
}

/// Result of firing the Force ability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForceOutcome {
    pub used: bool,
    /// Row removed by the blast, if the board had any filled cell
    pub cleared_row: Option<usize>,
    pub score_bonus: u32,
}
