use serde::Serialize;

use crate::board::BoardRows;
use crate::lock_delay::LockDelay;
use crate::pieces::{ShapeMatrix, Tetromino};
use crate::types::{Mode, PieceKind, Rotation, SessionStatus, SpinKind, NEXT_QUEUE_LEN};

/// Copy of a piece placement (active or ghost)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub matrix: ShapeMatrix,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl PieceSnapshot {
    /// Absolute board positions of the occupied cells
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.matrix.cells().map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}

impl From<Tetromino> for PieceSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            matrix: value.matrix,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

/// Everything a collaborator needs to render and persist a session.
///
/// Owned, deep copy: nothing in here aliases engine state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicState {
    pub board: BoardRows,
    pub active: Option<PieceSnapshot>,
    /// Where the active piece would come to rest if hard dropped
    pub ghost: Option<PieceSnapshot>,
    pub next_queue: [PieceKind; NEXT_QUEUE_LEN],
    pub hold: Option<PieceKind>,
    pub can_hold: bool,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub combo: i32,
    pub back_to_back: bool,
    pub force_meter: f64,
    pub force_ready: bool,
    pub force_uses: u32,
    pub rank: &'static str,
    pub mode: Mode,
    pub status: SessionStatus,
    pub running: bool,
    pub paused: bool,
    pub game_over: bool,
    pub drop_interval_ms: u32,
    /// Spin marker of the most recent lock
    pub spin: Option<SpinKind>,
    pub lock_delay: LockDelay,
}

impl PublicState {
    pub fn playable(&self) -> bool {
        self.status == SessionStatus::Running
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Number of filled board cells
    pub fn filled_cells(&self) -> usize {
        self.board.iter().flatten().filter(|c| c.is_some()).count()
    }
}
