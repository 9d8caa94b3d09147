//! Core types module - shared data structures and rule constants
//!
//! This crate defines the vocabulary shared by the rules engine and its
//! collaborators (renderers, input mappers, score keepers). Everything here
//! is plain data: enums, immutable tables and constants.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//!
//! Pieces may sit partly above row 0 (negative `y`) right after spawning.
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Suggested driver timestep (~60 FPS) |
//! | `LOCK_DELAY_MS` | 500 | Grace period once a piece rests on a surface |
//! | `LOCK_RESET_LIMIT` | 15 | Moves/rotations that may restart the lock timer |
//!
//! # Drop Intervals by Level
//!
//! Gravity follows a NES-like curve (`SPEED_CURVE`), indexed by `level - 1`:
//! 800ms at level 1 down to 33ms at level 19-20. Empire mode runs the same
//! curve 18% faster with a 28ms floor.
//!
//! # Examples
//!
//! ```
//! use force_tetris_types::{GameAction, Mode, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(GameAction::from_str("activateForce"), Some(GameAction::ActivateForce));
//! assert_eq!(Mode::parse("EMPIRE"), Mode::Empire);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Suggested fixed timestep for drivers (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Lock delay once a piece rests on a surface (500ms)
pub const LOCK_DELAY_MS: u32 = 500;

/// Maximum number of lock timer resets per piece (15)
pub const LOCK_RESET_LIMIT: u8 = 15;

/// Number of upcoming pieces kept visible in the next queue
pub const NEXT_QUEUE_LEN: usize = 5;

/// Default capacity of the narrative event log
pub const EVENT_LOG_CAPACITY: usize = 40;

/// Level a fresh session starts at
pub const START_LEVEL: u32 = 1;

/// Highest reachable level
pub const MAX_LEVEL: u32 = 20;

/// Lines needed per level-up
pub const LINES_PER_LEVEL: u32 = 10;

/// Drop intervals in milliseconds per row, index 0 = level 1
pub const SPEED_CURVE: [u32; 20] = [
    800, 717, 633, 550, 467, 383, 300, 217, 133, 100, 83, 83, 83, 67, 67, 67, 50, 50, 33, 33,
];

/// Empire mode runs gravity at 82% of the standard interval
pub const EMPIRE_SPEED_PERCENT: u32 = 82;

/// Floor for the Empire mode drop interval
pub const EMPIRE_MIN_INTERVAL_MS: u32 = 28;

/// Line clear scoring table, multiplied by the current level
///
/// - 1 line: 100
/// - 2 lines: 300
/// - 3 lines: 500
/// - 4 lines: 800 (Tetris)
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Per-line fallback when a clear exceeds the line table
pub const LINE_SCORE_FALLBACK: u32 = 250;

/// T-spin clear scoring table, multiplied by the current level
pub const TSPIN_SCORES: [u32; 4] = [0, 800, 1200, 1600];

/// Per-line fallback when a spin clear exceeds the spin table
pub const TSPIN_SCORE_FALLBACK: u32 = 400;

/// T-spin with no lines cleared, multiplied by the current level
pub const TSPIN_NO_LINE_SCORE: u32 = 100;

/// Combo bonus per combo step, multiplied by the current level
pub const COMBO_BASE: u32 = 50;

/// Soft drop points per cell
pub const SOFT_DROP_POINTS: u32 = 1;

/// Hard drop points per cell
pub const HARD_DROP_POINTS: u32 = 2;

/// Force meter capacity; the ability is ready when the meter is full
pub const FORCE_MAX: f64 = 100.0;

/// Force gained per successful soft drop step
pub const FORCE_SOFT_DROP: f64 = 0.5;

/// Force gained per hard-dropped cell
pub const FORCE_HARD_DROP_PER_CELL: f64 = 0.9;

/// Fixed part of the force blast score bonus
pub const FORCE_BLAST_BASE: u32 = 220;

/// Level-scaled part of the force blast score bonus
pub const FORCE_BLAST_PER_LEVEL: u32 = 30;

/// Rank thresholds: `(label, min_score, min_lines)`, best first.
///
/// A rank is reached when *either* threshold is met.
pub const RANKS: [(&str, u32, u32); 5] = [
    ("Grand Master", 22_000, 160),
    ("Jedi Knight", 13_000, 95),
    ("Commander", 8_000, 60),
    ("Squad Lead", 4_200, 30),
    ("Pilot", 1_700, 14),
];

/// Rank shown before any threshold is met
pub const BASE_RANK: &str = "Padawan";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(LOCK_DELAY_MS, 500);
        assert_eq!(LOCK_RESET_LIMIT, 15);
        assert_eq!(SPEED_CURVE.len() as u32, MAX_LEVEL);
        assert_eq!(SPEED_CURVE[0], 800);
        assert_eq!(SPEED_CURVE[19], 33);
    }

    #[test]
    fn speed_curve_never_slows_down() {
        assert!(SPEED_CURVE.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn ranks_are_ordered_best_first() {
        assert!(RANKS.windows(2).all(|w| w[0].1 > w[1].1 && w[0].2 > w[1].2));
    }

    #[test]
    fn piece_kind_parse_roundtrip() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(PieceKind::from_str("x"), None);
    }

    #[test]
    fn rotation_index_matches_cycle() {
        let mut r = Rotation::North;
        for i in 0..4 {
            assert_eq!(r.index(), i);
            assert_eq!(Rotation::from_index(i), r);
            r = r.rotate_cw();
        }
        assert_eq!(r, Rotation::North);
    }

    #[test]
    fn rotation_parse_roundtrip() {
        for i in 0..4 {
            let r = Rotation::from_index(i);
            assert_eq!(Rotation::from_str(r.as_str()), Some(r));
        }
        assert_eq!(Rotation::from_str("sideways"), None);
    }

    #[test]
    fn mode_parse_is_lenient() {
        assert_eq!(Mode::parse("empire"), Mode::Empire);
        assert_eq!(Mode::parse("Empire"), Mode::Empire);
        assert_eq!(Mode::parse("standard"), Mode::Standard);
        assert_eq!(Mode::parse("anything"), Mode::Standard);
    }

    #[test]
    fn spin_kind_from_lines() {
        assert_eq!(SpinKind::from_lines(0), SpinKind::Mini);
        assert_eq!(SpinKind::from_lines(1), SpinKind::Single);
        assert_eq!(SpinKind::from_lines(2), SpinKind::Double);
        assert_eq!(SpinKind::from_lines(3), SpinKind::Triple);
    }
}

/// The seven tetromino piece kinds
///
/// The declaration order (I, J, L, O, S, T, Z) is the canonical order the
/// 7-bag shuffles from; see [`PieceKind::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in canonical bag order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use force_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "I" => Some(PieceKind::I),
            "J" => Some(PieceKind::J),
            "L" => Some(PieceKind::L),
            "O" => Some(PieceKind::O),
            "S" => Some(PieceKind::S),
            "T" => Some(PieceKind::T),
            "Z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Uppercase letter used in snapshots and events
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }

    /// Display colour as a hex string. Presentation only; the rules never read it.
    pub fn color(&self) -> &'static str {
        match self {
            PieceKind::I => "#6be6ff",
            PieceKind::J => "#6c8dff",
            PieceKind::L => "#ff9f43",
            PieceKind::O => "#fce96a",
            PieceKind::S => "#67e79d",
            PieceKind::T => "#d38bff",
            PieceKind::Z => "#ff7171",
        }
    }
}

/// Rotation states following the Super Rotation System (SRS)
///
/// - **North**: Spawn orientation (state 0)
/// - **East**: Rotated 90° clockwise (state 1)
/// - **South**: Rotated 180° (state 2)
/// - **West**: Rotated 90° counter-clockwise (state 3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use force_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90° or 270°)
    ///
    /// # Examples
    ///
    /// ```
    /// use force_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    /// assert_eq!(Rotation::East.rotate_ccw(), Rotation::North);
    /// ```
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Rotate in the given direction
    pub fn rotate(&self, clockwise: bool) -> Self {
        if clockwise {
            self.rotate_cw()
        } else {
            self.rotate_ccw()
        }
    }

    /// SRS state number (0-3)
    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Inverse of [`Rotation::index`], taken modulo 4
    pub fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Parse rotation from string
    ///
    /// Accepts full names or single letters (case-insensitive):
    /// "north" | "n", "east" | "e", "south" | "s", "west" | "w"
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "north" | "n" => Some(Rotation::North),
            "east" | "e" => Some(Rotation::East),
            "south" | "s" => Some(Rotation::South),
            "west" | "w" => Some(Rotation::West),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Game mode. Only affects gravity speed and narrative text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Alliance Standard
    #[default]
    Standard,
    /// Empire Assault: faster gravity
    Empire,
}

impl Mode {
    /// Parse a mode name. Anything other than "empire" (case-insensitive)
    /// selects [`Mode::Standard`].
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("empire") {
            Mode::Empire
        } else {
            Mode::Standard
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Standard => "standard",
            Mode::Empire => "empire",
        }
    }
}

/// Session lifecycle
///
/// `Waiting -> Running <-> Paused`, `Running -> Defeat`. Defeat is terminal
/// until the session is reset or restarted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    #[default]
    Waiting,
    Running,
    Paused,
    Defeat,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Waiting => "waiting",
            SessionStatus::Running => "running",
            SessionStatus::Paused => "paused",
            SessionStatus::Defeat => "defeat",
        }
    }

    /// Running or paused: a session is in progress
    pub fn is_running(&self) -> bool {
        matches!(self, SessionStatus::Running | SessionStatus::Paused)
    }
}

/// Game actions that can be applied to modify game state
///
/// These are the discrete intents a collaborator forwards from whatever
/// input device it maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down (with soft drop scoring)
    SoftDrop,
    /// Instantly drop piece to lowest valid position and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Hold current piece (if available)
    Hold,
    /// Toggle pause state
    Pause,
    /// Restart the session in the current mode
    Restart,
    /// Fire the Force ability (if charged)
    ActivateForce,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use force_tetris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "hold" => Some(GameAction::Hold),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            "activateforce" => Some(GameAction::ActivateForce),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Hold => "hold",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
            GameAction::ActivateForce => "activateForce",
        }
    }
}

/// T-spin marker attached to a lock
///
/// Detection happens before the piece merges; the marker is refined by the
/// number of lines the lock cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpinKind {
    /// Spin that cleared nothing
    Mini,
    Single,
    Double,
    Triple,
}

impl SpinKind {
    /// Refine a detected spin by its cleared line count
    pub fn from_lines(lines: usize) -> Self {
        match lines {
            0 => SpinKind::Mini,
            1 => SpinKind::Single,
            2 => SpinKind::Double,
            _ => SpinKind::Triple,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpinKind::Mini => "mini",
            SpinKind::Single => "single",
            SpinKind::Double => "double",
            SpinKind::Triple => "triple",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a locked piece of that kind
pub type Cell = Option<PieceKind>;
