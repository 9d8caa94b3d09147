//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the Force Tetris rules engine: board, pieces,
//! randomizer, scoring, lock delay, hold and the Force ability. It has no
//! dependencies on rendering, input devices, networking or clocks, making it:
//!
//! - **Deterministic**: Same seed (or injected random source) produces identical games
//! - **Testable**: Every rule is reachable through plain method calls
//! - **Portable**: Can run in any host (terminal, browser bridge, headless bot)
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 board with collision detection, line clearing and row removal
//! - [`pieces`]: Tetromino shape matrices and SRS rotation with wall kicks
//! - [`rng`]: Random sources and the 7-bag piece queue
//! - [`scoring`]: Line, spin, combo, back-to-back, speed curve, force charge and ranks
//! - [`lock_delay`]: Grounded-piece countdown with a reset budget
//! - [`force`]: The Force meter
//! - [`events`]: Bounded narrative event log
//! - [`game_state`]: Session lifecycle, intents, tick and the lock sequence
//! - [`snapshot`]: Public state handed to collaborators
//! - [`config`]: Per-session tunables loaded from JSON
//!
//! # Game Rules
//!
//! - **7-Bag Randomizer**: Every run of seven pieces holds each kind exactly once
//! - **SRS Rotation**: Guideline wall kicks for all pieces; O never rotates
//! - **Lock Delay**: 500ms before a grounded piece locks, with 15 move/rotate resets
//! - **Hold**: Store one piece for later use (once per lock)
//! - **T-Spin Detection**: 3-corner rule after a rotation
//! - **Force**: Drops and clears charge a meter; a full meter erases the fullest row
//! - **Modes**: Standard, or Empire with an 18% faster gravity curve
//!
//! # Example
//!
//! ```
//! use force_tetris_core::GameState;
//! use force_tetris_types::GameAction;
//!
//! // Create and start a game
//! let mut game = GameState::new(12345);
//! game.start(None);
//!
//! // Apply game actions
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! // Check game state
//! assert!(game.score() > 0); // Hard drop awards points
//! ```
//!
//! # Timing
//!
//! The engine never reads a clock. The host calls
//! [`GameState::tick`](game_state::GameState::tick) with elapsed milliseconds,
//! typically every 16ms.
//! - **Gravity**: 800ms per row at level 1, down to 33ms at level 20
//! - **Lock Delay**: counts down only while the piece rests

pub mod board;
pub mod config;
pub mod events;
pub mod force;
pub mod game_state;
pub mod lock_delay;
pub mod outcome;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use force_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::EngineConfig;
pub use events::EventLog;
pub use force::ForceMeter;
pub use game_state::GameState;
pub use lock_delay::LockDelay;
pub use outcome::{DropOutcome, ForceOutcome, HardDropOutcome, LockOutcome, TickOutcome};
pub use pieces::{try_rotate, ShapeMatrix, Tetromino};
pub use rng::{FnRandom, PieceQueue, RandRandom, RandomSource, SimpleRng};
pub use scoring::{calculate_drop_score, calculate_score, ScoreResult};
pub use snapshot::{PieceSnapshot, PublicState};
