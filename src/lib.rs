//! Force Tetris (workspace facade crate).
//!
//! This package exposes `force_tetris::{core,types}` while the implementation
//! lives in dedicated crates under `crates/`.

pub use force_tetris_core as core;
pub use force_tetris_types as types;
