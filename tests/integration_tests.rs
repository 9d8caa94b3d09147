//! Integration tests for the session lifecycle and rules through the public API

use force_tetris::core::{EngineConfig, FnRandom, GameState, RandomSource};
use force_tetris::types::{
    GameAction, Mode, PieceKind, SessionStatus, BOARD_HEIGHT, BOARD_WIDTH, LOCK_DELAY_MS, TICK_MS,
};

fn zero() -> f64 {
    0.0
}

/// Deals I, Z, T, S, O, L, J every bag
fn scripted() -> GameState<FnRandom<fn() -> f64>> {
    GameState::with_random(EngineConfig::default(), FnRandom(zero as fn() -> f64))
}

fn fill_row<R: RandomSource>(state: &mut GameState<R>, y: i8, holes: &[i8]) {
    for x in 0..BOARD_WIDTH as i8 {
        if !holes.contains(&x) {
            state.board_mut().set(x, y, Some(PieceKind::L));
        }
    }
}

#[test]
fn test_game_lifecycle() {
    let mut state = GameState::new(12345);
    assert_eq!(state.status(), SessionStatus::Waiting);
    assert!(state.active().is_none());

    let public = state.start(None);
    assert!(public.running);
    assert!(public.playable());
    assert!(public.active.is_some());
    assert!(!public.game_over);
    assert!(!public.paused);

    state.stop();
    assert_eq!(state.status(), SessionStatus::Waiting);
    assert!(!state.apply_action(GameAction::MoveLeft));
}

#[test]
fn test_same_seed_same_game() {
    let mut a = GameState::new(2024);
    let mut b = GameState::new(2024);
    a.start(None);
    b.start(None);

    for _ in 0..30 {
        a.apply_action(GameAction::MoveLeft);
        b.apply_action(GameAction::MoveLeft);
        a.apply_action(GameAction::HardDrop);
        b.apply_action(GameAction::HardDrop);
        a.tick(TICK_MS);
        b.tick(TICK_MS);
    }

    assert_eq!(a.public_state(), b.public_state());
    assert_eq!(a.pull_events(), b.pull_events());
}

#[test]
fn test_game_pause() {
    let mut state = GameState::new(12345);
    state.start(None);

    assert!(state.apply_action(GameAction::Pause));
    assert!(state.paused());
    assert!(state.running());
    assert!(!state.public_state().playable());

    // Time does not pass while paused
    let before = state.active();
    state.tick(10_000);
    assert_eq!(state.active(), before);

    assert!(state.apply_action(GameAction::Pause));
    assert!(!state.paused());
}

#[test]
fn test_hold_once_per_lock() {
    let mut state = scripted();
    state.start(None);

    assert!(state.apply_action(GameAction::Hold));
    assert_eq!(state.hold_piece(), Some(PieceKind::I));
    assert!(!state.apply_action(GameAction::Hold));

    state.apply_action(GameAction::HardDrop);
    assert!(state.can_hold());
    assert!(state.apply_action(GameAction::Hold));
    assert_eq!(state.active().map(|p| p.kind), Some(PieceKind::I));
}

#[test]
fn test_line_clear_through_hard_drop() {
    let mut state = scripted();
    state.start(None);
    // I spawns over columns 3..=6; leave exactly that gap
    fill_row(&mut state, 19, &[3, 4, 5, 6]);

    let outcome = state.hard_drop();
    let lock = outcome.lock.unwrap();
    assert_eq!(lock.cleared_rows.as_slice(), &[19]);
    assert_eq!(state.lines(), 1);
    assert_eq!(state.score(), 2 * 19 + 100);
    assert_eq!(state.combo(), 0);
    assert!(state.board().is_empty());
}

#[test]
fn test_tetris_and_back_to_back() {
    let mut state = scripted();
    state.start(None);

    state.apply_line_clear(4);
    assert_eq!(state.score(), 800);
    assert!(state.back_to_back());

    state.apply_line_clear(4);
    // 800 base, 400 back-to-back, 50 combo
    assert_eq!(state.score(), 800 + 1250);
}

#[test]
fn test_two_singles_build_combo() {
    let mut state = scripted();
    state.start(None);
    assert_eq!(state.combo(), -1);
    state.apply_line_clear(1);
    assert_eq!(state.combo(), 0);
    state.apply_line_clear(1);
    assert_eq!(state.combo(), 1);
    state.apply_line_clear(0);
    assert_eq!(state.combo(), -1);
}

#[test]
fn test_defeat_on_full_board() {
    let mut state = scripted();
    state.start(None);
    for y in 0..BOARD_HEIGHT as i8 {
        fill_row(&mut state, y, &[]);
    }

    assert!(!state.spawn_piece());
    let public = state.public_state();
    assert_eq!(public.status, SessionStatus::Defeat);
    assert!(!public.running);
    assert!(public.game_over);
    assert!(public.active.is_none());
    assert!(public.ghost.is_none());
    assert!(state
        .pull_events()
        .iter()
        .any(|e| e == "Mission failed. The fleet was overrun."));

    // Restart recovers
    let public = state.start(None);
    assert!(public.playable());
    assert_eq!(public.filled_cells(), 0);
}

#[test]
fn test_stacking_to_the_top_ends_the_game() {
    let mut state = GameState::new(7);
    state.start(None);

    for _ in 0..200 {
        if state.game_over() {
            break;
        }
        state.apply_action(GameAction::HardDrop);
    }

    assert!(state.game_over());
    assert!(state.active().is_none());
    assert!(!state.apply_action(GameAction::HardDrop));
}

#[test]
fn test_lock_delay_through_ticks() {
    let mut state = scripted();
    state.start(None);
    while state.soft_drop().moved {}

    let mut elapsed = 0;
    while elapsed + TICK_MS < LOCK_DELAY_MS {
        assert!(!state.tick(TICK_MS).locked);
        elapsed += TICK_MS;
    }
    assert_eq!(state.active().map(|p| p.kind), Some(PieceKind::I));

    let outcome = state.tick(TICK_MS);
    assert!(outcome.locked);
    assert_eq!(state.active().map(|p| p.kind), Some(PieceKind::Z));
}

#[test]
fn test_force_blast_end_to_end() {
    let mut state = scripted();
    state.start(None);

    // Two tetrises charge the meter past full
    state.apply_line_clear(4);
    assert!(!state.force().ready());
    state.apply_line_clear(4);
    assert!(state.force().ready());
    assert!(state
        .pull_events()
        .iter()
        .any(|e| e.starts_with("Force ability charged")));

    fill_row(&mut state, 19, &[9]);
    fill_row(&mut state, 18, &[8, 9]);
    let score = state.score();

    assert!(state.apply_action(GameAction::ActivateForce));
    assert_eq!(state.lines(), 9);
    // 220 + 30 per level
    assert_eq!(state.score(), score + 250);
    assert_eq!(state.board().row_fill(19), 8);
    assert_eq!(state.board().row_fill(18), 0);
    assert_eq!(state.force().value(), 0.0);
    assert!(!state.force().ready());
    assert_eq!(state.force().uses(), 1);
    assert_eq!(state.combo(), -1);
    assert!(!state.back_to_back());
    assert!(state
        .pull_events()
        .iter()
        .any(|e| e == "Force blast successful. Enemy lane erased."));

    // Spent: a second activation does nothing
    assert!(!state.apply_action(GameAction::ActivateForce));
}

#[test]
fn test_empire_mode_is_faster() {
    let mut standard = GameState::new(1);
    standard.start(Some(Mode::Standard));
    let mut empire = GameState::new(1);
    empire.start(Some(Mode::Empire));

    assert!(empire.drop_interval_ms() < standard.drop_interval_ms());

    // 700ms moves the Empire piece (656ms interval) but not the standard one (800ms)
    assert!(empire.tick(700).moved);
    assert!(!standard.tick(700).moved);
}

#[test]
fn test_config_from_json_drives_session() {
    let config = EngineConfig::from_json(r#"{"mode":"empire","lockDelayMs":100}"#).unwrap();
    let mut state = GameState::with_config(config, 3);
    state.start(None);
    assert_eq!(state.mode(), Mode::Empire);
    assert_eq!(state.config().lock_delay_ms, 100);
    assert_eq!(state.config().lock_reset_limit, 15);

    while state.soft_drop().moved {}
    assert!(!state.tick(99).locked);
    assert!(state.tick(1).locked);
}
