//! Property/invariant tests for the rules engine.
//!
//! Generated seeds, boards and action sequences must never break:
//! - collision: a placement collides iff some cell leaves the side walls or
//!   floor, or lands on a filled in-board cell
//! - every run of seven dealt pieces is a full bag
//! - no full row survives a lock
//! - counters only grow, level follows lines, combo stays >= -1
//! - an active piece exists exactly while the session is not lost

use std::collections::HashSet;

use force_tetris::core::{Board, GameState, PieceQueue, ShapeMatrix};
use force_tetris::types::{
    GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, FORCE_MAX, LINES_PER_LEVEL, MAX_LEVEL,
    NEXT_QUEUE_LEN,
};
use proptest::prelude::*;

const ACTIONS: [GameAction; 8] = [
    GameAction::MoveLeft,
    GameAction::MoveRight,
    GameAction::SoftDrop,
    GameAction::HardDrop,
    GameAction::RotateCw,
    GameAction::RotateCcw,
    GameAction::Hold,
    GameAction::ActivateForce,
];

fn board_from_bits(bits: &[bool]) -> Board {
    let mut board = Board::new();
    for (i, &filled) in bits.iter().enumerate() {
        if filled {
            let x = (i % BOARD_WIDTH as usize) as i8;
            let y = (i / BOARD_WIDTH as usize) as i8;
            board.set(x, y, Some(PieceKind::S));
        }
    }
    board
}

proptest! {
    #[test]
    fn collision_matches_cell_rule(
        bits in proptest::collection::vec(any::<bool>(), 200),
        kind_idx in 0usize..7,
        turns in 0usize..4,
        x in -4i8..12,
        y in -5i8..22,
    ) {
        let board = board_from_bits(&bits);
        let shape = (0..turns).fold(ShapeMatrix::spawn(PieceKind::ALL[kind_idx]), |m, _| m.rotated(true));

        let expected = shape.cells().any(|(dx, dy)| {
            let (cx, cy) = (x + dx, y + dy);
            cx < 0
                || cx >= BOARD_WIDTH as i8
                || cy >= BOARD_HEIGHT as i8
                || (cy >= 0 && board.is_occupied(cx, cy))
        });
        prop_assert_eq!(board.collides(&shape, x, y), expected);
    }

    #[test]
    fn every_bag_is_complete(seed in any::<u32>(), bags in 1usize..6) {
        let mut queue = PieceQueue::new(seed);
        for _ in 0..bags {
            let dealt: HashSet<PieceKind> = (0..7).map(|_| queue.next_kind()).collect();
            prop_assert_eq!(dealt.len(), 7);
            prop_assert!(queue.len() >= NEXT_QUEUE_LEN);
        }
    }

    #[test]
    fn random_play_respects_invariants(
        seed in any::<u32>(),
        script in proptest::collection::vec((0usize..ACTIONS.len(), 0u32..200), 1..300),
    ) {
        let mut game = GameState::new(seed);
        game.start(None);

        for (action_idx, elapsed) in script {
            if game.game_over() {
                break;
            }
            let before = game.public_state();

            game.apply_action(ACTIONS[action_idx]);
            game.tick(elapsed);

            let after = game.public_state();
            prop_assert!(after.score >= before.score);
            prop_assert!(after.lines >= before.lines);
            prop_assert!(after.combo >= -1);
            prop_assert_eq!(after.level, (1 + after.lines / LINES_PER_LEVEL).min(MAX_LEVEL));
            prop_assert!(after.force_meter >= 0.0 && after.force_meter <= FORCE_MAX);
            prop_assert_eq!(after.force_ready, after.force_meter >= FORCE_MAX);

            // Full rows never survive a lock
            for y in 0..BOARD_HEIGHT as usize {
                prop_assert!(!game.board().is_row_full(y));
            }

            if let Some(active) = game.active() {
                let ghost = after.ghost.unwrap();
                prop_assert_eq!(ghost.x, active.x);
                prop_assert!(ghost.y >= active.y);
            } else {
                prop_assert!(game.game_over());
            }
        }
    }
}
