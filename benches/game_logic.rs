use criterion::{black_box, criterion_group, criterion_main, Criterion};
use force_tetris::core::{Board, GameState, PieceQueue};
use force_tetris::types::PieceKind;

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start(None);

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            state.tick(black_box(16));
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            // Fill bottom 4 rows
            for y in 16..20 {
                for x in 0..10 {
                    board.set(x, y, Some(PieceKind::I));
                }
            }
            board.clear_full_rows();
        })
    });
}

fn bench_fullest_row(c: &mut Criterion) {
    let mut board = Board::new();
    for y in 10..20 {
        for x in 0..(y % 10) {
            board.set(x, y, Some(PieceKind::L));
        }
    }

    c.bench_function("fullest_row", |b| b.iter(|| black_box(&board).fullest_row()));
}

fn bench_piece_spawn(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start(None);

    c.bench_function("spawn_piece", |b| {
        b.iter(|| {
            state.spawn_piece();
        })
    });
}

fn bench_piece_queue(c: &mut Criterion) {
    let mut queue = PieceQueue::new(12345);

    c.bench_function("next_kind", |b| {
        b.iter(|| {
            black_box(queue.next_kind());
        })
    });
}

fn bench_move_piece(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start(None);
    let mut dx = 1;

    c.bench_function("move_piece", |b| {
        b.iter(|| {
            if !state.move_piece(dx) {
                dx = -dx;
            }
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start(None);

    c.bench_function("rotate", |b| {
        b.iter(|| {
            state.rotate(true);
        })
    });
}

fn bench_public_state(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start(None);

    c.bench_function("public_state", |b| b.iter(|| black_box(state.public_state())));
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_fullest_row,
    bench_piece_spawn,
    bench_piece_queue,
    bench_move_piece,
    bench_rotate,
    bench_public_state
);
criterion_main!(benches);
